//! Account Provisioning API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::Role;

/// Account router (admin only)
///
/// 没有自助注册：除启动时播种的管理员外，
/// 所有账号都由管理员在这里开通。
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/accounts",
            get(handler::list).post(handler::create),
        )
        .layer(middleware::from_fn(require_role(Role::Admin)))
}
