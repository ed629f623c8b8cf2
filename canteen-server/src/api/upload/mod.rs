//! Image Upload API Module

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::Role;

/// Upload router (admin only)
///
/// 只负责接收和落盘；静态文件服务由外部 (反向代理) 提供，
/// 返回的 URL 指向 WORK_DIR/uploads 的挂载路径。
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/upload", post(handler::upload))
        .layer(middleware::from_fn(require_role(Role::Admin)))
}
