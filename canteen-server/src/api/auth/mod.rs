//! 登录与会话路由

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// 认证路由
///
/// `/api/auth/login` 是唯一的公开入口；`me` 和 `logout` 依赖
/// 外层挂载的 require_auth 中间件。
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/logout", post(handler::logout))
}
