//! Feedback API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Feedback router
///
/// 同一路径上 GET 仅管理员、POST 仅学生，
/// 角色检查在 handler 内完成。
pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/feedback",
        get(handler::list).post(handler::create),
    )
}
