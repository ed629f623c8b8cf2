//! Report Export API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::Role;

/// Report router (admin only)
///
/// 四个导出端点接受与列表接口相同的过滤参数，
/// 响应为附件字节流 (Content-Disposition: attachment)。
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reports/food-items.csv", get(handler::food_items_csv))
        .route("/api/reports/food-items.pdf", get(handler::food_items_pdf))
        .route("/api/reports/feedback.csv", get(handler::feedback_csv))
        .route("/api/reports/feedback.pdf", get(handler::feedback_pdf))
        .layer(middleware::from_fn(require_role(Role::Admin)))
}
