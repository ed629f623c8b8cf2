//! Feedback Analytics API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::Role;

/// Analytics router (admin only)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/analytics/feedback", get(handler::feedback_analytics))
        .layer(middleware::from_fn(require_role(Role::Admin)))
}
