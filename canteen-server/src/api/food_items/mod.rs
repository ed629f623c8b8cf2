//! Food Item API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_role;
use crate::core::ServerState;
use shared::Role;

/// Food item router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/food-items", routes())
}

fn routes() -> Router<ServerState> {
    // 读取路由：公开 (学生无需登录即可查看菜单)
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // 管理路由：仅管理员可录入菜品
    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_role(Role::Admin)));

    read_routes.merge(manage_routes)
}
