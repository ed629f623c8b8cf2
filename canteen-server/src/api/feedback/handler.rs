//! Feedback Handlers
//!
//! 学生提交评分和留言，管理员查看历史。
//! `student_name` 一律取自会话身份，不接受客户端提交的值。

use axum::{Extension, Json};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::api::AppResult;
use crate::api::filter::ListFilter;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate, FeedbackDetail};
use crate::db::repository::{FeedbackRepository, FoodItemRepository};
use crate::utils::validation::{MAX_MESSAGE_LEN, MIN_MESSAGE_LEN};

/// List response wrapper
#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub feedbacks: Vec<FeedbackDetail>,
}

/// Create request payload
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub message: Option<String>,
    pub rating: Option<i64>,
    /// Record id of the rated item, absent for general feedback
    pub food_item_id: Option<String>,
}

/// List feedback entries matching the optional filters, newest first (admin only)
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Json<FeedbackListResponse>> {
    if !user.is_admin() {
        return Err(AppError::forbidden("Admin access required."));
    }

    let resolved = filter.resolve()?;
    let repo = FeedbackRepository::new(state.get_db());
    let feedbacks = repo.find_filtered(&resolved).await?;
    Ok(Json(FeedbackListResponse { feedbacks }))
}

/// Submit a feedback entry (student only)
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateFeedbackRequest>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    if !user.is_student() {
        return Err(AppError::forbidden("Only students can submit feedback."));
    }

    let message = req.message.as_deref().unwrap_or("").trim().to_string();
    if message.is_empty() {
        return Err(AppError::validation("Feedback message is required."));
    }
    if message.len() < MIN_MESSAGE_LEN {
        return Err(AppError::validation(format!(
            "Feedback message must be at least {} characters.",
            MIN_MESSAGE_LEN
        )));
    }
    if message.len() > MAX_MESSAGE_LEN {
        return Err(AppError::validation(format!(
            "Feedback message exceeds {} characters (got {})",
            MAX_MESSAGE_LEN,
            message.len()
        )));
    }

    let rating = req
        .rating
        .ok_or_else(|| AppError::validation("Rating must be a number from 1 to 5."))?;
    if !(1..=5).contains(&rating) {
        return Err(AppError::validation("Rating must be between 1 and 5."));
    }

    // 引用的菜品必须存在 (菜品不可删除，链接建立后不会悬空)
    let food_item = match req
        .food_item_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(raw_id) => {
            let item = FoodItemRepository::new(state.get_db())
                .find_by_id(raw_id)
                .await?
                .ok_or_else(|| AppError::not_found("Selected food item is invalid."))?;
            item.id
        }
        None => None,
    };

    let repo = FeedbackRepository::new(state.get_db());
    let feedback = repo
        .create(FeedbackCreate {
            student_name: user.display_name.clone(),
            food_item,
            rating: rating as u8,
            message,
        })
        .await?;

    tracing::info!(
        student = %user.username,
        rating = rating,
        "Feedback submitted"
    );

    Ok((StatusCode::CREATED, Json(feedback)))
}
