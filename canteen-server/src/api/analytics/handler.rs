//! Feedback Analytics Handler

use axum::Json;
use axum::extract::{Query, State};

use crate::analytics::{self, FeedbackAnalytics, RatingRow};
use crate::api::AppResult;
use crate::api::filter::ListFilter;
use crate::core::ServerState;
use crate::db::repository::FeedbackRepository;

/// Aggregate the (optionally filtered) feedback set
///
/// 每次请求都从存储重新计算，不做任何缓存。
pub async fn feedback_analytics(
    State(state): State<ServerState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Json<FeedbackAnalytics>> {
    let resolved = filter.resolve()?;
    let repo = FeedbackRepository::new(state.get_db());
    let feedbacks = repo.find_filtered(&resolved).await?;

    let rows: Vec<RatingRow> = feedbacks
        .into_iter()
        .map(|f| RatingRow {
            food_name: f.food_item_name,
            rating: f.rating,
        })
        .collect();

    Ok(Json(analytics::compute(&rows)))
}
