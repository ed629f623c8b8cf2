//! Report Export Handlers
//!
//! 与列表接口共用过滤语义：同一过滤条件下，导出的行数
//! 与列表返回的行数一致，顺序也一致 (新纪录在前)。

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::AppResult;
use crate::api::filter::ListFilter;
use crate::core::ServerState;
use crate::db::repository::{FeedbackRepository, FoodItemRepository};
use crate::export;

/// Wrap export bytes as a downloadable attachment
fn attachment(content_type: &'static str, filename: &'static str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Export filtered food items as CSV
pub async fn food_items_csv(
    State(state): State<ServerState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Response> {
    let resolved = filter.resolve()?;
    let items = FoodItemRepository::new(state.get_db())
        .find_filtered(&resolved)
        .await?;
    let bytes = export::csv::food_items_csv(&items)?;
    Ok(attachment("text/csv", "food_history.csv", bytes))
}

/// Export filtered food items as PDF
pub async fn food_items_pdf(
    State(state): State<ServerState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Response> {
    let resolved = filter.resolve()?;
    let items = FoodItemRepository::new(state.get_db())
        .find_filtered(&resolved)
        .await?;
    let bytes = export::pdf::food_items_pdf(&items)?;
    Ok(attachment("application/pdf", "food_history.pdf", bytes))
}

/// Export filtered feedback as CSV
pub async fn feedback_csv(
    State(state): State<ServerState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Response> {
    let resolved = filter.resolve()?;
    let feedbacks = FeedbackRepository::new(state.get_db())
        .find_filtered(&resolved)
        .await?;
    let bytes = export::csv::feedback_csv(&feedbacks)?;
    Ok(attachment("text/csv", "feedback_history.csv", bytes))
}

/// Export filtered feedback as PDF
pub async fn feedback_pdf(
    State(state): State<ServerState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Response> {
    let resolved = filter.resolve()?;
    let feedbacks = FeedbackRepository::new(state.get_db())
        .find_filtered(&resolved)
        .await?;
    let bytes = export::pdf::feedback_pdf(&feedbacks)?;
    Ok(attachment("application/pdf", "feedback_history.pdf", bytes))
}
