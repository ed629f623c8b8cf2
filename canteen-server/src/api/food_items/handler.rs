//! Food Item Handlers
//!
//! 菜品的查询和录入。录入时校验 name/category/quantity，
//! 成功后通过 Notifier 推送上新与低库存告警 (不阻塞请求)。

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::api::AppResult;
use crate::api::filter::ListFilter;
use crate::core::ServerState;
use crate::db::models::{FoodItem, FoodItemCreate};
use crate::db::repository::FoodItemRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text};

/// Meal sessions accepted by the creation endpoint
const CATEGORIES: &[&str] = &["morning", "lunch", "dinner"];

/// List response wrapper
#[derive(Debug, Serialize)]
pub struct FoodItemListResponse {
    pub items: Vec<FoodItem>,
}

/// Create request payload
#[derive(Debug, Deserialize)]
pub struct CreateFoodItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    /// Defaults to 1 when absent
    pub quantity: Option<i64>,
    pub image: Option<String>,
}

/// List food items matching the optional filters, newest first (public)
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Json<FoodItemListResponse>> {
    let resolved = filter.resolve()?;
    let repo = FoodItemRepository::new(state.get_db());
    let items = repo.find_filtered(&resolved).await?;
    Ok(Json(FoodItemListResponse { items }))
}

/// Get a single food item by id (public)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<FoodItem>> {
    let repo = FoodItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item not found: {}", id)))?;
    Ok(Json(item))
}

/// Create a food item (admin only)
///
/// category 在录入时强制为 morning/lunch/dinner 三选一
/// (存储层保持自由文本)。
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateFoodItemRequest>,
) -> AppResult<(StatusCode, Json<FoodItem>)> {
    let name = req.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Name is required."));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "Name exceeds {} characters (got {})",
            MAX_NAME_LEN,
            name.len()
        )));
    }

    let category = req.category.as_deref().unwrap_or("").trim().to_lowercase();
    if !CATEGORIES.contains(&category.as_str()) {
        return Err(AppError::validation(
            "Category must be morning, lunch, or dinner.",
        ));
    }

    let quantity = req.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1."));
    }

    validate_optional_text(&req.image, "Image", MAX_URL_LEN)?;
    let image = req
        .image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let repo = FoodItemRepository::new(state.get_db());
    let item = repo
        .create(FoodItemCreate {
            name,
            category,
            quantity,
            image,
        })
        .await?;

    state.notifier.send(format!(
        "New menu item published: {} ({}) qty={}.",
        item.name, item.category, item.quantity
    ));
    if item.quantity <= state.config.low_stock_threshold {
        state.notifier.send(format!(
            "Low stock alert: {} has quantity {}.",
            item.name, item.quantity
        ));
    }

    tracing::info!(
        name = %item.name,
        category = %item.category,
        quantity = item.quantity,
        "Food item created"
    );

    Ok((StatusCode::CREATED, Json(item)))
}
