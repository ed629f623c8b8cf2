//! Food Item Model

use serde::{Deserialize, Serialize};

/// Menu record as served to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    /// Meal session this item was served in (morning / lunch / dinner)
    pub category: String,
    pub quantity: i64,
    /// Image URL, empty when the item has none
    #[serde(default)]
    pub image: String,
    /// Unix milliseconds, set once at creation
    pub created_at: i64,
}

/// Response wrapper for the menu list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemListResponse {
    pub items: Vec<FoodItem>,
}
