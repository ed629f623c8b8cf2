//! Food Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Food item ID type
pub type FoodItemId = RecordId;

/// Food item model matching SurrealDB schema
///
/// 只追加的历史记录：创建后不再更新或删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<FoodItemId>,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    /// 图片 URL，可为空字符串
    #[serde(default)]
    pub image: String,
    /// Unix 毫秒时间戳，服务端分配
    pub created_at: i64,
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub image: Option<String>,
}
