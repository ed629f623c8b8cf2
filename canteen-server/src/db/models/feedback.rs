//! Feedback Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Feedback ID type
pub type FeedbackId = RecordId;

/// Feedback model matching SurrealDB schema
///
/// `food_item` 是可选的记录链接：无链接表示一般性反馈。
/// 数据库字段名为 `food_item`，API JSON 中以 `food_item_id` 输出。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<FeedbackId>,
    pub student_name: String,
    #[serde(
        default,
        rename = "food_item_id",
        alias = "food_item",
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub food_item: Option<RecordId>,
    pub rating: u8,
    pub message: String,
    /// Unix 毫秒时间戳，服务端分配
    pub created_at: i64,
}

/// Feedback with the referenced food item's name projected in
///
/// 由 `SELECT *, food_item.name AS food_item_name` 产生，
/// 供管理端列表和报表导出使用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackDetail {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<FeedbackId>,
    pub student_name: String,
    #[serde(
        default,
        rename = "food_item_id",
        alias = "food_item",
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub food_item: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_item_name: Option<String>,
    pub rating: u8,
    pub message: String,
    pub created_at: i64,
}

/// Create feedback payload
///
/// `student_name` 来自会话身份，不接受客户端提交的值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackCreate {
    pub student_name: String,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub food_item: Option<RecordId>,
    pub rating: u8,
    pub message: String,
}
