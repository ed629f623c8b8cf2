//! 数据模型

// serde 辅助 (RecordId 字符串化、bool 缺省值)
pub mod serde_helpers;

// Auth
pub mod account;

// Canteen Domain
pub mod feedback;
pub mod food_item;

// Re-exports
pub use account::{Account, AccountCreate, AccountId};
pub use feedback::{Feedback, FeedbackCreate, FeedbackDetail, FeedbackId};
pub use food_item::{FoodItem, FoodItemCreate, FoodItemId};
