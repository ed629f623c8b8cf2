//! Repository Module
//!
//! 每个表一个 repository，持有共享的数据库句柄，
//! 只做查询和插入 (历史记录不更新、不删除)。

pub mod account;
pub mod feedback;
pub mod food_item;

// Re-exports
pub use account::AccountRepository;
pub use feedback::FeedbackRepository;
pub use food_item::FoodItemRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// 存储层错误
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database failure: {0}")]
    Database(String),

    #[error("Invalid data: {0}")]
    Validation(String),
}

/// 存储层 Result 别名
pub type RepoResult<T> = Result<T, RepoError>;

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Repository errors map onto the HTTP error taxonomy at the handler
/// boundary, so handlers can use `?` on repository calls.
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== ID 约定 ==========
//
// 全栈统一 "table:key" 字符串形式，类型上用 surrealdb::RecordId：
// "food_item:abc".parse::<RecordId>() 解析，id.key() 取纯 key，
// db.select((table, key)) 做点查。切勿手拼 Thing 结构。

/// Normalized history filter consumed by the list queries
///
/// 由 API 层从查询参数解析而来：search 已转小写，日期已换算为
/// UTC 日界的毫秒时间戳 (from 含、to 不含)。
#[derive(Debug, Clone, Default)]
pub struct ResolvedFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub from_millis: Option<i64>,
    pub to_millis: Option<i64>,
}

/// 共享数据库句柄的基础 repository
#[derive(Clone)]
pub struct BaseRepository {
    /// 各 repository 克隆同一个连接
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// 底层数据库句柄
    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
