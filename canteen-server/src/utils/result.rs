//! 通用 Result 别名

use crate::AppError;

/// handler 和业务逻辑共用的 Result 类型
pub type AppResult<T> = Result<T, AppError>;
