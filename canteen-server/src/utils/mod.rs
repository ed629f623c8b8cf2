//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResponse`] - 应用错误类型与响应结构
//! - 日志、时间、输入验证等工具

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResponse};
pub use result::AppResult;
