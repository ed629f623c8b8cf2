//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`upload`] - 图片上传接口
//! - [`food_items`] - 菜品记录接口
//! - [`feedback`] - 学生反馈接口
//! - [`analytics`] - 反馈统计接口
//! - [`reports`] - CSV/PDF 报表导出接口
//! - [`accounts`] - 账号开通接口
//!
//! 过滤参数的解析统一在 [`filter`] 完成，repository 只接收解析后的值。

pub mod filter;

pub mod auth;
pub mod health;
pub mod upload;

// Data APIs
pub mod accounts;
pub mod analytics;
pub mod feedback;
pub mod food_items;
pub mod reports;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
