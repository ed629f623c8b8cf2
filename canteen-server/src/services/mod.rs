//! 服务层 - 服务器核心服务
//!
//! # 服务列表
//!
//! - [`HttpService`] - HTTP 服务器
//! - [`Notifier`] - Webhook 告警服务

pub mod http;
pub mod notify;

pub use http::HttpService;
pub use notify::Notifier;
