//! Canteen Server - 校园食堂记录与反馈服务
//!
//! # 架构概述
//!
//! 本模块是 Canteen Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (菜品、反馈、账号)
//! - **认证** (`auth`): JWT + Argon2 双角色认证 (student / admin)
//! - **统计** (`analytics`): 反馈评分聚合
//! - **导出** (`export`): CSV / PDF 报表渲染
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! canteen-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # JWT 认证、角色检查
//! ├── api/           # HTTP 路由和处理器
//! ├── analytics/     # 反馈统计聚合
//! ├── export/        # CSV / PDF 导出
//! ├── services/      # HTTP 服务、Webhook 告警
//! ├── utils/         # 工具函数
//! └── db/            # 数据库层
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod export;
pub mod services;
pub mod utils;

// 常用类型提升到 crate 根
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResult};

// Security logging macro - 安全事件统一走 "security" target，
// 方便日志管线单独过滤归档。至少带一个业务字段。
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($field:ident = $value:expr),+ $(,)?) => {
        tracing::info!(target: "security", level = $level, event = $event, $($field = $value),+);
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
