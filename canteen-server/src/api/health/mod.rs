//! 健康检查路由
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "checks": {
//!     "database": { "status": "ok", "latency_ms": 1 }
//!   }
//! }
//! ```

use std::time::SystemTime;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 无需认证的公开端点
pub fn router() -> Router<ServerState> {
    // Pin the start time when the router is built at startup
    STARTED_AT.get_or_init(SystemTime::now);

    Router::new().route("/api/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (healthy | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 自进程启动以来的秒数
    uptime_seconds: u64,
    /// 分组件探测结果
    checks: HealthChecks,
}

/// 各组件的探测结果集
#[derive(Serialize)]
pub struct HealthChecks {
    /// 嵌入式数据库连通性
    database: CheckResult,
}

/// 单项探测结果
#[derive(Serialize)]
pub struct CheckResult {
    /// ok 或 error
    status: &'static str,
    /// 探测耗时 (毫秒)
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    /// 失败原因
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            message: None,
            latency_ms: Some(latency_ms),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
            latency_ms: None,
        }
    }
}

// 服务器启动时间 (构建路由时固定)
static STARTED_AT: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn uptime_secs() -> u64 {
    let started = STARTED_AT.get_or_init(SystemTime::now);
    match SystemTime::now().duration_since(*started) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(_) => 0,
    }
}

/// 健康检查 - 进程存活 + 数据库连通性
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let probe = std::time::Instant::now();
    let db_check = match state.get_db().query("RETURN 1").await {
        Ok(_) => CheckResult::ok_with_latency(probe.elapsed().as_millis() as u64),
        Err(e) => CheckResult::error(format!("Database error: {}", e)),
    };

    let healthy = db_check.status == "ok";

    Json(HealthResponse {
        version: env!("CARGO_PKG_VERSION"),
        status: if healthy { "healthy" } else { "degraded" },
        uptime_seconds: uptime_secs(),
        checks: HealthChecks { database: db_check },
    })
}
