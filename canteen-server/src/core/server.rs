//! Server Implementation
//!
//! 装配运行态、绑定端口，驱动 HTTP 服务直至收到退出信号。

use crate::core::{Config, Result, ServerError, ServerState};

/// 进程级 HTTP 服务器
pub struct Server {
    config: Config,
    /// 预构建的运行态，None 表示 run 时自建
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            state: None,
            config,
        }
    }

    /// 复用外部构建好的运行态 (一次性导出命令与测试共享数据库句柄)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            state: Some(state),
            config,
        }
    }

    pub async fn run(&self) -> Result<()> {
        // 管理员播种凭证不能为空，否则首次建库会产生一个无法登录的账号
        if self.config.admin_username.trim().is_empty() || self.config.admin_password.is_empty() {
            return Err(ServerError::Config(
                "ADMIN_USERNAME and ADMIN_PASSWORD must not be empty".to_string(),
            ));
        }

        let state = match &self.state {
            Some(existing) => existing.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        let addr: std::net::SocketAddr = ([0, 0, 0, 0], self.config.http_port).into();
        tracing::info!("🍽️ Canteen Server starting on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        };

        state
            .http
            .start_server(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        Ok(())
    }
}
