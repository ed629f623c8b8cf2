//! 核心装配 - 配置读取、运行态构建与顶层错误
//!
//! 启动流程: [`Config`] 读取环境变量, [`ServerState::initialize`]
//! 打开数据库并装配路由, [`Server::run`] 绑定端口直到收到退出信号。

pub mod config;
pub mod error;
pub mod state;
pub mod server;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
