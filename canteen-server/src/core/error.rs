use thiserror::Error;

/// 启动阶段的服务器错误
///
/// HTTP 请求路径上的错误使用 [`crate::utils::AppError`]，
/// 这里只覆盖启动/关闭过程。
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("配置无效: {0}")]
    Config(String),

    #[error("内部错误")]
    Internal(#[from] anyhow::Error),
}

/// 启动路径的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
