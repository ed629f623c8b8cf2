//! 统一错误处理
//!
//! [`AppError`] 是所有 handler 的错误通道，[`IntoResponse`] 把它翻译成
//! `{"code": "...", "message": "..."}` 的 JSON 错误体。成功响应不走信封，
//! handler 直接返回自己的 DTO。
//!
//! # 错误码
//!
//! | 码段 | 含义 |
//! |------|------|
//! | E3xxx | 认证与令牌 |
//! | E2xxx | 权限 |
//! | E0xxx | 业务校验 |
//! | E9xxx | 系统内部 (细节只进日志，不上线) |

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// JSON 错误响应体
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// 稳定错误码 (E 开头，客户端按码分支)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 应用错误枚举
///
/// 变体按响应类别分组：认证 (401)、权限 (403)、业务 (4xx)、系统 (500)。
/// 系统类变体携带的细节只写日志，线上只看到笼统消息。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    /// 未携带或未通过认证
    #[error("Authentication required")]
    Unauthorized,

    /// 令牌已过期
    #[error("Token expired")]
    TokenExpired,

    /// 令牌无效
    #[error("Invalid token")]
    InvalidToken,

    /// 登录失败统一消息，避免用户名枚举
    #[error("Invalid username or password")]
    InvalidCredentials,

    // ========== 权限错误 (403) ==========
    /// 角色不满足要求
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== 业务错误 (4xx) ==========
    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 资源冲突 (409)
    #[error("Resource already exists: {0}")]
    Conflict(String),

    /// 输入校验失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== 系统错误 (500) ==========
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(String),

    /// 其他内部错误
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::TokenExpired | Self::InvalidToken
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "E3001",
            Self::InvalidToken => "E3002",
            Self::TokenExpired => "E3003",
            Self::InvalidCredentials => "E3004",
            Self::Forbidden(_) => "E2001",
            Self::Validation(_) => "E0002",
            Self::NotFound(_) => "E0003",
            Self::Conflict(_) => "E0004",
            Self::Internal(_) => "E9001",
            Self::Database(_) => "E9002",
        }
    }

    /// 发给客户端的消息 (系统类错误不透出细节)
    fn client_message(&self) -> String {
        match self {
            Self::Unauthorized => "Please login first".to_string(),
            Self::TokenExpired => "Token expired".to_string(),
            Self::InvalidToken => "Invalid token".to_string(),
            Self::InvalidCredentials => "Invalid username or password".to_string(),
            Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Validation(msg) => msg.clone(),
            Self::Database(_) => "Database error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 5xx 细节进日志
        match &self {
            AppError::Database(detail) => {
                error!(target: "database", error = %detail, "Database error occurred");
            }
            AppError::Internal(detail) => {
                error!(target: "internal", error = %detail, "Internal error occurred");
            }
            _ => {}
        }

        let body = AppResponse::<()> {
            code: self.code().to_string(),
            message: self.client_message(),
            data: None,
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::validation(format!("Invalid multipart payload: {}", e))
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = read_body(response);
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn read_body(response: Response) -> Vec<u8> {
        let fut = axum::body::to_bytes(response.into_body(), usize::MAX);
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_validation_error_carries_message() {
        let (status, body) = body_json(AppError::validation("Name is required."));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "E0002");
        assert_eq!(body["message"], "Name is required.");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let (status, body) = body_json(AppError::internal("connection refused at 10.0.0.3"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "E9001");
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_credential_error_is_undifferentiated() {
        let (status, body) = body_json(AppError::invalid_credentials());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "E3004");
        assert_eq!(body["message"], "Invalid username or password");
    }
}
