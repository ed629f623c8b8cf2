//! Client-related types shared between server and client
//!
//! 登录接口的请求/响应体，由 canteen-server 产出、单页客户端消费。

use serde::{Deserialize, Serialize};

use crate::models::Role;

// ========== 登录 API DTO ==========

/// 登录请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    /// 明文密码，仅在登录请求中出现
    pub password: String,
}

/// 登录成功响应 (令牌 + 用户概要)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// 签名后的 JWT
    pub token: String,
    pub user: UserInfo,
}

/// User information carried in login and `me` responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: Role,
}
