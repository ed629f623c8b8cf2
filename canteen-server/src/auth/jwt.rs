//! JWT 令牌服务
//!
//! 负责令牌的签发和校验。签发的令牌绑定账号身份和角色，
//! 中间件据此构建 [`CurrentUser`]。
//!
//! 密钥来自 `JWT_SECRET` (至少 32 字符)。开发构建缺省时为本进程生成
//! 一个临时密钥；生产构建缺省直接终止启动。

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

/// 令牌签发配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// 签名密钥，至少 32 字符
    pub secret: String,
    /// 有效期 (分钟)
    pub expiration_minutes: i64,
    /// iss 声明
    pub issuer: String,
    /// aud 声明
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: resolve_secret(),
            // 默认 24 小时
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "canteen-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "canteen-clients".to_string()),
        }
    }
}

/// 读取并检查 `JWT_SECRET`
fn resolve_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => missing_secret("JWT_SECRET must be at least 32 characters long"),
        Err(_) => missing_secret("JWT_SECRET is not set"),
    }
}

/// 开发构建：生成一个仅限本进程的临时密钥
#[cfg(debug_assertions)]
fn missing_secret(reason: &str) -> String {
    tracing::warn!("⚠️  {}, generating a temporary development key", reason);
    generate_printable_secret()
}

/// 生产构建：没有可用密钥就不要起服务
#[cfg(not(debug_assertions))]
fn missing_secret(reason: &str) -> String {
    panic!("🚨 FATAL: {}", reason);
}

/// 用系统随机源生成 64 字符的可打印密钥
pub fn generate_printable_secret() -> String {
    const CHARSET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let mut bytes = [0u8; 64];
    if SystemRandom::new().fill(&mut bytes).is_err() {
        // 随机源不可用时退回固定开发密钥
        return "CanteenServerDevelopmentSecureKey!".to_string();
    }

    bytes
        .iter()
        .map(|b| CHARSET[(*b as usize) % CHARSET.len()] as char)
        .collect()
}

/// 令牌载荷
///
/// 除标准声明外携带用户名、显示名和角色，
/// 请求处理时无需再查账号表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 账号 ID (sub 声明)
    pub sub: String,
    /// 登录用户名
    pub username: String,
    /// 显示名称，反馈归属使用
    pub display_name: String,
    /// 角色 (student | admin)
    pub role: String,
    /// 令牌种类，当前固定为 "access"
    pub token_type: String,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
    /// 签发时间 (Unix 秒)
    pub iat: i64,
    /// 过期时间 (Unix 秒)
    pub exp: i64,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("令牌无效: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("签名无效")]
    InvalidSignature,

    #[error("生成令牌失败: {0}")]
    GenerationFailed(String),
}

/// HS256 令牌服务
///
/// 编解码密钥在构造时派生一次，之后按请求复用。
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    /// 由密钥派生，构造时建好后只读复用
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        let (encoding_key, decoding_key) = (
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        );
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为账号签发访问令牌
    pub fn generate_token(
        &self,
        account_id: &str,
        username: &str,
        display_name: &str,
        role: Role,
    ) -> Result<String, JwtError> {
        let issued_at = Utc::now();
        let valid_for = Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: account_id.to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            role: role.as_str().to_string(),
            token_type: "access".to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + valid_for).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    ///
    /// 除签名外同时校验 iss / aud / exp，缺少必要声明的令牌一律拒绝
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut checks = Validation::new(Algorithm::HS256);
        checks.set_audience(&[&self.config.audience]);
        checks.set_issuer(&[&self.config.issuer]);
        checks.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        match decode::<Claims>(token, &self.decoding_key, &checks) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Malformed or unverifiable token: {}", e)),
            }),
        }
    }

    /// 从 Authorization 头剥出 Bearer 令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 请求侧的已认证身份
///
/// 认证中间件验证令牌后构建，经 request extensions 传给 handler。
///
/// # 示例
///
/// ```ignore
/// async fn handler(Extension(user): Extension<CurrentUser>) -> Json<()> {
///     if user.is_admin() {
///         // 管理端操作
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 账号 ID
    pub id: String,
    /// 用户名
    pub username: String,
    /// 显示名称
    pub display_name: String,
    /// 角色
    pub role: Role,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    /// 角色字符串必须解析为已知角色，否则视为无效令牌
    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        Ok(Self {
            id: claims.sub,
            username: claims.username,
            display_name: claims.display_name,
            role,
        })
    }
}

impl CurrentUser {
    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 是否学生
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = JwtService::new();

        let token = service
            .generate_token("account:u123", "maria", "Maria Lopez", Role::Student)
            .expect("token generation");

        let claims = service.validate_token(&token).expect("token validation");

        assert_eq!(claims.sub, "account:u123");
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.display_name, "Maria Lopez");
        assert_eq!(claims.role, "student");
    }

    #[test]
    fn test_current_user_from_claims() {
        let service = JwtService::new();
        let token = service
            .generate_token("account:a1", "admin", "Canteen Admin", Role::Admin)
            .expect("Failed to generate test token");
        let claims = service.validate_token(&token).expect("valid token");

        let user = CurrentUser::try_from(claims).expect("known role");
        assert!(user.is_admin());
        assert!(!user.is_student());
        assert_eq!(user.display_name, "Canteen Admin");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let claims = Claims {
            sub: "account:x".to_string(),
            username: "ghost".to_string(),
            display_name: "Ghost".to_string(),
            role: "superuser".to_string(),
            token_type: "access".to_string(),
            iss: "canteen-server".to_string(),
            aud: "canteen-clients".to_string(),
            iat: 0,
            exp: 0,
        };

        assert!(CurrentUser::try_from(claims).is_err());
    }

    #[test]
    fn test_generated_secret_is_printable() {
        let secret = generate_printable_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii() && !c.is_control()));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(
            JwtService::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
