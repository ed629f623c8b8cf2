//! 认证中间件
//!
//! 为 JWT 认证和角色授权提供 Axum 中间件

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use shared::models::Role;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 无需令牌的路径判定
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (交给路由器正常返回 404)
/// - `/api/auth/login` (登录接口)
/// - `/api/health` (健康检查)
/// - `GET /api/food-items*` (菜单浏览无需登录)
fn is_public(req: &Request) -> bool {
    if req.method() == http::Method::OPTIONS {
        return true;
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") {
        return true;
    }

    path == "/api/auth/login"
        || path == "/api/health"
        || (req.method() == http::Method::GET
            && (path == "/api/food-items" || path.starts_with("/api/food-items/")))
}

/// 从 Authorization 头解出已验证的用户
///
/// 失败路径都会落安全日志；令牌里带未知角色同样按无效令牌处理。
fn authenticate(state: &ServerState, req: &Request) -> Result<CurrentUser, AppError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(header) = header else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
        return Err(AppError::Unauthorized);
    };

    let token = JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?;

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", req.uri())
        );
        match e {
            JwtError::ExpiredToken => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    })?;

    CurrentUser::try_from(claims).map_err(|e| {
        security_log!(
            "WARN",
            "auth_unknown_role",
            error = format!("{}", e),
            uri = format!("{:?}", req.uri())
        );
        AppError::InvalidToken
    })
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌或未知角色 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public(&req) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, &req)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// 角色检查中间件 - 要求特定角色
///
/// # 参数
///
/// - `required`: 所需角色，如 [`Role::Admin`], [`Role::Student`]
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/feedback", get(handler::list))
///     .layer(middleware::from_fn(require_role(Role::Admin)));
/// ```
///
/// # 错误
///
/// 角色不符返回 403 Forbidden
pub fn require_role(
    required: Role,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let extensions = req.extensions();
            let user = extensions.get::<CurrentUser>().ok_or(AppError::Unauthorized)?;

            if user.role != required {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    username = user.username.clone(),
                    required_role = required.as_str()
                );
                return Err(AppError::forbidden(format!(
                    "This operation requires the {} role",
                    required
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
