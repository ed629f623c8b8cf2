//! 认证授权模块
//!
//! [`JwtService`] 负责令牌签发校验，[`CurrentUser`] 是请求里的已验证
//! 身份；[`require_auth`] / [`require_role`] 两个中间件挂在路由层。

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
