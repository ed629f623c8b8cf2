//! Authentication Handlers
//!
//! Handles login, logout, and the current-user lookup.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Account;
use crate::security_log;

// Re-use shared DTOs for API consistency
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Logout response body
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Login handler
///
/// Authenticates a username/password pair and returns a JWT token.
/// Unknown username, wrong password and disabled account all map to the
/// same `InvalidCredentials` response, and the fixed delay runs before
/// any of those checks, so neither the message nor the timing reveals
/// which check failed.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = req.username.clone();

    let mut result = state
        .get_db()
        .query("SELECT * FROM account WHERE username = $username LIMIT 1")
        .bind(("username", username.clone()))
        .await
        .map_err(|e| AppError::database(format!("Query failed: {}", e)))?;

    let account: Option<Account> = result
        .take(0)
        .map_err(|e| AppError::database(format!("Failed to parse account: {}", e)))?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) => {
            if !a.is_active {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = username.clone(),
                    reason = "account_disabled"
                );
                tracing::warn!(username = %username, "Login failed - account disabled");
                return Err(AppError::invalid_credentials());
            }

            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = username.clone(),
                    reason = "invalid_credentials"
                );
                tracing::warn!(username = %username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            a
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                username = username.clone(),
                reason = "user_not_found"
            );
            tracing::warn!(username = %username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    // Generate JWT token
    let jwt_service = state.get_jwt_service();
    let user_id = account.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = jwt_service
        .generate_token(&user_id, &account.username, &account.display_name, account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    security_log!(
        "INFO",
        "login_success",
        username = account.username.clone(),
        role = account.role.as_str()
    );
    tracing::info!(
        user_id = %user_id,
        username = %account.username,
        role = %account.role,
        "User logged in"
    );

    let response = LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
        },
    };

    Ok(Json(response))
}

/// Get current user info
///
/// Echoes the identity carried in the validated token.
pub async fn me(Extension(user): Extension<CurrentUser>) -> Result<Json<UserInfo>, AppError> {
    Ok(Json(UserInfo {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        role: user.role,
    }))
}

/// Logout handler
///
/// Tokens are discarded client-side; the server only records the event.
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<LogoutResponse>, AppError> {
    security_log!(
        "INFO",
        "logout",
        username = user.username.clone(),
        role = user.role.as_str()
    );
    tracing::info!(user_id = %user.id, username = %user.username, "User logged out");

    Ok(Json(LogoutResponse { success: true }))
}
