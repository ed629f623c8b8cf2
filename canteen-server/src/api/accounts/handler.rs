//! Account Provisioning Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::AppResult;
use crate::core::ServerState;
use crate::db::models::{Account, AccountCreate};
use crate::db::repository::AccountRepository;
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};

/// List all accounts, ordered by username
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Account>>> {
    let repo = AccountRepository::new(state.get_db());
    let accounts = repo.find_all().await?;
    Ok(Json(accounts))
}

/// Provision a new account
///
/// 密码在 repository 内做 argon2 哈希后入库，
/// 响应中的 [`Account`] 不序列化哈希字段。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountCreate>,
) -> AppResult<(StatusCode, Json<Account>)> {
    validate_required_text(&payload.username, "Username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.password, "Password", MAX_PASSWORD_LEN)?;
    validate_optional_text(&payload.display_name, "Display name", MAX_NAME_LEN)?;

    let repo = AccountRepository::new(state.get_db());
    let account = repo.create(payload).await?;

    security_log!(
        "INFO",
        "account_provisioned",
        username = account.username.clone(),
        role = account.role.as_str()
    );
    tracing::info!(
        username = %account.username,
        role = %account.role,
        "Account provisioned"
    );

    Ok((StatusCode::CREATED, Json(account)))
}
