//! Account Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::core::Config;
use crate::db::models::{Account, AccountCreate};
use shared::models::Role;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all accounts
    pub async fn find_all(&self) -> RepoResult<Vec<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account ORDER BY username")
            .await?
            .take(0)?;
        Ok(accounts)
    }

    /// Find account by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Create a new account
    pub async fn create(&self, data: AccountCreate) -> RepoResult<Account> {
        // 用户名是登录键，先查重
        if self.find_by_username(&data.username).await?.is_some() {
            let msg = format!("Username '{}' already exists", data.username);
            return Err(RepoError::Duplicate(msg));
        }

        let display_name = data.display_name.unwrap_or_else(|| data.username.clone());

        // 明文只在这里出现一次，散列失败则整个创建失败
        let hash_pass = Account::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    username = $username,
                    display_name = $display_name,
                    role = $role,
                    hash_pass = $hash_pass,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("created_at", chrono::Utc::now().timestamp_millis()))
            .bind(("role", data.role))
            .bind(("username", data.username))
            .bind(("display_name", display_name))
            .bind(("hash_pass", hash_pass))
            .await?;

        let created: Option<Account> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }

    /// Seed the initial admin account from configuration
    ///
    /// 只在管理员账号不存在时创建，重启不会重复写入。
    pub async fn ensure_admin_seed(&self, config: &Config) -> RepoResult<()> {
        if self
            .find_by_username(&config.admin_username)
            .await?
            .is_some()
        {
            return Ok(());
        }

        self.create(AccountCreate {
            username: config.admin_username.clone(),
            password: config.admin_password.clone(),
            display_name: Some("Canteen Admin".to_string()),
            role: Role::Admin,
        })
        .await?;

        tracing::info!(username = %config.admin_username, "Seeded initial admin account");
        Ok(())
    }
}
