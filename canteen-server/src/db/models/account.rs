//! Account Model

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use surrealdb::RecordId;

use super::serde_helpers;

/// Account ID type
pub type AccountId = RecordId;

/// Account model matching SurrealDB schema
///
/// 角色是封闭枚举 (student | admin)，不存在开放权限表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<AccountId>,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: Role,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: Role,
}

impl Account {
    /// 校验明文密码与存储的 argon2 哈希是否匹配
    pub fn verify_password(&self, password: &str) -> Result<bool, password_hash::Error> {
        let stored = PasswordHash::new(&self.hash_pass)?;
        let outcome = Argon2::default().verify_password(password.as_bytes(), &stored);
        Ok(outcome.is_ok())
    }

    /// 生成带随机盐的 argon2 哈希 (入库前调用)
    pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = Account::hash_password("canteen-pass").expect("hash");
        let account = Account {
            id: None,
            username: "maria".to_string(),
            display_name: "Maria Lopez".to_string(),
            hash_pass: hash,
            role: Role::Student,
            is_active: true,
            created_at: 0,
        };

        assert!(account.verify_password("canteen-pass").expect("verify"));
        assert!(!account.verify_password("wrong-pass").expect("verify"));
    }

    #[test]
    fn test_hash_is_never_serialized() {
        let account = Account {
            id: None,
            username: "maria".to_string(),
            display_name: "Maria Lopez".to_string(),
            hash_pass: "$argon2id$secret".to_string(),
            role: Role::Student,
            is_active: true,
            created_at: 0,
        };

        let json = serde_json::to_string(&account).expect("serialize");
        assert!(!json.contains("hash_pass"));
        assert!(!json.contains("argon2id"));
    }
}
