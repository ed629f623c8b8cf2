//! Database Module
//!
//! Handles the embedded SurrealDB (RocksDB) connection and schema setup

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "canteen";
const DATABASE: &str = "canteen";

/// Schema definition, applied idempotently on every startup.
///
/// food_item 和 feedback 是只追加的历史表：没有 UPDATE/DELETE 路径，
/// 因此唯一需要的索引是 created_at (历史查询按时间过滤)。
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS food_item SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON food_item TYPE string;
DEFINE FIELD IF NOT EXISTS category ON food_item TYPE string;
DEFINE FIELD IF NOT EXISTS quantity ON food_item TYPE int ASSERT $value >= 1;
DEFINE FIELD IF NOT EXISTS image ON food_item TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS created_at ON food_item TYPE int;
DEFINE INDEX IF NOT EXISTS food_item_created_at ON food_item FIELDS created_at;

DEFINE TABLE IF NOT EXISTS feedback SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS student_name ON feedback TYPE string;
DEFINE FIELD IF NOT EXISTS food_item ON feedback TYPE option<record<food_item>>;
DEFINE FIELD IF NOT EXISTS rating ON feedback TYPE int ASSERT $value >= 1 AND $value <= 5;
DEFINE FIELD IF NOT EXISTS message ON feedback TYPE string;
DEFINE FIELD IF NOT EXISTS created_at ON feedback TYPE int;
DEFINE INDEX IF NOT EXISTS feedback_created_at ON feedback FIELDS created_at;

DEFINE TABLE IF NOT EXISTS account SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS username ON account TYPE string;
DEFINE FIELD IF NOT EXISTS display_name ON account TYPE string;
DEFINE FIELD IF NOT EXISTS hash_pass ON account TYPE string;
DEFINE FIELD IF NOT EXISTS role ON account TYPE string ASSERT $value IN ['student', 'admin'];
DEFINE FIELD IF NOT EXISTS is_active ON account TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS created_at ON account TYPE int;
DEFINE INDEX IF NOT EXISTS account_username ON account FIELDS username UNIQUE;
"#;

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database connection established (embedded RocksDB at {db_path})");

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
