//! Food Item Repository

use super::{BaseRepository, RepoError, RepoResult, ResolvedFilter};
use crate::db::models::{FoodItem, FoodItemCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const FOOD_ITEM_TABLE: &str = "food_item";

// =============================================================================
// Food Item Repository
// =============================================================================

#[derive(Clone)]
pub struct FoodItemRepository {
    base: BaseRepository,
}

impl FoodItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find food items matching the filter, newest first
    ///
    /// search 匹配名称 (不区分大小写的子串)；category 精确匹配；
    /// created_at 按毫秒区间过滤 (from 含、to 不含)。
    pub async fn find_filtered(&self, filter: &ResolvedFilter) -> RepoResult<Vec<FoodItem>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.search.is_some() {
            conditions.push("string::contains(string::lowercase(name), $search)");
        }
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.from_millis.is_some() {
            conditions.push("created_at >= $from");
        }
        if filter.to_millis.is_some() {
            conditions.push("created_at < $to");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query_str = format!(
            "SELECT * FROM food_item{} ORDER BY created_at DESC, id ASC",
            where_clause
        );

        let mut query = self.base.db().query(query_str);
        if let Some(ref search) = filter.search {
            query = query.bind(("search", search.clone()));
        }
        if let Some(ref category) = filter.category {
            query = query.bind(("category", category.clone()));
        }
        if let Some(from) = filter.from_millis {
            query = query.bind(("from", from));
        }
        if let Some(to) = filter.to_millis {
            query = query.bind(("to", to));
        }

        let items: Vec<FoodItem> = query.await?.take(0)?;
        Ok(items)
    }

    /// Find food item by id
    ///
    /// 同时接受 "food_item:abc" 和纯 "abc" 两种格式。
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FoodItem>> {
        let key = id.strip_prefix("food_item:").unwrap_or(id);
        let item: Option<FoodItem> = self.base.db().select((FOOD_ITEM_TABLE, key)).await?;
        Ok(item)
    }

    /// Create a new food item
    pub async fn create(&self, data: FoodItemCreate) -> RepoResult<FoodItem> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE food_item SET
                    name = $name,
                    category = $category,
                    quantity = $quantity,
                    image = $image,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("quantity", data.quantity))
            .bind(("image", data.image.unwrap_or_default()))
            .bind(("created_at", chrono::Utc::now().timestamp_millis()))
            .await?;

        let created: Option<FoodItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create food item".to_string()))
    }
}
