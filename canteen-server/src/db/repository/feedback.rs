//! Feedback Repository

use super::{BaseRepository, RepoError, RepoResult, ResolvedFilter};
use crate::db::models::{Feedback, FeedbackCreate, FeedbackDetail};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

// =============================================================================
// Feedback Repository
// =============================================================================

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find feedback entries matching the filter, newest first
    ///
    /// search 匹配学生名、留言和所引用菜品的名称；category 通过
    /// `food_item.category` 过滤 (无菜品链接的条目自然不匹配)。
    /// 结果带 `food_item.name` 投影，供管理端列表和报表使用。
    pub async fn find_filtered(&self, filter: &ResolvedFilter) -> RepoResult<Vec<FeedbackDetail>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(student_name), $search) \
                 OR string::contains(string::lowercase(message), $search) \
                 OR string::contains(string::lowercase(food_item.name ?? ''), $search))",
            );
        }
        if filter.category.is_some() {
            conditions.push("food_item.category = $category");
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
            "SELECT *, food_item.name AS food_item_name FROM feedback{} \
             ORDER BY created_at DESC, id ASC",
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

        let feedbacks: Vec<FeedbackDetail> = query.await?.take(0)?;
        Ok(feedbacks)
    }

    /// Create a new feedback entry
    ///
    /// 有无菜品链接使用不同语句：schema 的 `option<record<food_item>>`
    /// 字段接受缺省，但不接受显式 NULL。
    pub async fn create(&self, data: FeedbackCreate) -> RepoResult<Feedback> {
        let created_at = chrono::Utc::now().timestamp_millis();

        let mut result = if let Some(food_item) = data.food_item {
            self.base
                .db()
                .query(
                    r#"CREATE feedback SET
                        student_name = $student_name,
                        food_item = $food_item,
                        rating = $rating,
                        message = $message,
                        created_at = $created_at
                    RETURN AFTER"#,
                )
                .bind(("student_name", data.student_name))
                .bind(("food_item", food_item))
                .bind(("rating", data.rating as i64))
                .bind(("message", data.message))
                .bind(("created_at", created_at))
                .await?
        } else {
            self.base
                .db()
                .query(
                    r#"CREATE feedback SET
                        student_name = $student_name,
                        rating = $rating,
                        message = $message,
                        created_at = $created_at
                    RETURN AFTER"#,
                )
                .bind(("student_name", data.student_name))
                .bind(("rating", data.rating as i64))
                .bind(("message", data.message))
                .bind(("created_at", created_at))
                .await?
        };

        let created: Option<Feedback> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create feedback".to_string()))
    }
}
