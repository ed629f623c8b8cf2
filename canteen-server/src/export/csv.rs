//! CSV Report Rendering
//!
//! 列顺序是对外契约的一部分，修改前先核对客户端导入逻辑。

use csv::Writer;

use super::iso_timestamp;
use crate::db::models::{FeedbackDetail, FoodItem};
use crate::utils::{AppError, AppResult};

/// Render food item history as CSV bytes
///
/// Columns: name, category, quantity, created_at (ISO 8601 UTC)
pub fn food_items_csv(items: &[FoodItem]) -> AppResult<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record(["name", "category", "quantity", "created_at"])
        .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;

    for item in items {
        let quantity = item.quantity.to_string();
        let created_at = iso_timestamp(item.created_at);
        writer
            .write_record([
                item.name.as_str(),
                item.category.as_str(),
                quantity.as_str(),
                created_at.as_str(),
            ])
            .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {e}")))
}

/// Render feedback history as CSV bytes
///
/// Columns: student_name, food_item_name, rating, message, created_at.
/// 无菜品链接的条目 food_item_name 留空。
pub fn feedback_csv(entries: &[FeedbackDetail]) -> AppResult<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record([
            "student_name",
            "food_item_name",
            "rating",
            "message",
            "created_at",
        ])
        .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;

    for entry in entries {
        let rating = entry.rating.to_string();
        let created_at = iso_timestamp(entry.created_at);
        writer
            .write_record([
                entry.student_name.as_str(),
                entry.food_item_name.as_deref().unwrap_or(""),
                rating.as_str(),
                entry.message.as_str(),
                created_at.as_str(),
            ])
            .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(name: &str, category: &str, quantity: i64, created_at: i64) -> FoodItem {
        FoodItem {
            id: None,
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            image: String::new(),
            created_at,
        }
    }

    fn make_feedback(student: &str, food: Option<&str>, rating: u8, message: &str) -> FeedbackDetail {
        FeedbackDetail {
            id: None,
            student_name: student.to_string(),
            food_item: None,
            food_item_name: food.map(|f| f.to_string()),
            rating,
            message: message.to_string(),
            created_at: 1_772_368_200_000,
        }
    }

    #[test]
    fn test_food_items_csv_header_and_rows() {
        let items = vec![
            make_item("Tacos", "lunch", 40, 1_772_368_200_000),
            make_item("Oatmeal", "morning", 25, 1_772_368_200_000),
        ];

        let bytes = food_items_csv(&items).expect("render");
        let text = String::from_utf8(bytes).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "name,category,quantity,created_at");
        assert_eq!(lines[1], "Tacos,lunch,40,2026-03-01T12:30:00Z");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_food_items_csv_empty_keeps_header() {
        let bytes = food_items_csv(&[]).expect("render");
        let text = String::from_utf8(bytes).expect("utf8");

        assert_eq!(text.trim_end(), "name,category,quantity,created_at");
    }

    #[test]
    fn test_feedback_csv_quotes_commas_in_messages() {
        let entries = vec![make_feedback("Maria", Some("Tacos"), 4, "Too salty, but good")];

        let bytes = feedback_csv(&entries).expect("render");
        let text = String::from_utf8(bytes).expect("utf8");

        assert!(text.contains("\"Too salty, but good\""));

        // Round-trip through a reader preserves the field
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().expect("one row").expect("parse");
        assert_eq!(&record[3], "Too salty, but good");
    }

    #[test]
    fn test_feedback_csv_blank_food_name_for_general_feedback() {
        let entries = vec![make_feedback("Maria", None, 2, "Queue too long")];

        let bytes = feedback_csv(&entries).expect("render");
        let text = String::from_utf8(bytes).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "Maria,,2,Queue too long,2026-03-01T12:30:00Z");
    }
}
