//! History Filter Parsing
//!
//! Shared query-parameter shape for the list, analytics and export
//! endpoints. Parsed once at the API boundary into the repository
//! filter so every consumer sees identical matching semantics.

use serde::Deserialize;

use crate::db::repository::ResolvedFilter;
use crate::utils::AppResult;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};

/// Raw filter query parameters
///
/// 所有字段可缺省；空字符串视为未设置 (表单提交空输入框的情形)。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl ListFilter {
    /// Normalize into the repository filter
    ///
    /// search 转小写；日期解析为 UTC 日界毫秒 (from 含、to 不含，
    /// 因此 date_to 当天整天落在范围内)。格式错误的日期返回带字段名
    /// 的 ValidationError。
    pub fn resolve(&self) -> AppResult<ResolvedFilter> {
        let search = normalize(&self.search).map(|s| s.to_lowercase());
        let category = normalize(&self.category);

        let from_millis = match normalize(&self.date_from) {
            Some(raw) => Some(day_start_millis(parse_date("date_from", &raw)?)),
            None => None,
        };
        let to_millis = match normalize(&self.date_to) {
            Some(raw) => Some(day_end_millis(parse_date("date_to", &raw)?)),
            None => None,
        };

        Ok(ResolvedFilter {
            search,
            category,
            from_millis,
            to_millis,
        })
    }
}

/// 去除首尾空白；空串视为未设置
fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_resolves_to_unbounded() {
        let filter = ListFilter {
            search: Some("   ".to_string()),
            category: Some(String::new()),
            date_from: None,
            date_to: None,
        };

        let resolved = filter.resolve().expect("resolve");

        assert!(resolved.search.is_none());
        assert!(resolved.category.is_none());
        assert!(resolved.from_millis.is_none());
        assert!(resolved.to_millis.is_none());
    }

    #[test]
    fn test_search_is_lowercased_category_is_not() {
        let filter = ListFilter {
            search: Some("TaCos".to_string()),
            category: Some("Lunch".to_string()),
            date_from: None,
            date_to: None,
        };

        let resolved = filter.resolve().expect("resolve");

        assert_eq!(resolved.search.as_deref(), Some("tacos"));
        // category 精确匹配，保留原始大小写
        assert_eq!(resolved.category.as_deref(), Some("Lunch"));
    }

    #[test]
    fn test_same_day_range_covers_whole_day() {
        let filter = ListFilter {
            search: None,
            category: None,
            date_from: Some("2026-03-01".to_string()),
            date_to: Some("2026-03-01".to_string()),
        };

        let resolved = filter.resolve().expect("resolve");
        let from = resolved.from_millis.expect("from");
        let to = resolved.to_millis.expect("to");

        // from 含、to 不含: [00:00, next day 00:00)
        assert_eq!(to - from, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_malformed_date_names_the_field() {
        let filter = ListFilter {
            search: None,
            category: None,
            date_from: Some("03/01/2026".to_string()),
            date_to: None,
        };

        let err = filter.resolve().expect_err("must reject");
        assert!(format!("{}", err).contains("date_from"));
    }
}
