//! 时间工具函数 - 日期边界转换
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。历史记录按 UTC 日界计算。

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(field: &str, date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{} must be a YYYY-MM-DD date: {}", field, date)))
}

/// 日期开始 (00:00:00 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// 日期结束 → 次日 00:00:00 UTC 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义，
/// 因此 date 当天的最后一毫秒仍在范围内。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    match date.succ_opt() {
        Some(next_day) => day_start_millis(next_day),
        // NaiveDate::MAX has no successor; treat it as unbounded
        None => i64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("date_from", "2025-03-14").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("date_from", "14/03/2025").is_err());
        assert!(parse_date("date_to", "not-a-date").is_err());
    }

    #[test]
    fn test_day_bounds_cover_whole_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let start = day_start_millis(date);
        let end = day_end_millis(date);
        // 24h window, end exclusive
        assert_eq!(end - start, 24 * 60 * 60 * 1000);

        let one_second_before = start - 1000;
        assert!(one_second_before < start);
        let last_milli_of_day = end - 1;
        assert!(last_milli_of_day >= start && last_milli_of_day < end);
    }
}
