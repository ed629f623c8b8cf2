//! Report Export
//!
//! Renders filtered history into downloadable CSV and PDF documents.
//! Both renderers are pure: they take already-filtered rows and return
//! the document bytes, so the same filter path feeds lists and exports.

pub mod csv;
pub mod pdf;

use chrono::{SecondsFormat, TimeZone, Utc};

/// Unix 毫秒时间戳 → ISO 8601 UTC ("2026-03-01T12:30:00Z")，CSV 使用
pub(crate) fn iso_timestamp(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Unix 毫秒时间戳 → "2026-03-01 12:30"，PDF 行内展示使用
pub(crate) fn display_timestamp(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_is_utc_rfc3339() {
        // 2026-03-01 12:30:00 UTC
        let millis = 1_772_368_200_000;
        assert_eq!(iso_timestamp(millis), "2026-03-01T12:30:00Z");
    }

    #[test]
    fn test_display_timestamp_is_minute_precision() {
        let millis = 1_772_368_200_000;
        assert_eq!(display_timestamp(millis), "2026-03-01 12:30");
    }
}
