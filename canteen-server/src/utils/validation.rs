//! 输入校验 - 文本长度限制
//!
//! 录入 API 的长度上限集中定义在这里。SurrealDB 的 string
//! 字段不限制长度，超长输入在进库前由 handler 统一拦截。

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: food items, display names
pub const MAX_NAME_LEN: usize = 200;

/// Feedback message text
pub const MAX_MESSAGE_LEN: usize = 500;

/// Feedback message minimum length (trimmed)
pub const MIN_MESSAGE_LEN: usize = 3;

/// Short identifiers: usernames, category labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// 明文密码 (哈希前)
pub const MAX_PASSWORD_LEN: usize = 128;

/// 图片 URL / 上传路径
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// 必填文本：去空白后非空，且不超过 max_len
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    ensure_max_len(value, field, max_len)
}

/// 可选文本：存在时不超过 max_len，缺省直接通过
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => ensure_max_len(v, field, max_len),
        None => Ok(()),
    }
}

fn ensure_max_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} exceeds {max_len} characters (got {})",
            value.len()
        )));
    }
    Ok(())
}
