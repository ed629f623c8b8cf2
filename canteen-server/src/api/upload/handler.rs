//! Image Upload Handler
//!
//! Accepts an image file (PNG, JPEG, WebP), re-encodes it to JPG and
//! dedupes by content hash before storing under the uploads directory.
//!
//! 去重方式：`uploads/by_hash/<前两位>/<sha256>` 下的符号链接指向实际文件，
//! 重复上传直接返回已存文件名。

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::{Extension, Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for dish images
const JPEG_QUALITY: u8 = 85;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// URL pointer suitable for a food item's `image` field
    pub url: String,
    pub filename: String,
}

impl UploadResponse {
    fn stored(filename: String) -> Self {
        Self {
            success: true,
            url: format!("/uploads/{}", filename),
            filename,
        }
    }
}

/// Pull the "file" field out of the multipart body
async fn read_file_field(mut multipart: Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if !matches!(field.name(), Some("file") | Some("")) {
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string()).ok_or_else(|| {
            AppError::validation("No filename provided in file field".to_string())
        })?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
            .to_vec();
        return Ok((filename, data));
    }

    Err(AppError::validation(
        "No 'file' field found. Field name must be 'file'".to_string(),
    ))
}

/// Reject uploads that are oversized or carry an unknown extension
fn check_limits(data: &[u8], ext: &str, max_size: usize) -> Result<(), AppError> {
    if data.len() > max_size {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            max_size / 1024 / 1024
        )));
    }

    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    Ok(())
}

/// Decode the upload and re-encode as JPEG
///
/// 解码失败按校验错误处理 (损坏或伪装成图片的文件返回 400)。
fn re_encode_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image file: {}", e)))?;

    let mut buffer = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| AppError::internal(format!("Failed to encode image: {}", e)))?;

    Ok(buffer)
}

/// SHA256 of the stored bytes
fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Symlink slot for a hash, sharded by its first two characters
fn hash_link_path(uploads_dir: &Path, hash: &str) -> PathBuf {
    uploads_dir.join("by_hash").join(&hash[..2]).join(hash)
}

/// Resolve a previously stored file with the same content hash
fn lookup_duplicate(uploads_dir: &Path, hash: &str) -> Option<String> {
    let target = fs::read_link(hash_link_path(uploads_dir, hash)).ok()?;
    target.file_name().map(|s| s.to_string_lossy().to_string())
}

/// Record the content hash of a freshly stored file
fn link_hash(uploads_dir: &Path, hash: &str, filename: &str) -> Result<(), AppError> {
    let link = hash_link_path(uploads_dir, hash);
    if let Some(shard_dir) = link.parent() {
        fs::create_dir_all(shard_dir)
            .map_err(|e| AppError::internal(format!("Failed to create hash dir: {}", e)))?;
    }

    // The link target is relative to the shard directory
    symlink::symlink_auto(PathBuf::from("../../").join(filename), &link)
        .map_err(|e| AppError::internal(format!("Failed to record content hash: {}", e)))?;

    Ok(())
}

/// Upload image handler (admin only)
pub async fn upload(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let uploads_dir = state.config.uploads_dir();
    fs::create_dir_all(&uploads_dir)
        .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {}", e)))?;

    let (filename, data) = read_file_field(multipart).await?;
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided".to_string()));
    }

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {}", filename)))?;

    let max_size = (state.config.max_upload_mb as usize) * 1024 * 1024;
    check_limits(&data, &ext, max_size)?;

    let jpeg = re_encode_jpeg(&data)?;
    let hash = content_hash(&jpeg);

    if let Some(existing) = lookup_duplicate(&uploads_dir, &hash) {
        tracing::info!(
            original_name = %filename,
            existing_file = %existing,
            uploaded_by = %user.username,
            "Duplicate image detected, returning existing file"
        );
        return Ok(Json(UploadResponse::stored(existing)));
    }

    let stored_name = format!("{}.jpg", Uuid::new_v4());
    fs::write(uploads_dir.join(&stored_name), &jpeg)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;
    link_hash(&uploads_dir, &hash, &stored_name)?;

    tracing::info!(
        original_name = %filename,
        stored_as = %stored_name,
        size = jpeg.len(),
        uploaded_by = %user.username,
        "Image uploaded"
    );

    Ok(Json(UploadResponse::stored(stored_name)))
}
