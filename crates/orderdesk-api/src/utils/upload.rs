//! Common utilities for the order image upload path

use chrono::Utc;
use orderdesk_core::AppError;

/// Sanitize filename to prevent path traversal and invalid characters.
/// Returns an error if the filename contains path traversal attempts.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized.len() < 3 {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

/// Collision-resistant stored filename: millisecond timestamp plus a random
/// nine-digit suffix ahead of the submitted name.
pub fn unique_filename(sanitized_original: &str) -> String {
    let unique_suffix = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        rand::random::<u32>() % 1_000_000_000
    );
    format!("{}-{}", unique_suffix, sanitized_original)
}

/// Validate one image against the per-file byte limit.
pub fn validate_image_size(size: usize, max_size: usize) -> Result<(), AppError> {
    if size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "One or more images exceed the {} MB limit.",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}
