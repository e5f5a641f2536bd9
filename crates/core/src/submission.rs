//! Submission preconditions for analysis uploads.
//!
//! The Job Service re-validates everything server-side; these checks run
//! client-side so an oversized or mis-typed upload fails before any bytes
//! move.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Upload limits
// ---------------------------------------------------------------------------

/// Maximum accepted video upload size in bytes (500 MiB).
pub const MAX_VIDEO_BYTES: u64 = 524_288_000;

/// Video container extensions the Job Service accepts.
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a filename carries an accepted video extension
/// (case-insensitive).
pub fn validate_video_filename(filename: &str) -> Result<(), CoreError> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Video filename must not be empty".to_string(),
        ));
    }
    let extension = match trimmed.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => {
            return Err(CoreError::Validation(format!(
                "Video filename '{trimmed}' has no extension. Allowed: {}",
                ALLOWED_VIDEO_EXTENSIONS.join(", ")
            )))
        }
    };
    if ALLOWED_VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported video extension '{extension}'. Allowed: {}",
            ALLOWED_VIDEO_EXTENSIONS.join(", ")
        )))
    }
}

/// Validate that an upload fits under [`MAX_VIDEO_BYTES`].
pub fn validate_video_size(bytes: u64) -> Result<(), CoreError> {
    if bytes > MAX_VIDEO_BYTES {
        return Err(CoreError::Validation(format!(
            "Video is {bytes} bytes; the maximum is {MAX_VIDEO_BYTES}"
        )));
    }
    Ok(())
}

/// Validate that a required text field is non-blank.
pub fn validate_required_text(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Validate the full set of submission fields.
pub fn validate_submission(
    filename: &str,
    size_bytes: u64,
    mentor_name: &str,
    subject: &str,
) -> Result<(), CoreError> {
    validate_video_filename(filename)?;
    validate_video_size(size_bytes)?;
    validate_required_text(mentor_name, "Mentor name")?;
    validate_required_text(subject, "Subject")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
