//! Upload pre-validation
//!
//! Checks run locally before the saga issues its first network call; a file
//! rejected here creates no remote state at all.

use crate::config::Config;
use crate::error::AppError;
use crate::format::format_file_size;

/// Validate a file selected for upload against the configured allow-list and
/// size cap.
pub fn validate_upload(
    config: &Config,
    file_name: &str,
    content_type: &str,
    size: usize,
) -> Result<(), AppError> {
    if file_name.trim().is_empty() {
        return Err(AppError::InvalidInput("No file selected.".to_string()));
    }

    if size == 0 {
        return Err(AppError::InvalidInput(format!(
            "File \"{}\" is empty.",
            file_name
        )));
    }

    if !config
        .allowed_content_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    {
        return Err(AppError::InvalidInput(format!(
            "Unsupported file type \"{}\". Allowed types: {}",
            content_type,
            config.allowed_content_types.join(", ")
        )));
    }

    if size > config.max_file_size_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File \"{}\" is {} which exceeds the {} limit",
            file_name,
            format_file_size(size as i64),
            format_file_size(config.max_file_size_bytes as i64)
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_and_images() {
        let config = Config::default();
        assert!(validate_upload(&config, "scan.pdf", "application/pdf", 1024).is_ok());
        assert!(validate_upload(&config, "xray.png", "image/png", 1024).is_ok());
        assert!(validate_upload(&config, "xray.jpg", "IMAGE/JPEG", 1024).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let config = Config::default();
        let err = validate_upload(&config, "notes.docx", "application/msword", 1024).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let config = Config {
            max_file_size_bytes: 1024,
            ..Config::default()
        };
        let err = validate_upload(&config, "scan.pdf", "application/pdf", 2048).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_rejects_empty_selection() {
        let config = Config::default();
        assert!(validate_upload(&config, "", "application/pdf", 1024).is_err());
        assert!(validate_upload(&config, "scan.pdf", "application/pdf", 0).is_err());
    }
}
