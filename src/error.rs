//! Error types for imgdrop.

use thiserror::Error;

/// Common error type for imgdrop.
#[derive(Error, Debug)]
pub enum ImgdropError {
    /// Metadata store could not be reached or rejected the operation.
    ///
    /// The blob written before a failed insert is left in place.
    #[error("metadata store unavailable: {0}")]
    StoreUnavailable(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for client input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage name that could escape the upload directory.
    #[error("invalid storage name: {0}")]
    InvalidName(String),

    /// Upload exceeds the configured size limit (in bytes).
    #[error("file too large (max {0} bytes)")]
    TooLarge(u64),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for imgdrop operations.
pub type Result<T> = std::result::Result<T, ImgdropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ImgdropError::Validation("File type not allowed".to_string());
        assert_eq!(err.to_string(), "validation error: File type not allowed");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = ImgdropError::NotFound("File: abc.png".to_string());
        assert_eq!(err.to_string(), "File: abc.png not found");
    }

    #[test]
    fn test_store_unavailable_display() {
        let err = ImgdropError::StoreUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "metadata store unavailable: connection refused"
        );
    }

    #[test]
    fn test_invalid_name_display() {
        let err = ImgdropError::InvalidName("../etc/passwd".to_string());
        assert_eq!(err.to_string(), "invalid storage name: ../etc/passwd");
    }

    #[test]
    fn test_too_large_display() {
        let err = ImgdropError::TooLarge(1024);
        assert_eq!(err.to_string(), "file too large (max 1024 bytes)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ImgdropError = io_err.into();
        assert!(matches!(err, ImgdropError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(ImgdropError::Config("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
