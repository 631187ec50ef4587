//! Error types for orderdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for orderdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating or inspecting order documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The order record could not be decoded.
    #[error("Invalid order JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No order was resolved before generation was requested.
    #[error("No order provided")]
    MissingOrder,

    /// Text could not be encoded into the content stream.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The serialized document does not match its own cross-reference data.
    #[error("Corrupted PDF structure: {0}")]
    Corrupted(String),

    /// The data is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version header is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingOrder;
        assert_eq!(err.to_string(), "No order provided");

        let err = Error::Corrupted("xref entry 3 points at offset 12".into());
        assert_eq!(
            err.to_string(),
            "Corrupted PDF structure: xref entry 3 points at offset 12"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
