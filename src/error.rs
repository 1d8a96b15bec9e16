//! Error types for the mkdocx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mkdocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading image files or writing the package.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An argument is out of range or otherwise unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced image file does not exist.
    #[error("Image file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The image bytes do not match the expected file signature.
    #[error("Malformed image data: {0}")]
    MalformedInput(String),

    /// The image ends before a complete header field could be read.
    #[error("Truncated image data: {0}")]
    TruncatedData(String),

    /// The image was scanned to the end without finding its dimensions.
    #[error("Image dimensions not found: {0}")]
    DimensionsNotFound(String),

    /// The image extension is not one of the supported formats.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An operation was invoked outside the builder's open state.
    #[error("Invalid builder state: {0}")]
    InvalidState(&'static str),

    /// Error assembling the output package.
    #[error("Package error: {0}")]
    Package(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Package(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("heading level must be between 1 and 6, got 7".into());
        assert_eq!(
            err.to_string(),
            "Invalid argument: heading level must be between 1 and 6, got 7"
        );

        let err = Error::NotFound(PathBuf::from("/tmp/cover.png"));
        assert_eq!(err.to_string(), "Image file not found: /tmp/cover.png");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
