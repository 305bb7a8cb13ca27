//! Error types for the docstrip library.
//!
//! The public extraction functions collapse every error into `None`; these
//! types are what the lower-level APIs return and what gets logged.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::sanitize::EntryViolation;

/// Result type alias for docstrip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or decoding a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file exists but the process may not read it.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The file extension or content is not a supported input.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The bytes are not a valid ZIP container.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// An entry name would escape the extraction root.
    #[error("Unsafe archive entry {name:?}: {reason}")]
    UnsafeEntry {
        /// Raw entry name as stored in the archive
        name: String,
        /// Why the name was rejected
        reason: EntryViolation,
    },

    /// The archive lists more entries than allowed.
    #[error("Archive has too many entries: {0}")]
    TooManyEntries(usize),

    /// An entry is larger than the configured limit.
    #[error("Archive entry {name:?} is too large: {size} bytes")]
    EntryTooLarge {
        /// Entry name
        name: String,
        /// Declared or observed uncompressed size
        size: u64,
    },

    /// A required document component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Error during text decoding.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl Error {
    /// Build an I/O error, mapping permission failures to [`Error::PermissionDenied`].
    pub(crate) fn from_io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Error::PermissionDenied(path.into())
        } else {
            Error::Io(err)
        }
    }

    /// Whether this error is a security rejection rather than plain damage.
    pub fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Error::UnsafeEntry { .. } | Error::TooManyEntries(_) | Error::EntryTooLarge { .. }
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingComponent("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing component: word/document.xml");

        let err = Error::UnsafeEntry {
            name: "../evil".to_string(),
            reason: EntryViolation::ParentTraversal,
        };
        assert_eq!(
            err.to_string(),
            "Unsafe archive entry \"../evil\": path climbs above the extraction root"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_permission_mapping() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err = Error::from_io(io_err, "secret.txt");
        assert!(matches!(err, Error::PermissionDenied(ref p) if p.ends_with("secret.txt")));

        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(Error::from_io(io_err, "gone.txt"), Error::Io(_)));
    }

    #[test]
    fn test_security_classification() {
        assert!(Error::TooManyEntries(20_000).is_security_violation());
        assert!(!Error::XmlParse("bad".into()).is_security_violation());
    }
}
