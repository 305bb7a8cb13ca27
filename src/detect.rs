//! Input kind detection.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Kind of input a path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Word document (.docx)
    Docx,
    /// Plain text (.txt)
    Text,
}

impl FileKind {
    /// Kind implied by the file extension, case-insensitively.
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "docx" => Some(FileKind::Docx),
            "txt" | "text" => Some(FileKind::Text),
            _ => None,
        }
    }

    /// Returns the canonical file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Docx => "docx",
            FileKind::Text => "txt",
        }
    }

    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            FileKind::Docx => "Word Document",
            FileKind::Text => "Plain Text",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the kind of a file.
///
/// The extension decides when it is known; otherwise the first bytes are
/// sniffed for a ZIP signature.
pub fn detect_file_kind(path: impl AsRef<Path>) -> Result<FileKind> {
    let path = path.as_ref();
    if let Some(kind) = FileKind::from_extension(path) {
        return Ok(kind);
    }

    let mut magic = [0u8; 4];
    let mut file = File::open(path).map_err(|e| Error::from_io(e, path))?;
    let read = file.read(&mut magic).map_err(|e| Error::from_io(e, path))?;
    if is_zip_file(&magic[..read]) {
        Ok(FileKind::Docx)
    } else {
        Err(Error::UnsupportedFormat(path.display().to_string()))
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(FileKind::from_extension("a.docx"), Some(FileKind::Docx));
        assert_eq!(FileKind::from_extension("A.DOCX"), Some(FileKind::Docx));
        assert_eq!(FileKind::from_extension("notes.txt"), Some(FileKind::Text));
        assert_eq!(FileKind::from_extension("image.png"), None);
        assert_eq!(FileKind::from_extension("README"), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FileKind::Docx.to_string(), "Word Document");
        assert_eq!(FileKind::Text.extension(), "txt");
    }

    #[test]
    fn test_is_zip_file() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B])); // Too short
    }

    #[test]
    fn test_sniff_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let zipped = dir.path().join("upload.bin");
        std::fs::write(&zipped, [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00]).unwrap();
        assert_eq!(detect_file_kind(&zipped).unwrap(), FileKind::Docx);

        let other = dir.path().join("data.bin");
        std::fs::write(&other, b"hello").unwrap();
        assert!(matches!(detect_file_kind(&other), Err(Error::UnsupportedFormat(_))));
    }
}
