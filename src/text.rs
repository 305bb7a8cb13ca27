//! Plain-text file reading.

use crate::encoding::decode_text;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a text file, reporting why it could not be read.
///
/// An empty file yields an empty string. Permission failures surface as
/// [`Error::PermissionDenied`]; undecodable bytes as [`Error::Encoding`].
///
/// # Example
///
/// ```no_run
/// use docstrip::{try_read_text_file, Error};
///
/// match try_read_text_file("notes.txt") {
///     Ok(text) => println!("{} lines", text.lines().count()),
///     Err(Error::PermissionDenied(path)) => eprintln!("cannot read {}", path.display()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn try_read_text_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::from_io(e, path))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::from_io(e, path))?;
    decode_text(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "héllo\nworld\n").unwrap();
        assert_eq!(try_read_text_file(&path).unwrap(), "héllo\nworld\n");
    }

    #[test]
    fn test_read_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();
        assert_eq!(try_read_text_file(&path).unwrap(), "");
    }

    #[test]
    fn test_read_utf16_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.txt");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "wide text".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();
        assert_eq!(try_read_text_file(&path).unwrap(), "wide text");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = try_read_text_file(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_binary_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.txt");
        fs::write(&path, [0x80u8, 0x81, 0xFE, 0x00]).unwrap();
        assert!(matches!(try_read_text_file(&path), Err(Error::Encoding(_))));
    }
}
