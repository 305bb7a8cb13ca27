//! # docstrip
//!
//! Safe plain-text extraction from DOCX and text files, with deterministic
//! text cleanup.
//!
//! The core surface is three functions:
//!
//! - [`extract_body_text`]: body text of a `.docx`, or `None` for anything
//!   that is not a well-formed, safe archive;
//! - [`read_text_file`]: contents of a text file, or `None`;
//! - [`clean_text`]: normalized text plus [`CleanStats`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use docstrip::{clean_text, extract_body_text, CleanOptions};
//!
//! if let Some(raw) = extract_body_text("report.docx") {
//!     let options = CleanOptions::new().with_merge_lines(true);
//!     let (cleaned, stats) = clean_text(&raw, &options);
//!     println!("{}", cleaned);
//!     println!("merged {} lines", stats.lines_merged);
//! }
//! ```
//!
//! ## Archive safety
//!
//! Every entry name of a DOCX archive is checked before anything is
//! decompressed. One absolute or `..`-escaping name rejects the whole
//! archive, even when `word/document.xml` itself is fine.
//!
//! ## Features
//!
//! - `docx` (default): Word document support

pub mod clean;
pub mod container;
pub mod detect;
pub mod encoding;
pub mod error;
pub mod sanitize;
pub mod text;

#[cfg(feature = "docx")]
pub mod docx;

// Re-exports
pub use clean::{clean_text, CleanOptions, CleanPreset, CleanStats};
pub use container::{DocxContainer, ExtractOptions};
pub use detect::{detect_file_kind, FileKind};
pub use error::{Error, Result};
pub use sanitize::EntryViolation;
pub use text::try_read_text_file;

use std::path::Path;

/// Extract the body text of a DOCX file.
///
/// Returns `None` when the file cannot be read, is not a ZIP archive, holds
/// an entry name that escapes the extraction root, lacks
/// `word/document.xml`, or carries malformed XML. Paragraphs are separated
/// by `\n`.
///
/// # Example
///
/// ```no_run
/// use docstrip::extract_body_text;
///
/// match extract_body_text("document.docx") {
///     Some(text) => println!("{}", text),
///     None => eprintln!("could not extract"),
/// }
/// ```
#[cfg(feature = "docx")]
pub fn extract_body_text(path: impl AsRef<Path>) -> Option<String> {
    extract_body_text_with_options(path, ExtractOptions::default())
}

/// Extract the body text of a DOCX file with explicit archive limits.
#[cfg(feature = "docx")]
pub fn extract_body_text_with_options(
    path: impl AsRef<Path>,
    options: ExtractOptions,
) -> Option<String> {
    let path = path.as_ref();
    let result = docx::DocxParser::open_with_options(path, options)
        .and_then(|mut parser| parser.body_text());

    match result {
        Ok(text) => Some(text),
        Err(e) => {
            if e.is_security_violation() {
                log::warn!("rejected {}: {}", path.display(), e);
            } else {
                log::debug!("cannot extract {}: {}", path.display(), e);
            }
            None
        }
    }
}

/// Read a plain-text file.
///
/// An empty file gives `Some("")`. Any I/O or decoding failure gives `None`;
/// use [`try_read_text_file`] to learn the cause.
///
/// # Example
///
/// ```no_run
/// use docstrip::read_text_file;
///
/// let text = read_text_file("notes.txt").unwrap_or_default();
/// ```
pub fn read_text_file(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    match try_read_text_file(path) {
        Ok(text) => Some(text),
        Err(e) => {
            log::debug!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}

/// Extract raw text from a file of any supported kind.
///
/// `.docx` goes through [`extract_body_text`], `.txt` through
/// [`read_text_file`]; files without a known extension are sniffed.
pub fn extract_text(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    let kind = match detect_file_kind(path) {
        Ok(kind) => kind,
        Err(e) => {
            log::debug!("skipping {}: {}", path.display(), e);
            return None;
        }
    };

    match kind {
        #[cfg(feature = "docx")]
        FileKind::Docx => extract_body_text(path),
        #[cfg(not(feature = "docx"))]
        FileKind::Docx => {
            log::debug!("skipping {}: docx support is disabled", path.display());
            None
        }
        FileKind::Text => read_text_file(path),
    }
}

/// Extract and clean a file in one step.
///
/// # Example
///
/// ```no_run
/// use docstrip::{extract_and_clean, CleanOptions};
///
/// if let Some((text, stats)) = extract_and_clean("report.docx", &CleanOptions::default()) {
///     println!("{} changes\n{}", stats.total_changes(), text);
/// }
/// ```
pub fn extract_and_clean(
    path: impl AsRef<Path>,
    options: &CleanOptions,
) -> Option<(String, CleanStats)> {
    extract_text(path).map(|raw| clean_text(&raw, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_extract_text_dispatches_to_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "one\n\n\ntwo").unwrap();
        assert_eq!(extract_text(&path).as_deref(), Some("one\n\n\ntwo"));

        let (cleaned, stats) = extract_and_clean(&path, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned, "one\n\ntwo");
        assert_eq!(stats.blank_lines_removed, 1);
    }

    #[test]
    fn test_extract_text_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.png");
        fs::write(&path, b"\x89PNG").unwrap();
        assert!(extract_text(&path).is_none());
    }

    #[test]
    fn test_read_text_file_missing() {
        assert!(read_text_file("no/such/file.txt").is_none());
    }

    #[cfg(feature = "docx")]
    #[test]
    fn test_extract_body_text_not_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        fs::write(&path, b"This is not a valid ZIP file").unwrap();
        assert!(extract_body_text(&path).is_none());
    }
}
