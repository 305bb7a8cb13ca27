//! ZIP container access for word-processing documents.
//!
//! A [`DocxContainer`] is only ever constructed after every entry name in
//! the archive has passed [`resolve_entry_name`]; a single unsafe name
//! rejects the whole archive before any member is decompressed.

use crate::encoding::decode_xml;
use crate::error::{Error, Result};
use crate::sanitize::resolve_entry_name;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Path of the main document part inside a DOCX package.
pub const BODY_XML_PATH: &str = "word/document.xml";

/// Default cap on the number of archive entries.
pub const MAX_ENTRIES: usize = 10_000;

/// Default cap on the uncompressed size of a single member (256 MiB).
pub const MAX_BODY_XML_SIZE: u64 = 256 * 1024 * 1024;

/// Limits applied while opening an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Maximum number of entries an archive may list
    pub max_entries: usize,

    /// Maximum uncompressed size of a member that is read
    pub max_member_size: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_entries: MAX_ENTRIES,
            max_member_size: MAX_BODY_XML_SIZE,
        }
    }
}

impl ExtractOptions {
    /// Create options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum entry count.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set the maximum member size in bytes.
    pub fn with_max_member_size(mut self, max_member_size: u64) -> Self {
        self.max_member_size = max_member_size;
        self
    }
}

/// A validated ZIP archive held in memory.
pub struct DocxContainer {
    archive: zip::ZipArchive<Cursor<Vec<u8>>>,
    options: ExtractOptions,
}

impl DocxContainer {
    /// Open a container from a file path with default limits.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docstrip::container::DocxContainer;
    ///
    /// let container = DocxContainer::open("document.docx")?;
    /// assert!(container.exists("word/document.xml"));
    /// # Ok::<(), docstrip::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a container from a file path with explicit limits.
    pub fn open_with_options(path: impl AsRef<Path>, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = {
            let file = File::open(path).map_err(|e| Error::from_io(e, path))?;
            let mut reader = BufReader::new(file);
            let mut data = Vec::new();
            reader
                .read_to_end(&mut data)
                .map_err(|e| Error::from_io(e, path))?;
            data
        };
        Self::from_bytes_with_options(data, options)
    }

    /// Create a container from a byte vector with default limits.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Create a container from a byte vector with explicit limits.
    pub fn from_bytes_with_options(data: Vec<u8>, options: ExtractOptions) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        validate_entries(&archive, &options)?;
        Ok(Self { archive, options })
    }

    /// Read an XML member as a string.
    pub fn read_xml(&mut self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml(&bytes)
    }

    /// Read a member as raw bytes, enforcing the size limit.
    pub fn read_binary(&mut self, path: &str) -> Result<Vec<u8>> {
        let limit = self.options.max_member_size;
        let file = self
            .archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;

        if file.size() > limit {
            return Err(Error::EntryTooLarge {
                name: path.to_string(),
                size: file.size(),
            });
        }

        // The declared size is attacker-controlled; cap the actual read too.
        let mut data = Vec::new();
        file.take(limit.saturating_add(1)).read_to_end(&mut data)?;
        if data.len() as u64 > limit {
            return Err(Error::EntryTooLarge {
                name: path.to_string(),
                size: data.len() as u64,
            });
        }
        Ok(data)
    }

    /// Check if a member exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.file_names().any(|n| n == path)
    }

    /// List all member names.
    pub fn list_files(&self) -> Vec<String> {
        self.archive.file_names().map(String::from).collect()
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl std::fmt::Debug for DocxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxContainer")
            .field("files", &self.archive.len())
            .field("options", &self.options)
            .finish()
    }
}

/// Check the entry count and every entry name.
fn validate_entries<R>(archive: &zip::ZipArchive<R>, options: &ExtractOptions) -> Result<()>
where
    R: std::io::Read + std::io::Seek,
{
    if archive.len() > options.max_entries {
        return Err(Error::TooManyEntries(archive.len()));
    }

    for name in archive.file_names() {
        match resolve_entry_name(name) {
            Ok(resolved) => log::trace!("entry {:?} resolves to {:?}", name, resolved),
            Err(reason) => {
                return Err(Error::UnsafeEntry {
                    name: name.to_string(),
                    reason,
                })
            }
        }
    }

    Ok(())
}
