//! Archive entry name validation (zip slip protection).
//!
//! Entry names are resolved lexically against a virtual extraction root.
//! Nothing here touches the filesystem: a name is split into components on
//! both `/` and `\`, `.` and empty components are dropped, and `..` pops one
//! component. A name is rejected as soon as the walk would leave the root,
//! even if later components would bring it back inside.

use std::fmt;

/// Reason an archive entry name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryViolation {
    /// Leading separator, drive letter or UNC prefix.
    Absolute,
    /// A `..` component climbs above the extraction root.
    ParentTraversal,
    /// The name resolves to the root itself.
    EmptyPath,
    /// The name contains a NUL byte.
    NulByte,
}

impl fmt::Display for EntryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EntryViolation::Absolute => "absolute path",
            EntryViolation::ParentTraversal => "path climbs above the extraction root",
            EntryViolation::EmptyPath => "path resolves to the extraction root itself",
            EntryViolation::NulByte => "path contains a NUL byte",
        };
        f.write_str(msg)
    }
}

/// Resolve an entry name against the extraction root.
///
/// Returns the normalized root-relative path (components joined with `/`)
/// when the name stays strictly inside the root.
///
/// # Example
///
/// ```
/// use docstrip::sanitize::{resolve_entry_name, EntryViolation};
///
/// assert_eq!(resolve_entry_name("word/./document.xml").unwrap(), "word/document.xml");
/// assert_eq!(resolve_entry_name("../../etc/passwd"), Err(EntryViolation::ParentTraversal));
/// assert_eq!(resolve_entry_name("/tmp/evil.txt"), Err(EntryViolation::Absolute));
/// ```
pub fn resolve_entry_name(name: &str) -> Result<String, EntryViolation> {
    if name.contains('\0') {
        return Err(EntryViolation::NulByte);
    }
    if is_absolute(name) {
        return Err(EntryViolation::Absolute);
    }

    let mut parts: Vec<&str> = Vec::new();
    for component in name.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(EntryViolation::ParentTraversal);
                }
            }
            part => parts.push(part),
        }
    }

    if parts.is_empty() {
        return Err(EntryViolation::EmptyPath);
    }

    Ok(parts.join("/"))
}

/// Check whether an entry name is safe to join to the extraction root.
pub fn is_safe_entry_name(name: &str) -> bool {
    resolve_entry_name(name).is_ok()
}

/// Absolute under either POSIX or Windows rules.
fn is_absolute(name: &str) -> bool {
    if name.starts_with(['/', '\\']) {
        return true;
    }
    // Drive prefix: `C:`, `C:\x`, `C:x`
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_entries() {
        assert_eq!(resolve_entry_name("word/document.xml").unwrap(), "word/document.xml");
        assert_eq!(resolve_entry_name("[Content_Types].xml").unwrap(), "[Content_Types].xml");
        assert_eq!(resolve_entry_name("word/").unwrap(), "word");
        assert_eq!(resolve_entry_name("word//media/./a.png").unwrap(), "word/media/a.png");
    }

    #[test]
    fn test_parent_inside_root() {
        assert_eq!(
            resolve_entry_name("word/../docProps/core.xml").unwrap(),
            "docProps/core.xml"
        );
    }

    #[test]
    fn test_traversal_rejected() {
        for name in [
            "../../../etc/passwd",
            "..",
            "word/../../x",
            "a/b/../../../c",
            "..\\..\\windows\\system32",
            "word\\..\\..\\x",
        ] {
            assert_eq!(
                resolve_entry_name(name),
                Err(EntryViolation::ParentTraversal),
                "{name}"
            );
        }
    }

    #[test]
    fn test_escape_and_return_rejected() {
        // Leaves the root before coming back; still rejected.
        assert_eq!(
            resolve_entry_name("../root/word/document.xml"),
            Err(EntryViolation::ParentTraversal)
        );
    }

    #[test]
    fn test_absolute_rejected() {
        for name in ["/tmp/malicious.txt", "\\server\\share", "C:\\Windows\\x", "c:evil", "//x"] {
            assert_eq!(resolve_entry_name(name), Err(EntryViolation::Absolute), "{name}");
        }
    }

    #[test]
    fn test_root_itself_rejected() {
        assert_eq!(resolve_entry_name(""), Err(EntryViolation::EmptyPath));
        assert_eq!(resolve_entry_name("."), Err(EntryViolation::EmptyPath));
        assert_eq!(resolve_entry_name("word/.."), Err(EntryViolation::EmptyPath));
    }

    #[test]
    fn test_nul_rejected() {
        assert_eq!(resolve_entry_name("word\0.xml"), Err(EntryViolation::NulByte));
        assert!(!is_safe_entry_name("word\0.xml"));
        assert!(is_safe_entry_name("word/document.xml"));
    }
}
