//! Cleaning options configuration.

use serde::{Deserialize, Serialize};

/// Cleaning preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanPreset {
    /// Whitespace and blank-line normalization only
    Minimal,
    /// Whitespace plus artifact removal (page numbers, rules, duplicates)
    #[default]
    Standard,
    /// Standard plus paragraph merging and Unicode NFC
    Aggressive,
}

/// Options for [`clean_text`](super::clean_text).
///
/// Whitespace normalization (collapsing runs, trimming lines, collapsing
/// blank-line runs) is always applied and has no switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Join the lines of each paragraph; blank lines stay paragraph breaks
    pub merge_lines: bool,

    /// Drop lines that look like page numbers
    pub remove_page_numbers: bool,

    /// Drop lines without any alphanumeric character
    pub remove_punctuation_lines: bool,

    /// Drop a line identical to the line right before it
    pub remove_duplicates: bool,

    /// Apply Unicode NFC normalization
    pub normalize_unicode: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            merge_lines: false,
            remove_page_numbers: true,
            remove_punctuation_lines: true,
            remove_duplicates: true,
            normalize_unicode: false,
        }
    }
}

impl CleanOptions {
    /// Create options with the standard defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create cleaning options from a preset.
    pub fn from_preset(preset: CleanPreset) -> Self {
        match preset {
            CleanPreset::Minimal => Self {
                merge_lines: false,
                remove_page_numbers: false,
                remove_punctuation_lines: false,
                remove_duplicates: false,
                normalize_unicode: false,
            },
            CleanPreset::Standard => Self::default(),
            CleanPreset::Aggressive => Self {
                merge_lines: true,
                normalize_unicode: true,
                ..Self::default()
            },
        }
    }

    /// Create minimal cleaning options.
    pub fn minimal() -> Self {
        Self::from_preset(CleanPreset::Minimal)
    }

    /// Create aggressive cleaning options.
    pub fn aggressive() -> Self {
        Self::from_preset(CleanPreset::Aggressive)
    }

    /// Enable or disable paragraph merging.
    pub fn with_merge_lines(mut self, merge: bool) -> Self {
        self.merge_lines = merge;
        self
    }

    /// Enable or disable page-number removal.
    pub fn with_remove_page_numbers(mut self, remove: bool) -> Self {
        self.remove_page_numbers = remove;
        self
    }

    /// Enable or disable punctuation-only line removal.
    pub fn with_remove_punctuation_lines(mut self, remove: bool) -> Self {
        self.remove_punctuation_lines = remove;
        self
    }

    /// Enable or disable consecutive duplicate removal.
    pub fn with_remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = remove;
        self
    }

    /// Enable or disable Unicode NFC normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = CleanOptions::default();
        assert!(!opts.merge_lines);
        assert!(opts.remove_page_numbers);
        assert!(opts.remove_duplicates);
        assert_eq!(opts, CleanOptions::from_preset(CleanPreset::Standard));
    }

    #[test]
    fn test_builder_pattern() {
        let opts = CleanOptions::new()
            .with_merge_lines(true)
            .with_remove_duplicates(false)
            .with_normalize_unicode(true);

        assert!(opts.merge_lines);
        assert!(!opts.remove_duplicates);
        assert!(opts.normalize_unicode);
        assert!(opts.remove_page_numbers);
    }

    #[test]
    fn test_presets() {
        let minimal = CleanOptions::minimal();
        assert!(!minimal.remove_page_numbers);
        assert!(!minimal.remove_punctuation_lines);
        assert!(!minimal.merge_lines);

        let aggressive = CleanOptions::aggressive();
        assert!(aggressive.merge_lines);
        assert!(aggressive.normalize_unicode);
        assert!(aggressive.remove_page_numbers);
    }
}
