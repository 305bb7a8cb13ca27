//! Cleaning statistics.

use serde::Serialize;
use std::ops::{Add, AddAssign};

/// Counters describing what [`clean_text`](super::clean_text) changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    /// Line joins performed while merging paragraphs
    pub lines_merged: usize,
    /// Blank-line regions removed or shortened to a single blank line
    pub blank_lines_removed: usize,
    /// Whitespace runs replaced by a single space
    pub whitespace_collapsed: usize,
    /// Lines that carried leading or trailing whitespace
    pub lines_trimmed: usize,
    /// Lines dropped as page numbers
    pub page_numbers_removed: usize,
    /// Lines dropped for having no alphanumeric character
    pub punctuation_lines_removed: usize,
    /// Consecutive duplicate lines dropped
    pub duplicates_removed: usize,
}

impl CleanStats {
    /// Total number of changes across all counters.
    pub fn total_changes(&self) -> usize {
        self.lines_merged
            + self.blank_lines_removed
            + self.whitespace_collapsed
            + self.lines_trimmed
            + self.page_numbers_removed
            + self.punctuation_lines_removed
            + self.duplicates_removed
    }

    /// Whether nothing was changed.
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }

    /// Lines removed outright (page numbers, punctuation, duplicates).
    pub fn lines_removed(&self) -> usize {
        self.page_numbers_removed + self.punctuation_lines_removed + self.duplicates_removed
    }
}

impl AddAssign for CleanStats {
    fn add_assign(&mut self, other: Self) {
        self.lines_merged += other.lines_merged;
        self.blank_lines_removed += other.blank_lines_removed;
        self.whitespace_collapsed += other.whitespace_collapsed;
        self.lines_trimmed += other.lines_trimmed;
        self.page_numbers_removed += other.page_numbers_removed;
        self.punctuation_lines_removed += other.punctuation_lines_removed;
        self.duplicates_removed += other.duplicates_removed;
    }
}

impl Add for CleanStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let stats = CleanStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.total_changes(), 0);
    }

    #[test]
    fn test_accumulate() {
        let a = CleanStats {
            lines_merged: 2,
            duplicates_removed: 1,
            ..Default::default()
        };
        let b = CleanStats {
            lines_merged: 3,
            page_numbers_removed: 4,
            ..Default::default()
        };
        let total = a + b;
        assert_eq!(total.lines_merged, 5);
        assert_eq!(total.lines_removed(), 5);
        assert_eq!(total.total_changes(), 10);
    }
}
