//! Text normalization.
//!
//! [`clean_text`] turns raw extracted text into tidy plain text and reports
//! what it changed in a [`CleanStats`] record.
//!
//! # Example
//!
//! ```
//! use docstrip::clean::{clean_text, CleanOptions, CleanPreset};
//!
//! let options = CleanOptions::from_preset(CleanPreset::Aggressive);
//! let (cleaned, stats) = clean_text("Hello\nworld\n\n\n\nPage 1", &options);
//!
//! assert_eq!(cleaned, "Hello world");
//! assert_eq!(stats.lines_merged, 1);
//! ```

mod cleanup;
mod lines;
mod options;
mod stats;

pub use cleanup::clean_text;
pub use lines::{is_page_number, is_punctuation_only};
pub use options::{CleanOptions, CleanPreset};
pub use stats::CleanStats;
