//! Text cleaning pipeline.
//!
//! Stages, in order:
//! 1. line breaks unified, each line trimmed and its whitespace runs collapsed;
//! 2. artifact lines dropped (page numbers, punctuation-only lines);
//! 3. optional paragraph merging, followed by the artifact filter again so
//!    a merged line is judged like any other line;
//! 4. emission: blank-line runs collapsed to one, leading and trailing blank
//!    lines dropped, consecutive duplicates removed.
//!
//! The output of a run is a fixed point of the same options.

use super::lines::{is_page_number, is_punctuation_only};
use super::options::CleanOptions;
use super::stats::CleanStats;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Clean text according to the provided options.
///
/// Pure: the same text and options always give the same output and stats.
///
/// # Example
///
/// ```
/// use docstrip::{clean_text, CleanOptions};
///
/// let options = CleanOptions::new().with_merge_lines(true);
/// let (cleaned, stats) = clean_text("first  line\nsecond line\n\n\n\nPage 2\nnext", &options);
///
/// assert_eq!(cleaned, "first line second line\n\nnext");
/// assert_eq!(stats.lines_merged, 1);
/// assert_eq!(stats.page_numbers_removed, 1);
/// ```
pub fn clean_text(text: &str, options: &CleanOptions) -> (String, CleanStats) {
    let mut stats = CleanStats::default();
    if text.is_empty() {
        return (String::new(), stats);
    }

    let source: Cow<'_, str> = if options.normalize_unicode {
        Cow::Owned(text.nfc().collect())
    } else {
        Cow::Borrowed(text)
    };

    let lines: Vec<String> = split_lines(&source)
        .into_iter()
        .map(|line| normalize_line(line, &mut stats))
        .collect();

    let mut lines = filter_lines(lines, options, &mut stats);
    if options.merge_lines {
        let merged = merge_paragraphs(lines, &mut stats);
        lines = filter_lines(merged, options, &mut stats);
    }

    let cleaned = emit(lines, options, &mut stats);
    let cleaned = if options.normalize_unicode {
        cleaned.nfc().collect()
    } else {
        cleaned
    };

    (cleaned, stats)
}

/// Split on any line break; a final terminator does not start a new line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(is_line_break) {
        lines.push(&rest[..pos]);
        let break_len = if rest[pos..].starts_with("\r\n") {
            2
        } else {
            rest[pos..].chars().next().map_or(1, char::len_utf8)
        };
        rest = &rest[pos + break_len..];
    }

    if !rest.is_empty() || lines.is_empty() {
        lines.push(rest);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Trim a line and collapse each inner whitespace run to one space.
fn normalize_line(line: &str, stats: &mut CleanStats) -> String {
    let trimmed = line.trim();
    if trimmed.len() != line.len() {
        stats.lines_trimmed += 1;
    }

    let mut normalized = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            normalized.push(c);
            continue;
        }

        let mut run_len = 1;
        while chars.next_if(|next| next.is_whitespace()).is_some() {
            run_len += 1;
        }
        if run_len > 1 || c != ' ' {
            stats.whitespace_collapsed += 1;
        }
        normalized.push(' ');
    }

    normalized
}

/// Drop artifact lines. Blank lines always pass.
fn filter_lines(lines: Vec<String>, options: &CleanOptions, stats: &mut CleanStats) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| {
            if line.is_empty() {
                return true;
            }
            if options.remove_page_numbers && is_page_number(line) {
                stats.page_numbers_removed += 1;
                return false;
            }
            if options.remove_punctuation_lines && is_punctuation_only(line) {
                stats.punctuation_lines_removed += 1;
                return false;
            }
            true
        })
        .collect()
}

/// Join consecutive non-blank lines; blank lines are kept as separators.
fn merge_paragraphs(lines: Vec<String>, stats: &mut CleanStats) -> Vec<String> {
    let mut merged = Vec::with_capacity(lines.len());
    let mut current: Option<String> = None;

    for line in lines {
        if line.is_empty() {
            if let Some(paragraph) = current.take() {
                merged.push(paragraph);
            }
            merged.push(line);
            continue;
        }

        match current.as_mut() {
            None => current = Some(line),
            Some(paragraph) => {
                join_line(paragraph, &line);
                stats.lines_merged += 1;
            }
        }
    }

    if let Some(paragraph) = current {
        merged.push(paragraph);
    }
    merged
}

/// Append `next` to `paragraph`, undoing end-of-line hyphenation.
fn join_line(paragraph: &mut String, next: &str) {
    let hyphenated = paragraph
        .strip_suffix('-')
        .and_then(|head| head.chars().next_back())
        .is_some_and(char::is_alphabetic);
    let continues_word = next.chars().next().is_some_and(char::is_lowercase);

    if hyphenated && continues_word {
        paragraph.pop();
    } else {
        paragraph.push(' ');
    }
    paragraph.push_str(next);
}

/// Assemble the final text.
fn emit(lines: Vec<String>, options: &CleanOptions, stats: &mut CleanStats) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut pending_blanks = 0usize;

    for line in lines {
        if line.is_empty() {
            pending_blanks += 1;
            continue;
        }

        if pending_blanks > 0 {
            if out.is_empty() {
                // leading blank region
                stats.blank_lines_removed += 1;
            } else {
                if pending_blanks > 1 {
                    stats.blank_lines_removed += 1;
                }
                out.push(String::new());
            }
            pending_blanks = 0;
        }

        if options.remove_duplicates && out.last() == Some(&line) {
            stats.duplicates_removed += 1;
            continue;
        }
        out.push(line);
    }

    if pending_blanks > 0 {
        // trailing blank region, or an all-blank text
        stats.blank_lines_removed += 1;
    }

    out.join("\n")
}
