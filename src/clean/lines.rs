//! Line classifiers used by the cleaner.
//!
//! All classifiers expect a normalized line: trimmed, with inner whitespace
//! already collapsed to single spaces.

/// Check if a line is a page-number artifact.
///
/// Recognized forms (case-insensitive words): `12`, `xiv`, `3/10`,
/// `Page 4`, `Page iv`, `Page 4 of 10`, `4 of 10`, `4 / 10`, `- 4 -`.
pub fn is_page_number(line: &str) -> bool {
    let tokens: Vec<&str> = line.split(' ').collect();

    match tokens.as_slice() {
        [single] => is_bare_number(single) || is_lower_roman(single) || is_fraction(single),
        [page, n] if is_word(page, "page") => is_number(n) || is_lower_roman(n),
        [page, n, of, m] if is_word(page, "page") && is_word(of, "of") => {
            is_number(n) && is_number(m)
        }
        [n, of, m] if is_word(of, "of") => is_number(n) && is_number(m),
        [n, "/", m] => is_number(n) && is_number(m),
        [open, n, close] if is_dash(open) && is_dash(close) => is_number(n),
        _ => false,
    }
}

/// Check if a non-empty line has no alphanumeric character.
pub fn is_punctuation_only(line: &str) -> bool {
    !line.is_empty() && !line.chars().any(char::is_alphanumeric)
}

fn is_word(token: &str, word: &str) -> bool {
    token.eq_ignore_ascii_case(word)
}

fn is_dash(token: &str) -> bool {
    matches!(token, "-" | "\u{2013}" | "\u{2014}")
}

/// Digits only, up to five of them.
fn is_number(token: &str) -> bool {
    (1..=5).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit())
}

/// A lone number on its own line; longer ones are more likely data.
fn is_bare_number(token: &str) -> bool {
    token.len() <= 4 && is_number(token)
}

fn is_fraction(token: &str) -> bool {
    token
        .split_once('/')
        .is_some_and(|(n, m)| is_number(n) && is_number(m))
}

/// Well-formed lowercase roman numeral (1 to 399) as used for front-matter pages.
fn is_lower_roman(token: &str) -> bool {
    if !(1..=6).contains(&token.len()) {
        return false;
    }
    let rest = strip_repeated(token, 'c', 3);
    let rest = strip_digit(rest, "xc", "xl", 'l', 'x');
    let rest = strip_digit(rest, "ix", "iv", 'v', 'i');
    rest.is_empty()
}

/// Strip one decimal digit written with `nine`, `four`, or `five` plus up
/// to three `one`s.
fn strip_digit<'a>(s: &'a str, nine: &str, four: &str, five: char, one: char) -> &'a str {
    if let Some(rest) = s.strip_prefix(nine).or_else(|| s.strip_prefix(four)) {
        return rest;
    }
    let rest = s.strip_prefix(five).unwrap_or(s);
    strip_repeated(rest, one, 3)
}

fn strip_repeated(s: &str, c: char, max: usize) -> &str {
    let count = s.chars().take(max).take_while(|&ch| ch == c).count();
    &s[count..]
}
