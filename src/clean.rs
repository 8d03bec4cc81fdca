//! Reference line normalization.
//!
//! Fixes the spacing and punctuation mistakes that show up when references
//! are pasted from PDFs, word processors or reference managers: runs of
//! whitespace, spaces before commas, missing spaces after periods, doubled
//! punctuation and a missing final period.

use std::sync::LazyLock;

use regex::Regex;

/// Punctuation marks whose surrounding spacing is normalized.
const MARKS: [char; 6] = [',', '.', ';', ':', '!', '?'];

/// Marks accepted as the end of a reference.
const TERMINAL_MARKS: [char; 3] = ['.', '?', '!'];

// Whitespace includes the C0 separators FS, GS, RS and US.
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

static RE_SPACE_BEFORE_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+([,.;:!?])").unwrap());

// A word character is a letter, a number or `_`. Combining marks are not.
// The match consumes it; the replacement writes it back.
static RE_MARK_BEFORE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,.;:!?])([\p{L}\p{N}_])").unwrap());

static RE_SPACE_BEFORE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+\)").unwrap());

/// Normalizes a single reference line.
///
/// Returns an empty string when the line holds nothing but whitespace;
/// callers working on whole blocks should skip such lines rather than emit
/// them (see [`normalize_block`]).
///
/// # Examples
///
/// ```
/// use kleenref::normalize;
///
/// assert_eq!(
///     normalize("Chugh, R.,  &  Ruhi, U.  (2019)  .  Social media"),
///     "Chugh, R., & Ruhi, U. (2019). Social media."
/// );
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(reference: &str) -> String {
    let trimmed = reference.trim_matches(is_space);
    if trimmed.is_empty() {
        return String::new();
    }

    let text = RE_WHITESPACE.replace_all(trimmed, " ");
    let text = RE_SPACE_BEFORE_MARK.replace_all(&text, "$1");
    let text = RE_MARK_BEFORE_WORD.replace_all(&text, "$1 $2");
    let text = RE_SPACE_BEFORE_PAREN.replace_all(&text, ")");

    let mut cleaned = collapse_repeated_marks(&text);
    if !cleaned.ends_with(TERMINAL_MARKS) {
        cleaned.push('.');
    }
    cleaned
}

/// Normalizes every non-blank line of `text` and joins the results with `\n`.
///
/// Blank lines are dropped without leaving a gap. With `numbered`, each line
/// is prefixed with its 1-based position among the kept lines.
///
/// # Examples
///
/// ```
/// use kleenref::normalize_block;
///
/// assert_eq!(normalize_block("a\n\nb", false), "a.\nb.");
/// assert_eq!(normalize_block("a\nb\nc", true), "1. a.\n2. b.\n3. c.");
/// ```
pub fn normalize_block(text: &str, numbered: bool) -> String {
    let cleaned = reference_lines(text).map(normalize);

    if numbered {
        cleaned
            .enumerate()
            .map(|(i, line)| format!("{}. {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        cleaned.collect::<Vec<_>>().join("\n")
    }
}

/// Iterates over the lines of `text` that contain something other than whitespace.
///
/// Lines are split on `\n`, `\r` and the remaining Unicode line boundaries
/// (vertical tab, form feed, FS/GS/RS, NEL, LS, PS). A `\r\n` pair produces an
/// empty piece between the two characters, which is dropped like any other
/// blank line.
pub fn reference_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_boundary)
        .filter(|line| !line.trim_matches(is_space).is_empty())
}

/// Counts the reference lines in `text`.
pub fn count_references(text: &str) -> usize {
    reference_lines(text).count()
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Replaces each run of an identical mark (`,,`, `..`, `;;`) with a single one.
///
/// Runs of different marks such as `.,` are left alone.
fn collapse_repeated_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last: Option<char> = None;

    for c in text.chars() {
        if MARKS.contains(&c) && last == Some(c) {
            continue;
        }
        out.push(c);
        last = Some(c);
    }

    out
}
