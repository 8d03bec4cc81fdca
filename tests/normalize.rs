//! Output guarantees of the normalizer, checked over a corpus of messy input.

mod common;

use common::MESSY_REFERENCES;
use kleenref::{normalize, normalize_block};

const MARKS: &[char] = &[',', '.', ';', ':', '!', '?'];

fn has_space_before_mark(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars
        .windows(2)
        .any(|w| w[0].is_whitespace() && MARKS.contains(&w[1]))
}

fn has_doubled_mark(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars
        .windows(2)
        .any(|w| w[0] == w[1] && MARKS.contains(&w[0]))
}

#[test]
fn test_no_whitespace_before_punctuation() {
    for input in MESSY_REFERENCES {
        let output = normalize(input);
        assert!(
            !has_space_before_mark(&output),
            "whitespace before punctuation in {:?} (from {:?})",
            output,
            input
        );
    }
}

#[test]
fn test_no_doubled_punctuation() {
    for input in MESSY_REFERENCES {
        let output = normalize(input);
        assert!(
            !has_doubled_mark(&output),
            "doubled punctuation in {:?} (from {:?})",
            output,
            input
        );
    }
}

#[test]
fn test_no_surrounding_whitespace_and_terminal_mark() {
    for input in MESSY_REFERENCES {
        let output = normalize(input);
        if input.trim().is_empty() {
            assert_eq!(output, "");
            continue;
        }
        assert_eq!(output, output.trim(), "surrounding whitespace in {:?}", output);
        assert!(
            output.ends_with(['.', '?', '!']),
            "no terminal mark in {:?}",
            output
        );
    }
}

#[test]
fn test_normalize_is_idempotent() {
    for input in MESSY_REFERENCES {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "second pass changed {:?}", input);
    }
}

#[test]
fn test_block_lines_match_single_normalize() {
    // Given: the corpus joined into one pasted block
    let block = MESSY_REFERENCES.join("\n");

    // When: we clean the block
    let output = normalize_block(&block, false);

    // Then: each output line is the normalized form of a non-blank input line
    let expected: Vec<String> = MESSY_REFERENCES
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| normalize(line))
        .collect();
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_block_numbering_is_contiguous() {
    let block = MESSY_REFERENCES.join("\n\n");
    let output = normalize_block(&block, true);

    for (i, line) in output.lines().enumerate() {
        let prefix = format!("{}. ", i + 1);
        assert!(line.starts_with(&prefix), "line {:?} lacks prefix {:?}", line, prefix);
    }
}

#[test]
fn test_documented_examples() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("foo , bar"), "foo, bar.");
    assert_eq!(normalize("foo,bar"), "foo, bar.");
    assert_eq!(normalize("A. B. ,,Smith"), "A. B., Smith.");
    assert_eq!(normalize("No ending punctuation"), "No ending punctuation.");
    assert_eq!(normalize("Already ends."), "Already ends.");
    assert_eq!(normalize_block("a\n\nb", false), "a.\nb.");
    assert_eq!(normalize_block("a\nb\nc", true), "1. a.\n2. b.\n3. c.");
}
