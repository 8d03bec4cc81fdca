//! Output rendering for cleaned reference blocks.
//!
//! This module turns the string returned by [`normalize_block`](crate::normalize_block)
//! into the bytes written to stdout or to a downloaded file.

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One reference per line.
    #[default]
    Text,
    /// A JSON array of strings, one element per reference.
    Json,
}

/// Renders a cleaned block in the requested format.
///
/// Text output is the block followed by a single newline, or nothing at all
/// for an empty block. JSON output is always a (possibly empty) array.
pub fn render(block: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(block),
        OutputFormat::Json => render_json(block),
    }
}

fn render_text(block: &str) -> String {
    if block.is_empty() {
        return String::new();
    }
    let mut output = block.to_string();
    output.push('\n');
    output
}

fn render_json(block: &str) -> String {
    let lines: Vec<&str> = if block.is_empty() {
        Vec::new()
    } else {
        block.split('\n').collect()
    };
    // Serializing a slice of strings cannot fail.
    let mut output = serde_json::to_string_pretty(&lines).unwrap_or_else(|_| "[]".to_string());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Tests for text rendering
    // ===========================================

    #[test]
    fn test_render_text_appends_newline() {
        assert_eq!(render("a.\nb.", OutputFormat::Text), "a.\nb.\n");
    }

    #[test]
    fn test_render_text_empty_block() {
        assert_eq!(render("", OutputFormat::Text), "");
    }

    // ===========================================
    // Tests for JSON rendering
    // ===========================================

    #[test]
    fn test_render_json_array_of_lines() {
        // Given: a numbered block
        let block = "1. Smith, J. Title.\n2. Doe, \"Quoted\".";

        // When: we render it as JSON
        let output = render(block, OutputFormat::Json);

        // Then: each line becomes one array element
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            vec!["1. Smith, J. Title.", "2. Doe, \"Quoted\"."]
        );
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_render_json_empty_block() {
        let output = render("", OutputFormat::Json);
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert!(parsed.is_empty());
    }
}
