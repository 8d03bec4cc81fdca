//! Shared test inputs for integration tests.

/// Reference lines with the kinds of damage seen in pasted bibliographies.
///
/// Includes blank entries; tests that need only real references filter them.
#[allow(dead_code)]
pub const MESSY_REFERENCES: &[&str] = &[
    "",
    "   ",
    "foo , bar",
    "foo,bar",
    "A. B. ,,Smith",
    "No ending punctuation",
    "Already ends.",
    "a , )",
    "a. )b",
    "a. .b",
    ",,,",
    "...",
    " ? ! ",
    "x ; ; ; y",
    "Doe,, J.. (2020)..",
    "end :",
    "??!!",
    "a\t\t. ,b",
    "(  )",
    "Smith ( 2020 ) . Title",
    "Müller ,Émile ..",
    "a,\u{301}b",
    "x ,\u{b2}",
    "a\u{1f},b",
    "a.,.,b",
    "1,2,3",
    "_,_",
    "Title !!",
    "; leading",
    "tail ;  ",
    "Chugh, R.,  &  Ruhi, U.  (2019)  .  Social media in higher education , a literature review",
    "Portman, M.E ,Smith, J. &   Jones, K.2025  .  Impact of science communication on youth .London: Sage",
];

/// Builds a pasted block of `n` distinct references, one per line.
#[allow(dead_code)]
pub fn numbered_refs(n: usize) -> String {
    (1..=n)
        .map(|i| format!("Author{} , A.(20{:02}) .Title {}", i, i % 100, i))
        .collect::<Vec<_>>()
        .join("\n")
}
