//! Noise removal applied to extracted text before boundary detection.

use std::sync::LazyLock;

use regex::Regex;

static PAGE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Page \d+\s*of \d+\n?").expect("page header pattern compiles"));

static BARE_PAGE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+$\n?").expect("page number pattern compiles"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank run pattern compiles"));

/// Strips the noise PDF extraction leaves behind: running `Page X of Y`
/// lines, lines holding only a page number, and runs of blank lines, which
/// collapse to a single paragraph break.
pub fn clean_text(text: &str) -> String {
    let text = PAGE_HEADER_RE.replace_all(text, "");
    let text = BARE_PAGE_NUMBER_RE.replace_all(&text, "");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}
