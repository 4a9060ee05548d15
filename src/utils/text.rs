//! Small string helpers shared by the analyzers.

use regex::Regex;
use std::sync::LazyLock;

use super::compile_regex_unsafe;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"\s+", "WHITESPACE_RUN_RE"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"<[^>]+>", "TAG_RE"));

/// Number of whitespace-separated tokens, ignoring empty ones.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of pieces produced by splitting raw markup on whitespace runs.
///
/// Leading or trailing whitespace yields an empty piece that still counts, and
/// markup tokens count as words. Article word counts are taken this way over the
/// raw HTML body, so an empty body counts as one.
pub fn raw_token_count(text: &str) -> usize {
    WHITESPACE_RUN_RE.split(text).count()
}

/// Length in Unicode scalar values.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Removes anything that looks like a tag.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}
