//! Classifies raw query text before it is allowed anywhere near the store.
//!
//! Two policies are supported. `DenyList` is the compatibility default: a
//! case-insensitive substring scan for four mutation keywords.
//! It is over-broad (a column named `last_update` trips it) and
//! under-inclusive (`PRAGMA`, `ATTACH` or a bare `CREATE` pass through).
//! `AllowList` is the hardened alternative: the statement must begin with
//! `SELECT` after leading whitespace and comments, and must be a single
//! statement.

use clap::ValueEnum;

/// Keywords the deny-list scans for, matched case-insensitively as
/// substrings anywhere in the text.
const BANNED_KEYWORDS: [&str; 4] = ["drop", "delete", "update", "insert"];

const REJECT_MESSAGE: &str = "Only SELECT queries are allowed";
const REJECT_SINGLE_SELECT: &str = "Only a single SELECT statement is allowed";

/// Which classification policy the gateway runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValidationMode {
    /// Reference-compatible keyword scan.
    #[default]
    DenyList,
    /// Single leading-SELECT statements only.
    AllowList,
}

/// Outcome of classifying one raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected(String),
}

/// Classify `query` under the given policy.
pub fn classify(query: &str, mode: ValidationMode) -> Verdict {
    match mode {
        ValidationMode::DenyList => classify_deny_list(query),
        ValidationMode::AllowList => classify_allow_list(query),
    }
}

fn classify_deny_list(query: &str) -> Verdict {
    let lowered = query.to_lowercase();
    for keyword in BANNED_KEYWORDS {
        if lowered.contains(keyword) {
            return Verdict::Rejected(REJECT_MESSAGE.to_string());
        }
    }
    Verdict::Allowed
}

fn classify_allow_list(query: &str) -> Verdict {
    let body = strip_leading_trivia(query);
    let starts_with_select = body
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("select"));
    if !starts_with_select {
        return Verdict::Rejected(REJECT_SINGLE_SELECT.to_string());
    }
    if has_second_statement(body) {
        return Verdict::Rejected(REJECT_SINGLE_SELECT.to_string());
    }
    Verdict::Allowed
}

/// Skip whitespace, `-- line` comments and `/* block */` comments at the
/// front of the text.
fn strip_leading_trivia(mut s: &str) -> &str {
    loop {
        s = s.trim_start();
        if let Some(rest) = s.strip_prefix("--") {
            s = rest.split_once('\n').map(|(_, tail)| tail).unwrap_or("");
        } else if let Some(rest) = s.strip_prefix("/*") {
            s = rest.split_once("*/").map(|(_, tail)| tail).unwrap_or("");
        } else {
            return s;
        }
    }
}

/// True if a `;` followed by more SQL appears outside single-quoted
/// literals. A trailing semicolon alone is tolerated.
fn has_second_statement(body: &str) -> bool {
    let mut in_literal = false;
    for (idx, ch) in body.char_indices() {
        match ch {
            '\'' => in_literal = !in_literal,
            ';' if !in_literal => {
                return !body[idx + 1..].trim().is_empty();
            }
            _ => {}
        }
    }
    false
}
