//! Log Redaction Layer
//!
//! Scrubs bot tokens, GitHub tokens and authorization headers from strings
//! prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static BOT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{6,12}:[A-Za-z0-9_-]{35}\b").unwrap());
static GITHUB_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:ghp|gho|ghs|ghu)_[A-Za-z0-9]{20,}|\bgithub_pat_[A-Za-z0-9_]{20,}").unwrap());
static AUTH_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(authorization:?\s*)(?:token|bearer)?\s*[A-Za-z0-9\-._~+/]+=*").unwrap());
static QUERY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?[^\s#]*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let mut redacted = BOT_TOKEN_RE.replace_all(input, "[REDACTED_BOT_TOKEN]").to_string();
    redacted = GITHUB_TOKEN_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string();
    redacted = AUTH_HEADER_RE.replace_all(&redacted, "${1}[REDACTED]").to_string();
    redacted
}

/// Drops the query string of every URL in `input`. Share links carry
/// tracking ids there.
pub fn redact_url(input: &str) -> String {
    QUERY_RE.replace_all(&redact_sensitive_data(input), "?[…]").to_string()
}
