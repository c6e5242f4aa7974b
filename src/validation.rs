//! Local input validation. A value rejected here never reaches the
//! prediction service.

use regex::Regex;
use std::sync::LazyLock;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.]+$").expect("username pattern compiles"));

/// Trims `input` and returns it if it is a valid Instagram/Twitter username.
pub fn validate_username(input: &str) -> Option<&str> {
    let username = input.trim();
    if username.is_empty() || !USERNAME_RE.is_match(username) {
        return None;
    }
    Some(username)
}

/// Trims `input` and returns it if it is a non-empty search query.
pub fn validate_query(input: &str) -> Option<&str> {
    let query = input.trim();
    (!query.is_empty()).then_some(query)
}
