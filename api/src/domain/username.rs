//! Mastodon account name normalization
//!
//! Accepts `user`, `@user`, `user@domain` and `@user@domain` and turns them
//! into the canonical `@user@domain` query used for account lookups.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

static SCHEME: OnceLock<Option<Regex>> = OnceLock::new();

/// Strip a single leading `@`
pub fn normalize_username(username: &str) -> &str {
    username.strip_prefix('@').unwrap_or(username)
}

/// Domain of the local server, derived from the API base URL
pub fn local_domain(api_base: &str) -> String {
    let stripped = match SCHEME.get_or_init(|| Regex::new(r"^https?://").ok()) {
        Some(scheme) => scheme.replace(api_base, ""),
        None => Cow::Borrowed(api_base),
    };
    stripped.trim_end_matches('/').to_string()
}

/// Reduce `user@domain` or `@user@domain` to `user` when `domain` is the
/// local server. Other forms are returned unchanged.
pub fn extract_local_username<'a>(username: &'a str, domain: &str) -> &'a str {
    let parts: Vec<&str> = username.split('@').collect();
    match parts.as_slice() {
        ["", user, d] if *d == domain => *user,
        [user, d] if *d == domain => *user,
        _ => username,
    }
}

/// Canonical account query for a lookup on the local server
pub fn account_query(username: &str, domain: &str) -> String {
    format!("@{}@{}", extract_local_username(username, domain), domain)
}
