//! GitHub username cleaning.

use tracing::debug;

use super::{CleanError, Field, check_forbidden};
use crate::rules::{Rewrite, RuleTables};

/// Prefixes people paste in front of their handle. Stripped in this order,
/// each at most once.
const HANDLE_PREFIXES: [&str; 5] = [
    "www.github.com/",
    "http://github.com/",
    "github.com/",
    "github. com/",
    "@",
];

/// Profiles on other hosts cannot be used as a GitHub identity.
const FOREIGN_PROFILES: [&str; 3] = ["bitbucket.org", "researchgate.net", "https://gitlab"];

/// Handles this short are almost always initials or placeholders.
const MIN_USERNAME_CHARS: usize = 3;

/// Cleans a raw username cell into a GitHub handle.
///
/// Returns `Ok(None)` when the value is empty, blacklisted, rewritten to
/// `null`, points at another host, or does not look like a handle (contains
/// `/`, `@` or whitespace, or is shorter than three characters).
///
/// # Errors
///
/// Returns [`CleanError::ForbiddenCharacter`] if the rewritten value contains
/// a forbidden character.
pub fn clean_username(raw: Option<&str>, rules: &RuleTables) -> Result<Option<String>, CleanError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if rules.user_blacklist.contains(&trimmed.to_lowercase()) {
        debug!(username = %trimmed, "Dropping blacklisted username");
        return Ok(None);
    }

    let mut username = match rules.user_rewrites.apply(trimmed) {
        Rewrite::Kept(username) => username,
        Rewrite::Dropped => {
            debug!(username = %trimmed, "Username rewritten to null");
            return Ok(None);
        }
    };
    if rules.user_blacklist.contains(username) {
        debug!(%username, "Dropping blacklisted username");
        return Ok(None);
    }
    check_forbidden(Field::Username, username)?;

    for prefix in HANDLE_PREFIXES {
        if let Some(rest) = username.strip_prefix(prefix) {
            username = rest;
        }
    }

    if FOREIGN_PROFILES.iter().any(|host| username.contains(host)) {
        debug!(%username, "Dropping non-GitHub profile");
        return Ok(None);
    }
    // a remaining '/' is a URL, '@' an email, whitespace a real name or comment
    if username.contains(['/', '@'])
        || username.chars().any(char::is_whitespace)
        || username.chars().count() < MIN_USERNAME_CHARS
    {
        debug!(%username, "Dropping value that is not a handle");
        return Ok(None);
    }

    Ok(Some(username.to_string()))
}
