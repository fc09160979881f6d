//! Per-field cleaners for the reviewer sheet.
//!
//! Each cleaner takes a raw cell (`None` for an empty cell) plus the
//! [`RuleTables`](crate::rules::RuleTables) and returns the cleaned value(s).
//! An empty result means the value was dropped; dropping is always logged at
//! debug level. The only error is [`CleanError::ForbiddenCharacter`], which
//! aborts the batch.
//!
//! # Example
//!
//! ```
//! use reviewers_core::clean::{clean_languages, clean_username};
//! use reviewers_core::rules::RuleTables;
//!
//! let rules = RuleTables::default();
//! assert_eq!(
//!     clean_username(Some("github.com/alice"), &rules).unwrap(),
//!     Some("alice".to_string())
//! );
//! assert_eq!(
//!     clean_languages(Some("Python; C/C++"), &rules).unwrap(),
//!     vec!["python", "c", "c++"]
//! );
//! ```

mod affiliation;
mod error;
mod language;
mod topic;
mod username;

pub use affiliation::clean_affiliations;
pub use error::{CleanError, Field};
pub use language::clean_languages;
pub use topic::clean_topics;
pub use username::clean_username;

use std::sync::LazyLock;

use regex::Regex;

/// Characters whose presence means the input is not escaped the way the
/// rule tables expect.
pub const FORBIDDEN_CHARACTERS: [char; 1] = ['"'];

/// Separators between multiple values in a single cell.
#[allow(clippy::expect_used)]
static VALUE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n,/;]").expect("separator regex is valid")); // Static pattern, safe to panic

fn check_forbidden(field: Field, value: &str) -> Result<(), CleanError> {
    match value.chars().find(|c| FORBIDDEN_CHARACTERS.contains(c)) {
        Some(character) => Err(CleanError::ForbiddenCharacter {
            field,
            character,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

fn split_values(value: &str) -> impl Iterator<Item = &str> {
    VALUE_SEPARATOR.split(value).map(str::trim)
}
