//! Error types for field cleaning.

use std::fmt;

use thiserror::Error;

/// The reviewer sheet column a cleaner works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Language,
    Topic,
    Affiliation,
}

impl Field {
    /// Returns the stable lowercase label used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Language => "language",
            Self::Topic => "topic",
            Self::Affiliation => "affiliation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal cleaning errors.
///
/// Ordinary bad input is dropped by the cleaners and never surfaces here.
/// A forbidden character means the rule tables no longer cover the sheet
/// and must be updated before the batch can run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanError {
    /// A value still contains a structurally forbidden character.
    #[error(
        "illegal character {character:?} in {field}: {value}\n  Suggestion: add a rewrite for this value to the {field} rule tables"
    )]
    ForbiddenCharacter {
        /// The column being cleaned.
        field: Field,
        /// The offending character.
        character: char,
        /// The value as seen by the cleaner.
        value: String,
    },
}
