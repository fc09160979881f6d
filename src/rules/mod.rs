//! Rule tables used to normalize free-text reviewer fields.
//!
//! The tables are maintained by hand as JSON files in a rules directory and
//! are loaded exactly once per run. After loading, a [`RuleTables`] value is
//! immutable and is passed explicitly to every cleaner in [`crate::clean`].
//!
//! # Files
//!
//! | File | Shape |
//! |------|-------|
//! | `user_blacklist.json` | list of usernames |
//! | `user_mapping.json` | object, value string or `null` |
//! | `language_blacklist.json` | list (lowercased on load) |
//! | `language_mapping.json` | object, string to string |
//! | `language_rewrites.json` | object, value string or `null` |
//! | `affiliation_blacklist.json` | list (lowercased on load) |
//! | `affiliation_rewrites.json` | object, value string or `null` |
//! | `topic_blacklist.json` | list |
//! | `topic_rewrites.json` | object, value string or `null` |
//! | `topic_mapping.json` | object, string to string |
//! | `topic_interjections.json` | object or list of `[from, to]` pairs, order kept |

mod error;

pub use error::RulesError;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

pub const USER_BLACKLIST_FILE: &str = "user_blacklist.json";
pub const USER_MAPPING_FILE: &str = "user_mapping.json";
pub const LANGUAGE_BLACKLIST_FILE: &str = "language_blacklist.json";
pub const LANGUAGE_MAPPING_FILE: &str = "language_mapping.json";
pub const LANGUAGE_REWRITES_FILE: &str = "language_rewrites.json";
pub const AFFILIATION_BLACKLIST_FILE: &str = "affiliation_blacklist.json";
pub const AFFILIATION_REWRITES_FILE: &str = "affiliation_rewrites.json";
pub const TOPIC_BLACKLIST_FILE: &str = "topic_blacklist.json";
pub const TOPIC_REWRITES_FILE: &str = "topic_rewrites.json";
pub const TOPIC_MAPPING_FILE: &str = "topic_mapping.json";
pub const TOPIC_INTERJECTIONS_FILE: &str = "topic_interjections.json";

/// Outcome of looking a raw value up in a [`RewriteTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite<'a> {
    /// The value survives, possibly replaced by the table's entry.
    Kept(&'a str),
    /// The table explicitly maps the value to `null`: discard it.
    Dropped,
}

/// Whole-value rewrite table. A `null` entry means "drop this value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteTable {
    entries: HashMap<String, Option<String>>,
}

impl RewriteTable {
    /// Looks up `value`; values without an entry are kept unchanged.
    #[must_use]
    pub fn apply<'a>(&'a self, value: &'a str) -> Rewrite<'a> {
        match self.entries.get(value) {
            None => Rewrite::Kept(value),
            Some(Some(replacement)) => Rewrite::Kept(replacement),
            Some(None) => Rewrite::Dropped,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<&'static str>)> for RewriteTable {
    fn from_iter<I: IntoIterator<Item = (K, Option<&'static str>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(String::from)))
                .collect(),
        }
    }
}

/// The full set of normalization rules.
///
/// Fields are public so tests and embedders can assemble tables in code;
/// [`RuleTables::load`] is the normal entry point. Language and affiliation
/// blacklists are expected to be lowercase.
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    pub user_blacklist: HashSet<String>,
    pub user_rewrites: RewriteTable,
    pub language_blacklist: HashSet<String>,
    pub language_mapping: HashMap<String, String>,
    pub language_rewrites: RewriteTable,
    pub affiliation_blacklist: HashSet<String>,
    pub affiliation_rewrites: RewriteTable,
    pub topic_blacklist: HashSet<String>,
    pub topic_rewrites: RewriteTable,
    pub topic_mapping: HashMap<String, String>,
    /// Literal substring replacements applied to topics in this order.
    pub topic_interjections: Vec<(String, String)>,
}

impl RuleTables {
    /// Loads every rule file from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if any file is missing, unreadable, or malformed.
    #[instrument(fields(dir = %dir.display()))]
    pub fn load(dir: &Path) -> Result<Self, RulesError> {
        let tables = Self {
            user_blacklist: read_json(dir, USER_BLACKLIST_FILE, "a list of strings")?,
            user_rewrites: read_rewrites(dir, USER_MAPPING_FILE)?,
            language_blacklist: lowercased(read_json::<Vec<String>>(
                dir,
                LANGUAGE_BLACKLIST_FILE,
                "a list of strings",
            )?),
            language_mapping: read_json(dir, LANGUAGE_MAPPING_FILE, "an object of strings")?,
            language_rewrites: read_rewrites(dir, LANGUAGE_REWRITES_FILE)?,
            affiliation_blacklist: lowercased(read_json::<Vec<String>>(
                dir,
                AFFILIATION_BLACKLIST_FILE,
                "a list of strings",
            )?),
            affiliation_rewrites: read_rewrites(dir, AFFILIATION_REWRITES_FILE)?,
            topic_blacklist: read_json(dir, TOPIC_BLACKLIST_FILE, "a list of strings")?,
            topic_rewrites: read_rewrites(dir, TOPIC_REWRITES_FILE)?,
            topic_mapping: read_json(dir, TOPIC_MAPPING_FILE, "an object of strings")?,
            topic_interjections: read_interjections(dir)?,
        };

        info!(
            users = tables.user_blacklist.len() + tables.user_rewrites.len(),
            languages = tables.language_mapping.len() + tables.language_rewrites.len(),
            affiliations = tables.affiliation_rewrites.len(),
            topics = tables.topic_mapping.len() + tables.topic_rewrites.len(),
            interjections = tables.topic_interjections.len(),
            "Loaded rule tables"
        );
        Ok(tables)
    }
}

fn lowercased(values: Vec<String>) -> HashSet<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

fn read_json<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    expected: &'static str,
) -> Result<T, RulesError> {
    let path = dir.join(file);
    let raw = fs::read_to_string(&path).map_err(|source| RulesError::Read {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "Read rule file");
    serde_json::from_str(&raw).map_err(|source| RulesError::Malformed {
        path,
        expected,
        source,
    })
}

fn read_rewrites(dir: &Path, file: &str) -> Result<RewriteTable, RulesError> {
    let entries: HashMap<String, Option<String>> =
        read_json(dir, file, "an object of strings or null")?;
    Ok(RewriteTable { entries })
}

/// Interjections may be written as an object (file order is kept) or as a
/// list of `[from, to]` pairs.
#[derive(Deserialize)]
#[serde(untagged)]
enum InterjectionsFile {
    Pairs(Vec<(String, String)>),
    Object(serde_json::Map<String, serde_json::Value>),
}

fn read_interjections(dir: &Path) -> Result<Vec<(String, String)>, RulesError> {
    let file: InterjectionsFile = read_json(
        dir,
        TOPIC_INTERJECTIONS_FILE,
        "an object of strings or a list of pairs",
    )?;
    match file {
        InterjectionsFile::Pairs(pairs) => Ok(pairs),
        InterjectionsFile::Object(map) => map
            .into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(replacement) => Ok((key, replacement)),
                _ => Err(RulesError::InvalidEntry {
                    path: dir.join(TOPIC_INTERJECTIONS_FILE),
                    key,
                }),
            })
            .collect(),
    }
}
