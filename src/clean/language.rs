//! Programming language list cleaning.

use tracing::debug;

use super::{CleanError, Field, check_forbidden, split_values};
use crate::rules::{Rewrite, RuleTables};

/// Slash notations that name a single thing (or a known pair) and must not
/// be split on the `/`.
const LANGUAGE_SUBSTITUTIONS: [(&str, &str); 5] = [
    ("pl/pgsql", "plpgsql"),
    ("c/c++", "c, c++"),
    ("shell/bash", "bash"),
    ("tex/latex", "latex"),
    ("qml/qt", "qml"),
];

/// Cleans a free-text language cell into an ordered list of unique,
/// lowercase language names.
///
/// A value that still contains a parenthesis after the rewrites (for example
/// `"Java (maybe?)"`) cannot be split safely and is discarded as a whole.
///
/// # Errors
///
/// Returns [`CleanError::ForbiddenCharacter`] if the rewritten value contains
/// a forbidden character.
pub fn clean_languages(raw: Option<&str>, rules: &RuleTables) -> Result<Vec<String>, CleanError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let value = match rules.language_rewrites.apply(raw.trim()) {
        Rewrite::Kept(value) => value,
        Rewrite::Dropped => {
            debug!(value = %raw.trim(), "Language value rewritten to null");
            return Ok(Vec::new());
        }
    };
    check_forbidden(Field::Language, value)?;

    let mut value = value.to_lowercase();
    for (notation, replacement) in LANGUAGE_SUBSTITUTIONS {
        value = value.replace(notation, replacement);
    }
    let value = value.replace([';', '/'], ",");
    if value.contains('(') {
        debug!(%value, "FIXME (lang): dropping unparseable language value");
        return Ok(Vec::new());
    }

    let mut languages: Vec<String> = Vec::new();
    for token in split_values(&value) {
        if token.is_empty() || rules.language_blacklist.contains(token) {
            continue;
        }
        let language = rules
            .language_mapping
            .get(token)
            .map_or(token, String::as_str);
        if !languages.iter().any(|seen| seen == language) {
            languages.push(language.to_string());
        }
    }
    Ok(languages)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rules::RewriteTable;

    fn rules() -> RuleTables {
        RuleTables {
            language_blacklist: ["other".to_string(), "none".to_string()].into(),
            language_mapping: [
                ("py".to_string(), "python".to_string()),
                ("golang".to_string(), "go".to_string()),
            ]
            .into(),
            language_rewrites: [
                ("Too many to list", None),
                ("Matlab/Octave (some)", Some("matlab, octave")),
            ]
            .into_iter()
            .collect::<RewriteTable>(),
            ..RuleTables::default()
        }
    }

    fn clean(raw: &str) -> Vec<String> {
        clean_languages(Some(raw), &rules()).unwrap()
    }

    #[test]
    fn test_clean_languages_lowercases_and_splits() {
        assert_eq!(clean("Python; C++"), vec!["python", "c++"]);
        assert_eq!(clean("R\nJulia, Rust"), vec!["r", "julia", "rust"]);
    }

    #[test]
    fn test_clean_languages_missing_cell() {
        assert!(clean_languages(None, &rules()).unwrap().is_empty());
    }

    #[test]
    fn test_clean_languages_known_slash_notations() {
        assert_eq!(clean("C/C++"), vec!["c", "c++"]);
        assert_eq!(clean("PL/pgSQL"), vec!["plpgsql"]);
        assert_eq!(clean("Shell/Bash"), vec!["bash"]);
        assert_eq!(clean("TeX/LaTeX"), vec!["latex"]);
        assert_eq!(clean("QML/Qt"), vec!["qml"]);
    }

    #[test]
    fn test_clean_languages_splits_remaining_slashes() {
        assert_eq!(clean("Fortran/Python"), vec!["fortran", "python"]);
    }

    #[test]
    fn test_clean_languages_drops_parenthesized_value() {
        assert!(clean("Java (maybe?)").is_empty());
    }

    #[test]
    fn test_clean_languages_rewrite_runs_before_parenthesis_check() {
        assert_eq!(clean("Matlab/Octave (some)"), vec!["matlab", "octave"]);
    }

    #[test]
    fn test_clean_languages_rewrite_to_null_drops() {
        assert!(clean("Too many to list").is_empty());
    }

    #[test]
    fn test_clean_languages_blacklist_and_mapping() {
        assert_eq!(clean("Py, Other, golang"), vec!["python", "go"]);
    }

    #[test]
    fn test_clean_languages_deduplicates_in_order() {
        assert_eq!(clean("python, R, py, r"), vec!["python", "r"]);
    }

    #[test]
    fn test_clean_languages_skips_empty_tokens() {
        assert_eq!(clean("python,, ;\n"), vec!["python"]);
    }

    #[test]
    fn test_clean_languages_forbidden_character_is_fatal() {
        let err = clean_languages(Some(r#"R "tidyverse""#), &rules()).unwrap_err();
        assert!(matches!(
            err,
            CleanError::ForbiddenCharacter {
                field: Field::Language,
                ..
            }
        ));
    }

    #[test]
    fn test_clean_languages_forbidden_character_wins_over_parenthesis() {
        assert!(clean_languages(Some(r#"Java ("maybe")"#), &rules()).is_err());
    }

    #[test]
    fn test_clean_languages_is_idempotent() {
        for raw in ["Python", "C/C++; Py", "golang\nRust"] {
            for language in clean(raw) {
                assert_eq!(clean(&language), vec![language.clone()]);
            }
        }
        assert_eq!(clean(&clean("Python")[0]), vec!["python"]);
    }
}
