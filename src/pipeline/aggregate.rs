//! Merging of duplicate reviewer rows.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{info, instrument, warn};

use super::Reviewer;

/// Running merge of all rows sharing one username.
#[derive(Debug, Default)]
struct ReviewerGroup {
    languages_primary: BTreeSet<String>,
    languages_secondary: BTreeSet<String>,
    affiliations: BTreeSet<String>,
    email: Option<String>,
    topics: BTreeSet<String>,
    active_reviews: i64,
    total_reviews: i64,
    recent_year_reviews: i64,
    recent_quarter_reviews: i64,
}

impl ReviewerGroup {
    fn absorb(&mut self, row: Reviewer) {
        self.languages_primary.extend(row.languages_primary);
        self.languages_secondary.extend(row.languages_secondary);
        self.affiliations.extend(row.affiliations);
        self.topics.extend(row.topics);
        if row.email.is_some() {
            self.email = row.email;
        }
        self.active_reviews = self.active_reviews.saturating_add(row.active_reviews);
        self.total_reviews = self.total_reviews.saturating_add(row.total_reviews);
        self.recent_year_reviews = self.recent_year_reviews.saturating_add(row.recent_year_reviews);
        self.recent_quarter_reviews = self
            .recent_quarter_reviews
            .saturating_add(row.recent_quarter_reviews);
    }

    fn into_reviewer(self, username: String) -> Reviewer {
        Reviewer {
            username,
            languages_primary: self.languages_primary.into_iter().collect(),
            languages_secondary: self.languages_secondary.into_iter().collect(),
            affiliations: self.affiliations.into_iter().collect(),
            email: self.email,
            topics: self.topics.into_iter().collect(),
            active_reviews: self.active_reviews,
            total_reviews: self.total_reviews,
            recent_year_reviews: self.recent_year_reviews,
            recent_quarter_reviews: self.recent_quarter_reviews,
        }
    }
}

/// Merges rows that share a username.
///
/// List fields become sorted, deduplicated unions; counters are summed; the
/// email is the last non-missing value in sheet order. The result holds one
/// reviewer per username, sorted by username.
#[must_use]
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn aggregate(rows: Vec<Reviewer>) -> Vec<Reviewer> {
    let mut groups: BTreeMap<String, ReviewerGroup> = BTreeMap::new();
    for mut row in rows {
        let username = std::mem::take(&mut row.username);
        groups.entry(username).or_default().absorb(row);
    }
    groups
        .into_iter()
        .map(|(username, group)| group.into_reviewer(username))
        .collect()
}

/// Emails shared by more than one reviewer, most shared first.
///
/// Informational only: the result never changes which reviewers are kept.
#[must_use]
pub fn duplicate_emails(reviewers: &[Reviewer]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for email in reviewers.iter().filter_map(|r| r.email.as_deref()) {
        *counts.entry(email).or_default() += 1;
    }
    let unique = counts.len();

    let mut duplicates: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(email, count)| (email.to_string(), count))
        .collect();
    duplicates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    #[allow(clippy::cast_precision_loss)]
    let share = if unique == 0 {
        0.0
    } else {
        duplicates.len() as f64 / unique as f64 * 100.0
    };
    info!(
        duplicated = duplicates.len(),
        unique,
        "{} ({share:.2}%) emails have duplicates of {unique} unique emails",
        duplicates.len()
    );
    for (email, count) in &duplicates {
        info!(%email, count, "Email shared by several usernames");
    }
    duplicates
}

/// Drops repeated usernames, keeping the last occurrence of each.
///
/// After [`aggregate`] this is a no-op; a non-zero drop count is logged as a
/// warning because it means rows were merged incorrectly upstream.
#[must_use]
pub fn drop_duplicate_usernames(reviewers: Vec<Reviewer>) -> Vec<Reviewer> {
    let before = reviewers.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: Vec<Reviewer> = reviewers
        .into_iter()
        .rev()
        .filter(|r| seen.insert(r.username.clone()))
        .collect();
    kept.reverse();

    if kept.len() != before {
        warn!(
            dropped = before - kept.len(),
            "Duplicate usernames survived aggregation"
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(username: &str, languages: &[&str], topics: &[&str]) -> Reviewer {
        Reviewer {
            username: username.to_string(),
            languages_primary: languages.iter().map(ToString::to_string).collect(),
            topics: topics.iter().map(ToString::to_string).collect(),
            ..Reviewer::default()
        }
    }

    #[test]
    fn test_aggregate_unions_lists_and_sums_counters() {
        let mut first = row("abc", &["python"], &["ml"]);
        first.active_reviews = 1;
        first.total_reviews = 4;
        let mut second = row("abc", &["r"], &["ml"]);
        second.active_reviews = 2;
        second.recent_quarter_reviews = 1;

        let merged = aggregate(vec![first, second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].languages_primary, vec!["python", "r"]);
        assert_eq!(merged[0].topics, vec!["ml"]);
        assert_eq!(merged[0].active_reviews, 3);
        assert_eq!(merged[0].total_reviews, 4);
        assert_eq!(merged[0].recent_quarter_reviews, 1);
    }

    #[test]
    fn test_aggregate_counter_sum_saturates() {
        let mut first = row("abc", &["python"], &["ml"]);
        first.active_reviews = i64::MAX;
        let mut second = row("abc", &["python"], &["ml"]);
        second.active_reviews = i64::MAX;
        second.total_reviews = 2;

        let merged = aggregate(vec![first, second]);
        assert_eq!(merged[0].active_reviews, i64::MAX);
        assert_eq!(merged[0].total_reviews, 2);
    }

    #[test]
    fn test_aggregate_union_is_sorted() {
        let merged = aggregate(vec![
            row("abc", &["rust", "c"], &["z", "a"]),
            row("abc", &["ada"], &["m"]),
        ]);
        assert_eq!(merged[0].languages_primary, vec!["ada", "c", "rust"]);
        assert_eq!(merged[0].topics, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_aggregate_email_is_last_present_value() {
        let mut first = row("abc", &["python"], &["ml"]);
        first.email = Some("old@x.com".to_string());
        let mut second = row("abc", &["python"], &["ml"]);
        second.email = Some("new@x.com".to_string());
        let third = row("abc", &["python"], &["ml"]);

        let merged = aggregate(vec![first, second, third]);
        assert_eq!(merged[0].email.as_deref(), Some("new@x.com"));
    }

    #[test]
    fn test_aggregate_sorts_by_username() {
        let merged = aggregate(vec![
            row("zed", &["c"], &["t"]),
            row("amy", &["c"], &["t"]),
            row("max", &["c"], &["t"]),
        ]);
        let names: Vec<_> = merged.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["amy", "max", "zed"]);
    }

    #[test]
    fn test_duplicate_emails_counts_shared_addresses() {
        let mut a = row("amy", &["c"], &["t"]);
        a.email = Some("lab@x.com".to_string());
        let mut b = row("bob", &["c"], &["t"]);
        b.email = Some("lab@x.com".to_string());
        let mut c = row("cat", &["c"], &["t"]);
        c.email = Some("cat@x.com".to_string());
        let d = row("dan", &["c"], &["t"]);

        let duplicates = duplicate_emails(&[a, b, c, d]);
        assert_eq!(duplicates, vec![("lab@x.com".to_string(), 2)]);
    }

    #[test]
    fn test_duplicate_emails_empty_input() {
        assert!(duplicate_emails(&[]).is_empty());
    }

    #[test]
    fn test_drop_duplicate_usernames_keeps_last() {
        let mut first = row("amy", &["c"], &["t"]);
        first.total_reviews = 1;
        let mut last = row("amy", &["c"], &["t"]);
        last.total_reviews = 2;
        let other = row("bob", &["c"], &["t"]);

        let kept = drop_duplicate_usernames(vec![first, other, last]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].username, "bob");
        assert_eq!(kept[1].username, "amy");
        assert_eq!(kept[1].total_reviews, 2);
    }

    #[test]
    fn test_drop_duplicate_usernames_is_noop_after_aggregate() {
        let merged = aggregate(vec![
            row("amy", &["c"], &["t"]),
            row("amy", &["r"], &["t"]),
            row("bob", &["c"], &["t"]),
        ]);
        assert_eq!(drop_duplicate_usernames(merged.clone()), merged);
    }
}
