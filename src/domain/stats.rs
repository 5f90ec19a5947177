// src/domain/stats.rs

use serde::{Deserialize, Serialize};

/// Comment totals per approval state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStats {
    pub moderated: i64,
    pub approved: i64,
    pub spam: i64,
    pub trash: i64,
    #[serde(rename = "post-trashed")]
    pub post_trashed: i64,
    pub total_comments: i64,
    pub all: i64,
}

impl CommentStats {
    /// Folds `(approved, count)` rows from a grouped query.
    ///
    /// Trashed and post-trashed rows never count toward the totals. States
    /// outside the known five still count toward the totals.
    pub fn from_counts<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let mut stats = CommentStats::default();
        let mut total = 0;

        for (state, n) in rows {
            if state != "trash" && state != "post-trashed" {
                total += n;
            }
            match state.as_str() {
                "0" => stats.moderated = n,
                "1" => stats.approved = n,
                "spam" => stats.spam = n,
                "trash" => stats.trash = n,
                "post-trashed" => stats.post_trashed = n,
                _ => {}
            }
        }

        stats.total_comments = total;
        stats.all = total;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
    }

    #[test]
    fn no_rows_is_all_zero() {
        assert_eq!(CommentStats::from_counts(Vec::new()), CommentStats::default());
    }

    #[test]
    fn trash_states_are_excluded_from_totals() {
        let stats = CommentStats::from_counts(rows(&[
            ("0", 2),
            ("1", 5),
            ("spam", 3),
            ("trash", 4),
            ("post-trashed", 1),
        ]));

        assert_eq!(stats.moderated, 2);
        assert_eq!(stats.approved, 5);
        assert_eq!(stats.spam, 3);
        assert_eq!(stats.trash, 4);
        assert_eq!(stats.post_trashed, 1);
        assert_eq!(stats.total_comments, 10);
        assert_eq!(stats.all, 10);
    }

    #[test]
    fn unknown_states_only_feed_the_total() {
        let stats = CommentStats::from_counts(rows(&[("1", 1), ("held", 6)]));
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.moderated, 0);
        assert_eq!(stats.total_comments, 7);
    }

    #[test]
    fn cache_form_uses_host_field_names() {
        let json = serde_json::to_value(CommentStats::default()).unwrap();
        assert!(json.get("post-trashed").is_some());
        assert!(json.get("total_comments").is_some());
    }
}
