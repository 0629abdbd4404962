//! Rank-weighted keyword scoring over a window of message text.

use tracing::trace;

use crate::keywords::{CategoryRule, DOMAIN_WEIGHT, KeywordTable};
use crate::{Category, MessageText};

/// Result of scoring one text window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    /// Winning category, or `Other` when nothing matched.
    pub category: Category,
    /// Cumulative score of the winning category.
    pub score: u32,
    /// Priority implied by the best matched keyword rank.
    pub priority: u8,
    /// Best (lowest) matched keyword index; `Some(0)` for a domain match.
    pub keyword_rank: Option<usize>,
}

impl ScoreOutcome {
    /// Outcome when nothing matched.
    pub const NONE: Self = Self {
        category: Category::Other,
        score: 0,
        priority: 1,
        keyword_rank: None,
    };

    /// Rank used for tie-breaking; unmatched sorts last.
    #[must_use]
    pub fn rank_key(&self) -> usize {
        self.keyword_rank.unwrap_or(usize::MAX)
    }
}

impl Default for ScoreOutcome {
    fn default() -> Self {
        Self::NONE
    }
}

/// Scores message text against every non-reflex category rule.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    table: &'a KeywordTable,
}

impl<'a> Scorer<'a> {
    /// Creates a scorer over a keyword table.
    #[must_use]
    pub const fn new(table: &'a KeywordTable) -> Self {
        Self { table }
    }

    /// Scores sender and subject plus `body`, a lower-cased fragment of the snippet.
    ///
    /// The category with the strictly highest score wins; equal scores go to
    /// the lower matched rank. Priority is then derived from where the best
    /// keyword sits in the winner's own list.
    #[must_use]
    pub fn score(&self, text: &MessageText, body: &str) -> ScoreOutcome {
        let mut best = ScoreOutcome::NONE;

        for rule in self.table.scored_rules() {
            let (score, rank) = score_rule(rule, text, body);
            let rank_key = rank.unwrap_or(usize::MAX);

            if score > best.score || (score == best.score && rank_key < best.rank_key()) {
                best = ScoreOutcome {
                    category: rule.name,
                    score,
                    priority: rule.base_priority,
                    keyword_rank: rank,
                };
            }
        }

        if let (Some(rank), Some(rule)) = (best.keyword_rank, self.table.rule(best.category)) {
            best.priority = rule.priority_for_rank(rank);
        }

        trace!(
            category = %best.category,
            score = best.score,
            rank = ?best.keyword_rank,
            body_len = body.len(),
            "scored window"
        );
        best
    }
}

/// Score and best rank of one category.
fn score_rule(rule: &CategoryRule, text: &MessageText, body: &str) -> (u32, Option<usize>) {
    let mut score = 0;
    let mut best_rank: Option<usize> = None;
    let mut record = |rank: usize| {
        best_rank = Some(best_rank.map_or(rank, |r| r.min(rank)));
    };

    if rule.domain_matches(&text.domain) {
        score += DOMAIN_WEIGHT;
        record(0);
    }

    for (rank, keyword) in rule.keywords.iter().enumerate() {
        if keyword.is_empty() {
            continue;
        }
        if text.subject.contains(keyword.as_str()) {
            score += rule.subject_weight(rank);
            record(rank);
        }
        if text.local_part.contains(keyword.as_str()) {
            score += rule.field_weight(rank);
            record(rank);
        }
        if !body.is_empty() && body.contains(keyword.as_str()) {
            score += rule.field_weight(rank);
            record(rank);
        }
    }

    (score, best_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::default_rules;
    use crate::Message;

    fn text(from: &str, subject: &str) -> MessageText {
        MessageText::new(&Message::new("1", from, subject, ""))
    }

    fn table() -> KeywordTable {
        KeywordTable::new(default_rules())
    }

    #[test]
    fn test_nothing_matches() {
        let table = table();
        let outcome = Scorer::new(&table).score(&text("zed@example.com", "hello there"), "");

        assert_eq!(outcome, ScoreOutcome::NONE);
    }

    #[test]
    fn test_domain_match_is_strong() {
        let table = table();
        let outcome = Scorer::new(&table).score(&text("registrar@state.edu", "hello"), "");

        assert_eq!(outcome.category, Category::School);
        assert!(outcome.score >= DOMAIN_WEIGHT);
        assert_eq!(outcome.keyword_rank, Some(0));
        assert_eq!(outcome.priority, 4);
    }

    #[test]
    fn test_subject_keyword_weight() {
        let table = table();
        // "interview" is the first work-opportunities keyword.
        let outcome = Scorer::new(&table).score(&text("sam@corp.com", "interview"), "");

        assert_eq!(outcome.category, Category::WorkOpportunities);
        assert_eq!(outcome.score, 5);
        assert_eq!(outcome.keyword_rank, Some(0));
        assert_eq!(outcome.priority, 4);
    }

    #[test]
    fn test_body_adds_flatter_weight() {
        let table = table();
        let scorer = Scorer::new(&table);
        let t = text("sam@corp.com", "hello");

        let without = scorer.score(&t, "");
        let with = scorer.score(&t, "see you at my birthday");

        assert_eq!(without.score, 0);
        assert_eq!(with.category, Category::Personal);
        assert_eq!(with.score, 2);
    }

    #[test]
    fn test_sender_local_part_counts() {
        let table = table();
        let outcome = Scorer::new(&table).score(&text("recruiter@talent.io", "hello"), "");

        assert_eq!(outcome.category, Category::WorkOpportunities);
        assert!(outcome.score > 0);
    }

    #[test]
    fn test_reflex_categories_never_scored() {
        let table = table();
        let outcome = Scorer::new(&table).score(&text("a@b.com", "flash sale coupon"), "");

        assert_ne!(outcome.category, Category::Promo);
        assert_ne!(outcome.category, Category::AuthCodes);
    }

    #[test]
    fn test_tie_goes_to_better_rank() {
        let rules = vec![
            CategoryRule::new(Category::School, &["alpha", "beta", "gamma", "delta", "omega"], &[], 3),
            CategoryRule::new(Category::Personal, &["one", "two", "three", "four", "omega2"], &[], 2),
        ];
        let table = KeywordTable::new(rules);
        // "delta" and "four" both sit at rank 3 of 5 and weigh 2.
        let outcome = Scorer::new(&table).score(&text("x@y.z", "four and delta"), "");
        assert_eq!(outcome.category, Category::School);

        let outcome = Scorer::new(&table).score(&text("x@y.z", "omega2 three"), "");
        assert_eq!(outcome.category, Category::Personal);
    }
}
