//! Regex extraction of links, dates, amounts and task lines.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of task lines kept.
pub const MAX_TASKS: usize = 5;

// Literal patterns; compile failures are caught by the tests below.
#[allow(clippy::expect_used)]
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("valid link regex"));

#[allow(clippy::expect_used)]
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}|\w+\s+\d{1,2},?\s+\d{4}|\d{4}[/\-]\d{1,2}[/\-]\d{1,2})\b",
    )
    .expect("valid date regex")
});

#[allow(clippy::expect_used)]
static MONEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\d,]+\.?\d*").expect("valid money regex"));

#[allow(clippy::expect_used)]
static TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*•][ \t]+.+$").expect("valid task regex"));

/// Structured details pulled from a message preview.
///
/// Matches keep their order of appearance; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBundle {
    /// `http`/`https` URLs.
    pub links: Vec<String>,
    /// Date-shaped strings (`3/15/2024`, `March 5, 2024`, `2024-03-15`).
    pub dates: Vec<String>,
    /// Dollar amounts.
    pub money: Vec<String>,
    /// Bullet lines, at most [`MAX_TASKS`].
    pub tasks: Vec<String>,
}

impl InfoBundle {
    /// Whether nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.dates.is_empty() && self.money.is_empty() && self.tasks.is_empty()
    }
}

fn all_matches(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Extracts links, dates, amounts and bullet tasks from subject and snippet.
///
/// The snippet starts on its own line, so a bullet opening it is a task.
/// Never fails: no match yields an empty list.
#[must_use]
pub fn extract(subject: &str, snippet: &str) -> InfoBundle {
    let text = format!("{subject}\n{snippet}");

    InfoBundle {
        links: all_matches(&LINK, &text),
        dates: all_matches(&DATE, &text),
        money: all_matches(&MONEY, &text),
        tasks: TASK
            .find_iter(&text)
            .take(MAX_TASKS)
            .map(|m| m.as_str().trim().to_string())
            .collect(),
    }
}

/// Whether the text quotes a dollar amount.
#[must_use]
pub fn has_money(text: &str) -> bool {
    MONEY.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_and_money() {
        let info = extract("Meeting on 3/15/2024, pay $250.00", "");

        assert!(info.dates.contains(&"3/15/2024".to_string()));
        assert!(info.money.contains(&"$250.00".to_string()));
        assert!(info.links.is_empty());
    }

    #[test]
    fn test_date_shapes() {
        let info = extract("Due March 5, 2024", "or 2024-03-15 at the latest");

        assert_eq!(info.dates, vec!["March 5, 2024", "2024-03-15"]);
    }

    #[test]
    fn test_links_keep_order_and_duplicates() {
        let info = extract(
            "Docs",
            "see https://a.example/x and http://b.example then https://a.example/x",
        );

        assert_eq!(
            info.links,
            vec!["https://a.example/x", "http://b.example", "https://a.example/x"]
        );
    }

    #[test]
    fn test_money_with_thousands() {
        let info = extract("Invoice", "Total $1,299.99 due, deposit $50");
        assert_eq!(info.money, vec!["$1,299.99", "$50"]);
    }

    #[test]
    fn test_tasks_capped() {
        let snippet = "Agenda:\n- one\n* two\n• three\n- four\n- five\n- six\n- seven";
        let info = extract("Plan", snippet);

        assert_eq!(info.tasks.len(), MAX_TASKS);
        assert_eq!(info.tasks[0], "- one");
        assert_eq!(info.tasks[2], "• three");
    }

    #[test]
    fn test_bullet_on_first_snippet_line() {
        let info = extract("Todo", "- send report\n- book room");

        assert_eq!(info.tasks, vec!["- send report", "- book room"]);
    }

    #[test]
    fn test_nothing_found() {
        let info = extract("Hello", "just saying hi");
        assert!(info.is_empty());
    }

    #[test]
    fn test_has_money() {
        assert!(has_money("your bill of $42 is ready"));
        assert!(!has_money("your bill is ready"));
    }
}
