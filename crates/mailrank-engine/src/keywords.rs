//! Ranked keyword tables.
//!
//! Each category carries an ordered keyword list: earlier entries are more
//! diagnostic than later ones, and the position of a match (its *rank*) is
//! the only signal of relative importance. Lists are never sorted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Category, Priority};

/// Scoring weight for a sender-domain match.
pub const DOMAIN_WEIGHT: u32 = 10;

/// Keyword and domain rules for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    /// Category these rules vote for.
    pub name: Category,
    /// Keywords, most important first.
    #[serde(default, deserialize_with = "strings_only")]
    pub keywords: Vec<String>,
    /// Sender-domain fragments.
    #[serde(default, deserialize_with = "strings_only")]
    pub domains: Vec<String>,
    /// Priority used when the matched keyword sits in the tail of the list.
    #[serde(default = "lowest_priority", deserialize_with = "clamped_priority")]
    pub base_priority: u8,
}

/// Keeps the non-empty strings of a JSON list; anything else decodes as empty.
fn strings_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        _ => Vec::new(),
    };
    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
        .collect())
}

const fn lowest_priority() -> u8 {
    Priority::LOWEST.get()
}

/// Rounds a numeric priority into `1..=5`; non-numbers become the lowest.
fn clamped_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .map_or(Priority::LOWEST, Priority::from_score)
        .get())
}

impl CategoryRule {
    /// Creates a rule, lower-casing keywords and domains.
    #[must_use]
    pub fn new(name: Category, keywords: &[&str], domains: &[&str], base_priority: u8) -> Self {
        Self {
            name,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            domains: domains.iter().map(|d| d.to_lowercase()).collect(),
            base_priority,
        }
    }

    /// Position of `rank` within this rule's own keyword list, in `[0, 1)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentile(&self, rank: usize) -> f64 {
        rank as f64 / self.keywords.len().max(1) as f64
    }

    /// Whether the sender domain belongs to this category.
    #[must_use]
    pub fn domain_matches(&self, domain: &str) -> bool {
        if domain.is_empty() {
            return false;
        }
        self.domains.iter().filter(|d| !d.is_empty()).any(|d| {
            domain == d || domain.ends_with(&format!(".{d}")) || domain.contains(d.as_str())
        })
    }

    /// Weight of a subject match for the keyword at `rank`.
    ///
    /// Top 20% of the list weighs 5, the next 30% weighs 3, the rest 2.
    #[must_use]
    pub fn subject_weight(&self, rank: usize) -> u32 {
        let percentile = self.percentile(rank);
        if percentile < 0.2 {
            5
        } else if percentile < 0.5 {
            3
        } else {
            2
        }
    }

    /// Weight of a sender or body match for the keyword at `rank`.
    #[must_use]
    pub fn field_weight(&self, rank: usize) -> u32 {
        if self.percentile(rank) < 0.3 { 2 } else { 1 }
    }

    /// Priority implied by the best matched rank.
    ///
    /// Maps the rank percentile onto 4 / 3 / 2 so priorities spread evenly
    /// regardless of how large the raw score got.
    #[must_use]
    pub fn priority_for_rank(&self, rank: usize) -> u8 {
        let percentile = self.percentile(rank);
        if percentile < 0.2 {
            4
        } else if percentile < 0.5 {
            3
        } else if percentile < 0.8 {
            2
        } else {
            self.base_priority.max(2)
        }
    }
}

/// Ordered set of category rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    rules: Vec<CategoryRule>,
}

impl KeywordTable {
    /// Creates a table from rules, keeping their order.
    #[must_use]
    pub const fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Rule for a category, if configured.
    #[must_use]
    pub fn rule(&self, category: Category) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.name == category)
    }

    /// All rules, in configuration order.
    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Rules that take part in general scoring (reflex categories excluded).
    pub fn scored_rules(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules
            .iter()
            .filter(|r| !r.name.is_reflex() && r.name != Category::Other)
    }

    /// Whether no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Subject keywords that force priority 5.
pub const URGENT_KEYWORDS: &[&str] = &[
    "urgent", "asap", "as soon as possible", "immediately", "immediate", "right away",
    "deadline", "due today", "due now", "action required", "action needed",
    "time sensitive", "time-sensitive", "expires today", "expiring today",
    "critical", "emergency", "emergencies", "rush", "hurry",
];

/// Subject keywords that bump priority by one (capped at 4).
pub const IMPORTANT_KEYWORDS: &[&str] = &[
    "important", "priority", "attention", "required", "must", "need", "needed",
    "please respond", "please reply", "response needed", "reply needed",
    "confirmation required", "verification needed", "approval needed",
];

/// Built-in category rules.
#[must_use]
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(Category::School, SCHOOL, &["edu", "school", "university", "college"], 3),
        CategoryRule::new(Category::WorkCurrent, WORK_CURRENT, &[], 4),
        CategoryRule::new(Category::WorkOpportunities, WORK_OPPORTUNITIES, &[], 3),
        CategoryRule::new(Category::Finance, FINANCE, FINANCE_DOMAINS, 4),
        CategoryRule::new(Category::Personal, PERSONAL, &[], 2),
        CategoryRule::new(Category::AuthCodes, AUTH_CODES, &[], 1),
        CategoryRule::new(Category::Promo, PROMO, &[], 1),
    ]
}

const SCHOOL: &[&str] = &[
    // exams, deadlines, assignments
    "due date", "due dates", "deadline", "deadlines", "exam", "exams", "test", "tests",
    "quiz", "quizzes", "midterm", "midterms", "final", "finals",
    "assignment", "assignments", "homework", "submission", "submissions",
    // grades, courses
    "grade", "grades", "gpa", "course", "courses", "class", "classes", "lecture", "lectures",
    "professor", "professors", "prof",
    // enrollment
    "registration", "registrations", "enrollment", "enrollments", "student", "students",
    "education", "edu",
    // general
    "university", "universities", "college", "colleges", "campus", "tuition", "financial aid",
    "scholarship", "scholarships", "blackboard", "canvas", "moodle", "coursework", "syllabus",
    "syllabi",
];

const WORK_CURRENT: &[&str] = &[
    // deadlines, action items
    "deadline", "deadlines", "urgent", "asap", "action items", "action item", "action required",
    "action needed", "follow up", "follow-ups", "follow-up", "follow ups", "todo", "todos",
    "to-do", "to-dos",
    // meetings, projects, reviews
    "meeting", "meetings", "project", "projects", "review", "reviews", "code review",
    "code reviews", "pr review", "pr reviews", "pull request", "pull requests", "merge",
    "merges", "deploy", "deploys",
    // syncs, planning
    "team", "teams", "sync", "syncs", "sync up", "sync ups", "1:1", "one-on-one", "one on one",
    "sprint planning", "sprint plannings", "sprint", "sprints", "standup", "standups",
    "stand-up", "stand-ups", "stand up", "stand ups",
    // tools, retros
    "retrospective", "retrospectives", "retro", "retros", "all hands", "all-hands", "slack",
    "jira", "confluence", "trello", "asana", "notion",
];

const WORK_OPPORTUNITIES: &[&str] = &[
    // interviews, applications
    "interview", "interviews", "apply now", "application", "applications", "job opening",
    "job openings", "job opportunity", "job opportunities",
    // recruiters, positions
    "recruiter", "recruiters", "hiring", "we are hiring", "we're hiring", "hiring now",
    "position", "positions", "job", "jobs",
    // career
    "opportunity", "opportunities", "career", "careers", "resume", "resumes", "cv", "cvs",
    "curriculum vitae",
    // job sites
    "recruiting", "talent", "talents", "headhunter", "headhunters", "recruitment",
    "recruitments", "job search", "job searches", "linkedin", "indeed", "glassdoor", "monster",
    "ziprecruiter", "angel.co", "angelist",
];

const FINANCE: &[&str] = &[
    // money owed
    "payment due", "payments due", "overdue", "past due", "amount due", "amounts due",
    "balance due", "balances due", "minimum payment", "minimum payments", "alert", "alerts",
    "notification", "notifications", "reminder", "reminders", "payment reminder",
    "payment reminders",
    // invoices, charges
    "invoice", "invoices", "receipt", "receipts", "charge", "charges", "charged", "payment",
    "payments", "transaction", "transactions",
    // statements, balances
    "statement", "statements", "balance", "balances", "account balance", "account balances",
    "available balance", "available balances", "account summary", "account summaries",
    "account", "accounts", "purchase", "purchases", "$", "dollar", "dollars",
    // subscriptions, bills
    "subscription", "subscriptions", "renewal", "renewals", "renew", "billing", "billed",
    "monthly", "annual", "yearly", "subscription fee", "subscription fees", "membership",
    "memberships", "auto-renew", "auto renew", "bill", "bills", "utility", "utilities",
    "electric", "gas", "water", "phone bill", "phone bills", "internet bill", "internet bills",
    "credit card", "credit cards", "creditcard", "creditcards", "card ending", "card endings",
    "card number", "card numbers", "expires", "bank", "banks", "banking", "checking", "savings",
    "deposit", "deposits", "withdrawal", "withdrawals", "transfer", "transfers",
    // providers
    "paypal", "stripe", "venmo", "zelle", "cash app", "square", "chase", "bank of america",
    "wells fargo", "citi", "american express", "amex", "discover", "capital one",
];

const FINANCE_DOMAINS: &[&str] = &[
    "bank", "paypal", "stripe", "chase", "wellsfargo", "bofa", "citi", "amex", "discover",
    "capitalone", "venmo", "square", "billing", "invoice", "payment",
];

const PERSONAL: &[&str] = &[
    // special events
    "birthday", "birthdays", "wedding", "weddings", "anniversary", "anniversaries",
    "celebration", "celebrations", "congratulations", "congrats", "baby", "babies", "shower",
    "showers",
    // gatherings
    "party", "parties", "dinner", "dinners", "lunch", "lunches", "brunch", "brunches", "coffee",
    "drinks", "happy hour", "happy hours", "weekend plans", "get together", "get togethers",
    // general social
    "family", "families", "friend", "friends", "weekend", "weekends", "holiday", "holidays",
    "vacation", "vacations", "trip", "trips", "travel", "catch up", "catch ups", "hang out",
    "hang outs", "hangout", "hangouts",
];

const AUTH_CODES: &[&str] = &[
    "verification code", "security code", "login code", "one-time", "otp", "2fa",
];

const PROMO: &[&str] = &[
    "sale", "sales", "discount", "discounts", "offer", "offers", "deal", "deals", "promo",
    "promos", "coupon", "coupons", "subscribe", "unsubscribe", "limited time", "limited-time",
    "act now", "buy now", "shop now", "order now", "free shipping", "free trial", "free trials",
    "special offer", "special offers", "exclusive offer", "exclusive offers", "flash sale",
    "flash sales", "clearance", "clearances", "savings", "save up to", "percent off", "% off",
    "off", "newsletter", "newsletters", "marketing", "promotional", "advertisement",
    "advertisements", "ad", "ads", "noreply", "no-reply", "donotreply", "do not reply",
    "mailing list", "mailing lists",
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rule_of(len: usize) -> CategoryRule {
        let keywords: Vec<String> = (0..len).map(|i| format!("kw{i}")).collect();
        let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
        CategoryRule::new(Category::School, &refs, &[], 3)
    }

    #[test]
    fn test_subject_weight_tiers() {
        let rule = rule_of(10);

        assert_eq!(rule.subject_weight(0), 5);
        assert_eq!(rule.subject_weight(1), 5);
        assert_eq!(rule.subject_weight(2), 3);
        assert_eq!(rule.subject_weight(4), 3);
        assert_eq!(rule.subject_weight(5), 2);
        assert_eq!(rule.subject_weight(9), 2);
    }

    #[test]
    fn test_field_weight_tiers() {
        let rule = rule_of(10);

        assert_eq!(rule.field_weight(2), 2);
        assert_eq!(rule.field_weight(3), 1);
    }

    #[test]
    fn test_priority_for_rank() {
        let rule = rule_of(10);

        assert_eq!(rule.priority_for_rank(0), 4);
        assert_eq!(rule.priority_for_rank(3), 3);
        assert_eq!(rule.priority_for_rank(6), 2);
        assert_eq!(rule.priority_for_rank(9), 3); // tail falls back to base priority
    }

    #[test]
    fn test_priority_for_rank_tail_at_least_two() {
        let keywords: Vec<String> = (0..10).map(|i| format!("kw{i}")).collect();
        let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
        let rule = CategoryRule::new(Category::Personal, &refs, &[], 1);

        assert_eq!(rule.priority_for_rank(9), 2);
    }

    #[test]
    fn test_rule_json_drops_junk_and_clamps_priority() {
        let rule: CategoryRule = serde_json::from_str(
            r#"{"name": "finance", "keywords": ["invoice", null, 7, "", "bill"], "domains": null, "basePriority": 9}"#,
        )
        .unwrap();

        assert_eq!(rule.keywords, vec!["invoice", "bill"]);
        assert!(rule.domains.is_empty());
        assert_eq!(rule.base_priority, 5);

        let rule: CategoryRule = serde_json::from_str(r#"{"name": "school", "basePriority": 0}"#).unwrap();
        assert_eq!(rule.base_priority, 1);

        let rule: CategoryRule = serde_json::from_str(r#"{"name": "school"}"#).unwrap();
        assert_eq!(rule.base_priority, 1);
    }

    #[test]
    fn test_domain_match() {
        let rule = CategoryRule::new(Category::School, &[], &["edu"], 3);

        assert!(rule.domain_matches("edu"));
        assert!(rule.domain_matches("mit.edu"));
        assert!(rule.domain_matches("students.education.org"));
        assert!(!rule.domain_matches("example.com"));
        assert!(!rule.domain_matches(""));
    }

    #[test]
    fn test_percentile_is_per_category() {
        let short = rule_of(5);
        let long = rule_of(50);

        assert!((short.percentile(4) - 0.8).abs() < f64::EPSILON);
        assert!((long.percentile(4) - 0.08).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_table_order() {
        let table = KeywordTable::new(default_rules());
        let names: Vec<_> = table.scored_rules().map(|r| r.name).collect();

        assert_eq!(
            names,
            vec![
                Category::School,
                Category::WorkCurrent,
                Category::WorkOpportunities,
                Category::Finance,
                Category::Personal,
            ]
        );
        assert_eq!(table.rule(Category::School).unwrap().keywords[0], "due date");
    }
}
