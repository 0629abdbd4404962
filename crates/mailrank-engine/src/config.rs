//! Immutable classifier configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::keywords::{self, CategoryRule, KeywordTable};
use crate::{Error, Priority, Result};

/// Score at which a text window is trusted and widening stops.
pub const DEFAULT_CONFIDENCE_THRESHOLD: u32 = 8;

/// Score below which the full snippet is scored as a last resort.
pub const DEFAULT_DEEP_PASS_FLOOR: u32 = 3;

/// Wire form of [`ClassifierConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    categories: Vec<CategoryRule>,
    #[serde(default = "default_urgent")]
    urgent_keywords: Vec<String>,
    #[serde(default = "default_important")]
    important_keywords: Vec<String>,
    #[serde(default = "default_threshold")]
    confidence_threshold: u32,
    #[serde(default = "default_floor")]
    deep_pass_floor: u32,
}

fn default_urgent() -> Vec<String> {
    keywords::URGENT_KEYWORDS.iter().map(ToString::to_string).collect()
}

fn default_important() -> Vec<String> {
    keywords::IMPORTANT_KEYWORDS.iter().map(ToString::to_string).collect()
}

const fn default_threshold() -> u32 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

const fn default_floor() -> u32 {
    DEFAULT_DEEP_PASS_FLOOR
}

/// Configuration handed to the classifier at construction time.
///
/// Validated once; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    table: KeywordTable,
    urgent_keywords: Vec<String>,
    important_keywords: Vec<String>,
    confidence_threshold: u32,
    deep_pass_floor: u32,
}

impl ClassifierConfig {
    /// Creates a configuration from category rules and the default keyword sets.
    ///
    /// An empty rule list is valid: every message then classifies as `other`.
    /// Base priorities are clamped into `1..=5`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a category appears twice.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        Self::build(RawConfig {
            categories: rules,
            urgent_keywords: default_urgent(),
            important_keywords: default_important(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            deep_pass_floor: DEFAULT_DEEP_PASS_FLOOR,
        })
    }

    /// Decodes and validates a JSON configuration.
    ///
    /// Rules degrade rather than fail: non-string keywords and domains are
    /// dropped, and a missing or out-of-range base priority is clamped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serde`] for malformed JSON or unknown category names,
    /// and [`Error::Config`] for structurally invalid rules.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::build(raw)
    }

    /// Encodes this configuration as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serde`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        let raw = RawConfig {
            categories: self.table.rules().to_vec(),
            urgent_keywords: self.urgent_keywords.clone(),
            important_keywords: self.important_keywords.clone(),
            confidence_threshold: self.confidence_threshold,
            deep_pass_floor: self.deep_pass_floor,
        };
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Overrides the confidence threshold and deep-pass floor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the floor exceeds the threshold.
    pub fn with_thresholds(mut self, confidence_threshold: u32, deep_pass_floor: u32) -> Result<Self> {
        check_thresholds(confidence_threshold, deep_pass_floor)?;
        self.confidence_threshold = confidence_threshold;
        self.deep_pass_floor = deep_pass_floor;
        Ok(self)
    }

    fn build(raw: RawConfig) -> Result<Self> {
        check_thresholds(raw.confidence_threshold, raw.deep_pass_floor)?;

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(raw.categories.len());
        for mut rule in raw.categories {
            if !seen.insert(rule.name) {
                return Err(Error::Config(format!(
                    "category '{}' is configured more than once",
                    rule.name
                )));
            }
            rule.base_priority = Priority::new(rule.base_priority).get();
            lowercase_all(&mut rule.keywords);
            lowercase_all(&mut rule.domains);
            rules.push(rule);
        }

        let mut urgent_keywords = raw.urgent_keywords;
        let mut important_keywords = raw.important_keywords;
        lowercase_all(&mut urgent_keywords);
        lowercase_all(&mut important_keywords);

        Ok(Self {
            table: KeywordTable::new(rules),
            urgent_keywords,
            important_keywords,
            confidence_threshold: raw.confidence_threshold,
            deep_pass_floor: raw.deep_pass_floor,
        })
    }

    /// Category rules.
    #[must_use]
    pub const fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Keywords that force priority 5.
    #[must_use]
    pub fn urgent_keywords(&self) -> &[String] {
        &self.urgent_keywords
    }

    /// Keywords that bump priority by one.
    #[must_use]
    pub fn important_keywords(&self) -> &[String] {
        &self.important_keywords
    }

    /// Score at which widening stops.
    #[must_use]
    pub const fn confidence_threshold(&self) -> u32 {
        self.confidence_threshold
    }

    /// Score below which the full snippet is scored.
    #[must_use]
    pub const fn deep_pass_floor(&self) -> u32 {
        self.deep_pass_floor
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            table: KeywordTable::new(keywords::default_rules()),
            urgent_keywords: default_urgent(),
            important_keywords: default_important(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            deep_pass_floor: DEFAULT_DEEP_PASS_FLOOR,
        }
    }
}

fn check_thresholds(confidence_threshold: u32, deep_pass_floor: u32) -> Result<()> {
    if deep_pass_floor > confidence_threshold {
        return Err(Error::Config(format!(
            "deep pass floor {deep_pass_floor} exceeds confidence threshold {confidence_threshold}"
        )));
    }
    Ok(())
}

fn lowercase_all(values: &mut [String]) {
    for value in values {
        *value = value.to_lowercase();
    }
}
