//! Key-value storage repository.

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, warn};

use crate::settings::{GeneralSettings, PricingTier, default_category_preferences};
use crate::triage::{History, ProcessedMessage};
use crate::{Result, Settings};

/// Key holding per-category preferences.
pub const CATEGORIES_KEY: &str = "categories";
/// Key holding the DND rules.
pub const DND_RULES_KEY: &str = "dndRules";
/// Key holding the pricing tier.
pub const PRICING_TIER_KEY: &str = "pricingTier";
/// Key holding the general preferences.
pub const SETTINGS_KEY: &str = "settings";
/// Key holding the processed-message history.
pub const HISTORY_KEY: &str = "emailData";

/// Repository of JSON values stored by key.
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and table if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Read the raw JSON stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Read and decode the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored value
    /// does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the database query fails.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;

        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(&raw)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove the value stored under `key`.
    ///
    /// Returns whether a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All stored keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("key")).collect())
    }

    /// Read `key`, falling back to `fallback` when missing or unreadable.
    async fn get_or_else<T, F>(&self, key: &str, fallback: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(fallback());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed, using defaults");
                Ok(fallback())
            }
        }
    }

    /// Load settings from their four keys.
    ///
    /// Missing or malformed keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn load_settings(&self) -> Result<Settings> {
        Ok(Settings {
            categories: self
                .get_or_else(CATEGORIES_KEY, default_category_preferences)
                .await?,
            dnd_rules: self.get_or_else(DND_RULES_KEY, Vec::new).await?,
            pricing_tier: self.get_or_else(PRICING_TIER_KEY, PricingTier::default).await?,
            general: self.get_or_else(SETTINGS_KEY, GeneralSettings::default).await?,
        })
    }

    /// Save settings to their four keys.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or a database query fails.
    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.set(CATEGORIES_KEY, &settings.categories).await?;
        self.set(DND_RULES_KEY, &settings.dnd_rules).await?;
        self.set(PRICING_TIER_KEY, &settings.pricing_tier).await?;
        self.set(SETTINGS_KEY, &settings.general).await?;
        Ok(())
    }

    /// Load the processed-message history.
    ///
    /// A malformed history is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_history(&self) -> Result<History> {
        self.get_or_else(HISTORY_KEY, History::new).await
    }

    /// Replace the stored history.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the database query fails.
    pub async fn save_history(&self, history: &History) -> Result<()> {
        self.set(HISTORY_KEY, history).await
    }

    /// Append processed messages to the stored history.
    ///
    /// Only the most recent entries are kept, see [`History`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn append_history<I>(&self, entries: I) -> Result<History>
    where
        I: IntoIterator<Item = ProcessedMessage>,
    {
        let mut history = self.load_history().await?;
        let before = history.len();
        history.extend(entries);
        self.save_history(&history).await?;
        debug!(before, after = history.len(), "history saved");
        Ok(history)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use mailrank_engine::{Category, DndException, DndRule, Message};

    use super::*;
    use crate::Triage;

    #[tokio::test]
    async fn test_set_get_remove() {
        let repo = StoreRepository::in_memory().await.unwrap();

        repo.set("answer", &42u32).await.unwrap();
        assert_eq!(repo.get::<u32>("answer").await.unwrap(), Some(42));

        repo.set("answer", &7u32).await.unwrap();
        assert_eq!(repo.get::<u32>("answer").await.unwrap(), Some(7));
        assert_eq!(repo.keys().await.unwrap(), vec!["answer".to_string()]);

        assert!(repo.remove("answer").await.unwrap());
        assert!(!repo.remove("answer").await.unwrap());
        assert_eq!(repo.get::<u32>("answer").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_malformed_is_error() {
        let repo = StoreRepository::in_memory().await.unwrap();
        repo.set("n", "not a number").await.unwrap();

        assert!(repo.get::<u32>("n").await.is_err());
    }

    #[tokio::test]
    async fn test_load_settings_defaults_when_empty() {
        let repo = StoreRepository::in_memory().await.unwrap();

        assert_eq!(repo.load_settings().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let repo = StoreRepository::in_memory().await.unwrap();
        let mut settings = Settings {
            dnd_rules: vec![DndRule::quiet_hours(22, 24).with_exception(DndException::urgent())],
            pricing_tier: PricingTier::Ultra,
            ..Settings::default()
        };
        settings.set_context_window(30);

        repo.save_settings(&settings).await.unwrap();

        assert_eq!(repo.load_settings().await.unwrap(), settings);
        let tier: String = repo.get(PRICING_TIER_KEY).await.unwrap().unwrap();
        assert_eq!(tier, "ultra");
    }

    #[tokio::test]
    async fn test_malformed_settings_key_falls_back() {
        let repo = StoreRepository::in_memory().await.unwrap();
        repo.set(PRICING_TIER_KEY, "platinum").await.unwrap();
        repo.set(CATEGORIES_KEY, &[1, 2, 3]).await.unwrap();
        repo.set(SETTINGS_KEY, &serde_json::json!({"contextWindow": 3}))
            .await
            .unwrap();

        let settings = repo.load_settings().await.unwrap();

        assert_eq!(settings.pricing_tier, PricingTier::Free);
        assert_eq!(settings.categories, default_category_preferences());
        assert_eq!(settings.general.context_window, 3);
        assert!(settings.general.show_category_badges);
    }

    #[tokio::test]
    async fn test_partial_category_map() {
        let repo = StoreRepository::in_memory().await.unwrap();
        repo.set(
            CATEGORIES_KEY,
            &serde_json::json!({"promo": {"enabled": false, "color": "#FFB84D", "autoDelete": 1}}),
        )
        .await
        .unwrap();

        let settings = repo.load_settings().await.unwrap();

        assert!(!settings.is_category_enabled(Category::Promo));
        assert!(settings.is_category_enabled(Category::School));
    }

    #[tokio::test]
    async fn test_append_history() {
        let repo = StoreRepository::in_memory().await.unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let triage = Triage::default();

        let first = triage.process_batch(vec![Message::new("1", "hr@corp.com", "Interview", "")], now);
        let second = triage.process_batch(vec![Message::new("2", "mom@home.net", "Dinner?", "")], now);
        repo.append_history(first).await.unwrap();
        let history = repo.append_history(second).await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(repo.load_history().await.unwrap(), history);
        assert_eq!(history.entries()[1].message.id, "2");
    }

    #[tokio::test]
    async fn test_malformed_history_starts_empty() {
        let repo = StoreRepository::in_memory().await.unwrap();
        repo.set(HISTORY_KEY, "garbage").await.unwrap();

        assert!(repo.load_history().await.unwrap().is_empty());
    }
}
