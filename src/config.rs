//! Run configuration
//!
//! Everything is read once at startup from the process environment (after
//! `.env` has been loaded). Missing database settings are kept as empty
//! strings; they only fail once the connection is attempted.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Seed used when `ANONYMIZE_SEED` is not set
pub const DEFAULT_SEED: u64 = 1138;

/// Connection settings for the snapshot database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub name: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub host: String,
    pub port: String,
}

impl DatabaseSettings {
    /// Read the `DATABASE_*` variables, treating absent ones as empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).unwrap_or_default();
        Self {
            name: var("DATABASE_NAME"),
            username: var("DATABASE_USERNAME"),
            password: var("DATABASE_PASSWORD"),
            host: var("DATABASE_HOST"),
            port: var("DATABASE_PORT"),
        }
    }
}

/// Attempt budget for [`crate::privacy::UniqueAssigner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniquenessPolicy {
    /// Plain candidates drawn before falling back to suffixes
    pub regenerate_attempts: u32,
    /// Suffixed candidates drawn before giving up
    pub suffix_attempts: u32,
}

impl Default for UniquenessPolicy {
    fn default() -> Self {
        Self {
            regenerate_attempts: 20,
            suffix_attempts: 20,
        }
    }
}

impl UniquenessPolicy {
    pub fn total_attempts(&self) -> u32 {
        self.regenerate_attempts + self.suffix_attempts
    }
}

/// Fixed shapes of the synthetic values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisPolicy {
    pub email_domain: String,
    /// Digits appended to the email local part
    pub email_digits: usize,
    pub phone_prefix: String,
    pub phone_digits: usize,
    pub auth_token_prefix: String,
    pub card_token_prefix: String,
    pub device_token_len: usize,
    pub filename_len: usize,
    pub filename_extension: String,
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self {
            email_domain: "example.com".to_string(),
            email_digits: 3,
            phone_prefix: "+1801555".to_string(),
            phone_digits: 4,
            auth_token_prefix: "auth0|fake".to_string(),
            card_token_prefix: "001.P.".to_string(),
            device_token_len: 128,
            filename_len: 16,
            filename_extension: "jpg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    pub database: DatabaseSettings,
    pub seed: u64,
    /// Rows fetched per keyset page while walking a table
    pub page_size: i64,
    /// Tables emptied outright instead of anonymized
    pub truncate_tables: Vec<String>,
    /// Addresses keep their country unless this is set
    pub anonymize_country: bool,
    pub uniqueness: UniquenessPolicy,
    pub synthesis: SynthesisPolicy,
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            seed: DEFAULT_SEED,
            page_size: 500,
            truncate_tables: vec![
                "sessions".to_string(),
                "audit_events".to_string(),
                "notifications".to_string(),
            ],
            anonymize_country: false,
            uniqueness: UniquenessPolicy::default(),
            synthesis: SynthesisPolicy::default(),
        }
    }
}

impl AnonymizerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source, falling back to defaults for
    /// anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self {
            database: DatabaseSettings::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(seed) = lookup("ANONYMIZE_SEED") {
            config.seed = seed
                .trim()
                .parse()
                .map_err(|e| AppError::configuration(format!("ANONYMIZE_SEED={seed}: {e}")))?;
        }
        if let Some(page_size) = lookup("ANONYMIZE_PAGE_SIZE") {
            config.page_size = page_size.trim().parse().map_err(|e| {
                AppError::configuration(format!("ANONYMIZE_PAGE_SIZE={page_size}: {e}"))
            })?;
        }
        if let Some(tables) = lookup("ANONYMIZE_TRUNCATE") {
            config.truncate_tables = tables
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the run misbehave before anything is
    /// touched.
    pub fn validate(&self) -> Result<()> {
        if self.page_size < 1 {
            return Err(AppError::configuration("page size must be at least 1"));
        }
        if self.uniqueness.regenerate_attempts == 0 {
            return Err(AppError::configuration(
                "at least one plain attempt is required for unique values",
            ));
        }
        // Truncated tables are spliced into SQL text, so only bare identifiers pass.
        for table in &self.truncate_tables {
            if !is_identifier(table) {
                return Err(AppError::configuration(format!(
                    "'{table}' is not a plain table name"
                )));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
