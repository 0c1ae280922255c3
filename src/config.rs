//! Configuration handling for the TUI

use crate::state::DEFAULT_SPENDING_LIMIT;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CURRENCY_SYMBOL: &str = "$";
const DEFAULT_TOAST_SECONDS: u64 = 4;
const MAX_TOAST_SECONDS: u64 = 60 * 60;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Currency symbol for accounts that don't carry their own
    pub currency_symbol: Option<String>,
    /// Lifetime of toast notifications, in seconds
    pub toast_seconds: Option<u64>,
    /// Initial card spending limit
    pub default_spending_limit: Option<u32>,
    /// User ID filled into the login form for quick testing
    pub prefill_user_id: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "bank-demo", "bank-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    pub fn toast_duration(&self) -> Duration {
        let seconds = self
            .toast_seconds
            .unwrap_or(DEFAULT_TOAST_SECONDS)
            .min(MAX_TOAST_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn spending_limit(&self) -> u32 {
        self.default_spending_limit.unwrap_or(DEFAULT_SPENDING_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.currency_symbol.is_none());
        assert!(config.toast_seconds.is_none());
        assert!(config.default_spending_limit.is_none());
        assert!(config.prefill_user_id.is_none());
    }

    #[test]
    fn test_accessor_fallbacks() {
        let config = TuiConfig::default();
        assert_eq!(config.currency_symbol(), "$");
        assert_eq!(config.toast_duration(), Duration::from_secs(4));
        assert_eq!(config.spending_limit(), 500);
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            currency_symbol: Some("£".to_string()),
            toast_seconds: Some(8),
            default_spending_limit: Some(250),
            prefill_user_id: Some("user123".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.currency_symbol(), "£");
        assert_eq!(parsed.toast_duration(), Duration::from_secs(8));
        assert_eq!(parsed.spending_limit(), 250);
        assert_eq!(parsed.prefill_user_id.as_deref(), Some("user123"));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.currency_symbol.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"toast_seconds": 2, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.toast_seconds, Some(2));
    }

    #[test]
    fn test_extreme_toast_seconds_is_clamped() {
        let parsed: TuiConfig =
            serde_json::from_str(r#"{"toast_seconds": 18446744073709551615}"#).unwrap();
        assert_eq!(parsed.toast_duration(), Duration::from_secs(3600));

        let mut notifications = crate::state::Notifications::new(parsed.toast_duration());
        notifications.push(crate::state::Toast::info("still works"));
        assert!(!notifications.is_empty());
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let path = std::env::temp_dir().join("bank-tui-missing-config-for-test.json");
        let config = TuiConfig::load_from(&path).unwrap();
        assert!(config.currency_symbol.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "bank-tui-config-{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, r#"{"currency_symbol": "€"}"#).unwrap();
        let config = TuiConfig::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.currency_symbol(), "€");
    }

    #[test]
    fn test_load_from_invalid_json_errors() {
        let path = std::env::temp_dir().join(format!(
            "bank-tui-config-{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, "not json").unwrap();
        let result = TuiConfig::load_from(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
