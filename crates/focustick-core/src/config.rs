//! TOML-based phase configuration.
//!
//! Stores the user-chosen work/break durations and the auto-chain flag at
//! `~/.config/focustick/config.toml`. Every field carries a serde default
//! so a partial or hand-edited file heals to defaults instead of failing.
//!
//! Bounds are enforced at this editing surface (work 1-180 minutes, break
//! 1-60 minutes); the engine additionally ignores any non-positive
//! duration that reaches it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::storage::data_dir;

pub const DEFAULT_WORK_MINUTES: u64 = 25;
pub const DEFAULT_BREAK_MINUTES: u64 = 5;
pub const MAX_WORK_MINUTES: u64 = 180;
pub const MAX_BREAK_MINUTES: u64 = 60;

/// User-configurable phase durations and the auto-chain flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    /// Automatically start the next phase after a natural completion.
    #[serde(default)]
    pub auto_chain: bool,
}

fn default_work_minutes() -> u64 {
    DEFAULT_WORK_MINUTES
}
fn default_break_minutes() -> u64 {
    DEFAULT_BREAK_MINUTES
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            auto_chain: false,
        }
    }
}

impl PhaseConfig {
    pub fn work_secs(&self) -> u64 {
        self.work_minutes.saturating_mul(60)
    }

    pub fn break_secs(&self) -> u64 {
        self.break_minutes.saturating_mul(60)
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/focustick"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning defaults on any failure. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a value as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "work_minutes" => Some(self.work_minutes.to_string()),
            "break_minutes" => Some(self.break_minutes.to_string()),
            "auto_chain" => Some(self.auto_chain.to_string()),
            _ => None,
        }
    }

    /// Set a value by key, validating bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value fails to parse
    /// or is out of bounds.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "work_minutes" => {
                self.work_minutes = parse_minutes(key, value, MAX_WORK_MINUTES)?;
            }
            "break_minutes" => {
                self.break_minutes = parse_minutes(key, value, MAX_BREAK_MINUTES)?;
            }
            "auto_chain" => {
                self.auto_chain = value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("cannot parse '{value}' as bool"),
                })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.into())),
        }
        Ok(())
    }
}

fn parse_minutes(key: &str, value: &str, max: u64) -> Result<u64, ConfigError> {
    let minutes = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        key: key.into(),
        message: format!("cannot parse '{value}' as minutes"),
    })?;
    if minutes < 1 || minutes > max {
        return Err(ConfigError::InvalidValue {
            key: key.into(),
            message: format!("must be between 1 and {max} minutes"),
        });
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = PhaseConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PhaseConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.work_minutes, 25);
        assert_eq!(parsed.break_minutes, 5);
        assert!(!parsed.auto_chain);
    }

    #[test]
    fn partial_toml_heals_to_defaults() {
        let parsed: PhaseConfig = toml::from_str("work_minutes = 50\n").unwrap();
        assert_eq!(parsed.work_minutes, 50);
        assert_eq!(parsed.break_minutes, 5);
        assert!(!parsed.auto_chain);

        let parsed: PhaseConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, PhaseConfig::default());
    }

    #[test]
    fn get_known_keys() {
        let cfg = PhaseConfig::default();
        assert_eq!(cfg.get("work_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("break_minutes").as_deref(), Some("5"));
        assert_eq!(cfg.get("auto_chain").as_deref(), Some("false"));
        assert!(cfg.get("missing").is_none());
    }

    #[test]
    fn set_validates_bounds() {
        let mut cfg = PhaseConfig::default();
        cfg.set("work_minutes", "180").unwrap();
        assert_eq!(cfg.work_minutes, 180);
        assert!(cfg.set("work_minutes", "0").is_err());
        assert!(cfg.set("work_minutes", "181").is_err());
        assert!(cfg.set("break_minutes", "61").is_err());
        assert!(cfg.set("work_minutes", "abc").is_err());
        // Failed sets leave the previous value intact.
        assert_eq!(cfg.work_minutes, 180);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = PhaseConfig::default();
        assert!(matches!(
            cfg.set("nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_auto_chain() {
        let mut cfg = PhaseConfig::default();
        cfg.set("auto_chain", "true").unwrap();
        assert!(cfg.auto_chain);
        assert!(cfg.set("auto_chain", "yes").is_err());
    }

    #[test]
    fn duration_accessors() {
        let cfg = PhaseConfig::default();
        assert_eq!(cfg.work_secs(), 1500);
        assert_eq!(cfg.break_secs(), 300);
    }
}
