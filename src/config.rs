//! Configuration for the settlement engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{SettlementError, SettlementResult};

/// Largest supported number of decimal places for the minor unit
pub const MAX_CURRENCY_SCALE: u32 = 9;

/// How expenses that reference participants outside the group are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingReferences {
    /// Abort the whole computation
    #[default]
    Reject,
    /// Skip the offending expense, as if the caller had pruned it
    Ignore,
}

impl FromStr for DanglingReferences {
    type Err = SettlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            other => Err(SettlementError::Config(format!(
                "unknown dangling reference policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for DanglingReferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => f.write_str("reject"),
            Self::Ignore => f.write_str("ignore"),
        }
    }
}

/// Settlement configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Decimal places of the currency's minor unit (2 for cents)
    pub currency_scale: u32,

    /// Policy for expenses referencing unknown participants
    pub dangling_references: DanglingReferences,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            currency_scale: 2,
            dangling_references: DanglingReferences::Reject,
        }
    }
}

impl SettlementConfig {
    pub const ENV_CURRENCY_SCALE: &'static str = "SPLIT_CURRENCY_SCALE";
    pub const ENV_DANGLING_REFERENCES: &'static str = "SPLIT_DANGLING_REFERENCES";

    /// Check that the configuration can be used for computation
    pub fn validate(&self) -> SettlementResult<()> {
        if self.currency_scale > MAX_CURRENCY_SCALE {
            return Err(SettlementError::Config(format!(
                "currency_scale {} exceeds the maximum of {}",
                self.currency_scale, MAX_CURRENCY_SCALE
            )));
        }
        Ok(())
    }

    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> SettlementResult<Self> {
        let config: SettlementConfig = toml::from_str(content)
            .map_err(|e| SettlementError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SettlementResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettlementError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> SettlementResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, using the same keys as [`Self::from_env`]
    pub fn from_lookup<F>(lookup: F) -> SettlementResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SettlementConfig::default();

        if let Some(scale) = lookup(Self::ENV_CURRENCY_SCALE) {
            config.currency_scale = scale.trim().parse().map_err(|_| {
                SettlementError::Config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    Self::ENV_CURRENCY_SCALE,
                    scale
                ))
            })?;
        }

        if let Some(policy) = lookup(Self::ENV_DANGLING_REFERENCES) {
            config.dangling_references = policy.parse()?;
        }

        config.validate()?;
        Ok(config)
    }
}
