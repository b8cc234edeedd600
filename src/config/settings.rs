//! User settings for famfin
//!
//! Manages user preferences: currency symbol and the allocation policy used
//! when proposing a budget distribution.

use serde::{Deserialize, Serialize};

use super::paths::FamfinPaths;
use crate::allocation::AllocationPolicy;
use crate::error::FamfinError;

/// Allocation policy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSettings {
    /// Share (0-100) of the non-investment remainder that goes to needs.
    /// 62.5 of the 80 left after a 20% investment rate gives the 50/30/20 rule.
    #[serde(default = "default_needs_share")]
    pub needs_share_of_remaining: f64,

    /// Investment percentage proposed when none is given
    #[serde(default = "default_investment_percentage")]
    pub default_investment_percentage: u8,

    /// Upper clamp applied to a requested investment percentage
    #[serde(default = "default_max_investment_percentage")]
    pub max_investment_percentage: u8,

    /// Tolerance in percentage points when checking a distribution sums to 100
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_needs_share() -> f64 {
    62.5
}

fn default_investment_percentage() -> u8 {
    20
}

fn default_max_investment_percentage() -> u8 {
    80
}

fn default_tolerance() -> f64 {
    0.01
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            needs_share_of_remaining: default_needs_share(),
            default_investment_percentage: default_investment_percentage(),
            max_investment_percentage: default_max_investment_percentage(),
            tolerance: default_tolerance(),
        }
    }
}

impl AllocationSettings {
    /// Build the engine policy from these settings
    pub fn policy(&self) -> AllocationPolicy {
        AllocationPolicy::new(self.needs_share_of_remaining)
    }

    /// Clamp a requested investment percentage into `0..=max_investment_percentage`
    pub fn clamp_investment(&self, requested: i64) -> u8 {
        requested.clamp(0, i64::from(self.max_investment_percentage.min(100))) as u8
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), FamfinError> {
        if !(0.0..=100.0).contains(&self.needs_share_of_remaining) {
            return Err(FamfinError::Config(format!(
                "needs_share_of_remaining must be between 0 and 100, got {}",
                self.needs_share_of_remaining
            )));
        }
        if self.max_investment_percentage > 100 {
            return Err(FamfinError::Config(format!(
                "max_investment_percentage must be at most 100, got {}",
                self.max_investment_percentage
            )));
        }
        if self.tolerance < 0.0 {
            return Err(FamfinError::Config("tolerance cannot be negative".into()));
        }
        Ok(())
    }
}

/// User settings for famfin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Allocation policy
    #[serde(default)]
    pub allocation: AllocationSettings,

    /// Whether `famfin init` has been run
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            allocation: AllocationSettings::default(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FamfinPaths) -> Result<Self, FamfinError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FamfinError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FamfinError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.allocation.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FamfinPaths) -> Result<(), FamfinError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FamfinError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FamfinError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
