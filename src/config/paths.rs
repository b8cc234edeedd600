//! Path management for famfin
//!
//! ## Path Resolution Order
//!
//! 1. `FAMFIN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/famfin` or `~/.config/famfin`
//! 3. Windows: `%APPDATA%\famfin`

use std::path::PathBuf;

use crate::error::FamfinError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FAMFIN_DATA_DIR";

/// Manages all paths used by famfin
#[derive(Debug, Clone)]
pub struct FamfinPaths {
    base_dir: PathBuf,
}

impl FamfinPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, FamfinError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn cost_centers_file(&self) -> PathBuf {
        self.data_dir().join("cost_centers.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to budgets.json (confirmed distributions per month)
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FamfinError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FamfinError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FamfinError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if famfin has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FamfinError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                FamfinError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("famfin"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FamfinError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FamfinError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("famfin"))
}
