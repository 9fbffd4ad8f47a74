//! Configuration for promptfold
//!
//! Users can declare extra adapters in a TOML (or JSON) file:
//! 1. `--config PATH` / `PROMPTFOLD_CONFIG`
//! 2. `<config_dir>/promptfold/adapters.toml`
//!
//! Declared adapters are registered ahead of the built-in families, and the
//! catch-all adapter always stays last.

pub mod adapters;

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::adapters::AdapterSpec;
use crate::{
    adapters::{
        builtin::{builtin_adapters, default_adapter},
        PromptAdapter,
    },
    error::{PromptError, Result},
    registry::AdapterRegistry,
};

/// Contents of an adapter config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Register the built-in model families after the declared adapters
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Declared adapters, highest precedence first
    #[serde(default)]
    pub adapters: Vec<AdapterSpec>,
}

fn default_true() -> bool {
    true
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            adapters: Vec::new(),
        }
    }
}

impl AdapterConfig {
    /// Get the configuration directory path
    #[must_use]
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptfold")
    }

    /// Get the default config file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("adapters.toml")
    }

    /// Load the config from the default path
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load the config from a specific path
    ///
    /// A missing file yields the default config. Files ending in `.json`
    /// are read as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no adapter config, using built-ins");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| PromptError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed: std::result::Result<Self, String> = if is_json {
            serde_json::from_str(&contents).map_err(|e| e.to_string())
        } else {
            toml::from_str(&contents).map_err(|e| e.to_string())
        };

        let config: Self = parsed.map_err(|message| PromptError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;

        debug!(
            path = %path.display(),
            adapters = config.adapters.len(),
            "loaded adapter config"
        );
        Ok(config)
    }

    /// Save the config as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| PromptError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the declared adapters and assemble the registry
    ///
    /// # Errors
    ///
    /// Returns the first validation error among the declared adapters
    pub fn into_registry(self) -> Result<AdapterRegistry> {
        let declared = self
            .adapters
            .into_iter()
            .map(PromptAdapter::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut builder = AdapterRegistry::builder().register_all(declared);
        if self.include_builtin {
            builder = builder.register_all(builtin_adapters()?);
        }
        builder.build_with_default(default_adapter()?)
    }
}
