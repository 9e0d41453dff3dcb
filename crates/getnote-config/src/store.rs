//! Settings persistence
//!
//! The importer itself never reads settings. Callers load a [`Config`]
//! through a [`SettingsStore`] and thread the resolved values into the
//! import run explicitly.

use crate::error::{ConfigError, ConfigResult};
use crate::settings::Config;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Load/save collaborator for [`Config`].
pub trait SettingsStore: Send + Sync {
    /// Load the stored configuration, or defaults when nothing is stored.
    fn load(&self) -> ConfigResult<Config>;

    /// Persist `config`, replacing whatever was stored.
    fn save(&self, config: &Config) -> ConfigResult<()>;
}

/// TOML file on disk.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn at_default_location() -> ConfigResult<Self> {
        Ok(Self::new(Config::default_config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the commented example configuration.
    ///
    /// Returns `false` without touching the file when it already exists and
    /// `force` is not set.
    pub fn create_example(&self, force: bool) -> ConfigResult<bool> {
        if self.path.exists() && !force {
            debug!(path = %self.path.display(), "config file exists, not overwriting");
            return Ok(false);
        }

        self.ensure_parent()?;
        std::fs::write(&self.path, Config::example_toml())
            .map_err(|e| ConfigError::io(&self.path, e))?;
        info!(path = %self.path.display(), "wrote example config");
        Ok(true)
    }

    fn ensure_parent(&self) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        Ok(())
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> ConfigResult<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, config: &Config) -> ConfigResult<()> {
        self.ensure_parent()?;
        let contents = config.to_toml()?;
        std::fs::write(&self.path, contents).map_err(|e| ConfigError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

/// Process-local store for tests.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    config: Mutex<Config>,
}

impl InMemorySettingsStore {
    pub fn new(config: Config) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> ConfigResult<Config> {
        Ok(self
            .config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, config: &Config) -> ConfigResult<()> {
        *self
            .config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config.clone();
        Ok(())
    }
}
