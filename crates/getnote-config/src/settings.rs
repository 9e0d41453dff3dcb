use crate::error::{ConfigError, ConfigResult};
use crate::store::SettingsStore;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Output folder used when nothing else is configured.
pub const DEFAULT_OUTPUT_FOLDER: &str = "Get笔记";

/// Environment variable overriding the vault directory
pub const ENV_VAULT_PATH: &str = "GETNOTE_VAULT_PATH";
/// Environment variable overriding the output folder
pub const ENV_OUTPUT_FOLDER: &str = "GETNOTE_OUTPUT_FOLDER";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "GETNOTE_LOG_LEVEL";

/// Importer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault configuration
    pub vault: VaultConfig,
    /// Import settings
    pub import: ImportSettings,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Vault configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Path to the vault directory
    pub path: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}

/// Settings for the import operation itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Folder inside the vault that receives imported notes
    pub output_folder: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            output_folder: DEFAULT_OUTPUT_FOLDER.to_string(),
        }
    }
}

impl ImportSettings {
    pub fn new(output_folder: impl Into<String>) -> Self {
        Self {
            output_folder: output_folder.into(),
        }
    }

    /// Check that the output folder is a non-empty path inside the vault.
    pub fn validate(&self) -> ConfigResult<()> {
        let folder = self.output_folder.trim();

        if folder.is_empty() {
            return Err(ConfigError::invalid_folder(&self.output_folder, "must not be empty"));
        }

        let path = Path::new(folder);
        if path.is_absolute() || folder.starts_with(['/', '\\']) {
            return Err(ConfigError::invalid_folder(
                &self.output_folder,
                "must be relative to the vault",
            ));
        }

        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
            || folder.split(['/', '\\']).any(|part| part == "..");
        if escapes {
            return Err(ConfigError::invalid_folder(
                &self.output_folder,
                "must not leave the vault",
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter such as `info` or `getnote_pipeline=debug`
    pub level: Option<String>,
}

/// Values supplied on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub vault_path: Option<PathBuf>,
    pub output_folder: Option<String>,
}

impl Config {
    /// Load configuration with precedence: defaults < store < env < overrides.
    ///
    /// The resulting output folder is validated before returning.
    pub fn load(store: &dyn SettingsStore, overrides: ConfigOverrides) -> ConfigResult<Self> {
        let mut config = store.load()?;
        config.apply_env();

        if let Some(path) = overrides.vault_path {
            config.vault.path = path;
        }
        if let Some(folder) = overrides.output_folder {
            config.import.output_folder = folder;
        }

        config.import.validate()?;
        debug!(
            vault = %config.vault.path.display(),
            output_folder = %config.import.output_folder,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Apply `GETNOTE_*` environment variables. Empty values are ignored.
    pub fn apply_env(&mut self) {
        if let Some(path) = env_value(ENV_VAULT_PATH) {
            self.vault.path = PathBuf::from(path);
        }
        if let Some(folder) = env_value(ENV_OUTPUT_FOLDER) {
            self.import.output_folder = folder;
        }
        if let Some(level) = env_value(ENV_LOG_LEVEL) {
            self.logging.level = Some(level);
        }
    }

    /// Absolute or vault-relative directory notes are written to
    pub fn output_dir(&self) -> PathBuf {
        self.vault.path.join(self.import.output_folder.trim())
    }

    /// Get default config file path
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("getnote");
        Ok(config_dir.join("config.toml"))
    }

    /// Display the current configuration as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Commented template written by `getnote config init`
    pub fn example_toml() -> &'static str {
        r#"# Get笔记 importer configuration
# Location: ~/.config/getnote/config.toml

[vault]
# Path to your vault
# Default: current directory
# path = "/home/user/Documents/my-vault"

[import]
# Folder inside the vault that receives imported notes
# Default: Get笔记
output_folder = "Get笔记"

[logging]
# Log filter, same syntax as RUST_LOG
# level = "info"
"#
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
