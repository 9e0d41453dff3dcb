//! Configuration for the Get笔记 importer
//!
//! A single [`Config`] value loaded with precedence
//! defaults < settings file < `GETNOTE_*` environment < command line, plus the
//! [`SettingsStore`] collaborator that persists it.

pub mod error;
pub mod settings;
pub mod store;

pub use error::{ConfigError, ConfigResult};
pub use settings::{
    Config, ConfigOverrides, ImportSettings, LoggingConfig, VaultConfig, DEFAULT_OUTPUT_FOLDER,
    ENV_LOG_LEVEL, ENV_OUTPUT_FOLDER, ENV_VAULT_PATH,
};
pub use store::{InMemorySettingsStore, SettingsStore, TomlSettingsStore};
