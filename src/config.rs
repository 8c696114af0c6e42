//! Configuration file handling for cashwise.
//!
//! The configuration file is stored at `$CASHWISE_HOME/config.json` and contains settings such
//! as how many backups of the budget file to keep and which report view to use by default.

use crate::backup::Backup;
use crate::error::Res;
use crate::report::ViewMode;
use crate::utils;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "cashwise";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const BUDGET_JSON: &str = "budget.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$CASHWISE_HOME` and from there it loads `$CASHWISE_HOME/config.json`. It provides
/// paths to the other files that live in the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store_path: PathBuf,
}

impl Config {
    /// Creates the data directory, its subdirectories and an initial `config.json` with default
    /// settings. An existing `config.json` is left alone and loaded instead.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/cashwise`
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the cashwise home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            debug!("Keeping the existing {}", config_path.display());
            ConfigFile::load(&config_path).await?
        } else {
            let config_file = ConfigFile::default();
            config_file.save(&config_path).await?;
            config_file
        };

        Ok(Self {
            store_path: root.join(BUDGET_JSON),
            root,
            backups,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `cashwise_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub async fn load(cashwise_home: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = cashwise_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The cashwise home directory is missing, run 'cashwise init'")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'cashwise init'",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            backups: root.join(BACKUPS),
            store_path: root.join(BUDGET_JSON),
            root,
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    /// The budget file, `$CASHWISE_HOME/budget.json`.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// The view used by reports and charts when none is given.
    pub fn default_view(&self) -> ViewMode {
        self.config_file.default_view
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::from(self)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "cashwise",
///   "config_version": 1,
///   "backup_copies": 5,
///   "default_view": "quarterly"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "cashwise"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies of the budget file to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    /// The view reports use when none is requested
    #[serde(default)]
    default_view: ViewMode,
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            default_view: ViewMode::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another application.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    #[cfg(test)]
    fn new(backup_copies: u32, default_view: ViewMode) -> Self {
        Self {
            backup_copies,
            default_view,
            ..Self::default()
        }
    }
}
