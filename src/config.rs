//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mindsheet/mindsheet.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `MINDSHEET_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{IdSource, SequentialIdSource, StructureClass, UuidIdSource};
use crate::errors::{SheetError, SheetResult};

/// Which identifier source new sheets use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSourceKind {
    /// Random ids, unique across sheets
    #[default]
    Uuid,
    /// Counting ids, reproducible between runs
    Sequential,
}

impl IdSourceKind {
    pub fn build(&self) -> Box<dyn IdSource> {
        match self {
            IdSourceKind::Uuid => Box::new(UuidIdSource),
            IdSourceKind::Sequential => Box::new(SequentialIdSource::new()),
        }
    }
}

/// Defaults applied when creating sheets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Layout class of the central topic
    pub structure_class: StructureClass,
    /// Prefix of generated titles, followed by the sheet-wide counter
    pub auto_title_prefix: String,
    pub id_source: IdSourceKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            structure_class: StructureClass::default(),
            auto_title_prefix: "Topic ".to_string(),
            id_source: IdSourceKind::default(),
        }
    }
}

/// Get the XDG config directory for mindsheet.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mindsheet").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mindsheet.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit TOML file, must exist when given
    pub fn load(config_file: Option<&Path>) -> SheetResult<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = config_file {
            let content = std::fs::read_to_string(path).map_err(|source| SheetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(File::from_str(&content, FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("MINDSHEET")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SheetResult<String> {
        toml::to_string_pretty(self).map_err(|e| SheetError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# mindsheet configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/mindsheet/mindsheet.toml
#   File:   path passed to Settings::load
#   Env:    MINDSHEET_* environment variables

# Layout class of the central topic
# structure_class = "org.xmind.ui.logic.right"

# Prefix for titles generated when a topic is added without one
# auto_title_prefix = "Topic "

# Identifier source: "uuid" or "sequential"
# id_source = "uuid"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> SheetError {
    SheetError::Config {
        message: e.to_string(),
    }
}
