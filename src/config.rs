//! Settings for dataset discovery and JSON output.
//!
//! Layers, later ones win:
//! 1. Built-in defaults
//! 2. Global config: `$XDG_CONFIG_HOME/oaktree/oaktree.toml`
//! 3. Local config: `<project_dir>/.oaktree.toml`
//! 4. Environment variables: `OAKTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for oaktree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File name suffix identifying dataset files (default: ".data.txt")
    pub data_suffix: String,
    /// Directory receiving dataset and tree JSON (default: "out")
    pub output_dir: PathBuf,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_suffix: ".data.txt".into(),
            output_dir: PathBuf::from("out"),
            pretty: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_suffix: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub pretty: Option<bool>,
}

/// Platform config directory, e.g. `~/.config/oaktree` on Linux.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "oaktree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// `oaktree.toml` inside [`global_config_dir`].
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("oaktree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".oaktree.toml")
}

fn read_layer(path: &Path) -> Result<RawSettings, ApplicationError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&text).map_err(|e| config_error(format!("{}: {}", path.display(), e)))
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_suffix: overlay
                .data_suffix
                .clone()
                .unwrap_or_else(|| self.data_suffix.clone()),
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            pretty: overlay.pretty.unwrap_or(self.pretty),
        }
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.output_dir.to_string_lossy().as_ref());
        self.output_dir = PathBuf::from(expanded);
    }

    /// Effective settings for `project_dir` (the directory holding an
    /// optional `.oaktree.toml`).
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), project_dir)
    }

    /// Same as [`Settings::load`] with an explicit global config location.
    ///
    /// Missing files are skipped; a file that exists but does not parse is
    /// an error.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let layers = [
            global_path.map(Path::to_path_buf),
            project_dir.map(local_config_path),
        ];
        let merged = layers
            .iter()
            .flatten()
            .filter(|path| path.is_file())
            .try_fold(Self::default(), |settings, path| {
                debug!("config layer: {}", path.display());
                read_layer(path).map(|raw| settings.merge_with(&raw))
            })?;

        let mut settings = Self::apply_env_overrides(merged)?;
        settings.expand_paths();
        Ok(settings)
    }

    /// Apply OAKTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OAKTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e: ConfigError| config_error(e.to_string()))?;

        if let Ok(val) = config.get_string("data_suffix") {
            settings.data_suffix = val;
        }
        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
        }

        Ok(settings)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| config_error(e.to_string()))
    }
}

fn config_error(message: String) -> ApplicationError {
    ApplicationError::Config { message }
}
