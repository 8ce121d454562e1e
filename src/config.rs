//! Persisted application settings.
//!
//! Settings live in a TOML file at the app root. Everything is optional:
//! missing paths fall back to the default layout under `.cogpal/data` and
//! `.cogpal/models`, and a missing file yields defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};

/// File name of the settings file inside the app root.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Application directories could not be resolved.
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    /// The settings file exists but could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The settings file contains invalid TOML.
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The settings could not be serialized.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The settings file could not be written.
    #[error("Failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// User-editable application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Folder containing one subfolder of images per class.
    pub images_dir: Option<PathBuf>,
    /// CSV file with a `sentence` column for the sentence builder.
    pub sentences_path: Option<PathBuf>,
    /// Folder the trained model artifacts live in.
    pub models_dir: Option<PathBuf>,
    /// Name entered on the last launch, used to pre-fill the home screen.
    pub last_user: Option<String>,
}

impl AppSettings {
    /// Resolve the images folder, falling back to `data/images`.
    pub fn resolved_images_dir(&self) -> Result<PathBuf, AppDirError> {
        match &self.images_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dirs::data_dir()?.join("images")),
        }
    }

    /// Resolve the sentences CSV path, falling back to `data/sentences.csv`.
    pub fn resolved_sentences_path(&self) -> Result<PathBuf, AppDirError> {
        match &self.sentences_path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dirs::data_dir()?.join("sentences.csv")),
        }
    }

    /// Resolve the model artifacts folder, falling back to `models/`.
    pub fn resolved_models_dir(&self) -> Result<PathBuf, AppDirError> {
        match &self.models_dir {
            Some(path) => Ok(path.clone()),
            None => app_dirs::models_dir(),
        }
    }
}

/// Resolve the settings file path inside the app root.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    load_from(&config_path()?)
}

/// Persist settings to the app root.
pub fn save(settings: &AppSettings) -> Result<(), ConfigError> {
    save_to(settings, &config_path()?)
}

fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn save_to(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(settings)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn settings_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let settings = AppSettings {
            images_dir: Some(PathBuf::from("/tmp/pics")),
            sentences_path: None,
            models_dir: Some(PathBuf::from("/tmp/models")),
            last_user: Some("mira".to_string()),
        };
        save_to(&settings, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "last_user = \"kai\"\nlegacy_flag = true\n").unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.last_user.as_deref(), Some("kai"));
    }
}
