//! Cross-platform application paths

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, CliError> {
        let base = dirs::data_dir().ok_or(CliError::NoDataDir)?;
        Self::at(base.join("dumgorf"))
    }

    /// Root everything under `data_dir` (created if missing).
    pub fn at(data_dir: impl Into<PathBuf>) -> Result<Self, CliError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| CliError::Io {
            action: "create",
            path: data_dir.clone(),
            source,
        })?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}
