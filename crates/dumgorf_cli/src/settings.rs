//! Flat key-value settings persisted as JSON (the CLI's stand-in for the
//! site's localStorage).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct Settings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn open(path: &Path) -> Result<Self, CliError> {
        let values = if path.exists() {
            let text = fs::read_to_string(path).map_err(|source| CliError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Returns the previous value, if any.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>, CliError> {
        let old = self.values.remove(key);
        if old.is_some() {
            self.save()?;
        }
        Ok(old)
    }

    fn save(&self) -> Result<(), CliError> {
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text).map_err(|source| CliError::Io {
            action: "write",
            path: self.path.clone(),
            source,
        })?;
        info!("Saved {} setting(s) to {:?}", self.values.len(), self.path);
        Ok(())
    }
}
