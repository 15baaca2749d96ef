use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not determine data directory")]
    NoDataDir,
    #[error("{action} {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] dumgorf::Error),
    #[error("invalid {what} `{value}`")]
    InvalidArg { what: &'static str, value: String },
    #[error("unknown loot table `{0}` (try basic-chest, rare-drop, boss-loot)")]
    UnknownPreset(String),
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
}

impl CliError {
    pub fn invalid(what: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidArg {
            what,
            value: value.into(),
        }
    }
}
