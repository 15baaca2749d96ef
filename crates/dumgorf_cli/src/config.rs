use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CliError;

/// CLI defaults. Read from `config.json` in the data directory, then
/// overridden by `DUMGORF_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Values drawn by `rng` when no count is given.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Histogram bins for `rng`.
    #[serde(default = "default_histogram_buckets")]
    pub histogram_buckets: usize,
    /// Draws per `loot` simulation.
    #[serde(default = "default_simulation_runs")]
    pub simulation_runs: u32,
    /// Emit JSON instead of text.
    #[serde(default)]
    pub json_output: bool,
    /// error | warn | info | debug | trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_sample_count() -> usize {
    100
}

fn default_histogram_buckets() -> usize {
    20
}

fn default_simulation_runs() -> u32 {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            histogram_buckets: default_histogram_buckets(),
            simulation_runs: default_simulation_runs(),
            json_output: false,
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// File (if present) plus environment.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let mut cfg = Self::from_file(path)?;
        cfg.apply_env(std::env::vars());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `DUMGORF_*` overrides. Unparseable values are ignored.
    pub fn apply_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let v = value.as_ref().trim();
            let applied = match key.as_ref() {
                // DUMGORF_SAMPLES=500
                "DUMGORF_SAMPLES" => v.parse().map(|n: usize| self.sample_count = n.max(1)).is_ok(),
                // DUMGORF_BUCKETS=20
                "DUMGORF_BUCKETS" => v
                    .parse()
                    .map(|n: usize| self.histogram_buckets = n.clamp(1, 200))
                    .is_ok(),
                // DUMGORF_RUNS=1000
                "DUMGORF_RUNS" => v.parse().map(|n: u32| self.simulation_runs = n).is_ok(),
                // DUMGORF_JSON=1|true|on
                "DUMGORF_JSON" => parse_bool(v).map(|b| self.json_output = b).is_some(),
                "DUMGORF_LOG" => {
                    self.log_level = v.to_ascii_lowercase();
                    true
                }
                _ => continue,
            };
            if applied {
                debug!(key = key.as_ref(), value = v, "config override");
            } else {
                warn!("Ignoring unparseable {}={}", key.as_ref(), v);
            }
        }
    }
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: CliConfig = serde_json::from_str(r#"{"json_output": true}"#).unwrap();
        assert!(cfg.json_output);
        assert_eq!(cfg.sample_count, 100);
        assert_eq!(cfg.histogram_buckets, 20);
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn env_overrides_and_clamps() {
        let mut cfg = CliConfig::default();
        cfg.apply_env([
            ("DUMGORF_SAMPLES", "0"),
            ("DUMGORF_BUCKETS", "5000"),
            ("DUMGORF_RUNS", "250"),
            ("DUMGORF_JSON", "yes"),
            ("DUMGORF_LOG", "DEBUG"),
            ("HOME", "/tmp"),
        ]);
        assert_eq!(cfg.sample_count, 1);
        assert_eq!(cfg.histogram_buckets, 200);
        assert_eq!(cfg.simulation_runs, 250);
        assert!(cfg.json_output);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn bad_env_values_leave_config_untouched() {
        let mut cfg = CliConfig::default();
        cfg.apply_env([("DUMGORF_RUNS", "lots"), ("DUMGORF_JSON", "maybe")]);
        assert_eq!(cfg, CliConfig::default());
    }

    #[test]
    fn absent_file_means_defaults() {
        let path = std::env::temp_dir().join("dumgorf-config-test-does-not-exist.json");
        assert_eq!(CliConfig::from_file(&path).unwrap(), CliConfig::default());
    }
}
