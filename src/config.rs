use crate::errors::{ReportError, ReportResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Report settings, read from an optional YAML file. Command-line flags
/// override whatever the file sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Session CSV; synthetic data is generated when absent.
    #[serde(default)]
    pub sessions_csv: Option<PathBuf>,
    /// Survey response CSV, only read alongside `sessions_csv`.
    #[serde(default)]
    pub responses_csv: Option<PathBuf>,
    #[serde(default = "default_sessions")]
    pub sessions: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Last day of the synthetic history; today when unset.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_sessions() -> usize {
    100
}
fn default_seed() -> u64 {
    42
}
fn default_preview_rows() -> usize {
    5
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sessions_csv: None,
            responses_csv: None,
            sessions: default_sessions(),
            seed: default_seed(),
            end_date: None,
            preview_rows: default_preview_rows(),
            output_dir: default_output_dir(),
        }
    }
}

impl ReportConfig {
    pub fn from_yaml(content: &str) -> ReportResult<Self> {
        let cfg: ReportConfig = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> ReportResult<Self> {
        match path {
            Some(p) => Self::from_yaml(&fs::read_to_string(p)?),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.responses_csv.is_some() && self.sessions_csv.is_none() {
            return Err(ReportError::Config(
                "responses_csv requires sessions_csv".to_string(),
            ));
        }
        Ok(())
    }
}
