//! Quiz configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `time_limit_secs` (`0` disables).
pub const TIME_LIMIT_ENV: &str = "QCM_TIME_LIMIT";

/// Top-level qcm configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Number of questions drawn per run.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Per-question time limit. `None` means plain, untimed input.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    /// Fraction of correct answers needed to pass.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    /// Draw questions in random order.
    #[serde(default = "default_true")]
    pub shuffle: bool,
    /// Upper bound on one key poll while a countdown is running.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report formats written after a run (`text`, `json`).
    #[serde(default = "default_report_formats")]
    pub report_formats: Vec<String>,
}

fn default_question_count() -> usize {
    100
}
fn default_pass_threshold() -> f64 {
    0.8
}
fn default_true() -> bool {
    true
}
fn default_poll_interval() -> u64 {
    100
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./qcm-results")
}
fn default_report_formats() -> Vec<String> {
    vec!["text".to_string()]
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            time_limit_secs: None,
            pass_threshold: default_pass_threshold(),
            shuffle: true,
            poll_interval_ms: default_poll_interval(),
            output_dir: default_output_dir(),
            report_formats: default_report_formats(),
        }
    }
}

impl QuizConfig {
    /// The per-question time limit, if one is configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    /// The key poll bound.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject values the quiz loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.question_count >= 1, "question_count must be at least 1");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.pass_threshold),
            "pass_threshold must be between 0.0 and 1.0"
        );
        anyhow::ensure!(self.poll_interval_ms >= 1, "poll_interval_ms must be at least 1");
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(TIME_LIMIT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{TIME_LIMIT_ENV} must be a number of seconds, got '{raw}'"))?;
            self.time_limit_secs = (secs > 0).then_some(secs);
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `qcm.toml` in the current directory
/// 2. `~/.config/qcm/config.toml`
///
/// Environment variable override: `QCM_TIME_LIMIT`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("qcm.toml");
        if local.exists() {
            Some(local)
        } else {
            home_config_path().filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(p) => {
            tracing::debug!("loading config from {}", p.display());
            parse_config_file(&p)?
        }
        None => QuizConfig::default(),
    };

    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

/// Parse a config file without applying overrides.
pub fn parse_config_file(path: &Path) -> Result<QuizConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display()))
}

fn home_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".config").join("qcm").join("config.toml"))
}
