//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradekey_core::model::DEFAULT_POINTS;

/// Top-level gradekey configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradekeyConfig {
    /// Points per question when an answer key does not say.
    #[serde(default = "default_points")]
    pub default_points: u32,
    /// Max sheets graded concurrently.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Seed for option shuffling; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report format used by `grade` when `--format` is not given.
    #[serde(default = "default_report_format")]
    pub report_format: String,
}

fn default_points() -> u32 {
    DEFAULT_POINTS
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradekey-results")
}
fn default_report_format() -> String {
    "json".to_string()
}

impl Default for GradekeyConfig {
    fn default() -> Self {
        Self {
            default_points: default_points(),
            parallelism: default_parallelism(),
            seed: None,
            output_dir: default_output_dir(),
            report_format: default_report_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Each reference is expanded once; substituted values are not rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `gradekey.toml` in the current directory
/// 2. `~/.config/gradekey/config.toml`
///
/// Environment variable overrides: `GRADEKEY_SEED`, `GRADEKEY_PARALLELISM`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradekeyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradekey.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradekeyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradekeyConfig::default(),
    };

    apply_env_overrides(config)
}

fn apply_env_overrides(mut config: GradekeyConfig) -> Result<GradekeyConfig> {
    if let Ok(seed) = std::env::var("GRADEKEY_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("invalid GRADEKEY_SEED: '{seed}'"))?,
        );
    }

    if let Ok(parallelism) = std::env::var("GRADEKEY_PARALLELISM") {
        config.parallelism = parallelism
            .trim()
            .parse()
            .with_context(|| format!("invalid GRADEKEY_PARALLELISM: '{parallelism}'"))?;
    }

    let output_dir = config.output_dir.to_string_lossy().into_owned();
    config.output_dir = PathBuf::from(resolve_env_vars(&output_dir));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradekey"))
}
