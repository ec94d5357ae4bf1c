//! Filepath: src/infra/config.rs
//! Optional on-disk defaults for comparison options, context count, output
//! format, and extra ignore globs. CLI flags always win over config values;
//! a missing config file is not an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::ReportFormat;
use crate::core::options::ComparisonOptions;

/// Names tried, in order, in the current working directory.
const CWD_CANDIDATES: &[&str] = &[".linediffrc.toml", "linediff.toml"];

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ignore_case: bool,
    pub ignore_space_change: bool,
    pub ignore_all_space: bool,
    pub ignore_blank_lines: bool,
    pub unicode: bool,
    pub context: Option<usize>,
    pub format: Option<ConfigFormat>,
    pub exclude: Vec<String>,
}

/// A `serde`-friendly mirror of [`ReportFormat`] (which derives `ValueEnum`
/// for `clap` but not `Deserialize`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigFormat {
    Normal,
    Unified,
    HtmlNormal,
    HtmlUnified,
}

impl From<ConfigFormat> for ReportFormat {
    fn from(f: ConfigFormat) -> Self {
        match f {
            ConfigFormat::Normal => ReportFormat::Normal,
            ConfigFormat::Unified => ReportFormat::Unified,
            ConfigFormat::HtmlNormal => ReportFormat::HtmlNormal,
            ConfigFormat::HtmlUnified => ReportFormat::HtmlUnified,
        }
    }
}

impl Config {
    #[must_use]
    pub fn comparison_options(&self) -> ComparisonOptions {
        ComparisonOptions {
            ignore_case: self.ignore_case,
            ignore_space_change: self.ignore_space_change,
            ignore_all_space: self.ignore_all_space,
            ignore_blank_lines: self.ignore_blank_lines,
            unicode: self.unicode,
        }
    }
}

fn xdg_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs_home().map(|home| home.join(".config")))?;
    Some(base.join("linediff").join("config.toml"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn discover_config_path() -> Option<PathBuf> {
    for candidate in CWD_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }
    let xdg = xdg_config_path()?;
    xdg.exists().then_some(xdg)
}

/// Load config from the CWD (`.linediffrc.toml`/`linediff.toml`) or the XDG
/// config directory, falling back to defaults if none is found.
pub fn load_config() -> Result<Config> {
    let Some(path) = discover_config_path() else {
        return Ok(Config::default());
    };
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
