use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "hub.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            other => bail!("unknown output mode '{other}', expected text|json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub seed_demo_data: bool,
    pub output: OutputMode,
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "warn".into(),
            seed_demo_data: true,
            output: OutputMode::Text,
            prompt: "hub> ".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    log_filter: Option<String>,
    seed_demo_data: Option<bool>,
    output: Option<OutputMode>,
    prompt: Option<String>,
}

/// Defaults, then `hub.toml` (or `explicit_path`), then `HUB_*` environment variables.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    explicit_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file_path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()),
    };
    if let Some(path) = file_path {
        let file_cfg = read_file_settings(&path)?;
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
        if let Some(v) = file_cfg.seed_demo_data {
            settings.seed_demo_data = v;
        }
        if let Some(v) = file_cfg.output {
            settings.output = v;
        }
        if let Some(v) = file_cfg.prompt {
            settings.prompt = v;
        }
    }

    if let Some(v) = env("HUB_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("HUB__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("HUB__SEED_DEMO_DATA") {
        settings.seed_demo_data = v
            .trim()
            .parse::<bool>()
            .with_context(|| format!("invalid HUB__SEED_DEMO_DATA '{v}', expected true|false"))?;
    }

    if let Some(v) = env("HUB__OUTPUT") {
        settings.output = v.parse()?;
    }

    if let Some(v) = env("HUB__PROMPT") {
        settings.prompt = v;
    }

    Ok(settings)
}

fn read_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
