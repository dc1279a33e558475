//! Configuration loading and parsing

use anyhow::{Context, Result};
use light_pattern_compiler::{ChannelSpec, CompilerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Offset line followed by indented function names
    #[default]
    Txt,
    /// JSON array of schedule entries
    Json,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.compiler.channels.is_empty() {
        anyhow::bail!("Config file {:?} defines no channels", path);
    }

    Ok(config)
}

/// Parse a `--channel` argument: `label` or `label:on_function:off_function`
pub fn parse_channel_arg(arg: &str) -> std::result::Result<ChannelSpec, String> {
    let parts: Vec<&str> = arg.split(':').map(str::trim).collect();
    match parts.as_slice() {
        [label] if !label.is_empty() => Ok(ChannelSpec::new(*label)),
        [label, on, off] if !label.is_empty() && !on.is_empty() && !off.is_empty() => {
            Ok(ChannelSpec::with_names(*label, *on, *off))
        }
        _ => Err(format!(
            "invalid channel '{}' (expected LABEL or LABEL:ON_FUNCTION:OFF_FUNCTION)",
            arg
        )),
    }
}
