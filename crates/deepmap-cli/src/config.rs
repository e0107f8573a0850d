use std::path::Path;

use anyhow::Context;
use deepmap_diff::MapOptions;
use serde::{Deserialize, Serialize};

/// Settings read from `--config`. Command-line flags only ever switch
/// options on, so they combine with the file by `||`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Mapper settings.
    pub map: MapOptions,
    /// Colorize text output.
    pub color: bool,
    /// Hide unchanged leaves in `diff` by default.
    pub changed_only: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            map: MapOptions::default(),
            color: true,
            changed_only: false,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
