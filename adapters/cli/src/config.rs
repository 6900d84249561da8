use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use lanes_core::GridConfig;
use lanes_rendering::LayoutConfig;
use serde::Deserialize;

/// Contents of the CLI configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Grid engine configuration.
    pub(crate) grid: GridConfig,
    /// Screen layout forwarded to the rendering contracts.
    pub(crate) layout: LayoutConfig,
}

impl CliConfig {
    /// Reads the configuration file, falling back to defaults when it does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                Self::parse(&contents).with_context(|| format!("invalid config {}", path.display()))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(error) => {
                Err(error).with_context(|| format!("failed to read config {}", path.display()))
            }
        }
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config TOML")
    }
}
