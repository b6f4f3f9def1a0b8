//! Configuration for the `slots` CLI.
//!
//! Read from the file given with `--config`, else `slots.toml` in the working
//! directory, else defaults. Command-line flags override whatever the file
//! says.
//!
//! ```toml
//! timezone = "Europe/Berlin"
//!
//! [marker]
//! group_id = "freeSlot"
//! display = "background"
//! color = "transparent"
//! ```

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use slot_engine::MarkerStyle;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "slots.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// IANA zone whose midnights delimit calendar days. UTC when unset.
    pub timezone: Option<String>,
    pub marker: MarkerStyle,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else the default file if it exists.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from: {}", path);
            return Self::from_file(path);
        }
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            tracing::debug!("Loading config from: {}", DEFAULT_CONFIG_FILE);
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }
        tracing::debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// The timezone to use: `flag` wins over the file, UTC over nothing.
    pub fn timezone(&self, flag: Option<&str>) -> Result<Tz> {
        match flag.or(self.timezone.as_deref()) {
            Some(name) => Ok(slot_engine::parse_timezone(name)?),
            None => Ok(Tz::UTC),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.timezone {
            slot_engine::parse_timezone(name)?;
        }
        Ok(())
    }
}
