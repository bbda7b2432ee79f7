//! Config file loading and saving.
//!
//! A config file holds a `venue` section and an optional `logging` section.
//! Missing fields take their defaults. The format follows the extension:
//! `.toml`, `.ron` or `.json`.

use crate::error::{IoError, Result};
use playa_core::logging::LogConfig;
use playa_core::VenueConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Maximum accepted config file size (1 MB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// On-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub venue: VenueConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        match extension {
            "toml" => Ok(Self::Toml),
            "ron" => Ok(Self::Ron),
            "json" => Ok(Self::Json),
            other => Err(IoError::unsupported_format(other)),
        }
    }
}

impl ConfigFile {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_limit(path, MAX_CONFIG_FILE_SIZE)
    }

    fn load_with_limit(path: &Path, limit: u64) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;

        let size = fs::metadata(path)?.len();
        if size > limit {
            return Err(IoError::FileTooLarge { size, limit });
        }

        let content = fs::read_to_string(path)?;
        let file = match format {
            ConfigFormat::Toml => toml::from_str(&content)?,
            ConfigFormat::Ron => ron::from_str(&content)?,
            ConfigFormat::Json => serde_json::from_str(&content)?,
        };

        tracing::debug!("Loaded config from {:?}", path);
        Ok(file)
    }

    /// Save in the format matching the extension of `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Ron => {
                ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?
            }
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        };
        fs::write(path, content)?;
        Ok(())
    }
}
