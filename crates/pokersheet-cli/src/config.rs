//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pokersheet_core::{DEFAULT_HOURS, MalformedPolicy, WalkOptions};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Session log to read.
    pub input_path: PathBuf,
    /// Sheet file to write.
    pub output_path: PathBuf,
    /// What to do with entries that fail to parse.
    pub on_malformed: MalformedPolicy,
    /// Hours assumed for entries that omit them.
    pub default_hours: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("pokerdata"),
            output_path: PathBuf::from("pokersheet.csv"),
            on_malformed: MalformedPolicy::Abort,
            default_hours: DEFAULT_HOURS,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (POKERSHEET_*)
        figment = figment.merge(Env::prefixed("POKERSHEET_"));

        let config: Self = figment.extract()?;
        if config.default_hours == 0 {
            return Err(figment::Error::from(
                "default_hours must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Walk options derived from this configuration.
    pub const fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            on_malformed: self.on_malformed,
            default_hours: self.default_hours,
        }
    }
}

/// Returns the platform-specific config directory for pokersheet.
///
/// On Linux: `~/.config/pokersheet`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pokersheet"))
}
