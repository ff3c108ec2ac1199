//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File name of the session aggregate JSON, written next to the CSV output.
    pub sessions_file_name: String,
    /// File name of the log written into `--log-dir`.
    pub log_file_name: String,
    /// Apply shift-13 decoding to value names read from the dump.
    pub decode_names: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sessions_file_name: "ueme_sessions.json".to_string(),
            log_file_name: "userassist_parser.log".to_string(),
            decode_names: true,
        }
    }
}

impl Config {
    /// Loads configuration from defaults, the user config directory, an
    /// optional explicit file and `UA_*` environment variables, in that order.
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

        // Load from environment variables (UA_*)
        figment = figment.merge(Env::prefixed("UA_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for userassist.
///
/// On Linux: `~/.config/userassist`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("userassist"))
}
