// crates/trustnet-cli/src/config.rs
//
// Runtime configuration for the trustnet CLI.
// Loaded from a TOML file or populated with defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use trustnet_reputation::EngineConfig;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrustnetConfig {
    /// Directory holding the RocksDB vote store. `~` is expanded.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level used when `RUST_LOG` is unset: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Scoring parameters.
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_data_dir() -> String {
    "~/.trustnet/data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TrustnetConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            engine: EngineConfig::default(),
        }
    }
}

impl TrustnetConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: TrustnetConfig = toml::from_str(contents)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }
}

/// Replace a leading `~/` with the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
