// crates/trustnet-cli/src/commands/mod.rs
//
// Command module declarations for the trustnet CLI, plus the context every
// command runs with.

pub mod categories;
pub mod generate;
pub mod init;
pub mod score;
pub mod vote;

use std::fs;

use trustnet_store::RocksVoteStore;

use crate::config::TrustnetConfig;
use crate::output::OutputFormat;

/// Resolved configuration and output mode for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: TrustnetConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(config: TrustnetConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Open the RocksDB vote store under the configured data directory,
    /// creating it if needed.
    pub fn open_store(&self) -> Result<RocksVoteStore, Box<dyn std::error::Error>> {
        let path = self.config.data_path();
        fs::create_dir_all(&path)?;
        Ok(RocksVoteStore::open(&path.to_string_lossy())?)
    }
}
