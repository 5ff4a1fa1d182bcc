use std::path::{Path, PathBuf};

use anyhow::Result;
use bitcoin::Network;
use clap::Parser;

/// The native currency of the underlying chain. It moves through regular
/// transaction outputs, never through an overlay message.
pub const BTC: &str = "BTC";

/// Protocol-wide cap on any single quantity. Kept strictly below `i64::MAX` so
/// the bounds check in validation stays reachable.
pub const MAX_INT: i64 = 9_000_000_000_000_000_000;

pub const DB_FILENAME: &str = "parapet.db";

#[derive(Parser, Clone, Debug)]
#[command(name = "parapet")]
pub struct Config {
    #[arg(long, env = "PARAPET_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Network the address rules are enforced against.
    #[arg(long, env = "PARAPET_NETWORK", default_value = "bitcoin")]
    pub network: Network,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self::try_parse()?)
    }

    pub fn new_test(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            network: Network::Bitcoin,
        }
    }
}
