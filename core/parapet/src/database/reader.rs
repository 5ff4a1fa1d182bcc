use anyhow::{Context, Result};
use deadpool::managed::{Object, Pool};

use crate::config::Config;

use super::pool::{Manager, new_pool};

#[derive(Clone)]
pub struct Reader {
    pool: Pool<Manager>,
}

impl Reader {
    pub fn new(config: &Config, filename: &str) -> Result<Self> {
        let pool = new_pool(config.data_dir.join(filename))?;
        Ok(Self { pool })
    }

    pub async fn connection(&self) -> Result<Object<Manager>> {
        self.pool
            .get()
            .await
            .context("Failed to get connection from database reader pool")
    }
}
