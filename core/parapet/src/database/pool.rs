use std::path::PathBuf;

use anyhow::Result;
use deadpool::managed::{self, Metrics, Pool, RecycleResult};
use libsql::{Builder, Connection};

pub struct Manager {
    path: PathBuf,
}

impl managed::Manager for Manager {
    type Type = Connection;
    type Error = libsql::Error;

    async fn create(&self) -> Result<Connection, libsql::Error> {
        let db = Builder::new_local(&self.path).build().await?;
        db.connect()
    }

    async fn recycle(
        &self,
        _conn: &mut Connection,
        _metrics: &Metrics,
    ) -> RecycleResult<libsql::Error> {
        Ok(())
    }
}

pub fn new_pool(path: PathBuf) -> Result<Pool<Manager>> {
    Ok(Pool::builder(Manager { path }).build()?)
}
