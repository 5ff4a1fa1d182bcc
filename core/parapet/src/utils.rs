use anyhow::Result;
use tempfile::TempDir;

use crate::{
    config::{Config, DB_FILENAME},
    database::{Reader, Writer},
};

/// Fresh on-disk database in a temp dir, with both handles. Keep the TempDir
/// alive for the duration of the test.
pub async fn new_test_db() -> Result<(Reader, Writer, TempDir)> {
    let temp_dir = TempDir::new()?;
    let config = Config::new_test(temp_dir.path());
    let writer = Writer::new(&config, DB_FILENAME).await?;
    let reader = Reader::new(&config, DB_FILENAME)?;
    Ok((reader, writer, temp_dir))
}
