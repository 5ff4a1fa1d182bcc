use libsql::{Connection, de::from_row, params};
use thiserror::Error as ThisError;

use super::types::{AssetRow, BlockRow, LedgerEntryRow, SendRow, TransactionRow};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("LibSQL error: {0}")]
    LibSQL(#[from] libsql::Error),
    #[error("Row deserialization error: {0}")]
    RowDeserialization(#[from] serde::de::value::Error),
}

async fn collect_rows<T>(mut rows: libsql::Rows) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(from_row(&row)?);
    }
    Ok(results)
}

pub async fn insert_block(conn: &Connection, block: BlockRow) -> Result<i64, Error> {
    conn.execute(
        "INSERT OR REPLACE INTO blocks (height, hash) VALUES (?, ?)",
        params![block.height, block.hash],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

pub async fn select_block_latest(conn: &Connection) -> Result<Option<BlockRow>, Error> {
    let mut rows = conn
        .query(
            "SELECT height, hash FROM blocks ORDER BY height DESC LIMIT 1",
            params![],
        )
        .await?;
    Ok(rows.next().await?.map(|r| from_row(&r)).transpose()?)
}

pub async fn insert_transaction(conn: &Connection, row: TransactionRow) -> Result<i64, Error> {
    conn.execute(
        "INSERT INTO transactions (tx_index, tx_hash, block_index, source, destination, data)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            row.tx_index,
            row.tx_hash,
            row.block_index,
            row.source,
            row.destination,
            row.data
        ],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

pub async fn get_transaction_by_tx_hash(
    conn: &Connection,
    tx_hash: &str,
) -> Result<Option<TransactionRow>, Error> {
    let mut rows = conn
        .query(
            "SELECT id, tx_index, tx_hash, block_index, source, destination, data
             FROM transactions WHERE tx_hash = ?",
            params![tx_hash],
        )
        .await?;
    Ok(rows.next().await?.map(|r| from_row(&r)).transpose()?)
}

pub async fn insert_asset(conn: &Connection, row: AssetRow) -> Result<i64, Error> {
    conn.execute(
        "INSERT INTO assets (asset_id, asset_name, block_index) VALUES (?, ?, ?)",
        params![row.asset_id, row.asset_name, row.block_index],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

pub async fn select_asset_name_at_height(
    conn: &Connection,
    asset_id: u64,
    block_index: u64,
) -> Result<Option<String>, Error> {
    let mut rows = conn
        .query(
            "SELECT asset_name FROM assets
             WHERE asset_id = ? AND block_index <= ?
             ORDER BY block_index DESC LIMIT 1",
            params![asset_id, block_index],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get::<String>(0)?)),
        None => Ok(None),
    }
}

pub async fn select_asset_id_at_height(
    conn: &Connection,
    asset_name: &str,
    block_index: u64,
) -> Result<Option<u64>, Error> {
    let mut rows = conn
        .query(
            "SELECT asset_id FROM assets
             WHERE asset_name = ? AND block_index <= ?
             ORDER BY block_index DESC LIMIT 1",
            params![asset_name, block_index],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get::<u64>(0)?)),
        None => Ok(None),
    }
}

pub async fn select_balance(
    conn: &Connection,
    address: &str,
    asset: &str,
) -> Result<Option<i64>, Error> {
    let mut rows = conn
        .query(
            "SELECT quantity FROM balances WHERE address = ? AND asset = ?",
            params![address, asset],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get::<i64>(0)?)),
        None => Ok(None),
    }
}

pub async fn upsert_balance(
    conn: &Connection,
    address: &str,
    asset: &str,
    quantity: i64,
) -> Result<(), Error> {
    conn.execute(
        "INSERT INTO balances (address, asset, quantity) VALUES (?, ?, ?)
         ON CONFLICT (address, asset) DO UPDATE SET quantity = excluded.quantity",
        params![address, asset, quantity],
    )
    .await?;
    Ok(())
}

pub async fn insert_send(conn: &Connection, row: SendRow) -> Result<i64, Error> {
    conn.execute(
        "INSERT INTO sends (tx_index, tx_hash, block_index, source, destination, asset, quantity, status)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            row.tx_index,
            row.tx_hash,
            row.block_index,
            row.source,
            row.destination,
            row.asset,
            row.quantity,
            row.status
        ],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

pub async fn select_sends_by_tx_hash(
    conn: &Connection,
    tx_hash: &str,
) -> Result<Vec<SendRow>, Error> {
    let rows = conn
        .query(
            "SELECT tx_index, tx_hash, block_index, source, destination, asset, quantity, status
             FROM sends WHERE tx_hash = ? ORDER BY rowid",
            params![tx_hash],
        )
        .await?;
    collect_rows(rows).await
}

pub async fn insert_credit(conn: &Connection, row: LedgerEntryRow) -> Result<i64, Error> {
    conn.execute(
        "INSERT INTO credits (block_index, address, asset, quantity, action, event)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            row.block_index,
            row.address,
            row.asset,
            row.quantity,
            row.action,
            row.event
        ],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

pub async fn insert_debit(conn: &Connection, row: LedgerEntryRow) -> Result<i64, Error> {
    conn.execute(
        "INSERT INTO debits (block_index, address, asset, quantity, action, event)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            row.block_index,
            row.address,
            row.asset,
            row.quantity,
            row.action,
            row.event
        ],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}
