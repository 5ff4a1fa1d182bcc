//! Ledger balance collaborator.
//!
//! Reads go against whatever connection the caller holds; writes are plain
//! statements so that the caller — one mined transaction's full
//! decode-validate-apply-record sequence — owns the transactional scope.
//! `transfer` therefore takes a [`libsql::Transaction`]: the balance mutation
//! and the audit record it is paired with must commit or roll back as a unit,
//! and libsql transactions do not nest.

use libsql::{Connection, Transaction};
use thiserror::Error as ThisError;

use crate::database::queries::{
    self, insert_credit, insert_debit, select_balance, select_block_latest, upsert_balance,
};
use crate::database::types::{BlockRow, LedgerEntryRow};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("insufficient {asset} balance for {address}")]
    InsufficientBalance { address: String, asset: String },
    #[error("balance overflow for {address}")]
    BalanceOverflow { address: String },
    #[error(transparent)]
    Database(#[from] queries::Error),
}

pub async fn get_balance(
    conn: &Connection,
    address: &str,
    asset: &str,
) -> Result<i64, queries::Error> {
    Ok(select_balance(conn, address, asset).await?.unwrap_or(0))
}

pub async fn last_block(conn: &Connection) -> Result<Option<BlockRow>, queries::Error> {
    select_block_latest(conn).await
}

pub async fn credit(
    conn: &Connection,
    block_index: u64,
    address: &str,
    asset: &str,
    quantity: i64,
    action: &str,
    event: &str,
) -> Result<(), Error> {
    let balance = get_balance(conn, address, asset).await?;
    let balance = balance
        .checked_add(quantity)
        .ok_or_else(|| Error::BalanceOverflow {
            address: address.to_owned(),
        })?;
    upsert_balance(conn, address, asset, balance).await?;
    insert_credit(
        conn,
        LedgerEntryRow::builder()
            .block_index(block_index)
            .address(address.to_owned())
            .asset(asset.to_owned())
            .quantity(quantity)
            .action(action.to_owned())
            .event(event.to_owned())
            .build(),
    )
    .await?;
    Ok(())
}

pub async fn debit(
    conn: &Connection,
    block_index: u64,
    address: &str,
    asset: &str,
    quantity: i64,
    action: &str,
    event: &str,
) -> Result<(), Error> {
    let balance = get_balance(conn, address, asset).await?;
    if balance < quantity {
        return Err(Error::InsufficientBalance {
            address: address.to_owned(),
            asset: asset.to_owned(),
        });
    }
    upsert_balance(conn, address, asset, balance - quantity).await?;
    insert_debit(
        conn,
        LedgerEntryRow::builder()
            .block_index(block_index)
            .address(address.to_owned())
            .asset(asset.to_owned())
            .quantity(quantity)
            .action(action.to_owned())
            .event(event.to_owned())
            .build(),
    )
    .await?;
    Ok(())
}

/// Moves `quantity` of `asset` from `source` to `destination`: debit then
/// credit, both journaled. The caller's transaction guarantees no partial
/// transfer is ever visible.
pub async fn transfer(
    txn: &Transaction,
    block_index: u64,
    source: &str,
    destination: &str,
    asset: &str,
    quantity: i64,
    action: &str,
    event: &str,
) -> Result<(), Error> {
    debit(txn, block_index, source, asset, quantity, action, event).await?;
    credit(txn, block_index, destination, asset, quantity, action, event).await?;
    Ok(())
}
