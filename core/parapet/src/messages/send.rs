//! The `send` message subtype: moves a quantity of one asset between two
//! addresses.
//!
//! Everything here is consensus-critical. The validation checks run in a fixed
//! order and their Display strings are written verbatim into the permanent
//! audit record, so every node replaying a block must produce byte-identical
//! status strings.

use anyhow::Result;
use bitcoin::{Network, ScriptBuf};
use libsql::Connection;
use thiserror::Error as ThisError;
use tracing::info;

use crate::{
    address, assets, config,
    database::{
        queries::{self, insert_send},
        types::{SendRow, TransactionRow},
    },
    ledger,
};

/// Type tag of this subtype.
pub const ID: u8 = 1;

/// Body length after the tag: 8-byte asset id + 8-byte quantity.
pub const LENGTH: usize = 16;

#[derive(ThisError, Debug)]
pub enum UnpackError {
    #[error("could not unpack")]
    Malformed,
    #[error("asset id invalid")]
    AssetIdInvalid,
    #[error(transparent)]
    Database(#[from] queries::Error),
}

#[derive(ThisError, Debug)]
pub enum BalanceError {
    #[error("balance insufficient")]
    Insufficient,
}

#[derive(ThisError, Debug)]
pub enum ValidateError {
    #[error("asset invalid")]
    AssetInvalid,
    #[error("source address invalid")]
    SourceAddressInvalid,
    #[error("destination address invalid")]
    DestinationAddressInvalid,
    #[error("cannot send {}", config::BTC)]
    CannotSendBtc,
    #[error("quantity too large")]
    QuantityTooLarge,
    #[error("quantity negative")]
    QuantityNegative,
    #[error(transparent)]
    Balance(#[from] BalanceError),
    #[error(transparent)]
    Database(#[from] queries::Error),
}

/// Decoded body of a send. Exists only while a transaction is being applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SendPayload {
    pub asset: String,
    pub quantity: i64,
}

/// An outbound transfer, ready for the signing/broadcast layer: funding
/// source, underlying-ledger outputs (value `None` means a zero-value output
/// that only anchors the overlay payload), and the payload itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferIntent {
    pub source: String,
    pub outputs: Vec<(String, Option<i64>)>,
    pub data: Option<Vec<u8>>,
}

impl TransferIntent {
    pub fn op_return_script(&self) -> Result<Option<ScriptBuf>> {
        match &self.data {
            Some(data) => Ok(Some(super::script_from_data(data)?)),
            None => Ok(None),
        }
    }
}

/// Encodes a send body, tag included: `[ID][8-byte BE asset id][8-byte BE
/// quantity]`. Fixed width; no variable-length fields.
pub fn pack(asset_id: u64, quantity: i64) -> Vec<u8> {
    let mut data = Vec::with_capacity(super::TYPE_TAG_LENGTH + LENGTH);
    data.push(ID);
    data.extend_from_slice(&asset_id.to_be_bytes());
    data.extend_from_slice(&quantity.to_be_bytes());
    data
}

/// Decodes a send body (tag already stripped) and resolves the asset name as
/// of `block_index`. Either both fields come back or an error does; there is
/// no partial result. `UnpackError::Database` is a storage failure and must
/// not be treated as a rejection.
pub async fn unpack(
    conn: &Connection,
    message: &[u8],
    block_index: u64,
) -> Result<SendPayload, UnpackError> {
    if message.len() != LENGTH {
        return Err(UnpackError::Malformed);
    }
    let (id_bytes, quantity_bytes) = message.split_at(8);
    let asset_id = u64::from_be_bytes(id_bytes.try_into().map_err(|_| UnpackError::Malformed)?);
    let quantity = i64::from_be_bytes(
        quantity_bytes
            .try_into()
            .map_err(|_| UnpackError::Malformed)?,
    );
    let asset = assets::get_asset_name(conn, asset_id, block_index)
        .await?
        .ok_or(UnpackError::AssetIdInvalid)?;
    Ok(SendPayload { asset, quantity })
}

/// Consensus-rule validation. Checks run in order and short-circuit on the
/// first failure; reordering them changes recorded status strings and forks
/// the audit trail. Reads only.
pub async fn validate(
    conn: &Connection,
    network: Network,
    source: &str,
    destination: &str,
    asset: &str,
    quantity: i64,
    block_index: u64,
) -> Result<(), ValidateError> {
    assets::get_asset_id(conn, asset, block_index)
        .await?
        .ok_or(ValidateError::AssetInvalid)?;

    address::validate(source, network).map_err(|_| ValidateError::SourceAddressInvalid)?;
    address::validate(destination, network)
        .map_err(|_| ValidateError::DestinationAddressInvalid)?;

    if asset == config::BTC {
        return Err(ValidateError::CannotSendBtc);
    }
    if quantity > config::MAX_INT {
        return Err(ValidateError::QuantityTooLarge);
    }
    if quantity < 0 {
        return Err(ValidateError::QuantityNegative);
    }
    if ledger::get_balance(conn, source, asset).await? < quantity {
        return Err(BalanceError::Insufficient.into());
    }
    Ok(())
}

/// Builds a transfer intent for signing and broadcast. BTC moves through the
/// underlying ledger's own mechanism and bypasses the overlay entirely.
/// Overlay sends are validated against the current chain tip — intent
/// composition uses latest state, unlike replay, which uses the transaction's
/// own height. No mutation; safe to call repeatedly.
pub async fn compose(
    conn: &Connection,
    network: Network,
    source: &str,
    destination: &str,
    asset: &str,
    quantity: i64,
) -> Result<TransferIntent, ValidateError> {
    if asset == config::BTC {
        return Ok(TransferIntent {
            source: source.to_owned(),
            outputs: vec![(destination.to_owned(), Some(quantity))],
            data: None,
        });
    }

    let tip = ledger::last_block(conn).await?.map(|b| b.height).unwrap_or(0);
    validate(conn, network, source, destination, asset, quantity, tip).await?;

    let asset_id = assets::get_asset_id(conn, asset, tip)
        .await?
        .ok_or(ValidateError::AssetInvalid)?;
    Ok(TransferIntent {
        source: source.to_owned(),
        outputs: vec![(destination.to_owned(), None)],
        data: Some(pack(asset_id, quantity)),
    })
}

/// Applies one mined send during block replay.
///
/// Decode and validation failures never escape: each is rendered into the
/// status string of the audit record, which is written exactly once on every
/// path. The balance mutation and the audit insert share one database
/// transaction so no partial outcome is ever visible. The only errors
/// returned are storage failures, which abort block processing — a node that
/// cannot read or record state cannot honor the consensus contract.
pub async fn parse(
    conn: &Connection,
    network: Network,
    tx: &TransactionRow,
    message: &[u8],
) -> Result<()> {
    let checked = match unpack(conn, message, tx.block_index).await {
        Ok(payload) => {
            match validate(
                conn,
                network,
                &tx.source,
                &tx.destination,
                &payload.asset,
                payload.quantity,
                tx.block_index,
            )
            .await
            {
                Ok(()) => Ok(payload),
                Err(ValidateError::Database(e)) => return Err(e.into()),
                Err(e) => Err((Some(payload), format!("invalid: {e}"))),
            }
        }
        Err(UnpackError::Database(e)) => return Err(e.into()),
        Err(e) => Err((None, format!("invalid: {e}"))),
    };

    let txn = conn.transaction().await?;
    let (payload, status) = match checked {
        Ok(payload) => {
            ledger::transfer(
                &txn,
                tx.block_index,
                &tx.source,
                &tx.destination,
                &payload.asset,
                payload.quantity,
                "send",
                &tx.tx_hash,
            )
            .await?;
            (Some(payload), "valid".to_owned())
        }
        Err((payload, status)) => (payload, status),
    };

    info!(tx_hash = %tx.tx_hash, block_index = tx.block_index, status = %status, "send processed");

    insert_send(
        &txn,
        SendRow::builder()
            .tx_index(tx.tx_index)
            .tx_hash(tx.tx_hash.clone())
            .block_index(tx.block_index)
            .source(tx.source.clone())
            .destination(tx.destination.clone())
            .maybe_asset(payload.as_ref().map(|p| p.asset.clone()))
            .maybe_quantity(payload.as_ref().map(|p| p.quantity))
            .status(status)
            .build(),
    )
    .await?;
    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_layout_is_fixed_width_big_endian() {
        let data = pack(5, 100);
        assert_eq!(data.len(), 1 + LENGTH);
        assert_eq!(data[0], ID);
        assert_eq!(data[1..9], 5u64.to_be_bytes());
        assert_eq!(data[9..17], 100i64.to_be_bytes());
    }

    #[test]
    fn pack_is_deterministic() {
        assert_eq!(pack(42, 7), pack(42, 7));
    }
}
