use bon::Builder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRow {
    pub height: u64,
    pub hash: String,
}

/// One mined transaction of the overlay protocol, as recorded by the (external)
/// transaction parser: the on-chain source/destination plus the raw payload with
/// its leading type tag still attached.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct TransactionRow {
    pub id: Option<i64>,
    pub tx_index: i64,
    pub tx_hash: String,
    pub block_index: u64,
    pub source: String,
    pub destination: String,
    pub data: Vec<u8>,
}

/// A point-in-time binding of an asset id to a name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRow {
    pub asset_id: u64,
    pub asset_name: String,
    pub block_index: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRow {
    pub address: String,
    pub asset: String,
    pub quantity: i64,
}

/// The audit record for one processed send. Written exactly once per mined
/// transaction of this subtype, whatever the outcome; asset/quantity are NULL
/// only when the payload could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct SendRow {
    pub tx_index: i64,
    pub tx_hash: String,
    pub block_index: u64,
    pub source: String,
    pub destination: String,
    pub asset: Option<String>,
    pub quantity: Option<i64>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct LedgerEntryRow {
    pub block_index: u64,
    pub address: String,
    pub asset: String,
    pub quantity: i64,
    pub action: String,
    pub event: String,
}
