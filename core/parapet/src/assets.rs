//! Asset registry collaborator.
//!
//! Asset ids and names form a bijective mapping maintained by the (external)
//! issuance path, resolvable only as of a given block height: a name may be
//! reassigned to a different id over time, so consensus code must never resolve
//! against "latest". Id 0 is the native currency and never appears in the
//! registry table.

use libsql::Connection;
use thiserror::Error as ThisError;

use crate::config;
use crate::database::queries::{
    self, insert_asset, select_asset_id_at_height, select_asset_name_at_height,
};
use crate::database::types::AssetRow;

pub const BTC_ASSET_ID: u64 = 0;

pub const MIN_ASSET_NAME_LENGTH: usize = 3;
pub const MAX_ASSET_NAME_LENGTH: usize = 12;

#[derive(ThisError, Debug)]
pub enum AssetError {
    #[error("asset name invalid")]
    InvalidName,
    #[error("asset id reserved")]
    ReservedId,
    #[error(transparent)]
    Database(#[from] queries::Error),
}

/// Resolves an asset id to its name as of `block_index`. Returns `None` when
/// the id has no binding at that height.
pub async fn get_asset_name(
    conn: &Connection,
    asset_id: u64,
    block_index: u64,
) -> Result<Option<String>, queries::Error> {
    if asset_id == BTC_ASSET_ID {
        return Ok(Some(config::BTC.to_owned()));
    }
    select_asset_name_at_height(conn, asset_id, block_index).await
}

/// Resolves an asset name to its id as of `block_index`.
pub async fn get_asset_id(
    conn: &Connection,
    asset_name: &str,
    block_index: u64,
) -> Result<Option<u64>, queries::Error> {
    if asset_name == config::BTC {
        return Ok(Some(BTC_ASSET_ID));
    }
    select_asset_id_at_height(conn, asset_name, block_index).await
}

/// Records an id-to-name binding effective from `block_index` onward. Called by
/// the issuance path, which owns uniqueness of live bindings; this seam only
/// enforces name shape and the reserved id.
pub async fn register(
    conn: &Connection,
    asset_id: u64,
    asset_name: &str,
    block_index: u64,
) -> Result<(), AssetError> {
    if asset_id == BTC_ASSET_ID {
        return Err(AssetError::ReservedId);
    }
    validate_asset_name(asset_name)?;
    insert_asset(
        conn,
        AssetRow {
            asset_id,
            asset_name: asset_name.to_owned(),
            block_index,
        },
    )
    .await?;
    Ok(())
}

fn validate_asset_name(name: &str) -> Result<(), AssetError> {
    if name == config::BTC
        || name.len() < MIN_ASSET_NAME_LENGTH
        || name.len() > MAX_ASSET_NAME_LENGTH
        || !name.chars().all(|c| c.is_ascii_uppercase())
    {
        return Err(AssetError::InvalidName);
    }
    Ok(())
}
