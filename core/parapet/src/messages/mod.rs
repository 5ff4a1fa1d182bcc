//! Overlay message subtypes and the tag router.
//!
//! Every message subtype is a variant of the closed [`MessageType`] sum; the
//! router matches it exhaustively, so adding a subtype is a compile-visible
//! change everywhere a message is dispatched. The payload a transaction
//! carries is `[1-byte tag][subtype body]` behind the `PRPT` OP_RETURN prefix.

use anyhow::Result;
use bitcoin::{
    Network, Script, ScriptBuf,
    opcodes::all::OP_RETURN,
    script::{Instruction, PushBytesBuf},
};
use libsql::Connection;
use tracing::debug;

use crate::database::types::TransactionRow;

pub mod send;

/// Prefix identifying overlay payloads inside OP_RETURN outputs.
pub const PREFIX: &[u8] = b"PRPT";

/// Width of the leading type tag, in bytes.
pub const TYPE_TAG_LENGTH: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Send,
}

impl MessageType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            send::ID => Some(Self::Send),
            _ => None,
        }
    }
}

/// Routes one mined transaction to its subtype handler. Transactions with an
/// unknown tag are skipped: they belong to a later protocol version and must
/// not disturb replay. Errors returned here are storage failures and abort
/// block processing.
pub async fn parse(conn: &Connection, network: Network, tx: &TransactionRow) -> Result<()> {
    let Some((tag, message)) = tx.data.split_first() else {
        debug!(tx_hash = %tx.tx_hash, "empty payload, skipping");
        return Ok(());
    };
    match MessageType::from_tag(*tag) {
        Some(MessageType::Send) => send::parse(conn, network, tx, message).await,
        None => {
            debug!(tx_hash = %tx.tx_hash, tag, "unknown message tag, skipping");
            Ok(())
        }
    }
}

/// Renders an overlay payload as the OP_RETURN script the broadcast layer
/// attaches to the underlying transaction.
pub fn script_from_data(data: &[u8]) -> Result<ScriptBuf> {
    let mut payload = Vec::with_capacity(PREFIX.len() + data.len());
    payload.extend_from_slice(PREFIX);
    payload.extend_from_slice(data);
    let mut script = ScriptBuf::new();
    script.push_opcode(OP_RETURN);
    script.push_slice(PushBytesBuf::try_from(payload)?);
    Ok(script)
}

/// Extracts an overlay payload from an OP_RETURN script, tag included. Used by
/// the transaction parser feeding the replay driver.
pub fn data_from_script(script: &Script) -> Option<Vec<u8>> {
    let mut instructions = script.instructions();
    if let Some(Ok(Instruction::Op(OP_RETURN))) = instructions.next()
        && let Some(Ok(Instruction::PushBytes(bytes))) = instructions.next()
        && instructions.next().is_none()
        && let Some(data) = bytes.as_bytes().strip_prefix(PREFIX)
        && !data.is_empty()
    {
        return Some(data.to_vec());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_dispatch() {
        assert_eq!(MessageType::from_tag(send::ID), Some(MessageType::Send));
        assert_eq!(MessageType::from_tag(0), None);
        assert_eq!(MessageType::from_tag(255), None);
    }

    #[test]
    fn script_round_trip() {
        let data = send::pack(5, 100);
        let script = script_from_data(&data).unwrap();
        assert!(script.is_op_return());
        assert_eq!(data_from_script(&script), Some(data));
    }

    #[test]
    fn foreign_scripts_yield_nothing() {
        let empty = ScriptBuf::new();
        assert_eq!(data_from_script(&empty), None);

        // OP_RETURN with someone else's prefix.
        let mut script = ScriptBuf::new();
        script.push_opcode(OP_RETURN);
        script.push_slice(b"OTHERDATA");
        assert_eq!(data_from_script(&script), None);
    }
}
