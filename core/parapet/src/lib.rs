//! Parapet protocol core.
//!
//! Overlay messages are carried in the payloads of Bitcoin transactions. This
//! crate implements the full life cycle of the `send` message subtype: binary
//! encoding, decoding with structural validation, consensus-rule validation,
//! composition of an outbound transfer intent, and deterministic application to
//! ledger state during block replay. The replay driver, broadcast layer, and
//! signing all live outside this crate.

pub mod address;
pub mod assets;
pub mod config;
pub mod database;
pub mod ledger;
pub mod logging;
pub mod messages;
pub mod utils;
