//! `coffre-vault`: encrypted credential storage for Coffre.
//!
//! An [`EncryptedStore`] keeps a list of named credentials in a single file
//! sealed with AES-256-GCM under a PBKDF2-derived key, and offers JSON
//! export/import, raw backup/restore and summary statistics on top.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod backup;
pub mod error;
pub mod export;
mod fs_util;
pub mod record;
pub mod settings;
pub mod statistics;
pub mod store;

pub use error::VaultError;
pub use export::ExportDocument;
pub use record::{CredentialRecord, DATE_FORMAT};
pub use settings::{StoreSettings, DEFAULT_STORE_FILE};
pub use statistics::StoreStatistics;
pub use store::EncryptedStore;
