//! Summary figures over the stored records.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::VaultError;
use crate::record::{date_format, CredentialRecord};
use crate::store::EncryptedStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStatistics {
    pub total: usize,
    #[serde(with = "date_format::option")]
    pub oldest_date: Option<NaiveDateTime>,
    #[serde(with = "date_format::option")]
    pub newest_date: Option<NaiveDateTime>,
    /// Mean password length in characters, rounded to one decimal.
    pub average_length: f64,
}

impl StoreStatistics {
    /// Compute over an in-memory record list.
    #[must_use]
    pub fn from_records(records: &[CredentialRecord]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self {
                total,
                oldest_date: None,
                newest_date: None,
                average_length: 0.0,
            };
        }

        let chars: usize = records.iter().map(|r| r.password.chars().count()).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = chars as f64 / total as f64;

        Self {
            total,
            oldest_date: records.iter().map(|r| r.created_at).min(),
            newest_date: records.iter().map(|r| r.created_at).max(),
            average_length: (mean * 10.0).round() / 10.0,
        }
    }
}

impl EncryptedStore {
    /// Statistics over the records currently in the store.
    ///
    /// # Errors
    ///
    /// Same as [`EncryptedStore::load`]; a wrong master password is an error,
    /// not an empty summary.
    pub fn statistics(&self, master: &str) -> Result<StoreStatistics, VaultError> {
        Ok(StoreStatistics::from_records(&self.load(master)?))
    }
}
