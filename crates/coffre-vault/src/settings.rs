//! Store settings persisted as `settings.json` next to the store file.
//!
//! Every field has a default, so a partial or missing file is fine. Unknown
//! keys are ignored.
//!
//! The KDF iteration count is not a setting: store files do not record it,
//! so every store is sealed and opened with
//! [`DEFAULT_ITERATIONS`](coffre_crypto_core::kdf::DEFAULT_ITERATIONS).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::fs_util::write_atomic;

const SETTINGS_FILE: &str = "settings.json";

/// Default store file name inside the data directory.
pub const DEFAULT_STORE_FILE: &str = "passwords.enc";

/// Tunables for an [`crate::EncryptedStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Master passwords shorter than this are refused on write.
    pub min_master_password_length: usize,
    /// File name of the encrypted store within its directory.
    pub store_file_name: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            min_master_password_length: 1,
            store_file_name: DEFAULT_STORE_FILE.into(),
        }
    }
}

impl StoreSettings {
    /// Load from `{data_dir}/settings.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or not valid JSON.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        fs::read_to_string(&path).map_or_else(
            |_| Self::default(),
            |contents| {
                serde_json::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt settings file");
                    Self::default()
                })
            },
        )
    }

    /// Persist to `{data_dir}/settings.json` (atomic, owner-only).
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the directory is missing or the write fails.
    pub fn save(&self, data_dir: &Path) -> Result<(), VaultError> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_atomic(&data_dir.join(SETTINGS_FILE), &json)?;
        Ok(())
    }
}
