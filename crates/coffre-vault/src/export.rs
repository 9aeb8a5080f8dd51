//! JSON export and import of the record list.
//!
//! Export document layout:
//!
//! ```json
//! {
//!   "export_date": "2024-03-01 09:15:42",
//!   "total_passwords": 2,
//!   "passwords": [ { "name": "...", "password": "...", "description": "...", "date": "..." } ]
//! }
//! ```
//!
//! Exports are written in clear text, atomically and readable by the owner
//! only. With `include_secrets = false` each password is replaced by one `*`
//! per character.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VaultError;
use crate::fs_util::write_atomic;
use crate::record::{self, date_format, CredentialRecord};
use crate::store::EncryptedStore;

/// Top-level export document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(with = "date_format")]
    pub export_date: NaiveDateTime,
    pub total_passwords: usize,
    pub passwords: Vec<CredentialRecord>,
}

impl ExportDocument {
    /// Wrap `records`, stamped with the current local time.
    #[must_use]
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self {
            export_date: record::now(),
            total_passwords: records.len(),
            passwords: records,
        }
    }
}

impl EncryptedStore {
    /// Write every record to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Same as [`EncryptedStore::load`], plus [`VaultError::Io`] when
    /// `path` cannot be written.
    pub fn export(&self, master: &str, path: &Path, include_secrets: bool) -> Result<(), VaultError> {
        let records = self.load(master)?;
        let records = if include_secrets {
            records
        } else {
            records.iter().map(CredentialRecord::masked).collect()
        };

        let document = ExportDocument::new(records);
        let json = serde_json::to_vec_pretty(&document)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        write_atomic(path, &json)?;

        tracing::info!(
            path = %path.display(),
            total = document.total_passwords,
            include_secrets,
            "Store exported"
        );
        Ok(())
    }

    /// Merge records from an export document at `path`. Returns how many
    /// were added.
    ///
    /// A record is skipped when its name is already in the store or appeared
    /// earlier in the same document. The store is rewritten only when at
    /// least one record was added.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidFormat`] when the document is not JSON, has no
    ///   `passwords` array, or holds a malformed record (nothing is merged)
    /// - [`VaultError::WeakMasterPassword`] below the configured minimum
    /// - anything [`EncryptedStore::load`] returns
    pub fn import_from(&self, master: &str, path: &Path) -> Result<usize, VaultError> {
        self.check_write_policy(master)?;
        let incoming = read_import_document(path)?;
        let mut records = self.load(master)?;

        let mut seen: HashSet<String> = records.iter().map(|r| r.name.clone()).collect();
        let before = records.len();
        for record in incoming {
            if seen.insert(record.name.clone()) {
                records.push(record);
            }
        }
        let added = records.len().saturating_sub(before);

        if added > 0 {
            self.write_records(master, &records)?;
        }
        tracing::info!(path = %path.display(), added, total = records.len(), "Import finished");
        Ok(added)
    }
}

/// Parse the `passwords` array of an export document.
///
/// Only `passwords` is required; `export_date` and `total_passwords` are
/// informational and ignored on import.
fn read_import_document(path: &Path) -> Result<Vec<CredentialRecord>, VaultError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(VaultError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut document: Value = serde_json::from_str(&contents)
        .map_err(|e| VaultError::InvalidFormat(format!("not JSON: {e}")))?;
    let passwords = document
        .get_mut("passwords")
        .map(Value::take)
        .ok_or_else(|| VaultError::InvalidFormat("missing \"passwords\" key".into()))?;

    serde_json::from_value(passwords)
        .map_err(|e| VaultError::InvalidFormat(format!("malformed record: {e}")))
}
