//! Encrypted credential store.
//!
//! One store owns one file. The file is either absent or holds the whole
//! record list sealed under a key derived from the master password (see
//! [`coffre_crypto_core::store_format`]). Every call takes the master
//! password and re-derives the key; nothing is cached between calls.
//!
//! # State machine
//!
//! - **Absent → Present** on the first [`EncryptedStore::save`]
//! - **Present → Absent** when the last record is deleted or on [`EncryptedStore::clear`]
//!
//! Writes replace the whole file atomically. Concurrent writers on one path
//! are not supported.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use coffre_crypto_core::kdf::Pbkdf2Params;
use coffre_crypto_core::store_format;
use zeroize::Zeroize;

use crate::error::VaultError;
use crate::fs_util::{ensure_parent, write_atomic};
use crate::record::CredentialRecord;
use crate::settings::StoreSettings;

/// Handle on one encrypted store file.
#[derive(Debug, Clone)]
pub struct EncryptedStore {
    path: PathBuf,
    settings: StoreSettings,
}

impl EncryptedStore {
    /// Store at `path` with default settings.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_settings(path, StoreSettings::default())
    }

    /// Store at `path` with explicit settings.
    #[must_use]
    pub fn with_settings(path: impl Into<PathBuf>, settings: StoreSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Store inside `data_dir`, configured from its `settings.json`.
    ///
    /// `data_dir` need not exist yet; the first write creates it.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        let settings = StoreSettings::load(data_dir);
        Self::with_settings(data_dir.join(&settings.store_file_name), settings)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Whether the store file currently exists (Present state).
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    // -- Public operations ---------------------------------------------------

    /// Append a record and rewrite the store.
    ///
    /// Existing records are decrypted first; if that fails the file is left
    /// as it is and the error is returned.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidConfiguration`] for an empty master password
    /// - [`VaultError::WeakMasterPassword`] below the configured minimum
    /// - [`VaultError::DecryptionFailure`] if the existing file cannot be opened
    /// - [`VaultError::Io`] if the write fails
    pub fn save(
        &self,
        master: &str,
        name: &str,
        password: &str,
        description: &str,
    ) -> Result<(), VaultError> {
        self.check_write_policy(master)?;
        let mut records = self.load(master)?;
        records.push(CredentialRecord::new(name, password, description));
        self.write_records(master, &records)?;
        tracing::info!(path = %self.path.display(), total = records.len(), "Record saved");
        Ok(())
    }

    /// Decrypt and return every record. An absent store yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidConfiguration`] for an empty master password
    /// - [`VaultError::DecryptionFailure`] for a wrong master password or a
    ///   corrupted file (never reported as an empty store)
    /// - [`VaultError::Io`] if the file cannot be read
    pub fn load(&self, master: &str) -> Result<Vec<CredentialRecord>, VaultError> {
        check_not_empty(master)?;
        let blob = match fs::read(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let params = Pbkdf2Params::default();
        let plaintext = store_format::open(&blob, master.as_bytes(), &params).map_err(|e| {
            tracing::warn!(path = %self.path.display(), "Store could not be decrypted");
            VaultError::from(e)
        })?;

        serde_json::from_slice(plaintext.expose()).map_err(|_| {
            tracing::warn!(path = %self.path.display(), "Decrypted store is not a record list");
            VaultError::DecryptionFailure
        })
    }

    /// Remove every record named exactly `name`.
    ///
    /// Returns `false`, leaving the file untouched, when nothing matches.
    /// Removes the file when the last record goes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`], plus [`VaultError::Io`] on rewrite.
    pub fn delete(&self, master: &str, name: &str) -> Result<bool, VaultError> {
        let records = self.load(master)?;
        let before = records.len();
        let kept: Vec<CredentialRecord> = records.into_iter().filter(|r| r.name != name).collect();

        if kept.len() == before {
            return Ok(false);
        }

        if kept.is_empty() {
            self.remove_file()?;
        } else {
            self.write_records(master, &kept)?;
        }
        tracing::info!(
            path = %self.path.display(),
            removed = before.saturating_sub(kept.len()),
            remaining = kept.len(),
            "Record deleted"
        );
        Ok(true)
    }

    /// Delete the store file. A no-op when already absent.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), VaultError> {
        self.remove_file()?;
        tracing::info!(path = %self.path.display(), "Store cleared");
        Ok(())
    }

    /// Records whose name contains `query` (case-sensitive).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn search(&self, master: &str, query: &str) -> Result<Vec<CredentialRecord>, VaultError> {
        let mut records = self.load(master)?;
        records.retain(|r| r.name.contains(query));
        Ok(records)
    }

    // -- Internals -----------------------------------------------------------

    /// Empty master is a configuration error; short master violates policy.
    pub(crate) fn check_write_policy(&self, master: &str) -> Result<(), VaultError> {
        check_not_empty(master)?;
        let min_length = self.settings.min_master_password_length;
        if master.chars().count() < min_length {
            return Err(VaultError::WeakMasterPassword { min_length });
        }
        Ok(())
    }

    /// Serialize, seal under a fresh salt and atomically replace the file.
    pub(crate) fn write_records(
        &self,
        master: &str,
        records: &[CredentialRecord],
    ) -> Result<(), VaultError> {
        self.check_write_policy(master)?;
        let mut plaintext = serde_json::to_vec(records)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let params = Pbkdf2Params::default();
        let sealed = store_format::seal(&plaintext, master.as_bytes(), &params);
        plaintext.zeroize();

        ensure_parent(&self.path)?;
        write_atomic(&self.path, &sealed?)?;
        Ok(())
    }

    fn remove_file(&self) -> Result<(), VaultError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn check_not_empty(master: &str) -> Result<(), VaultError> {
    if master.is_empty() {
        return Err(VaultError::InvalidConfiguration(
            "master password must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MASTER: &str = "correct horse battery staple";

    fn store(dir: &TempDir) -> EncryptedStore {
        EncryptedStore::new(dir.path().join("passwords.enc"))
    }

    #[test]
    fn absent_store_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(!store.exists());
        assert!(store.load(MASTER).unwrap().is_empty());
    }

    #[test]
    fn save_creates_file_and_appends() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "mail", "pw1", "").unwrap();
        assert!(store.exists());
        store.save(MASTER, "mail", "pw2", "second").unwrap();

        let records = store.load(MASTER).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].password, "pw1");
        assert_eq!(records[1].description, "second");
    }

    #[test]
    fn file_starts_with_fresh_salt_each_write() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "a", "1", "").unwrap();
        let first = fs::read(store.path()).unwrap();
        store.save(MASTER, "b", "2", "").unwrap();
        let second = fs::read(store.path()).unwrap();
        assert_ne!(first[..16], second[..16]);
    }

    #[test]
    fn plaintext_not_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "bank", "s3cr3t-value", "").unwrap();
        let raw = fs::read(store.path()).unwrap();
        let needle = b"s3cr3t-value";
        assert!(!raw.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn empty_master_rejected_everywhere() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(
            store.save("", "a", "b", ""),
            Err(VaultError::InvalidConfiguration(_))
        ));
        assert!(matches!(store.load(""), Err(VaultError::InvalidConfiguration(_))));
        assert!(!store.exists());
    }

    #[test]
    fn weak_master_rejected_on_write_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.enc");
        EncryptedStore::new(&path).save("short", "a", "b", "").unwrap();

        let strict = EncryptedStore::with_settings(
            &path,
            StoreSettings {
                min_master_password_length: 10,
                ..StoreSettings::default()
            },
        );
        assert!(matches!(
            strict.save("short", "c", "d", ""),
            Err(VaultError::WeakMasterPassword { min_length: 10 })
        ));
        assert_eq!(strict.load("short").unwrap().len(), 1);
    }

    #[test]
    fn wrong_master_on_save_keeps_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "a", "1", "").unwrap();
        let before = fs::read(store.path()).unwrap();

        assert!(matches!(
            store.save("wrong master", "b", "2", ""),
            Err(VaultError::DecryptionFailure)
        ));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn garbage_file_is_decryption_failure() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), b"not a store").unwrap();
        assert!(matches!(store.load(MASTER), Err(VaultError::DecryptionFailure)));
    }

    #[test]
    fn delete_last_record_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "only", "x", "").unwrap();
        assert!(store.delete(MASTER, "only").unwrap());
        assert!(!store.exists());
        assert!(!store.delete(MASTER, "only").unwrap());
    }

    #[test]
    fn delete_is_exact_and_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "Mail", "x", "").unwrap();
        store.save(MASTER, "mail", "y", "").unwrap();
        assert!(!store.delete(MASTER, "mai").unwrap());
        assert!(store.delete(MASTER, "mail").unwrap());
        let names: Vec<String> = store.load(MASTER).unwrap().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["Mail".to_string()]);
    }

    #[test]
    fn search_matches_name_substring_only() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "gmail.com", "p1", "personal").unwrap();
        store.save(MASTER, "github.com", "p2", "gmail login").unwrap();
        store.save(MASTER, "GMAIL-work", "p3", "").unwrap();

        let hits = store.search(MASTER, "gmail").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "gmail.com");
        assert_eq!(store.search(MASTER, ".com").unwrap().len(), 2);
        assert_eq!(store.search(MASTER, "").unwrap().len(), 3);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(MASTER, "a", "1", "").unwrap();
        store.clear().unwrap();
        assert!(!store.exists());
        store.clear().unwrap();
    }

    #[test]
    fn in_dir_uses_settings_file_name() {
        let dir = TempDir::new().unwrap();
        StoreSettings {
            store_file_name: "vault.bin".into(),
            ..StoreSettings::default()
        }
        .save(dir.path())
        .unwrap();
        let store = EncryptedStore::in_dir(dir.path());
        assert_eq!(store.path(), dir.path().join("vault.bin"));
    }

    #[test]
    fn in_dir_creates_missing_data_dir_on_first_save() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data").join("coffre");
        let store = EncryptedStore::in_dir(&data_dir);
        assert!(!data_dir.exists());

        store.save(MASTER, "mail", "pw", "").unwrap();
        assert!(data_dir.join("passwords.enc").is_file());
        assert_eq!(store.load(MASTER).unwrap().len(), 1);
    }

    #[test]
    fn legacy_iteration_setting_does_not_lock_out() {
        let dir = TempDir::new().unwrap();
        EncryptedStore::in_dir(dir.path()).save(MASTER, "mail", "pw", "").unwrap();

        fs::write(
            dir.path().join("settings.json"),
            r#"{"kdfIterations":200000,"minMasterPasswordLength":1}"#,
        )
        .unwrap();
        let reopened = EncryptedStore::in_dir(dir.path());
        assert_eq!(reopened.load(MASTER).unwrap()[0].password, "pw");
    }
}
