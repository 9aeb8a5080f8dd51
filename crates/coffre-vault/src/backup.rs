//! Byte-for-byte backup and restore of the store file.
//!
//! Neither direction decrypts anything: a backup is only as readable as the
//! master password it was sealed under.

use std::fs;
use std::path::Path;

use crate::error::VaultError;
use crate::fs_util::{copy_atomic, ensure_parent, write_atomic};
use crate::store::EncryptedStore;

impl EncryptedStore {
    /// Copy the store file to `path`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::FileNotFound`] when the store is absent
    /// - [`VaultError::Io`] when the copy fails
    pub fn backup(&self, path: &Path) -> Result<(), VaultError> {
        if !self.exists() {
            return Err(VaultError::FileNotFound(self.path().to_path_buf()));
        }
        let data = fs::read(self.path())?;
        write_atomic(path, &data)?;
        tracing::info!(from = %self.path().display(), to = %path.display(), "Store backed up");
        Ok(())
    }

    /// Replace the store file with the contents of `path`.
    ///
    /// The source is not validated; a file sealed under another master
    /// password restores fine and then fails to load.
    ///
    /// # Errors
    ///
    /// - [`VaultError::FileNotFound`] when `path` does not exist
    /// - [`VaultError::Io`] when the copy fails (the store is left as it was)
    pub fn restore(&self, path: &Path) -> Result<(), VaultError> {
        if !path.is_file() {
            return Err(VaultError::FileNotFound(path.to_path_buf()));
        }
        ensure_parent(self.path())?;
        copy_atomic(path, self.path())?;
        tracing::info!(from = %path.display(), to = %self.path().display(), "Store restored");
        Ok(())
    }
}
