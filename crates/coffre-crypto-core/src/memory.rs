//! Zeroizing containers for derived keys and decrypted store contents.
//!
//! [`SecretBuffer`] keeps the decrypted record list on the heap, where its
//! address is stable, so it also asks the OS to keep those pages out of swap.
//! [`SecretBytes`] is a plain inline array; it moves freely and is only wiped.

use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// `mlock` guard over a heap range owned by the enclosing buffer.
///
/// Best-effort: a refused lock (quota, privileges) is ignored.
struct PageLock {
    ptr: *const u8,
    len: usize,
    held: bool,
}

// SAFETY: the pointer is only passed to mlock/munlock, never dereferenced.
unsafe impl Send for PageLock {}
unsafe impl Sync for PageLock {}

impl PageLock {
    fn acquire(range: &[u8]) -> Self {
        Self {
            ptr: range.as_ptr(),
            len: range.len(),
            held: platform::lock(range.as_ptr(), range.len()),
        }
    }
}

impl Drop for PageLock {
    fn drop(&mut self) {
        if self.held {
            platform::unlock(self.ptr, self.len);
        }
    }
}

/// Decrypted plaintext of variable length.
pub struct SecretBuffer {
    // Declared first so the pages are unlocked before the slice is freed.
    _lock: PageLock,
    inner: SecretSlice<u8>,
}

impl SecretBuffer {
    /// Copy `data` into a fresh heap allocation. The caller wipes its own copy.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        let inner: SecretSlice<u8> = data.to_vec().into();
        let lock = PageLock::acquire(inner.expose_secret());
        Self { _lock: lock, inner }
    }

    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer({} bytes, ***)", self.len())
    }
}

/// Fixed-size key material, wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize>([u8; N]);

impl<const N: usize> SecretBytes<N> {
    #[must_use]
    pub const fn new(data: [u8; N]) -> Self {
        Self(data)
    }

    #[must_use]
    pub const fn expose(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>(***)")
    }
}

#[cfg(unix)]
mod platform {
    pub(super) fn lock(ptr: *const u8, len: usize) -> bool {
        // SAFETY: mlock reads no memory; an invalid range only returns an error.
        len > 0 && unsafe { libc::mlock(ptr.cast(), len) == 0 }
    }

    pub(super) fn unlock(ptr: *const u8, len: usize) {
        // SAFETY: same range that was locked in `lock`.
        let _ = unsafe { libc::munlock(ptr.cast(), len) };
    }
}

#[cfg(not(unix))]
mod platform {
    pub(super) const fn lock(_ptr: *const u8, _len: usize) -> bool {
        false
    }

    pub(super) const fn unlock(_ptr: *const u8, _len: usize) {}
}
