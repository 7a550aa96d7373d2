//! Storage interface trait
//!
//! Byte-addressable persistent region that holds the mission list. The
//! region is owned by the mission engine; offsets are relative to its start.

use crate::platform::Result;

/// Persistent storage accessor
///
/// Implementations back onto EEPROM, FRAM or a flash emulation layer. The
/// engine assumes every call completes synchronously and quickly; a blocking
/// implementation stalls the control loop.
///
/// # Invariants
///
/// - `read`/`write` must reject any access that extends past `size()`
/// - A successful `write` of `data` leaves exactly those bytes readable at
///   `offset`; no other bytes may change
pub trait StorageAccess {
    /// Total size of the region in bytes.
    fn size(&self) -> usize;

    /// Read `buf.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::OutOfBounds` if the range exceeds the region.
    /// Returns `StorageError::ReadFailed` if the device reports a failure.
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `offset` as one contiguous block.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::OutOfBounds` if the range exceeds the region.
    /// Returns `StorageError::WriteFailed` if the device reports a failure.
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()>;
}

impl<S: StorageAccess + ?Sized> StorageAccess for &mut S {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        (**self).read(offset, buf)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        (**self).write(offset, data)
    }
}
