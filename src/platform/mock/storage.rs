//! Mock storage implementation for testing
//!
//! Provides an in-memory region with fault injection.

use crate::platform::{traits::StorageAccess, Result, StorageError};

/// Mock storage region of `N` bytes
///
/// Simulates a persistent region in RAM. Supports:
/// - Read/write operations with bounds checking
/// - Corruption injection for testing format recovery
/// - Read/write failure injection
/// - Power-loss simulation (next write only half completes)
///
/// The region starts erased (all 0xFF), like a fresh EEPROM or flash page.
///
/// # Example
///
/// ```
/// use trail_mission::platform::mock::MockStorage;
/// use trail_mission::platform::StorageAccess;
///
/// let mut storage = MockStorage::<64>::new();
/// storage.write(4, &[1, 2, 3]).unwrap();
///
/// let mut buf = [0u8; 3];
/// storage.read(4, &mut buf).unwrap();
/// assert_eq!(buf, [1, 2, 3]);
/// assert_eq!(storage.write_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockStorage<const N: usize> {
    data: [u8; N],
    fail_reads: bool,
    fail_writes: bool,
    power_loss: bool,
    write_count: u32,
}

impl<const N: usize> MockStorage<N> {
    /// Create a new erased region
    pub const fn new() -> Self {
        Self {
            data: [0xFF; N],
            fail_reads: false,
            fail_writes: false,
            power_loss: false,
            write_count: 0,
        }
    }

    /// Raw region contents (for test verification)
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite `len` bytes at `offset` with a corrupt pattern
    pub fn inject_corruption(&mut self, offset: usize, len: usize) {
        let end = offset.saturating_add(len).min(N);
        for byte in self.data.iter_mut().take(end).skip(offset) {
            *byte = 0xAA;
        }
    }

    /// Make every subsequent read fail
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Simulate power loss during the next write
    ///
    /// Only the first half of the next write reaches the region and the
    /// write reports failure.
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    fn check_range(offset: usize, len: usize) -> Result<()> {
        match offset.checked_add(len) {
            Some(end) if end <= N => Ok(()),
            _ => Err(StorageError::OutOfBounds),
        }
    }
}

impl<const N: usize> Default for MockStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StorageAccess for MockStorage<N> {
    fn size(&self) -> usize {
        N
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        Self::check_range(offset, buf.len())?;
        if self.fail_reads {
            return Err(StorageError::ReadFailed);
        }
        buf.copy_from_slice(&self.data[offset..offset + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        Self::check_range(offset, data.len())?;
        if self.fail_writes {
            return Err(StorageError::WriteFailed);
        }
        if self.power_loss {
            self.power_loss = false;
            let partial = data.len() / 2;
            self.data[offset..offset + partial].copy_from_slice(&data[..partial]);
            return Err(StorageError::WriteFailed);
        }
        self.data[offset..offset + data.len()].copy_from_slice(data);
        self.write_count += 1;
        Ok(())
    }
}
