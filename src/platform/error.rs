//! Platform error types
//!
//! Storage driver errors surfaced to the mission engine.

use core::fmt;

/// Result type for storage operations
pub type Result<T> = core::result::Result<T, StorageError>;

/// Storage-specific errors
///
/// Storage drivers map their HAL-specific failures to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Access extends past the end of the storage region
    OutOfBounds,
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::OutOfBounds => write!(f, "storage access out of bounds"),
            StorageError::ReadFailed => write!(f, "storage read failed"),
            StorageError::WriteFailed => write!(f, "storage write failed"),
        }
    }
}
