//! Platform abstraction layer
//!
//! Storage access for the mission list. Drivers live in the firmware; this
//! crate only defines the contract and a RAM-backed mock.

pub mod error;
pub mod mock;
pub mod traits;

pub use error::{Result, StorageError};
pub use traits::StorageAccess;
