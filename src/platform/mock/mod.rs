//! Mock platform implementation for testing
//!
//! Always compiled so that both unit tests and the integration suite can
//! drive the engine without hardware.

mod storage;

pub use storage::MockStorage;
