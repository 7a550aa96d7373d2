//! Core infrastructure
//!
//! Logging macros and the platform-agnostic traits (time, shared state) that
//! the mission engine is written against.

pub mod logging;
pub mod traits;
