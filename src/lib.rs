#![cfg_attr(not(test), no_std)]

//! trail_mission - Persistent mission command engine for autonomous vehicles
//!
//! Stores an ordered list of navigation and auxiliary commands in a
//! byte-addressable region and runs them one control cycle at a time:
//! jumps, landing sequences, resume rewind and ground-control item access.

// Logging macros and platform-agnostic traits
pub mod core;

// Storage contract and RAM-backed mock
pub mod platform;

// Location and distance helpers
pub mod navigation;

// Parameter store and mission parameter group
pub mod parameters;

// Command list, state machine and wire conversion
pub mod mission;
