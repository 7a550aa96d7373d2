//! Mission Command Engine
//!
//! Persistent, ordered list of vehicle commands and the state machine that
//! walks it.
//!
//! # Architecture
//!
//! ```text
//! ground control ──► wire ──► Mission::set_item ──► codec ──► StorageAccess
//!                                    │
//! control loop ──► Mission::update ──┤ advance / jumps / resume / landing
//!                                    ▼
//!                            MissionExecutor (vehicle)
//! ```
//!
//! - [`command`]: MAV_CMD ids and their classification
//! - [`content`]: in-memory command and payload types
//! - [`codec`]: fixed-size storage records
//! - [`jump`]: DO_JUMP run counters and the last JUMP_TAG reached
//! - [`history`]: waypoints passed, for resume rewind
//! - [`engine`]: the [`Mission`] state machine
//! - [`wire`]: mission item conversion
//! - [`shared`]: engine guarded for access from several tasks

pub mod codec;
pub mod command;
pub mod content;
pub mod engine;
pub mod error;
pub mod executor;
pub mod history;
pub mod jump;
pub mod mock;
pub mod shared;
pub mod state;
pub mod wire;

/// Events retained for the telemetry layer before the oldest is dropped
pub const MAX_MISSION_EVENTS: usize = 16;

/// Highest altitude (m) a mission item may carry
pub const LOCATION_ALT_MAX_M: f32 = 83_000.0;

pub use content::{CommandContent, MissionCommand};
pub use engine::Mission;
pub use error::MissionError;
pub use executor::{MissionEvent, MissionExecutor, VehicleState};
pub use shared::SharedMission;
pub use state::MissionState;
pub use wire::{MissionItem, MissionItemInt, MissionResult};
