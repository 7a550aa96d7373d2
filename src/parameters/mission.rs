//! Mission Parameter Definitions
//!
//! # Parameters
//!
//! - `MIS_TOTAL` - Number of stored commands, home included (**read-only**)
//! - `MIS_RESTART` - 0 = resume where the mission left off, 1 = restart
//! - `MIS_OPTIONS` - Bitmask, see [`MissionOptions`]
//!
//! Names and meanings follow the ArduPilot Rover mission parameters.

use bitflags::bitflags;

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

bitflags! {
    /// `MIS_OPTIONS` bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MissionOptions: u16 {
        /// Clear the stored mission on boot
        const CLEAR_ON_BOOT = 1 << 0;
        /// Pick the landing sequence with the shortest remaining distance
        const FAILSAFE_TO_BEST_LANDING = 1 << 1;
        /// Keep running the mission after a landing if a takeoff follows
        const CONTINUE_AFTER_LAND = 1 << 2;
    }
}

/// Default restart behavior (resume)
const DEFAULT_RESTART: i32 = 0;

/// Default options (none)
const DEFAULT_OPTIONS: i32 = 0;

/// Mission parameters loaded from the parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionParams {
    /// Restart from the first command instead of resuming
    pub restart: bool,
    /// Behavior options
    pub options: MissionOptions,
}

impl Default for MissionParams {
    fn default() -> Self {
        Self {
            restart: DEFAULT_RESTART != 0,
            options: MissionOptions::empty(),
        }
    }
}

impl MissionParams {
    /// Register mission parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("MIS_TOTAL", ParamValue::Int(0), ParamFlags::READ_ONLY)?;
        store.register(
            "MIS_RESTART",
            ParamValue::Int(DEFAULT_RESTART),
            ParamFlags::empty(),
        )?;
        store.register(
            "MIS_OPTIONS",
            ParamValue::Int(DEFAULT_OPTIONS),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load mission parameters from the store, falling back to defaults
    ///
    /// Unknown option bits are dropped.
    pub fn from_store(store: &ParameterStore) -> Self {
        let restart = match store.get("MIS_RESTART") {
            Some(v) => v.as_i32() != 0,
            None => DEFAULT_RESTART != 0,
        };

        let options = match store.get("MIS_OPTIONS") {
            Some(v) => MissionOptions::from_bits_truncate(v.as_i32().clamp(0, 0xFFFF) as u16),
            None => MissionOptions::empty(),
        };

        Self { restart, options }
    }

    /// Publish the stored command count to `MIS_TOTAL`
    pub fn publish_total(store: &mut ParameterStore, total: u16) -> Result<(), ParameterError> {
        store.set_internal("MIS_TOTAL", ParamValue::Int(i32::from(total)))
    }

    /// Validate mission parameters
    pub fn is_valid(&self) -> bool {
        MissionOptions::all().contains(self.options)
    }
}
