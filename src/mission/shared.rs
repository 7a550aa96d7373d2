//! Mission engine shared between tasks
//!
//! The control loop calls `update` while the ground-control handler reads and
//! writes items. [`SharedMission`] serializes both through one critical
//! section so neither observes a half-applied change.
//!
//! ```ignore
//! static MISSION: StaticCell<SharedMission<Flash, Rover, Vehicle, Clock>> = ...;
//!
//! // control loop
//! mission.update();
//!
//! // ground-control handler
//! let ack = mission.set_item(seq, &item);
//! ```

use super::engine::Mission;
use super::executor::{MissionExecutor, VehicleState};
use super::state::MissionState;
use super::wire::{MissionItemInt, MissionResult};
use crate::core::traits::{EmbassyState, SharedState, TimeSource};
use crate::platform::StorageAccess;

/// Critical-section guarded [`Mission`]
pub struct SharedMission<S, E, V, T> {
    inner: EmbassyState<Mission<S, E, V, T>>,
}

impl<S, E, V, T> SharedMission<S, E, V, T>
where
    S: StorageAccess,
    E: MissionExecutor,
    V: VehicleState,
    T: TimeSource,
{
    pub const fn new(mission: Mission<S, E, V, T>) -> Self {
        Self {
            inner: EmbassyState::new(mission),
        }
    }

    /// Run `f` with shared access to the engine
    pub fn read<R>(&self, f: impl FnOnce(&Mission<S, E, V, T>) -> R) -> R {
        self.inner.with(f)
    }

    /// Run `f` with exclusive access to the engine
    pub fn lock<R>(&self, f: impl FnOnce(&mut Mission<S, E, V, T>) -> R) -> R {
        self.inner.with_mut(f)
    }

    /// One control cycle, see [`Mission::update`]
    pub fn update(&self) {
        self.lock(|mission| mission.update());
    }

    pub fn state(&self) -> MissionState {
        self.read(|mission| mission.state())
    }

    pub fn get_item(&self, index: u16) -> Result<MissionItemInt, MissionResult> {
        self.read(|mission| mission.get_item(index))
    }

    pub fn set_item(&self, index: u16, item: &MissionItemInt) -> Result<(), MissionResult> {
        self.lock(|mission| mission.set_item(index, item))
    }

    pub fn into_inner(self) -> Mission<S, E, V, T> {
        self.inner.into_inner()
    }
}
