//! Mission Executor Trait and Event Types
//!
//! Defines the contract between the mission engine and the vehicle code that
//! physically executes commands. The engine owns the collaborators for its
//! whole lifetime; there is no global callback state.
//!
//! - [`MissionExecutor`]: start / verify / complete callbacks
//! - [`VehicleState`]: home, position and arming state read by the engine
//! - [`MissionEvent`]: notifications queued for the telemetry layer

use super::content::MissionCommand;
use crate::navigation::Location;

/// Events queued by the engine for telemetry coordination.
///
/// The firmware layer converts these into protocol messages:
/// - `CurrentChanged` -> MISSION_CURRENT
/// - `CommandStarted` -> MISSION_ITEM_REACHED bookkeeping / logging
/// - `MissionComplete` -> status text
/// - `MissionCleared` -> MISSION_ACK
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionEvent {
    /// Current navigation command changed (index)
    CurrentChanged(u16),
    /// A command was handed to the executor (index)
    CommandStarted(u16),
    /// A jump was followed
    JumpExecuted {
        /// Index of the jump command
        index: u16,
        /// Runs recorded after following it (0 if untracked)
        times_run: i16,
    },
    /// No further navigation command
    MissionComplete,
    /// Stored mission was cleared
    MissionCleared,
    /// A resumed mission reached the waypoint it was interrupted on
    ReturnedToInterruptedWp(u16),
}

/// Command execution contract between engine and vehicle mode.
///
/// - `start_command` is called exactly once each time a command is loaded
/// - `verify_command` is polled every update while the command is loaded
/// - `on_mission_complete` is called when no navigation command remains
pub trait MissionExecutor {
    /// Begin executing a mission command.
    ///
    /// Returns `false` if the vehicle cannot run the command. A rejected
    /// navigation command is skipped and the search moves on to the next
    /// one; a rejected do command is dropped.
    fn start_command(&mut self, cmd: &MissionCommand) -> bool;

    /// Check if a command has completed.
    fn verify_command(&mut self, cmd: &MissionCommand) -> bool;

    /// Called when no more navigation commands remain.
    fn on_mission_complete(&mut self);
}

/// Vehicle state the engine reads but never modifies.
pub trait VehicleState {
    /// Home position, `None` until set
    fn home(&self) -> Option<Location>;

    /// Current position estimate, `None` without a fix
    fn current_location(&self) -> Option<Location>;

    /// Motors armed
    fn is_armed(&self) -> bool;
}
