//! Mission State Machine
//!
//! [`Mission`] owns the stored command list (through a [`StorageAccess`]
//! region), the current navigation and do commands, and the run state. The
//! vehicle mode calls [`Mission::update`] every control cycle; commands are
//! started and verified through the [`MissionExecutor`] the engine owns.
//!
//! Modeled after ArduPilot's AP_Mission dual-slot pattern:
//! - The NAV slot holds the command the vehicle is navigating to
//! - The DO slot holds the auxiliary command running alongside it
//! - DO commands are only looked for up to the next NAV command
//!
//! The engine is split by concern:
//! - `advance`: command search, jump resolution, NAV/DO advancement
//! - `landing`: landing sequence, go-around and mission leg search
//! - `resume`: waypoint history and rewind on resume
//! - `items`: ground-control item get/set

mod advance;
mod items;
mod landing;
mod resume;

#[cfg(test)]
mod test_util;

use heapless::Deque;

use super::codec;
use super::command::*;
use super::content::{
    CommandContent, MissionCommand, CMD_ID_NONE, CMD_INDEX_NONE, FIRST_REAL_COMMAND,
};
use super::error::{MissionError, Result};
use super::executor::{MissionEvent, MissionExecutor, VehicleState};
use super::history::WpHistory;
use super::jump::{JumpTag, JumpTracker};
use super::state::{MissionFlags, MissionState};
use super::MAX_MISSION_EVENTS;
use crate::core::traits::TimeSource;
use crate::navigation::Location;
use crate::parameters::{MissionOptions, MissionParams, ParameterError, ParameterStore};
use crate::platform::StorageAccess;
use crate::{log_debug, log_info, log_warn};

pub(crate) use advance::SearchMode;

/// Mission engine
///
/// Generic over its collaborators so that firmware and host tests share one
/// implementation:
/// - `S`: persistent region holding the command list
/// - `E`: vehicle-side command execution
/// - `V`: vehicle position, home and arming state
/// - `T`: millisecond clock for change stamps
pub struct Mission<S, E, V, T> {
    storage: S,
    executor: E,
    vehicle: V,
    time: T,
    params: MissionParams,

    state: MissionState,
    flags: MissionFlags,

    /// Active navigation command
    nav_cmd: MissionCommand,
    /// Active do command
    do_cmd: MissionCommand,
    prev_nav_cmd_id: u16,
    prev_nav_cmd_index: u16,
    /// Last navigation command that had a target location
    prev_nav_cmd_wp_index: u16,

    /// Commands stored, home included
    cmd_total: u16,
    /// Commands the region can hold
    cmd_max: u16,

    jumps: JumpTracker,
    jump_tag: JumpTag,

    history: WpHistory,
    /// Rewind distance on resume (m), 0 disables rewind
    repeat_dist: u16,
    /// Virtual waypoint flown to on resume
    resume_cmd: MissionCommand,
    /// Vehicle position when the mission was last updated
    exit_position: Location,
    force_resume: bool,

    last_change_time_ms: u64,
    change_count: u32,

    events: Deque<MissionEvent, MAX_MISSION_EVENTS>,
}

impl<S, E, V, T> Mission<S, E, V, T>
where
    S: StorageAccess,
    E: MissionExecutor,
    V: VehicleState,
    T: TimeSource,
{
    /// Create an engine in the Stopped state.
    ///
    /// The stored list is not read until [`init`](Self::init) is called.
    pub fn new(storage: S, executor: E, vehicle: V, time: T, params: MissionParams) -> Self {
        let cmd_max = codec::commands_max_for(storage.size());
        Self {
            storage,
            executor,
            vehicle,
            time,
            params,
            state: MissionState::Stopped,
            flags: MissionFlags::default(),
            nav_cmd: MissionCommand::none(),
            do_cmd: MissionCommand::none(),
            prev_nav_cmd_id: CMD_ID_NONE,
            prev_nav_cmd_index: CMD_INDEX_NONE,
            prev_nav_cmd_wp_index: CMD_INDEX_NONE,
            cmd_total: 0,
            cmd_max,
            jumps: JumpTracker::new(),
            jump_tag: JumpTag::default(),
            history: WpHistory::new(),
            repeat_dist: 0,
            resume_cmd: MissionCommand::none(),
            exit_position: Location::default(),
            force_resume: false,
            last_change_time_ms: 0,
            change_count: 0,
            events: Deque::new(),
        }
    }

    /// Load the stored list.
    ///
    /// A region without the version marker is reset to an empty mission; so
    /// is a stored count larger than the region can hold. Neither is an
    /// error. With `CLEAR_ON_BOOT` set the stored mission is discarded.
    pub fn init(&mut self) -> Result<()> {
        self.cmd_max = codec::commands_max_for(self.storage.size());

        let version = codec::read_version(&self.storage)?;
        if version != codec::MISSION_VERSION {
            log_warn!("mission version {} unknown, clearing", version);
            codec::write_header(&mut self.storage, 0)?;
            self.cmd_total = 0;
        } else {
            let count = codec::read_count(&self.storage)?;
            if count > self.cmd_max {
                log_warn!("mission count {} exceeds capacity {}", count, self.cmd_max);
                codec::write_count(&mut self.storage, 0)?;
                self.cmd_total = 0;
            } else {
                self.cmd_total = count;
            }
        }

        self.state = MissionState::Stopped;
        self.reset();

        if self.option_is_set(MissionOptions::CLEAR_ON_BOOT) {
            self.clear()?;
        }

        self.last_change_time_ms = self.time.now_ms();
        log_info!("mission loaded, {} commands", self.cmd_total);
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> MissionState {
        self.state
    }

    /// Commands stored, home included
    pub fn num_commands(&self) -> u16 {
        self.cmd_total
    }

    /// Commands the storage region can hold
    pub fn num_commands_max(&self) -> u16 {
        self.cmd_max
    }

    pub fn params(&self) -> &MissionParams {
        &self.params
    }

    pub fn set_params(&mut self, params: MissionParams) {
        self.params = params;
    }

    /// Reload parameters from `store` and publish `MIS_TOTAL`
    pub fn sync_params(
        &mut self,
        store: &mut ParameterStore,
    ) -> core::result::Result<(), ParameterError> {
        self.params = MissionParams::from_store(store);
        MissionParams::publish_total(store, self.cmd_total)
    }

    pub fn option_is_set(&self, option: MissionOptions) -> bool {
        self.params.options.contains(option)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Direct access to the region; changes bypass the engine's count
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn vehicle(&self) -> &V {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut V {
        &mut self.vehicle
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    /// Tear down the engine, returning its collaborators
    pub fn into_parts(self) -> (S, E, V, T) {
        (self.storage, self.executor, self.vehicle, self.time)
    }

    /// Time of the last list change (ms)
    pub fn last_change_time_ms(&self) -> u64 {
        self.last_change_time_ms
    }

    /// Number of list changes since boot
    pub fn change_count(&self) -> u32 {
        self.change_count
    }

    /// Take the oldest queued event
    pub fn poll_event(&mut self) -> Option<MissionEvent> {
        self.events.pop_front()
    }

    // ========================================================================
    // Current command queries
    // ========================================================================

    /// Active navigation command (`index` is `CMD_INDEX_NONE` if none)
    pub fn current_nav_cmd(&self) -> &MissionCommand {
        &self.nav_cmd
    }

    /// Index of the active navigation command, 0 if none
    pub fn current_nav_index(&self) -> u16 {
        if self.nav_cmd.is_none() {
            0
        } else {
            self.nav_cmd.index
        }
    }

    /// Id of the active navigation command, `CMD_ID_NONE` if none
    pub fn current_nav_id(&self) -> u16 {
        if self.nav_cmd.is_none() {
            CMD_ID_NONE
        } else {
            self.nav_cmd.id
        }
    }

    pub fn prev_nav_cmd_id(&self) -> u16 {
        self.prev_nav_cmd_id
    }

    /// Index of the previous navigation command
    pub fn prev_nav_cmd_index(&self) -> Option<u16> {
        Some(self.prev_nav_cmd_index).filter(|&i| i != CMD_INDEX_NONE)
    }

    /// Index of the previous navigation command that had a location
    pub fn prev_nav_cmd_with_wp_index(&self) -> Option<u16> {
        Some(self.prev_nav_cmd_wp_index).filter(|&i| i != CMD_INDEX_NONE)
    }

    /// Active do command (`index` is `CMD_INDEX_NONE` if none)
    pub fn current_do_cmd(&self) -> &MissionCommand {
        &self.do_cmd
    }

    pub fn is_valid_index(&self, index: u16) -> bool {
        index < self.cmd_total
    }

    pub fn in_landing_sequence(&self) -> bool {
        self.flags.in_landing_sequence
    }

    pub fn set_in_landing_sequence(&mut self, in_landing_sequence: bool) {
        self.flags.in_landing_sequence = in_landing_sequence;
    }

    pub fn in_return_path(&self) -> bool {
        self.flags.in_return_path
    }

    /// Keep running after a landing when a takeoff follows
    pub fn continue_after_land(&self) -> bool {
        self.option_is_set(MissionOptions::CONTINUE_AFTER_LAND)
    }

    /// Any stored command with `id`
    pub fn contains_item(&self, id: u16) -> bool {
        (FIRST_REAL_COMMAND..self.cmd_total).any(|i| {
            self.read_cmd_from_storage(i)
                .map_or(false, |cmd| cmd.id == id)
        })
    }

    /// Any stored location above terrain
    pub fn contains_terrain_alt_items(&self) -> bool {
        (FIRST_REAL_COMMAND..self.cmd_total).any(|i| {
            self.read_cmd_from_storage(i).map_or(false, |cmd| {
                cmd.location().map_or(false, |loc| loc.terrain_alt())
            })
        })
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Run the mission from the first command.
    pub fn start(&mut self) {
        self.state = MissionState::Running;
        self.reset();

        if !self.advance_current_nav_cmd(None) {
            self.complete();
        }
    }

    /// Stop running; the current command is kept for resume.
    pub fn stop(&mut self) {
        self.state = MissionState::Stopped;
    }

    /// Continue from the current command.
    ///
    /// A completed mission restarts. With a resume repeat distance set the
    /// vehicle first flies back along the passed waypoints.
    pub fn resume(&mut self) {
        if self.state == MissionState::Complete {
            self.start();
            return;
        }

        if self.state == MissionState::Stopped {
            self.state = MissionState::Running;
            if self.nav_cmd.is_none() {
                self.start();
                return;
            }
        }

        // the stored command may have changed while stopped
        match self.read_cmd_from_storage(self.nav_cmd.index) {
            Ok(cmd) => self.nav_cmd = cmd,
            Err(_) => {
                log_warn!("mission command {} gone, restarting", self.nav_cmd.index);
                self.start();
                return;
            }
        }

        if self.rewind_on_resume() {
            return;
        }

        // restarting the active command runs its start callback again so the
        // vehicle picks its target back up
        let restart_index = if self.flags.do_cmd_loaded && !self.do_cmd.is_none() {
            Some(self.do_cmd.index)
        } else if self.flags.nav_cmd_loaded {
            Some(self.nav_cmd.index)
        } else {
            None
        };
        if let Some(index) = restart_index {
            if self.set_current_cmd(index).is_err() {
                log_warn!("mission resume at {} failed", index);
            }
        }
    }

    /// Start or resume depending on `MIS_RESTART` and the force-resume flag.
    pub fn start_or_resume(&mut self) {
        if self.params.restart && !self.force_resume {
            self.start();
        } else {
            self.resume();
        }
        self.force_resume = false;
    }

    /// Resume on the next `start_or_resume` regardless of `MIS_RESTART`
    pub fn set_force_resume(&mut self, force_resume: bool) {
        self.force_resume = force_resume;
    }

    /// Rewind to the first command without changing the run state.
    pub fn reset(&mut self) {
        self.flags.nav_cmd_loaded = false;
        self.flags.do_cmd_loaded = false;
        self.flags.do_cmd_all_done = false;
        self.flags.in_landing_sequence = false;
        self.flags.in_return_path = false;
        self.nav_cmd = MissionCommand::none();
        self.do_cmd = MissionCommand::none();
        self.prev_nav_cmd_id = CMD_ID_NONE;
        self.prev_nav_cmd_index = CMD_INDEX_NONE;
        self.prev_nav_cmd_wp_index = CMD_INDEX_NONE;
        self.jumps.reset_all();
        self.reset_wp_history();
        self.jump_tag.reset();
    }

    /// Remove every stored command.
    ///
    /// # Errors
    ///
    /// `Armed` while running on an armed vehicle; storage errors.
    pub fn clear(&mut self) -> Result<()> {
        if self.state == MissionState::Running && self.vehicle.is_armed() {
            return Err(MissionError::Armed);
        }

        if self.cmd_total > 0 {
            codec::write_count(&mut self.storage, 0)?;
            self.cmd_total = 0;
        }

        self.nav_cmd = MissionCommand::none();
        self.do_cmd = MissionCommand::none();
        self.flags.nav_cmd_loaded = false;
        self.flags.do_cmd_loaded = false;
        self.jumps.reset_all();
        self.reset_wp_history();
        self.stamp_change();
        self.push_event(MissionEvent::MissionCleared);
        log_info!("mission cleared");
        Ok(())
    }

    /// Drop every command at or after `index`.
    pub fn truncate(&mut self, index: u16) -> Result<()> {
        if self.cmd_total > index {
            codec::write_count(&mut self.storage, index)?;
            self.cmd_total = index;
            self.stamp_change();
        }
        Ok(())
    }

    // ========================================================================
    // Stored list
    // ========================================================================

    /// Append `cmd`, returning its index.
    ///
    /// An empty list gets home written first, so the first appended command
    /// lands at index 1.
    pub fn add_cmd(&mut self, cmd: &MissionCommand) -> Result<u16> {
        if self.cmd_total == 0 {
            self.write_home_to_storage()?;
        }
        if self.cmd_total >= self.cmd_max {
            return Err(MissionError::Full);
        }

        let index = self.cmd_total;
        self.write_cmd_to_storage(index, cmd)?;
        codec::write_count(&mut self.storage, index + 1)?;
        self.cmd_total = index + 1;
        Ok(index)
    }

    /// Overwrite the stored command at `index`.
    pub fn replace_cmd(&mut self, index: u16, cmd: &MissionCommand) -> Result<()> {
        if index >= self.cmd_total {
            return Err(MissionError::NotFound);
        }
        self.write_cmd_to_storage(index, cmd)
    }

    /// Persist home as record 0.
    ///
    /// Uses the vehicle's home, or a zero location until home is known.
    /// Writing home again leaves the list unchanged.
    pub fn write_home_to_storage(&mut self) -> Result<()> {
        let home = self.vehicle.home().unwrap_or_default();
        let cmd = MissionCommand::waypoint(home);
        self.write_cmd_to_storage(0, &cmd)?;

        if self.cmd_total == 0 {
            codec::write_count(&mut self.storage, 1)?;
            self.cmd_total = 1;
        }
        Ok(())
    }

    /// Read the command at `index`.
    ///
    /// Index 0 is synthesized from the vehicle's home and never read back.
    pub fn read_cmd_from_storage(&self, index: u16) -> Result<MissionCommand> {
        if index >= self.cmd_total {
            return Err(MissionError::NotFound);
        }

        if index == 0 {
            let mut home = MissionCommand::waypoint(self.vehicle.home().unwrap_or_default());
            home.index = 0;
            return Ok(home);
        }

        codec::read_record(&self.storage, index)
    }

    /// Encode and write `cmd` at `index` without touching the count.
    pub fn write_cmd_to_storage(&mut self, index: u16, cmd: &MissionCommand) -> Result<()> {
        if index >= self.cmd_max {
            return Err(MissionError::Full);
        }
        codec::write_record(&mut self.storage, index, cmd)?;
        self.stamp_change();
        Ok(())
    }

    fn stamp_change(&mut self) {
        self.last_change_time_ms = self.time.now_ms();
        self.change_count = self.change_count.wrapping_add(1);
    }

    // ========================================================================
    // Update cycle
    // ========================================================================

    /// Advance the mission. Call once per control cycle.
    pub fn update(&mut self) {
        if self.state != MissionState::Running || self.cmd_total == 0 {
            return;
        }

        self.update_exit_position();

        if !self.flags.nav_cmd_loaded || self.nav_cmd.is_none() {
            if !self.advance_current_nav_cmd(None) {
                self.complete();
                return;
            }
        } else {
            let nav = self.nav_cmd;
            if self.verify_command(&nav) {
                self.flags.nav_cmd_loaded = false;
                if !self.advance_current_nav_cmd(None) {
                    self.complete();
                    return;
                }
            }
        }

        if !self.flags.do_cmd_loaded {
            self.advance_current_do_cmd();
        } else {
            let do_cmd = self.do_cmd;
            if self.verify_command(&do_cmd) {
                self.flags.do_cmd_loaded = false;
            }
        }
    }

    /// No navigation command remains
    fn complete(&mut self) {
        self.state = MissionState::Complete;
        self.flags.in_landing_sequence = false;
        self.executor.on_mission_complete();
        self.push_event(MissionEvent::MissionComplete);
        log_info!("mission complete");
    }

    /// Start a command, handling engine-internal commands directly.
    fn start_command(&mut self, cmd: &MissionCommand) -> bool {
        if is_landing_type_cmd(cmd.id) || cmd.id == MAV_CMD_DO_LAND_START {
            self.flags.in_landing_sequence = true;
        } else if is_takeoff_type_cmd(cmd.id) {
            self.flags.in_landing_sequence = false;
        }
        if cmd.id == MAV_CMD_DO_RETURN_PATH_START {
            self.flags.in_return_path = true;
        }

        log_debug!("mission: {} {}", cmd.index, cmd.name());
        self.push_event(MissionEvent::CommandStarted(cmd.index));

        match (cmd.id, &cmd.content) {
            (MAV_CMD_DO_SET_RESUME_REPEAT_DIST, _) => {
                self.repeat_dist = cmd.p1;
                true
            }
            (MAV_CMD_JUMP_TAG, CommandContent::Jump(jump)) => {
                self.jump_tag.reached(jump.target);
                true
            }
            _ => self.executor.start_command(cmd),
        }
    }

    fn verify_command(&mut self, cmd: &MissionCommand) -> bool {
        match cmd.id {
            MAV_CMD_DO_SET_RESUME_REPEAT_DIST | MAV_CMD_JUMP_TAG => true,
            _ => self.executor.verify_command(cmd),
        }
    }

    /// Queue an event, dropping the oldest when full
    fn push_event(&mut self, event: MissionEvent) {
        if self.events.is_full() {
            let _ = self.events.pop_front();
        }
        let _ = self.events.push_back(event);
    }
}
