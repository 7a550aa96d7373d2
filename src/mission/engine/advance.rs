//! Command search and NAV/DO advancement

use super::*;
use crate::mission::content::JUMP_REPEAT_FOREVER;
use crate::mission::jump::MAX_JUMP_SEARCH;

/// Commands examined in one navigation advance before giving up
const MAX_ADVANCE_LOOPS: u16 = 255;

/// How a command search treats jump counters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchMode {
    /// Look ahead without touching jump counters
    Peek,
    /// Follow and count jumps, queueing `JumpExecuted`
    Count,
    /// Count jumps without events, on a tracker the caller restores
    Simulate,
}

impl<S, E, V, T> Mission<S, E, V, T>
where
    S: StorageAccess,
    E: MissionExecutor,
    V: VehicleState,
    T: TimeSource,
{
    /// Next non-jump command at or after `start`, following jumps.
    ///
    /// Jumps with an invalid target are skipped. A finite jump is followed
    /// while its run count is below its repeat count. Returns `None` at the
    /// end of the list, on a read failure, once `MAX_JUMP_SEARCH` jumps have
    /// been followed, or in `Peek` mode when the first jump seen comes round
    /// again.
    pub(crate) fn get_next_cmd(&mut self, start: u16, mode: SearchMode) -> Option<MissionCommand> {
        let mut index = start;
        let mut first_jump: Option<u16> = None;
        let mut jumps_followed = 0usize;

        while index < self.cmd_total {
            let cmd = match self.read_cmd_from_storage(index) {
                Ok(cmd) => cmd,
                Err(_) => {
                    log_warn!("mission command {} unreadable", index);
                    return None;
                }
            };

            let jump = match (is_jump_cmd(cmd.id), cmd.jump_content()) {
                (true, Some(jump)) => *jump,
                _ => return Some(cmd),
            };

            let target = if cmd.id == MAV_CMD_DO_JUMP_TAG {
                self.index_of_jump_tag(jump.target)
            } else {
                Some(jump.target)
            };
            let target = match target.filter(|&t| t != 0 && t < self.cmd_total) {
                Some(target) => target,
                None => {
                    log_warn!("jump {} target {} invalid, skipped", index, jump.target);
                    index += 1;
                    continue;
                }
            };

            if mode == SearchMode::Peek && first_jump == Some(index) {
                return None;
            }
            first_jump.get_or_insert(index);

            let forever = jump.num_times == JUMP_REPEAT_FOREVER;
            if !forever && self.jumps.times_run(index) >= jump.num_times {
                index += 1;
                continue;
            }

            jumps_followed += 1;
            if jumps_followed > MAX_JUMP_SEARCH {
                log_warn!("jump search limit reached at {}", index);
                return None;
            }

            if mode != SearchMode::Peek && !forever && !self.flags.resuming_mission {
                let times_run = self.jumps.increment(index).unwrap_or(0);
                if mode == SearchMode::Count {
                    log_debug!("jump {} to {}, run {}", index, target, times_run);
                    self.push_event(MissionEvent::JumpExecuted { index, times_run });
                }
            } else if mode == SearchMode::Count {
                let times_run = self.jumps.times_run(index);
                self.push_event(MissionEvent::JumpExecuted { index, times_run });
            }

            index = target;
        }

        None
    }

    /// Next navigation command at or after `start`, without counting jumps
    ///
    /// Gives up after passing over as many do commands as the list holds.
    pub fn get_next_nav_cmd(&mut self, start: u16) -> Option<MissionCommand> {
        let mut index = start;
        for _ in 0..self.cmd_total {
            let cmd = self.get_next_cmd(index, SearchMode::Peek)?;
            if cmd.is_nav() {
                return Some(cmd);
            }
            index = cmd.index.saturating_add(1);
        }
        None
    }

    /// Load and start the next navigation command.
    ///
    /// Searches from `starting_index`, or from just past the current
    /// navigation command. The first do command found on the way is loaded
    /// and started as well. Returns `false` if no navigation command remains
    /// or none could be started within `MAX_ADVANCE_LOOPS` commands.
    pub(crate) fn advance_current_nav_cmd(&mut self, starting_index: Option<u16>) -> bool {
        if self.state != MissionState::Running || self.flags.nav_cmd_loaded {
            return false;
        }

        self.do_cmd = MissionCommand::none();
        self.flags.do_cmd_loaded = false;
        self.flags.do_cmd_all_done = false;

        let mut index = match starting_index {
            Some(index) => index,
            None if self.nav_cmd.is_none() => FIRST_REAL_COMMAND,
            None => self.nav_cmd.index.saturating_add(1),
        };
        let mut loops_left = MAX_ADVANCE_LOOPS;

        while !self.flags.nav_cmd_loaded {
            if loops_left == 0 {
                log_warn!("no navigation command started before {}", index);
                return false;
            }
            loops_left -= 1;

            let Some(cmd) = self.get_next_cmd(index, SearchMode::Count) else {
                return false;
            };

            if cmd.is_nav() {
                self.prev_nav_cmd_id = self.nav_cmd.id;
                self.prev_nav_cmd_index = self.nav_cmd.index;
                if self.nav_cmd.target_location().is_some() {
                    self.prev_nav_cmd_wp_index = self.nav_cmd.index;
                }

                self.nav_cmd = cmd;
                self.jump_tag.tick();
                if self.start_command(&cmd) {
                    self.flags.nav_cmd_loaded = true;
                    self.record_nav_loaded(&cmd);
                }
            } else if !self.flags.do_cmd_loaded {
                self.do_cmd = cmd;
                self.flags.do_cmd_loaded = self.start_command(&cmd);
            }

            index = cmd.index.saturating_add(1);
        }

        if !self.flags.do_cmd_loaded {
            self.flags.do_cmd_all_done = true;
        }
        true
    }

    /// History and resume bookkeeping for a newly loaded navigation command
    fn record_nav_loaded(&mut self, cmd: &MissionCommand) {
        if self.repeat_dist > 0 && !self.flags.resuming_mission && cmd.target_location().is_some() {
            self.history.push(cmd.index);
        }

        if self.flags.resuming_mission && self.history.interrupted() == Some(cmd.index) {
            log_info!("mission returned to interrupted waypoint {}", cmd.index);
            self.flags.resuming_mission = false;
            self.resume_cmd = MissionCommand::none();
            self.push_event(MissionEvent::ReturnedToInterruptedWp(cmd.index));
        }

        self.push_event(MissionEvent::CurrentChanged(cmd.index));
    }

    /// Load and start the next do command before the next navigation command
    pub(crate) fn advance_current_do_cmd(&mut self) {
        if self.state != MissionState::Running || self.flags.do_cmd_all_done {
            return;
        }

        let start = if self.do_cmd.is_none() {
            FIRST_REAL_COMMAND
        } else {
            self.do_cmd.index.saturating_add(1)
        };

        let cmd = match self.get_next_cmd(start, SearchMode::Peek) {
            Some(cmd) if !cmd.is_nav() => cmd,
            _ => {
                self.flags.do_cmd_all_done = true;
                return;
            }
        };

        self.do_cmd = cmd;
        self.flags.do_cmd_loaded = self.start_command(&cmd);
    }

    /// Make `index` the current command.
    ///
    /// While running the command at `index` (or the first navigation command
    /// after it) is started immediately. Otherwise the slots are loaded
    /// without starting anything and the state becomes Stopped, so that
    /// `resume` continues from `index`. Index 0, or a completed mission,
    /// also resets the jump counters.
    ///
    /// # Errors
    ///
    /// `NotFound` for an index past the end or a list holding only home;
    /// `NoMission` if no navigation command follows `index`.
    pub fn set_current_cmd(&mut self, index: u16) -> Result<()> {
        if index >= self.cmd_total || self.cmd_total == 1 {
            return Err(MissionError::NotFound);
        }

        let landing_start = self
            .read_cmd_from_storage(index)
            .map_or(false, |cmd| cmd.id == MAV_CMD_DO_LAND_START);
        if !landing_start {
            self.flags.in_landing_sequence = false;
        }

        self.reset_wp_history();

        self.do_cmd = MissionCommand::none();
        self.flags.do_cmd_loaded = false;
        self.flags.do_cmd_all_done = false;
        self.flags.nav_cmd_loaded = false;

        let mut index = index;
        if index == 0 || self.state == MissionState::Complete {
            self.prev_nav_cmd_id = CMD_ID_NONE;
            self.prev_nav_cmd_index = CMD_INDEX_NONE;
            self.prev_nav_cmd_wp_index = CMD_INDEX_NONE;
            self.jumps.reset_all();
            index = index.max(FIRST_REAL_COMMAND);
        }

        if self.state != MissionState::Running {
            let mut loops_left = MAX_ADVANCE_LOOPS;
            while !self.flags.nav_cmd_loaded {
                let next = match loops_left.checked_sub(1) {
                    Some(left) => {
                        loops_left = left;
                        self.get_next_cmd(index, SearchMode::Count)
                    }
                    None => None,
                };
                let Some(cmd) = next else {
                    self.nav_cmd = MissionCommand::none();
                    return Err(MissionError::NoMission);
                };

                if cmd.is_nav() {
                    self.nav_cmd = cmd;
                    self.flags.nav_cmd_loaded = true;
                } else if !self.flags.do_cmd_loaded {
                    self.do_cmd = cmd;
                    self.flags.do_cmd_loaded = true;
                }
                index = cmd.index.saturating_add(1);
            }

            if !self.flags.do_cmd_loaded {
                self.flags.do_cmd_all_done = true;
            }
            self.state = MissionState::Stopped;
            return Ok(());
        }

        if !self.advance_current_nav_cmd(Some(index)) {
            self.complete();
            return Err(MissionError::NoMission);
        }
        Ok(())
    }

    /// Start the current navigation command again.
    pub fn restart_current_nav_cmd(&mut self) -> Result<()> {
        if self.state != MissionState::Running {
            return Err(MissionError::NoMission);
        }
        let index = self.current_nav_index();
        if index == 0 || index >= self.cmd_total {
            return Err(MissionError::NotFound);
        }
        self.set_current_cmd(index)
    }

    /// Bearing (centidegrees) from the current navigation target to the next
    ///
    /// `default_angle` when either has no location. A following
    /// SET_YAW_SPEED reports its own heading.
    pub fn next_ground_course_cd(&mut self, default_angle: i32) -> i32 {
        let start = if self.nav_cmd.is_none() {
            FIRST_REAL_COMMAND
        } else {
            self.nav_cmd.index.saturating_add(1)
        };
        let Some(next) = self.get_next_nav_cmd(start) else {
            return default_angle;
        };

        if let CommandContent::SetYawSpeed(yaw) = &next.content {
            return (yaw.angle_deg * 100.0) as i32;
        }

        match (self.nav_cmd.target_location(), next.target_location()) {
            (Some(from), Some(to)) => from.bearing_cd_to(to),
            _ => default_angle,
        }
    }

    /// Does the mission (from where it would continue) start with a takeoff
    ///
    /// Looks at up to 16 navigation commands, passing over NAV_DELAY.
    pub fn starts_with_takeoff_cmd(&mut self) -> bool {
        const MAX_CHECKED: usize = 16;

        let mut index = if self.params.restart || self.nav_cmd.is_none() {
            FIRST_REAL_COMMAND
        } else {
            self.nav_cmd.index
        };

        for _ in 0..MAX_CHECKED {
            let Some(cmd) = self.get_next_nav_cmd(index) else {
                return false;
            };
            if is_takeoff_type_cmd(cmd.id) {
                return true;
            }
            if cmd.id != MAV_CMD_NAV_DELAY {
                return false;
            }
            index = cmd.index.saturating_add(1);
        }
        false
    }

    /// A takeoff follows the current command before any other navigation
    pub fn continue_after_land_check_for_takeoff(&self) -> bool {
        let start = self.nav_cmd.index.saturating_add(1);
        for index in start..self.cmd_total {
            let Ok(cmd) = self.read_cmd_from_storage(index) else {
                continue;
            };
            if is_takeoff_type_cmd(cmd.id) {
                return true;
            }
            if cmd.is_nav() {
                return false;
            }
        }
        false
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// Index of the first JUMP_TAG carrying `tag`
    pub fn index_of_jump_tag(&self, tag: u16) -> Option<u16> {
        (FIRST_REAL_COMMAND..self.cmd_total).find(|&index| {
            self.read_cmd_from_storage(index).map_or(false, |cmd| {
                cmd.id == MAV_CMD_JUMP_TAG && cmd.jump_content().map(|j| j.target) == Some(tag)
            })
        })
    }

    /// Continue the mission from the JUMP_TAG carrying `tag`
    pub fn jump_to_tag(&mut self, tag: u16) -> Result<()> {
        let index = self
            .index_of_jump_tag(tag)
            .ok_or(MissionError::InvalidTarget)?;
        self.set_current_cmd(index)
    }

    /// Most recently reached tag and its age
    pub fn last_jump_tag(&self) -> Option<(u16, u16)> {
        self.jump_tag.last()
    }

    /// Times the jump at `index` has been followed
    pub fn jump_times_run(&self, index: u16) -> i16 {
        self.jumps.times_run(index)
    }
}
