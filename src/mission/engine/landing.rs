//! Landing sequence, go-around and mission leg search
//!
//! Distances along the mission are measured by walking it in
//! [`SearchMode::Simulate`]: jumps are followed and counted as the vehicle
//! would, on the live tracker, which is restored afterwards.

use super::*;

/// Legs walked when measuring along the mission
const MAX_WALK_LEGS: usize = 255;

impl<S, E, V, T> Mission<S, E, V, T>
where
    S: StorageAccess,
    E: MissionExecutor,
    V: VehicleState,
    T: TimeSource,
{
    /// Steps allowed for one walk over the mission
    fn walk_limit(&self) -> usize {
        usize::from(self.cmd_total) + MAX_WALK_LEGS
    }

    /// Distance (m) flown from `from` through the mission starting at
    /// `index` until a landing.
    ///
    /// Only waypoint, spline and landing legs are measured. Any other
    /// navigation command, or a CONDITION_DELAY, makes the distance unknown.
    /// Returns `None` if no landing is reached.
    pub fn distance_to_landing(&mut self, index: u16, from: &Location) -> Option<f32> {
        let saved = self.jumps.clone();
        let distance = self.walk_to_landing(index, from);
        self.jumps = saved;
        distance
    }

    fn walk_to_landing(&mut self, index: u16, from: &Location) -> Option<f32> {
        let mut total = 0.0f32;
        let mut prev = *from;
        let mut index = index;

        for _ in 0..self.walk_limit() {
            let cmd = self.get_next_cmd(index, SearchMode::Simulate)?;
            index = cmd.index.saturating_add(1);

            let landing = is_landing_type_cmd(cmd.id);
            match cmd.id {
                MAV_CMD_NAV_WAYPOINT | MAV_CMD_NAV_SPLINE_WAYPOINT => {}
                _ if landing => {}
                MAV_CMD_CONDITION_DELAY => return None,
                _ if cmd.is_nav() => return None,
                _ => continue,
            }

            if let Some(loc) = cmd.target_location() {
                total += prev.distance_to(loc);
                prev = *loc;
            }
            if landing {
                return Some(total);
            }
        }
        None
    }

    /// Index of the DO_LAND_START to use from `from`.
    ///
    /// Nearest by straight-line distance, or by distance flown to the
    /// landing with `FAILSAFE_TO_BEST_LANDING` set. A DO_LAND_START without a
    /// location is placed at the next navigation command. Ties go to the
    /// lowest index.
    pub fn landing_sequence_start(&mut self, from: &Location) -> Option<u16> {
        let best_landing = self.option_is_set(MissionOptions::FAILSAFE_TO_BEST_LANDING);
        let mut best: Option<(u16, f32)> = None;

        for index in FIRST_REAL_COMMAND..self.cmd_total {
            let Ok(cmd) = self.read_cmd_from_storage(index) else {
                continue;
            };
            if cmd.id != MAV_CMD_DO_LAND_START {
                continue;
            }

            let distance = if best_landing {
                self.distance_to_landing(index, from)
            } else {
                let target = match cmd.target_location() {
                    Some(loc) => Some(*loc),
                    None => self
                        .get_next_nav_cmd(index)
                        .and_then(|next| next.target_location().copied()),
                };
                target.map(|loc| from.distance_to(&loc))
            };

            if let Some(distance) = distance {
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((index, distance));
                }
            }
        }

        best.map(|(index, _)| index)
    }

    /// Continue the mission from the best landing sequence.
    ///
    /// A stopped mission is resumed. Returns the DO_LAND_START index.
    pub fn jump_to_landing_sequence(&mut self, from: &Location) -> Result<u16> {
        let Some(index) = self.landing_sequence_start(from) else {
            log_warn!("no landing sequence");
            return Err(MissionError::InvalidTarget);
        };

        self.set_current_cmd(index)?;
        if self.state == MissionState::Stopped {
            self.resume();
        }
        self.flags.in_landing_sequence = true;
        log_info!("landing sequence start at {}", index);
        Ok(index)
    }

    /// Continue the mission from the nearest DO_GO_AROUND.
    pub fn jump_to_abort_landing_sequence(&mut self, from: &Location) -> Result<u16> {
        let mut best: Option<(u16, f32)> = None;
        for index in FIRST_REAL_COMMAND..self.cmd_total {
            let Ok(cmd) = self.read_cmd_from_storage(index) else {
                continue;
            };
            if cmd.id != MAV_CMD_DO_GO_AROUND {
                continue;
            }
            let distance = cmd
                .target_location()
                .map_or(f32::MAX, |loc| from.distance_to(loc));
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        let (index, _) = best.ok_or(MissionError::InvalidTarget)?;
        self.set_current_cmd(index)?;
        if self.state == MissionState::Stopped {
            self.resume();
        }
        self.flags.in_landing_sequence = false;
        log_info!("landing aborted, go around at {}", index);
        Ok(index)
    }

    /// Closest leg after the DO_RETURN_PATH_START at `start`.
    ///
    /// Walks located navigation commands until a landing or DO_LAND_START.
    /// Returns the distance to the leg and the index of the leg's end.
    fn distance_to_mission_leg(&mut self, start: u16, from: &Location) -> Option<(f32, u16)> {
        let saved = self.jumps.clone();

        let mut prev = self
            .read_cmd_from_storage(start)
            .ok()
            .and_then(|cmd| cmd.target_location().copied());
        let mut best: Option<(f32, u16)> = None;
        let mut index = start.saturating_add(1);

        for _ in 0..self.walk_limit() {
            let Some(cmd) = self.get_next_cmd(index, SearchMode::Simulate) else {
                break;
            };
            index = cmd.index.saturating_add(1);

            if cmd.id == MAV_CMD_DO_LAND_START || is_landing_type_cmd(cmd.id) {
                break;
            }
            if !cmd.is_nav() {
                continue;
            }
            let Some(loc) = cmd.target_location().copied() else {
                continue;
            };

            if let Some(leg_start) = prev {
                let distance = from.distance_to_segment(&leg_start, &loc);
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, cmd.index));
                }
            }
            prev = Some(loc);
        }

        self.jumps = saved;
        best
    }

    /// Rejoin the mission at the end of the leg closest to `from`.
    ///
    /// Only legs after a DO_RETURN_PATH_START are candidates. Returns the
    /// rejoin index.
    pub fn jump_to_closest_mission_leg(&mut self, from: &Location) -> Result<u16> {
        let mut best: Option<(f32, u16)> = None;
        for index in FIRST_REAL_COMMAND..self.cmd_total {
            let Ok(cmd) = self.read_cmd_from_storage(index) else {
                continue;
            };
            if cmd.id != MAV_CMD_DO_RETURN_PATH_START {
                continue;
            }
            if let Some((distance, rejoin)) = self.distance_to_mission_leg(index, from) {
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, rejoin));
                }
            }
        }

        let (_, rejoin) = best.ok_or(MissionError::InvalidTarget)?;
        self.set_current_cmd(rejoin)?;
        if self.state == MissionState::Stopped {
            self.resume();
        }
        self.flags.in_return_path = true;
        log_info!("mission rejoining at {}", rejoin);
        Ok(rejoin)
    }

    /// Is continuing the mission the shortest way to a landing.
    ///
    /// True when already landing. Otherwise requires
    /// `FAILSAFE_TO_BEST_LANDING` and compares the distance flown to the
    /// mission's own landing with that through the best landing sequence;
    /// when the mission is no longer, it counts as the landing sequence.
    pub fn is_best_land_sequence(&mut self, from: &Location) -> bool {
        if self.state != MissionState::Running {
            return false;
        }
        if self.flags.in_landing_sequence {
            return true;
        }
        if !self.option_is_set(MissionOptions::FAILSAFE_TO_BEST_LANDING) {
            return false;
        }

        let Some(mission_distance) = self.distance_to_landing(self.nav_cmd.index, from) else {
            return false;
        };
        let Some(land_start) = self.landing_sequence_start(from) else {
            return false;
        };
        let Some(landing_distance) = self.distance_to_landing(land_start, from) else {
            return false;
        };

        if mission_distance <= landing_distance {
            self.flags.in_landing_sequence = true;
            return true;
        }
        false
    }
}
