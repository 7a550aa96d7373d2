//! Waypoint history and rewind on resume
//!
//! With a resume repeat distance set (DO_SET_RESUME_REPEAT_DIST), the engine
//! records every located navigation command it loads. When a stopped
//! mission resumes it first flies to a virtual waypoint placed that far back
//! along the recorded path, then continues through the passed waypoints to
//! the one it was interrupted on.

use super::*;
use crate::mission::history::LAST_WP_PASSED;

impl<S, E, V, T> Mission<S, E, V, T>
where
    S: StorageAccess,
    E: MissionExecutor,
    V: VehicleState,
    T: TimeSource,
{
    /// Flying back to the interrupted waypoint
    pub fn is_resume(&self) -> bool {
        self.flags.resuming_mission
    }

    pub fn wp_history(&self) -> &WpHistory {
        &self.history
    }

    /// Current resume repeat distance (m)
    pub fn repeat_dist(&self) -> u16 {
        self.repeat_dist
    }

    /// Forget the recorded path and any pending rewind
    pub(crate) fn reset_wp_history(&mut self) {
        self.history.reset();
        self.resume_cmd = MissionCommand::none();
        self.flags.resuming_mission = false;
        self.repeat_dist = 0;
    }

    /// Remember where the vehicle was, unless already flying back
    pub(crate) fn update_exit_position(&mut self) {
        if !self.flags.resuming_mission {
            self.exit_position = self.vehicle.current_location().unwrap_or_default();
        }
    }

    /// Start flying back along the recorded path.
    ///
    /// Returns `false` if there is nothing to rewind to, leaving the
    /// ordinary resume to restart the current command.
    pub(crate) fn rewind_on_resume(&mut self) -> bool {
        if self.repeat_dist == 0 || self.history.get(LAST_WP_PASSED).is_none() {
            return false;
        }

        // a rewind already in progress is flown again as computed
        if !self.flags.resuming_mission {
            if let Some(cmd) = self.calc_rewind_pos() {
                self.resume_cmd = cmd;
            }
        }

        let cmd = self.resume_cmd;
        if cmd.is_none() || !self.start_command(&cmd) {
            return false;
        }

        self.nav_cmd = cmd;
        self.flags.nav_cmd_loaded = true;
        self.flags.resuming_mission = true;
        log_info!("mission rewinding to {}", cmd.index);
        true
    }

    /// Virtual waypoint `repeat_dist` metres back along the recorded path.
    ///
    /// The path runs from the exit position back through the passed
    /// waypoints, newest first. The returned command is the passed waypoint
    /// ending the leg the point lies on, with its horizontal position moved
    /// onto the leg. If the history is shorter than the distance the oldest
    /// recorded waypoint is returned unchanged.
    pub fn calc_rewind_pos(&self) -> Option<MissionCommand> {
        self.history.get(LAST_WP_PASSED)?;
        if self.exit_position.is_zero() {
            return None;
        }

        let mut remaining = f32::from(self.repeat_dist);
        let mut prev = self.exit_position;
        let mut oldest = None;

        for slot in (0..=LAST_WP_PASSED).rev() {
            let Some(index) = self.history.get(slot) else {
                break;
            };
            let mut cmd = self.read_cmd_from_storage(index).ok()?;
            let target = *cmd.location()?;

            let leg = prev.distance_to(&target);
            if remaining < leg {
                let t = remaining / leg;
                let mut point = target.interpolate_to(&prev, 1.0 - t);
                point.alt = target.alt;
                cmd.content = CommandContent::Location(point);
                return Some(cmd);
            }

            remaining -= leg;
            prev = target;
            oldest = Some(cmd);
        }

        oldest
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::*;
    use crate::mission::history::INTERRUPTED_WP;

    /// `metres` north of home
    fn north(metres: i32) -> Location {
        Location::new(HOME.lat + metres * 90, HOME.lng, HOME.alt)
    }

    fn repeat(metres: u16) -> MissionCommand {
        MissionCommand::new(MAV_CMD_DO_SET_RESUME_REPEAT_DIST, CommandContent::Empty)
            .with_p1(metres)
    }

    /// Stopped 250 m north while flying to index 4
    fn interrupted_mission(repeat_m: u16) -> TestMission {
        run_to_interrupt(repeat_m, Some(north(250)))
    }

    /// Repeat distance then waypoints at 100, 200, 300 and 400 m north,
    /// stopped at `exit` while flying to index 4
    fn run_to_interrupt(repeat_m: u16, exit: Option<Location>) -> TestMission {
        let mut mission = mission_with(&[
            repeat(repeat_m),
            wp(north(100)),
            wp(north(200)),
            wp(north(300)),
            wp(north(400)),
        ]);
        mission.executor_mut().set_verify_true(2);
        mission.executor_mut().set_verify_true(3);

        mission.start();
        mission.update();
        mission.update();
        assert_eq!(mission.current_nav_index(), 4);

        mission.vehicle_mut().location = exit;
        mission.update();
        mission.stop();
        mission
    }

    // ========================================================================
    // History
    // ========================================================================

    #[test]
    fn test_history_records_located_nav() {
        let mission = interrupted_mission(120);
        let history = mission.wp_history();
        assert_eq!(history.get(LAST_WP_PASSED), Some(3));
        assert_eq!(history.get(INTERRUPTED_WP), Some(4));
        assert_eq!(history.get(LAST_WP_PASSED - 1), Some(2));
        assert_eq!(history.get(LAST_WP_PASSED - 2), None);
        assert_eq!(mission.repeat_dist(), 120);
    }

    #[test]
    fn test_history_not_recorded_without_repeat_dist() {
        let mut mission = mission_with(&[wp(A), wp(B)]);
        mission.executor_mut().set_verify_true(1);
        mission.start();
        mission.update();
        assert_eq!(mission.wp_history().get(INTERRUPTED_WP), None);
    }

    #[test]
    fn test_start_clears_history() {
        let mut mission = interrupted_mission(120);
        mission.start();
        assert_eq!(mission.repeat_dist(), 120);
        assert_eq!(mission.wp_history().get(INTERRUPTED_WP), Some(2));
        assert_eq!(mission.wp_history().get(LAST_WP_PASSED), None);
    }

    // ========================================================================
    // Rewind position
    // ========================================================================

    #[test]
    fn test_rewind_point_on_leg() {
        let mission = interrupted_mission(120);
        let cmd = mission.calc_rewind_pos().unwrap();

        // 50 m back to index 3, then 70 m along the leg toward index 2
        assert_eq!(cmd.index, 2);
        let point = cmd.location().unwrap();
        let expected = north(130);
        assert!((point.lat - expected.lat).abs() < 100, "lat {}", point.lat);
        assert_eq!(point.lng, HOME.lng);
        assert_eq!(point.alt, HOME.alt);
    }

    #[test]
    fn test_rewind_beyond_history_uses_oldest() {
        let mission = interrupted_mission(1000);
        let cmd = mission.calc_rewind_pos().unwrap();
        assert_eq!(cmd.index, 2);
        assert_eq!(cmd.location(), Some(&north(100)));
    }

    #[test]
    fn test_rewind_needs_exit_position() {
        let mut mission = run_to_interrupt(120, None);
        assert_eq!(mission.calc_rewind_pos(), None);

        mission.resume();
        assert!(!mission.is_resume());
        assert_eq!(mission.current_nav_index(), 4);
    }

    // ========================================================================
    // Resume
    // ========================================================================

    #[test]
    fn test_resume_flies_back_then_returns() {
        let mut mission = interrupted_mission(120);
        mission.resume();
        assert!(mission.is_resume());
        assert_eq!(mission.current_nav_index(), 2);
        let point = *mission.current_nav_cmd().location().unwrap();
        assert!((point.lat - north(130).lat).abs() < 100);

        // history is frozen while flying back
        let before = *mission.wp_history();
        mission.update();
        assert_eq!(mission.current_nav_index(), 3);
        assert!(mission.is_resume());
        assert_eq!(*mission.wp_history(), before);

        drain_events(&mut mission);
        mission.update();
        assert_eq!(mission.current_nav_index(), 4);
        assert!(!mission.is_resume());
        assert!(drain_events(&mut mission).contains(&MissionEvent::ReturnedToInterruptedWp(4)));
    }

    #[test]
    fn test_exit_position_frozen_while_resuming() {
        let mut mission = interrupted_mission(120);
        mission.resume();
        mission.vehicle_mut().location = Some(north(10));
        mission.update();
        mission.stop();

        // rewind is flown again as computed from the first exit
        mission.resume();
        assert!(mission.is_resume());
        assert_eq!(mission.current_nav_index(), 2);
        let point = *mission.current_nav_cmd().location().unwrap();
        assert!((point.lat - north(130).lat).abs() < 100);
    }

    #[test]
    fn test_resume_without_repeat_dist_restarts_current() {
        let mut mission = mission_with(&[wp(A), wp(B)]);
        mission.start();
        mission.stop();
        mission.resume();
        assert!(!mission.is_resume());
        assert_eq!(mission.current_nav_index(), 1);
        assert_eq!(mission.executor().start_count(1), 2);
    }

    #[test]
    fn test_set_current_cmd_cancels_rewind() {
        let mut mission = interrupted_mission(120);
        mission.resume();
        assert!(mission.is_resume());
        mission.set_current_cmd(5).unwrap();
        assert!(!mission.is_resume());
        assert_eq!(mission.repeat_dist(), 0);
    }
}
