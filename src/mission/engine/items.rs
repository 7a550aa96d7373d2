//! Ground-control item access
//!
//! Mission upload and download go through [`Mission::get_item`] and
//! [`Mission::set_item`]; failures are reported as the protocol's
//! [`MissionResult`] codes.

use super::*;
use crate::mission::wire::{command_to_item_int, item_int_to_command, MissionItemInt, MissionResult};

impl From<MissionError> for MissionResult {
    fn from(err: MissionError) -> Self {
        match err {
            MissionError::Full => MissionResult::NoSpace,
            MissionError::NotFound => MissionResult::InvalidSequence,
            MissionError::InvalidCommand => MissionResult::Unsupported,
            MissionError::Armed => MissionResult::Denied,
            MissionError::Storage(_)
            | MissionError::Corrupt
            | MissionError::InvalidTarget
            | MissionError::NoMission => MissionResult::Error,
        }
    }
}

impl<S, E, V, T> Mission<S, E, V, T>
where
    S: StorageAccess,
    E: MissionExecutor,
    V: VehicleState,
    T: TimeSource,
{
    /// Stored command at `index` as a mission item.
    ///
    /// Index 0 is home. `current` is set on the active navigation command.
    pub fn get_item(&self, index: u16) -> core::result::Result<MissionItemInt, MissionResult> {
        if index >= self.cmd_total {
            return Err(MissionResult::InvalidSequence);
        }

        let cmd = self.read_cmd_from_storage(index)?;
        let mut item = command_to_item_int(&cmd)?;
        item.seq = index;
        item.current = u8::from(!self.nav_cmd.is_none() && self.nav_cmd.index == index);
        Ok(item)
    }

    /// Store a mission item at `index`.
    ///
    /// `index` may be one past the end to append. Setting item 0 on an
    /// empty list only writes home; home is otherwise owned by the vehicle
    /// and the item's content is ignored.
    pub fn set_item(
        &mut self,
        index: u16,
        item: &MissionItemInt,
    ) -> core::result::Result<(), MissionResult> {
        if index > self.cmd_total {
            return Err(MissionResult::InvalidSequence);
        }

        if index == 0 {
            self.write_home_to_storage()?;
            return Ok(());
        }

        let cmd = item_int_to_command(item)?;
        if index == self.cmd_total {
            self.add_cmd(&cmd)?;
        } else {
            self.replace_cmd(index, &cmd)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::*;
    use crate::mission::wire::MAV_FRAME_GLOBAL_INT;

    fn item_at(seq: u16, loc: Location) -> MissionItemInt {
        MissionItemInt {
            frame: MAV_FRAME_GLOBAL_INT,
            x: loc.lat,
            y: loc.lng,
            z: loc.alt as f32 / 100.0,
            ..MissionItemInt::waypoint(seq, 0, 0, 0.0)
        }
    }

    // ========================================================================
    // get_item
    // ========================================================================

    #[test]
    fn test_get_item_marks_current() {
        let mut mission = mission_with(&[wp(A), wp(B)]);
        mission.start();

        let first = mission.get_item(1).unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(first.command, MAV_CMD_NAV_WAYPOINT);
        assert_eq!((first.x, first.y), (A.lat, A.lng));
        assert_eq!(first.current, 1);

        assert_eq!(mission.get_item(2).unwrap().current, 0);
    }

    #[test]
    fn test_get_item_home() {
        let mission = mission_with(&[wp(A)]);
        let home = mission.get_item(0).unwrap();
        assert_eq!(home.seq, 0);
        assert_eq!((home.x, home.y), (HOME.lat, HOME.lng));
    }

    #[test]
    fn test_get_item_out_of_range() {
        let mission = mission_with(&[wp(A)]);
        assert_eq!(mission.get_item(2), Err(MissionResult::InvalidSequence));
    }

    #[test]
    fn test_get_item_storage_failure() {
        let mut mission = mission_with(&[wp(A)]);
        mission.storage_mut().set_fail_reads(true);
        assert_eq!(mission.get_item(1), Err(MissionResult::Error));
    }

    // ========================================================================
    // set_item
    // ========================================================================

    #[test]
    fn test_set_item_upload_sequence() {
        let mut mission = new_mission();
        mission.init().unwrap();

        mission.set_item(0, &item_at(0, HOME)).unwrap();
        assert_eq!(mission.num_commands(), 1);
        mission.set_item(1, &item_at(1, A)).unwrap();
        mission.set_item(2, &item_at(2, B)).unwrap();
        assert_eq!(mission.num_commands(), 3);

        let stored = mission.read_cmd_from_storage(2).unwrap();
        assert_eq!(stored.location().map(|l| (l.lat, l.lng)), Some((B.lat, B.lng)));
    }

    #[test]
    fn test_set_item_home_keeps_list() {
        let mut mission = mission_with(&[wp(A), wp(B)]);
        mission.set_item(0, &item_at(0, C)).unwrap();
        assert_eq!(mission.num_commands(), 3);
        assert_eq!(mission.get_item(0).unwrap().x, HOME.lat);
    }

    #[test]
    fn test_set_item_replace() {
        let mut mission = mission_with(&[wp(A), wp(B)]);
        mission.set_item(1, &item_at(1, C)).unwrap();
        assert_eq!(mission.num_commands(), 3);
        assert_eq!(mission.get_item(1).unwrap().y, C.lng);
    }

    #[test]
    fn test_set_item_gap_rejected() {
        let mut mission = mission_with(&[wp(A)]);
        assert_eq!(
            mission.set_item(3, &item_at(3, B)),
            Err(MissionResult::InvalidSequence)
        );
        assert_eq!(mission.num_commands(), 2);
    }

    #[test]
    fn test_set_item_unsupported_command() {
        let mut mission = mission_with(&[wp(A)]);
        let item = MissionItemInt {
            command: 9999,
            ..item_at(2, B)
        };
        assert_eq!(mission.set_item(2, &item), Err(MissionResult::Unsupported));
        assert_eq!(mission.num_commands(), 2);
    }

    #[test]
    fn test_set_item_no_space() {
        let mut mission = small_mission();
        mission.init().unwrap();
        for seq in 0..5 {
            mission.set_item(seq, &item_at(seq, A)).unwrap();
        }
        assert_eq!(mission.set_item(5, &item_at(5, B)), Err(MissionResult::NoSpace));
        assert_eq!(mission.num_commands(), 5);
    }
}
