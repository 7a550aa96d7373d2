//! Shared fixtures for engine unit tests

use std::vec::Vec;

use super::Mission;
use crate::core::traits::MockTime;
use crate::mission::content::MissionCommand;
use crate::mission::executor::MissionEvent;
use crate::mission::mock::{MockExecutor, MockVehicle};
use crate::navigation::Location;
use crate::parameters::MissionParams;
use crate::platform::mock::MockStorage;

pub type TestStorage = MockStorage<4096>;
pub type TestMission = Mission<TestStorage, MockExecutor, MockVehicle, MockTime>;

/// Room for the header and five records
pub type SmallStorage = MockStorage<104>;

pub const HOME: Location = Location::new(-353_632_620, 1_491_652_370, 58_400);
/// ~100 m north of home
pub const A: Location = Location::new(-353_623_620, 1_491_652_370, 58_400);
/// ~200 m north of home
pub const B: Location = Location::new(-353_614_620, 1_491_652_370, 58_400);
/// ~200 m north, ~100 m east of home
pub const C: Location = Location::new(-353_614_620, 1_491_663_370, 58_400);
/// ~100 m east of home
pub const D: Location = Location::new(-353_632_620, 1_491_663_370, 58_400);

pub fn wp(loc: Location) -> MissionCommand {
    MissionCommand::waypoint(loc)
}

/// Engine over an erased region, not yet initialized
pub fn new_mission() -> TestMission {
    mission_from_storage(TestStorage::new())
}

pub fn mission_from_storage(storage: TestStorage) -> TestMission {
    Mission::new(
        storage,
        MockExecutor::new(),
        MockVehicle::at_home(HOME),
        MockTime::new(),
        MissionParams::default(),
    )
}

/// Initialized engine holding home followed by `cmds`
pub fn mission_with(cmds: &[MissionCommand]) -> TestMission {
    let mut mission = new_mission();
    mission.init().unwrap();
    mission.write_home_to_storage().unwrap();
    for cmd in cmds {
        mission.add_cmd(cmd).unwrap();
    }
    mission
}

pub fn small_mission() -> Mission<SmallStorage, MockExecutor, MockVehicle, MockTime> {
    Mission::new(
        SmallStorage::new(),
        MockExecutor::new(),
        MockVehicle::at_home(HOME),
        MockTime::new(),
        MissionParams::default(),
    )
}

pub fn drain_events(mission: &mut TestMission) -> Vec<MissionEvent> {
    let mut events = Vec::new();
    while let Some(event) = mission.poll_event() {
        events.push(event);
    }
    events
}

/// Nav indices started so far, in order
pub fn started(mission: &TestMission) -> Vec<u16> {
    mission.executor().started().collect()
}
