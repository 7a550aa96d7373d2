//! Mock collaborators for host testing
//!
//! Always compiled so the integration suite can build an engine without a
//! vehicle.

use heapless::Vec;

use super::content::MissionCommand;
use super::executor::{MissionExecutor, VehicleState};
use crate::navigation::Location;

/// Calls retained in the mock's log
pub const MOCK_CALL_LOG: usize = 256;

/// One recorded executor call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    /// start_command(index)
    Start(u16),
    /// verify_command(index)
    Verify(u16),
    MissionComplete,
}

/// Scriptable executor recording every call
///
/// Calls past [`MOCK_CALL_LOG`] are counted but not logged.
#[derive(Debug, Default)]
pub struct MockExecutor {
    pub calls: Vec<MockCall, MOCK_CALL_LOG>,
    /// Every verify returns true
    pub verify_all: bool,
    /// Indices whose verify returns true
    pub verify_true_for: Vec<u16, 16>,
    /// Indices whose start returns false
    pub reject_start_for: Vec<u16, 16>,
    pub start_calls: u32,
    pub verify_calls: u32,
    pub complete_calls: u32,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor whose commands complete on the first verify
    pub fn completing() -> Self {
        Self {
            verify_all: true,
            ..Self::default()
        }
    }

    pub fn set_verify_true(&mut self, index: u16) {
        let _ = self.verify_true_for.push(index);
    }

    pub fn reject_start(&mut self, index: u16) {
        let _ = self.reject_start_for.push(index);
    }

    /// Indices passed to start_command, in order
    pub fn started(&self) -> impl Iterator<Item = u16> + '_ {
        self.calls.iter().filter_map(|call| match call {
            MockCall::Start(index) => Some(*index),
            _ => None,
        })
    }

    /// Number of logged starts of `index`
    pub fn start_count(&self, index: u16) -> usize {
        self.started().filter(|&i| i == index).count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: MockCall) {
        let _ = self.calls.push(call);
    }
}

impl MissionExecutor for MockExecutor {
    fn start_command(&mut self, cmd: &MissionCommand) -> bool {
        self.start_calls += 1;
        self.record(MockCall::Start(cmd.index));
        !self.reject_start_for.contains(&cmd.index)
    }

    fn verify_command(&mut self, cmd: &MissionCommand) -> bool {
        self.verify_calls += 1;
        self.record(MockCall::Verify(cmd.index));
        self.verify_all || self.verify_true_for.contains(&cmd.index)
    }

    fn on_mission_complete(&mut self) {
        self.complete_calls += 1;
        self.record(MockCall::MissionComplete);
    }
}

/// Vehicle state with settable fields
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MockVehicle {
    pub home: Option<Location>,
    pub location: Option<Location>,
    pub armed: bool,
}

impl MockVehicle {
    pub const fn new() -> Self {
        Self {
            home: None,
            location: None,
            armed: false,
        }
    }

    /// Vehicle sitting at `home`
    pub const fn at_home(home: Location) -> Self {
        Self {
            home: Some(home),
            location: Some(home),
            armed: false,
        }
    }
}

impl VehicleState for MockVehicle {
    fn home(&self) -> Option<Location> {
        self.home
    }

    fn current_location(&self) -> Option<Location> {
        self.location
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_records_calls() {
        let mut exec = MockExecutor::new();
        exec.set_verify_true(2);
        exec.reject_start(3);

        let mut cmd = MissionCommand::jump(1, 1);
        cmd.index = 2;
        assert!(exec.start_command(&cmd));
        assert!(exec.verify_command(&cmd));
        cmd.index = 3;
        assert!(!exec.start_command(&cmd));
        assert!(!exec.verify_command(&cmd));
        exec.on_mission_complete();

        assert_eq!(
            exec.calls.as_slice(),
            &[
                MockCall::Start(2),
                MockCall::Verify(2),
                MockCall::Start(3),
                MockCall::Verify(3),
                MockCall::MissionComplete,
            ]
        );
        assert_eq!(exec.start_calls, 2);
        assert_eq!(exec.start_count(2), 1);
    }

    #[test]
    fn test_mock_executor_log_cap() {
        let mut exec = MockExecutor::completing();
        let cmd = MissionCommand::jump(1, 1);
        for _ in 0..(MOCK_CALL_LOG + 10) {
            exec.verify_command(&cmd);
        }
        assert_eq!(exec.calls.len(), MOCK_CALL_LOG);
        assert_eq!(exec.verify_calls as usize, MOCK_CALL_LOG + 10);
    }

    #[test]
    fn test_mock_vehicle() {
        let home = Location::new(1, 2, 3);
        let vehicle = MockVehicle::at_home(home);
        assert_eq!(vehicle.home(), Some(home));
        assert_eq!(vehicle.current_location(), Some(home));
        assert!(!vehicle.is_armed());
        assert_eq!(MockVehicle::new().home(), None);
    }
}
