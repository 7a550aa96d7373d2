//! Mission State Types
//!
//! Pure data types for mission execution state tracking.

/// Mission run state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissionState {
    /// Not running; current command is kept for resume
    #[default]
    Stopped,
    /// Running, commands are started and verified each update
    Running,
    /// No navigation command remained
    Complete,
}

/// Engine flags alongside the run state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MissionFlags {
    /// Nav slot holds a started command
    pub nav_cmd_loaded: bool,
    /// Do slot holds a started command
    pub do_cmd_loaded: bool,
    /// No do command remains before the next nav command
    pub do_cmd_all_done: bool,
    /// Flying a landing sequence
    pub in_landing_sequence: bool,
    /// Rewinding back to the interrupted waypoint
    pub resuming_mission: bool,
    /// Past a DO_RETURN_PATH_START
    pub in_return_path: bool,
}
