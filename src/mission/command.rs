//! Mission Command Identifiers and Classification
//!
//! Command ids follow MAVLink `MAV_CMD` numbering. Classification follows
//! ArduPilot's convention: ids <= `MAV_CMD_NAV_LAST` (95) are navigation
//! commands, plus a handful of higher-numbered navigation commands that
//! were added after the range was exhausted.

pub const MAV_CMD_NAV_WAYPOINT: u16 = 16;
pub const MAV_CMD_NAV_LOITER_UNLIM: u16 = 17;
pub const MAV_CMD_NAV_LOITER_TURNS: u16 = 18;
pub const MAV_CMD_NAV_LOITER_TIME: u16 = 19;
pub const MAV_CMD_NAV_RETURN_TO_LAUNCH: u16 = 20;
pub const MAV_CMD_NAV_LAND: u16 = 21;
pub const MAV_CMD_NAV_TAKEOFF: u16 = 22;
pub const MAV_CMD_NAV_CONTINUE_AND_CHANGE_ALT: u16 = 30;
pub const MAV_CMD_NAV_LOITER_TO_ALT: u16 = 31;
pub const MAV_CMD_NAV_SPLINE_WAYPOINT: u16 = 82;
pub const MAV_CMD_NAV_ALTITUDE_WAIT: u16 = 83;
pub const MAV_CMD_NAV_VTOL_TAKEOFF: u16 = 84;
pub const MAV_CMD_NAV_VTOL_LAND: u16 = 85;
pub const MAV_CMD_NAV_GUIDED_ENABLE: u16 = 92;
pub const MAV_CMD_NAV_DELAY: u16 = 93;
pub const MAV_CMD_NAV_PAYLOAD_PLACE: u16 = 94;

/// MAV_CMD_NAV_LAST: command IDs at or below this value are NAV commands.
pub const MAV_CMD_NAV_LAST: u16 = 95;

pub const MAV_CMD_CONDITION_DELAY: u16 = 112;
pub const MAV_CMD_CONDITION_DISTANCE: u16 = 114;
pub const MAV_CMD_CONDITION_YAW: u16 = 115;

pub const MAV_CMD_DO_SET_MODE: u16 = 176;
pub const MAV_CMD_DO_JUMP: u16 = 177;
pub const MAV_CMD_DO_CHANGE_SPEED: u16 = 178;
pub const MAV_CMD_DO_SET_HOME: u16 = 179;
pub const MAV_CMD_DO_SET_RELAY: u16 = 181;
pub const MAV_CMD_DO_REPEAT_RELAY: u16 = 182;
pub const MAV_CMD_DO_SET_SERVO: u16 = 183;
pub const MAV_CMD_DO_REPEAT_SERVO: u16 = 184;
pub const MAV_CMD_DO_RETURN_PATH_START: u16 = 188;
pub const MAV_CMD_DO_LAND_START: u16 = 189;
pub const MAV_CMD_DO_GO_AROUND: u16 = 191;
pub const MAV_CMD_DO_SET_ROI: u16 = 201;
pub const MAV_CMD_DO_DIGICAM_CONFIGURE: u16 = 202;
pub const MAV_CMD_DO_DIGICAM_CONTROL: u16 = 203;
pub const MAV_CMD_DO_MOUNT_CONTROL: u16 = 205;
pub const MAV_CMD_DO_SET_CAM_TRIGG_DIST: u16 = 206;
pub const MAV_CMD_DO_FENCE_ENABLE: u16 = 207;
pub const MAV_CMD_DO_PARACHUTE: u16 = 208;
pub const MAV_CMD_DO_INVERTED_FLIGHT: u16 = 210;
pub const MAV_CMD_DO_GRIPPER: u16 = 211;
pub const MAV_CMD_DO_AUTOTUNE_ENABLE: u16 = 212;
pub const MAV_CMD_NAV_SET_YAW_SPEED: u16 = 213;
pub const MAV_CMD_DO_SET_RESUME_REPEAT_DIST: u16 = 215;
pub const MAV_CMD_DO_SPRAYER: u16 = 216;
pub const MAV_CMD_DO_SEND_SCRIPT_MESSAGE: u16 = 217;
pub const MAV_CMD_DO_AUX_FUNCTION: u16 = 218;
pub const MAV_CMD_DO_GUIDED_LIMITS: u16 = 222;
pub const MAV_CMD_DO_ENGINE_CONTROL: u16 = 223;
pub const MAV_CMD_JUMP_TAG: u16 = 600;
pub const MAV_CMD_DO_JUMP_TAG: u16 = 601;
pub const MAV_CMD_DO_VTOL_TRANSITION: u16 = 3000;
pub const MAV_CMD_DO_WINCH: u16 = 42600;
pub const MAV_CMD_NAV_SCRIPT_TIME: u16 = 42702;
pub const MAV_CMD_NAV_ATTITUDE_TIME: u16 = 42703;

/// Classify a command as NAV (drives navigation) or DO/condition.
pub fn is_nav_command(command_id: u16) -> bool {
    match command_id {
        MAV_CMD_NAV_SET_YAW_SPEED | MAV_CMD_NAV_SCRIPT_TIME | MAV_CMD_NAV_ATTITUDE_TIME => true,
        id => id <= MAV_CMD_NAV_LAST,
    }
}

/// Check if a command's x/y/z wire fields are latitude/longitude/altitude.
pub fn cmd_has_location(command_id: u16) -> bool {
    matches!(
        command_id,
        MAV_CMD_NAV_WAYPOINT
            | MAV_CMD_NAV_LOITER_UNLIM
            | MAV_CMD_NAV_LOITER_TURNS
            | MAV_CMD_NAV_LOITER_TIME
            | MAV_CMD_NAV_LAND
            | MAV_CMD_NAV_TAKEOFF
            | MAV_CMD_NAV_CONTINUE_AND_CHANGE_ALT
            | MAV_CMD_NAV_LOITER_TO_ALT
            | MAV_CMD_NAV_SPLINE_WAYPOINT
            | MAV_CMD_NAV_VTOL_TAKEOFF
            | MAV_CMD_NAV_VTOL_LAND
            | MAV_CMD_NAV_PAYLOAD_PLACE
            | MAV_CMD_DO_SET_HOME
            | MAV_CMD_DO_RETURN_PATH_START
            | MAV_CMD_DO_LAND_START
            | MAV_CMD_DO_GO_AROUND
            | MAV_CMD_DO_SET_ROI
    )
}

/// Check if a command's storage payload is a location.
///
/// Superset of [`cmd_has_location`]: return-to-launch keeps a location slot
/// even though its wire fields are not a target.
pub fn stored_in_location(command_id: u16) -> bool {
    command_id == MAV_CMD_NAV_RETURN_TO_LAUNCH || cmd_has_location(command_id)
}

/// Commands that put the vehicle on the ground
pub fn is_landing_type_cmd(command_id: u16) -> bool {
    matches!(
        command_id,
        MAV_CMD_NAV_LAND | MAV_CMD_NAV_VTOL_LAND | MAV_CMD_DO_PARACHUTE
    )
}

/// Commands that take the vehicle off the ground
pub fn is_takeoff_type_cmd(command_id: u16) -> bool {
    matches!(command_id, MAV_CMD_NAV_TAKEOFF | MAV_CMD_NAV_VTOL_TAKEOFF)
}

/// Jump commands redirect the command search
pub fn is_jump_cmd(command_id: u16) -> bool {
    matches!(command_id, MAV_CMD_DO_JUMP | MAV_CMD_DO_JUMP_TAG)
}

/// Short human-readable name for logs and telemetry text
pub fn command_name(command_id: u16) -> &'static str {
    match command_id {
        MAV_CMD_NAV_WAYPOINT => "WP",
        MAV_CMD_NAV_LOITER_UNLIM => "LoitUnlim",
        MAV_CMD_NAV_LOITER_TURNS => "LoitTurns",
        MAV_CMD_NAV_LOITER_TIME => "LoitTime",
        MAV_CMD_NAV_RETURN_TO_LAUNCH => "RTL",
        MAV_CMD_NAV_LAND => "Land",
        MAV_CMD_NAV_TAKEOFF => "Takeoff",
        MAV_CMD_NAV_CONTINUE_AND_CHANGE_ALT => "ContinueAndChangeAlt",
        MAV_CMD_NAV_LOITER_TO_ALT => "LoiterToAlt",
        MAV_CMD_NAV_SPLINE_WAYPOINT => "SplineWP",
        MAV_CMD_NAV_ALTITUDE_WAIT => "AltitudeWait",
        MAV_CMD_NAV_VTOL_TAKEOFF => "VTOLTakeoff",
        MAV_CMD_NAV_VTOL_LAND => "VTOLLand",
        MAV_CMD_NAV_GUIDED_ENABLE => "GuidedEnable",
        MAV_CMD_NAV_DELAY => "Delay",
        MAV_CMD_NAV_PAYLOAD_PLACE => "PayloadPlace",
        MAV_CMD_CONDITION_DELAY => "CondDelay",
        MAV_CMD_CONDITION_DISTANCE => "CondDist",
        MAV_CMD_CONDITION_YAW => "CondYaw",
        MAV_CMD_DO_SET_MODE => "SetMode",
        MAV_CMD_DO_JUMP => "Jump",
        MAV_CMD_DO_CHANGE_SPEED => "ChangeSpeed",
        MAV_CMD_DO_SET_HOME => "SetHome",
        MAV_CMD_DO_SET_RELAY => "SetRelay",
        MAV_CMD_DO_REPEAT_RELAY => "RepeatRelay",
        MAV_CMD_DO_SET_SERVO => "SetServo",
        MAV_CMD_DO_REPEAT_SERVO => "RepeatServo",
        MAV_CMD_DO_RETURN_PATH_START => "ReturnPathStart",
        MAV_CMD_DO_LAND_START => "LandStart",
        MAV_CMD_DO_GO_AROUND => "GoAround",
        MAV_CMD_DO_SET_ROI => "SetROI",
        MAV_CMD_DO_DIGICAM_CONFIGURE => "DigiCamCfg",
        MAV_CMD_DO_DIGICAM_CONTROL => "DigiCamCtrl",
        MAV_CMD_DO_MOUNT_CONTROL => "MountControl",
        MAV_CMD_DO_SET_CAM_TRIGG_DIST => "SetCamTrigDst",
        MAV_CMD_DO_FENCE_ENABLE => "FenceEnable",
        MAV_CMD_DO_PARACHUTE => "Parachute",
        MAV_CMD_DO_INVERTED_FLIGHT => "InvertedFlight",
        MAV_CMD_DO_GRIPPER => "Gripper",
        MAV_CMD_DO_AUTOTUNE_ENABLE => "AutoTune",
        MAV_CMD_NAV_SET_YAW_SPEED => "SetYawSpd",
        MAV_CMD_DO_SET_RESUME_REPEAT_DIST => "SetRepeatDist",
        MAV_CMD_DO_SPRAYER => "Sprayer",
        MAV_CMD_DO_SEND_SCRIPT_MESSAGE => "SendScriptMessage",
        MAV_CMD_DO_AUX_FUNCTION => "AuxFunction",
        MAV_CMD_DO_GUIDED_LIMITS => "GuidedLimits",
        MAV_CMD_DO_ENGINE_CONTROL => "EngineControl",
        MAV_CMD_JUMP_TAG => "JumpTag",
        MAV_CMD_DO_JUMP_TAG => "DoJumpTag",
        MAV_CMD_DO_VTOL_TRANSITION => "VTOLTransition",
        MAV_CMD_DO_WINCH => "Winch",
        MAV_CMD_NAV_SCRIPT_TIME => "NavScriptTime",
        MAV_CMD_NAV_ATTITUDE_TIME => "NavAttitudeTime",
        _ => "?",
    }
}
