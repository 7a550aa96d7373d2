//! Mission Command Types
//!
//! `MissionCommand` is the in-memory form of one stored mission item. Its
//! `content` is a sum type whose variant is selected by the command id; the
//! mapping lives in [`ContentKind::for_command`] and is shared by the record
//! codec and the wire conversion.
//!
//! Every variant has a fixed encoded length (`ENCODED_LEN`) that must fit the
//! 15-byte storage payload; the codec asserts this at compile time.

use half::f16;

use super::command::*;
use crate::navigation::Location;

/// Reserved "no command" id
pub const CMD_ID_NONE: u16 = 0;

/// Reserved "no command" index
pub const CMD_INDEX_NONE: u16 = u16::MAX;

/// Index of the first command after home
pub const FIRST_REAL_COMMAND: u16 = 1;

/// Jump repeat count meaning "forever"
pub const JUMP_REPEAT_FOREVER: i16 = -1;

/// type_specific_bits: loiter radius stored divided by 10
pub const TSB_LOITER_RADIUS_X10: u8 = 1 << 0;

/// type_specific_bits: loiter turns stored as 1/256ths
pub const TSB_FRACTIONAL_TURNS: u8 = 1 << 1;

/// DO_JUMP / DO_JUMP_TAG / JUMP_TAG payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpCommand {
    /// Target index (DO_JUMP) or tag value (DO_JUMP_TAG, JUMP_TAG)
    pub target: u16,
    /// Repeat count, -1 = forever
    pub num_times: i16,
}

impl JumpCommand {
    pub const ENCODED_LEN: usize = 4;
}

/// CONDITION_DELAY payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionDelay {
    pub seconds: f32,
}

impl ConditionDelay {
    pub const ENCODED_LEN: usize = 4;
}

/// CONDITION_DISTANCE payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionDistance {
    pub meters: f32,
}

impl ConditionDistance {
    pub const ENCODED_LEN: usize = 4;
}

/// CONDITION_YAW payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YawCommand {
    /// Target angle in degrees (0 = north)
    pub angle_deg: f32,
    /// Turn rate in degrees/second, 0 = default
    pub turn_rate_dps: f32,
    /// -1 = ccw, +1 = cw
    pub direction: i8,
    /// 0 = absolute, 1 = relative
    pub relative_angle: u8,
}

impl YawCommand {
    pub const ENCODED_LEN: usize = 10;
}

/// DO_CHANGE_SPEED payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChangeSpeedCommand {
    /// 0 = airspeed, 1 = ground speed
    pub speed_type: u8,
    /// Target speed in m/s, -1 = no change
    pub target_ms: f32,
    /// Throttle percentage, -1 = no change
    pub throttle_pct: f32,
}

impl ChangeSpeedCommand {
    pub const ENCODED_LEN: usize = 9;
}

/// DO_SET_RELAY payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetRelayCommand {
    pub num: u8,
    pub state: u8,
}

impl SetRelayCommand {
    pub const ENCODED_LEN: usize = 2;
}

/// DO_REPEAT_RELAY payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RepeatRelayCommand {
    pub num: u8,
    pub repeat_count: i16,
    /// Seconds between toggles
    pub cycle_time: f32,
}

impl RepeatRelayCommand {
    pub const ENCODED_LEN: usize = 7;
}

/// DO_SET_SERVO payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetServoCommand {
    pub channel: u16,
    pub pwm: u16,
}

impl SetServoCommand {
    pub const ENCODED_LEN: usize = 4;
}

/// DO_REPEAT_SERVO payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RepeatServoCommand {
    pub channel: u16,
    pub pwm: u16,
    pub repeat_count: i16,
    pub cycle_time: f32,
}

impl RepeatServoCommand {
    pub const ENCODED_LEN: usize = 10;
}

/// DO_MOUNT_CONTROL payload (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MountControlCommand {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

impl MountControlCommand {
    pub const ENCODED_LEN: usize = 12;
}

/// DO_DIGICAM_CONFIGURE payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DigicamConfigureCommand {
    pub shooting_mode: u8,
    pub shutter_speed: u16,
    pub aperture: u8,
    pub iso: u16,
    pub exposure_type: u8,
    pub cmd_id: u8,
    pub engine_cutoff_time: f32,
}

impl DigicamConfigureCommand {
    pub const ENCODED_LEN: usize = 12;
}

/// DO_DIGICAM_CONTROL payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigicamControlCommand {
    pub session: u8,
    pub zoom_pos: u8,
    pub zoom_step: i8,
    pub focus_lock: u8,
    pub shooting_cmd: u8,
    pub cmd_id: u8,
}

impl DigicamControlCommand {
    pub const ENCODED_LEN: usize = 6;
}

/// DO_SET_CAM_TRIGG_DIST payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CamTriggDistCommand {
    pub meters: f32,
    /// Trigger once immediately
    pub trigger: u8,
}

impl CamTriggDistCommand {
    pub const ENCODED_LEN: usize = 5;
}

/// DO_GRIPPER payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GripperCommand {
    pub num: u8,
    /// 0 = release, 1 = grab
    pub action: u8,
}

impl GripperCommand {
    pub const ENCODED_LEN: usize = 2;
}

/// DO_AUX_FUNCTION payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuxFunctionCommand {
    pub function: u16,
    /// 0 = low, 1 = middle, 2 = high
    pub switchpos: u8,
}

impl AuxFunctionCommand {
    pub const ENCODED_LEN: usize = 3;
}

/// DO_GUIDED_LIMITS payload (max time is carried in p1)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GuidedLimitsCommand {
    pub alt_min: f32,
    pub alt_max: f32,
    pub horiz_max: f32,
}

impl GuidedLimitsCommand {
    pub const ENCODED_LEN: usize = 12;
}

/// NAV_ALTITUDE_WAIT payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AltitudeWaitCommand {
    pub altitude: f32,
    pub descent_rate: f32,
    pub wiggle_time: u8,
}

impl AltitudeWaitCommand {
    pub const ENCODED_LEN: usize = 9;
}

/// DO_VTOL_TRANSITION payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VtolTransitionCommand {
    pub target_state: u8,
}

impl VtolTransitionCommand {
    pub const ENCODED_LEN: usize = 1;
}

/// DO_ENGINE_CONTROL payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineControlCommand {
    pub start_control: bool,
    pub cold_start: bool,
    pub height_delay_cm: u16,
    pub allow_disarmed_start: bool,
}

impl EngineControlCommand {
    pub const ENCODED_LEN: usize = 5;
}

/// NAV_DELAY payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavDelayCommand {
    /// Delay in seconds, -1 = wait for the UTC time below
    pub seconds: f32,
    pub hour_utc: i8,
    pub min_utc: i8,
    pub sec_utc: i8,
}

impl NavDelayCommand {
    pub const ENCODED_LEN: usize = 7;
}

/// NAV_SET_YAW_SPEED payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetYawSpeedCommand {
    pub angle_deg: f32,
    pub speed: f32,
    pub relative_angle: u8,
}

impl SetYawSpeedCommand {
    pub const ENCODED_LEN: usize = 9;
}

/// DO_WINCH payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WinchCommand {
    pub num: u8,
    pub action: u8,
    pub release_length: f32,
    pub release_rate: f32,
}

impl WinchCommand {
    pub const ENCODED_LEN: usize = 10;
}

/// DO_SEND_SCRIPT_MESSAGE payload (message id is carried in p1)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScriptingCommand {
    pub p1: f32,
    pub p2: f32,
    pub p3: f32,
}

impl ScriptingCommand {
    pub const ENCODED_LEN: usize = 12;
}

/// NAV_SCRIPT_TIME payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavScriptTimeCommand {
    pub command: u8,
    pub timeout_s: u8,
    pub arg1: f16,
    pub arg2: f16,
    pub arg3: i16,
    pub arg4: i16,
}

impl NavScriptTimeCommand {
    pub const ENCODED_LEN: usize = 10;

    /// Length of the legacy layout (two f32 arguments, no integer arguments)
    pub const LEGACY_ENCODED_LEN: usize = 10;
}

/// NAV_ATTITUDE_TIME payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavAttitudeTimeCommand {
    pub time_sec: u16,
    pub roll_deg: i16,
    pub pitch_deg: i8,
    pub yaw_deg: i16,
    pub climb_rate: i16,
}

impl NavAttitudeTimeCommand {
    pub const ENCODED_LEN: usize = 9;
}

/// Bytes used by a location payload (flags, alt, lat, lng)
pub const LOCATION_ENCODED_LEN: usize = 13;

/// Command payload, selected by command id
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CommandContent {
    /// Command carries only `p1`
    #[default]
    Empty,
    Location(Location),
    Jump(JumpCommand),
    Delay(ConditionDelay),
    Distance(ConditionDistance),
    Yaw(YawCommand),
    Speed(ChangeSpeedCommand),
    Relay(SetRelayCommand),
    RepeatRelay(RepeatRelayCommand),
    Servo(SetServoCommand),
    RepeatServo(RepeatServoCommand),
    MountControl(MountControlCommand),
    DigicamConfigure(DigicamConfigureCommand),
    DigicamControl(DigicamControlCommand),
    CamTriggDist(CamTriggDistCommand),
    Gripper(GripperCommand),
    AuxFunction(AuxFunctionCommand),
    GuidedLimits(GuidedLimitsCommand),
    AltitudeWait(AltitudeWaitCommand),
    VtolTransition(VtolTransitionCommand),
    EngineControl(EngineControlCommand),
    NavDelay(NavDelayCommand),
    SetYawSpeed(SetYawSpeedCommand),
    Winch(WinchCommand),
    Scripting(ScriptingCommand),
    NavScriptTime(NavScriptTimeCommand),
    NavAttitudeTime(NavAttitudeTimeCommand),
}

/// Discriminant of [`CommandContent`] without the data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Empty,
    Location,
    Jump,
    Delay,
    Distance,
    Yaw,
    Speed,
    Relay,
    RepeatRelay,
    Servo,
    RepeatServo,
    MountControl,
    DigicamConfigure,
    DigicamControl,
    CamTriggDist,
    Gripper,
    AuxFunction,
    GuidedLimits,
    AltitudeWait,
    VtolTransition,
    EngineControl,
    NavDelay,
    SetYawSpeed,
    Winch,
    Scripting,
    NavScriptTime,
    NavAttitudeTime,
}

impl ContentKind {
    /// Payload kind for a command id, `None` if the id is not supported
    pub fn for_command(id: u16) -> Option<ContentKind> {
        if stored_in_location(id) {
            return Some(ContentKind::Location);
        }
        let kind = match id {
            MAV_CMD_DO_JUMP | MAV_CMD_DO_JUMP_TAG | MAV_CMD_JUMP_TAG => ContentKind::Jump,
            MAV_CMD_CONDITION_DELAY => ContentKind::Delay,
            MAV_CMD_CONDITION_DISTANCE => ContentKind::Distance,
            MAV_CMD_CONDITION_YAW => ContentKind::Yaw,
            MAV_CMD_DO_CHANGE_SPEED => ContentKind::Speed,
            MAV_CMD_DO_SET_RELAY => ContentKind::Relay,
            MAV_CMD_DO_REPEAT_RELAY => ContentKind::RepeatRelay,
            MAV_CMD_DO_SET_SERVO => ContentKind::Servo,
            MAV_CMD_DO_REPEAT_SERVO => ContentKind::RepeatServo,
            MAV_CMD_DO_MOUNT_CONTROL => ContentKind::MountControl,
            MAV_CMD_DO_DIGICAM_CONFIGURE => ContentKind::DigicamConfigure,
            MAV_CMD_DO_DIGICAM_CONTROL => ContentKind::DigicamControl,
            MAV_CMD_DO_SET_CAM_TRIGG_DIST => ContentKind::CamTriggDist,
            MAV_CMD_DO_GRIPPER => ContentKind::Gripper,
            MAV_CMD_DO_AUX_FUNCTION => ContentKind::AuxFunction,
            MAV_CMD_DO_GUIDED_LIMITS => ContentKind::GuidedLimits,
            MAV_CMD_NAV_ALTITUDE_WAIT => ContentKind::AltitudeWait,
            MAV_CMD_DO_VTOL_TRANSITION => ContentKind::VtolTransition,
            MAV_CMD_DO_ENGINE_CONTROL => ContentKind::EngineControl,
            MAV_CMD_NAV_DELAY => ContentKind::NavDelay,
            MAV_CMD_NAV_SET_YAW_SPEED => ContentKind::SetYawSpeed,
            MAV_CMD_DO_WINCH => ContentKind::Winch,
            MAV_CMD_DO_SEND_SCRIPT_MESSAGE => ContentKind::Scripting,
            MAV_CMD_NAV_SCRIPT_TIME => ContentKind::NavScriptTime,
            MAV_CMD_NAV_ATTITUDE_TIME => ContentKind::NavAttitudeTime,
            MAV_CMD_DO_SET_MODE
            | MAV_CMD_DO_FENCE_ENABLE
            | MAV_CMD_DO_PARACHUTE
            | MAV_CMD_DO_INVERTED_FLIGHT
            | MAV_CMD_DO_AUTOTUNE_ENABLE
            | MAV_CMD_DO_SET_RESUME_REPEAT_DIST
            | MAV_CMD_DO_SPRAYER
            | MAV_CMD_NAV_GUIDED_ENABLE => ContentKind::Empty,
            _ => return None,
        };
        Some(kind)
    }

    /// Encoded payload length of this kind
    pub const fn encoded_len(self) -> usize {
        match self {
            ContentKind::Empty => 0,
            // Location plus the type_specific_bits byte
            ContentKind::Location => LOCATION_ENCODED_LEN + 1,
            ContentKind::Jump => JumpCommand::ENCODED_LEN,
            ContentKind::Delay => ConditionDelay::ENCODED_LEN,
            ContentKind::Distance => ConditionDistance::ENCODED_LEN,
            ContentKind::Yaw => YawCommand::ENCODED_LEN,
            ContentKind::Speed => ChangeSpeedCommand::ENCODED_LEN,
            ContentKind::Relay => SetRelayCommand::ENCODED_LEN,
            ContentKind::RepeatRelay => RepeatRelayCommand::ENCODED_LEN,
            ContentKind::Servo => SetServoCommand::ENCODED_LEN,
            ContentKind::RepeatServo => RepeatServoCommand::ENCODED_LEN,
            ContentKind::MountControl => MountControlCommand::ENCODED_LEN,
            ContentKind::DigicamConfigure => DigicamConfigureCommand::ENCODED_LEN,
            ContentKind::DigicamControl => DigicamControlCommand::ENCODED_LEN,
            ContentKind::CamTriggDist => CamTriggDistCommand::ENCODED_LEN,
            ContentKind::Gripper => GripperCommand::ENCODED_LEN,
            ContentKind::AuxFunction => AuxFunctionCommand::ENCODED_LEN,
            ContentKind::GuidedLimits => GuidedLimitsCommand::ENCODED_LEN,
            ContentKind::AltitudeWait => AltitudeWaitCommand::ENCODED_LEN,
            ContentKind::VtolTransition => VtolTransitionCommand::ENCODED_LEN,
            ContentKind::EngineControl => EngineControlCommand::ENCODED_LEN,
            ContentKind::NavDelay => NavDelayCommand::ENCODED_LEN,
            ContentKind::SetYawSpeed => SetYawSpeedCommand::ENCODED_LEN,
            ContentKind::Winch => WinchCommand::ENCODED_LEN,
            ContentKind::Scripting => ScriptingCommand::ENCODED_LEN,
            ContentKind::NavScriptTime => NavScriptTimeCommand::ENCODED_LEN,
            ContentKind::NavAttitudeTime => NavAttitudeTimeCommand::ENCODED_LEN,
        }
    }

    /// All kinds, for exhaustive checks
    pub const ALL: [ContentKind; 27] = [
        ContentKind::Empty,
        ContentKind::Location,
        ContentKind::Jump,
        ContentKind::Delay,
        ContentKind::Distance,
        ContentKind::Yaw,
        ContentKind::Speed,
        ContentKind::Relay,
        ContentKind::RepeatRelay,
        ContentKind::Servo,
        ContentKind::RepeatServo,
        ContentKind::MountControl,
        ContentKind::DigicamConfigure,
        ContentKind::DigicamControl,
        ContentKind::CamTriggDist,
        ContentKind::Gripper,
        ContentKind::AuxFunction,
        ContentKind::GuidedLimits,
        ContentKind::AltitudeWait,
        ContentKind::VtolTransition,
        ContentKind::EngineControl,
        ContentKind::NavDelay,
        ContentKind::SetYawSpeed,
        ContentKind::Winch,
        ContentKind::Scripting,
        ContentKind::NavScriptTime,
        ContentKind::NavAttitudeTime,
    ];

    /// Largest encoded payload of any kind
    pub const MAX_ENCODED_LEN: usize = {
        let mut max = 0;
        let mut i = 0;
        while i < Self::ALL.len() {
            let len = Self::ALL[i].encoded_len();
            if len > max {
                max = len;
            }
            i += 1;
        }
        max
    };
}

impl CommandContent {
    /// Discriminant of this payload
    pub fn kind(&self) -> ContentKind {
        match self {
            CommandContent::Empty => ContentKind::Empty,
            CommandContent::Location(_) => ContentKind::Location,
            CommandContent::Jump(_) => ContentKind::Jump,
            CommandContent::Delay(_) => ContentKind::Delay,
            CommandContent::Distance(_) => ContentKind::Distance,
            CommandContent::Yaw(_) => ContentKind::Yaw,
            CommandContent::Speed(_) => ContentKind::Speed,
            CommandContent::Relay(_) => ContentKind::Relay,
            CommandContent::RepeatRelay(_) => ContentKind::RepeatRelay,
            CommandContent::Servo(_) => ContentKind::Servo,
            CommandContent::RepeatServo(_) => ContentKind::RepeatServo,
            CommandContent::MountControl(_) => ContentKind::MountControl,
            CommandContent::DigicamConfigure(_) => ContentKind::DigicamConfigure,
            CommandContent::DigicamControl(_) => ContentKind::DigicamControl,
            CommandContent::CamTriggDist(_) => ContentKind::CamTriggDist,
            CommandContent::Gripper(_) => ContentKind::Gripper,
            CommandContent::AuxFunction(_) => ContentKind::AuxFunction,
            CommandContent::GuidedLimits(_) => ContentKind::GuidedLimits,
            CommandContent::AltitudeWait(_) => ContentKind::AltitudeWait,
            CommandContent::VtolTransition(_) => ContentKind::VtolTransition,
            CommandContent::EngineControl(_) => ContentKind::EngineControl,
            CommandContent::NavDelay(_) => ContentKind::NavDelay,
            CommandContent::SetYawSpeed(_) => ContentKind::SetYawSpeed,
            CommandContent::Winch(_) => ContentKind::Winch,
            CommandContent::Scripting(_) => ContentKind::Scripting,
            CommandContent::NavScriptTime(_) => ContentKind::NavScriptTime,
            CommandContent::NavAttitudeTime(_) => ContentKind::NavAttitudeTime,
        }
    }
}

/// One mission item in working memory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionCommand {
    /// Position in the stored list (0 = home)
    pub index: u16,
    /// MAV_CMD id
    pub id: u16,
    /// Generic parameter, meaning depends on `id`
    pub p1: u16,
    /// Id-specific payload
    pub content: CommandContent,
    /// Extra flags for location payloads
    pub type_specific_bits: u8,
}

impl Default for MissionCommand {
    fn default() -> Self {
        Self::none()
    }
}

impl MissionCommand {
    /// Sentinel "no command loaded"
    pub const fn none() -> Self {
        Self {
            index: CMD_INDEX_NONE,
            id: CMD_ID_NONE,
            p1: 0,
            content: CommandContent::Empty,
            type_specific_bits: 0,
        }
    }

    /// New unindexed command
    pub const fn new(id: u16, content: CommandContent) -> Self {
        Self {
            index: CMD_INDEX_NONE,
            id,
            p1: 0,
            content,
            type_specific_bits: 0,
        }
    }

    /// Command whose payload is a location
    pub const fn with_location(id: u16, location: Location) -> Self {
        Self::new(id, CommandContent::Location(location))
    }

    /// NAV_WAYPOINT at `location`
    pub const fn waypoint(location: Location) -> Self {
        Self::with_location(MAV_CMD_NAV_WAYPOINT, location)
    }

    /// DO_JUMP to `target`, `num_times` repeats (-1 = forever)
    pub const fn jump(target: u16, num_times: i16) -> Self {
        Self::new(
            MAV_CMD_DO_JUMP,
            CommandContent::Jump(JumpCommand { target, num_times }),
        )
    }

    /// JUMP_TAG marker carrying `tag`
    pub const fn jump_tag(tag: u16) -> Self {
        Self::new(
            MAV_CMD_JUMP_TAG,
            CommandContent::Jump(JumpCommand {
                target: tag,
                num_times: 0,
            }),
        )
    }

    /// Builder: set `p1`
    pub const fn with_p1(mut self, p1: u16) -> Self {
        self.p1 = p1;
        self
    }

    /// True if no command is loaded
    pub fn is_none(&self) -> bool {
        self.index == CMD_INDEX_NONE
    }

    /// Is this a navigation command
    pub fn is_nav(&self) -> bool {
        is_nav_command(self.id)
    }

    /// Stored location, if the payload is one
    pub fn location(&self) -> Option<&Location> {
        match &self.content {
            CommandContent::Location(loc) => Some(loc),
            _ => None,
        }
    }

    /// Stored location with non-zero latitude/longitude
    pub fn target_location(&self) -> Option<&Location> {
        self.location().filter(|loc| !loc.is_zero())
    }

    /// Jump payload, if the payload is one
    pub fn jump_content(&self) -> Option<&JumpCommand> {
        match &self.content {
            CommandContent::Jump(jump) => Some(jump),
            _ => None,
        }
    }

    /// Payload kind matches what the id requires
    pub fn content_matches_id(&self) -> bool {
        ContentKind::for_command(self.id) == Some(self.content.kind())
    }

    /// Number of loiter turns (LOITER_TURNS), honoring fractional encoding
    pub fn loiter_turns(&self) -> f32 {
        let turns = f32::from((self.p1 & 0x00FF) as u8);
        if self.type_specific_bits & TSB_FRACTIONAL_TURNS != 0 {
            turns * (1.0 / 256.0)
        } else {
            turns
        }
    }

    /// Loiter radius in meters (LOITER_TURNS)
    pub fn loiter_radius_m(&self) -> u16 {
        let radius = self.p1 >> 8;
        if self.type_specific_bits & TSB_LOITER_RADIUS_X10 != 0 {
            radius * 10
        } else {
            radius
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        command_name(self.id)
    }
}
