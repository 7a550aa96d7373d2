//! Mission item wire conversion
//!
//! Maps between [`MissionCommand`] and the ground-control mission item
//! formats (`MISSION_ITEM_INT` and the older float `MISSION_ITEM`). Parameter
//! placement follows the ArduPilot Rover conventions.
//!
//! # Lossy fields
//!
//! A command stored from an uploaded item converts to an item that converts
//! back to the same command. LOITER_TURNS radii are the exception when the
//! stored scaling differs from the upload form (radius over 255 m stored /10,
//! otherwise unscaled): such a command comes back in the upload form with the
//! same turns and radius. The reverse (item -> command -> item) loses:
//!
//! - Integer parameters (`p1`, relay/servo numbers, counts, PWM): fractional
//!   parts are truncated and out-of-range values saturate
//! - Altitude: rounded to whole centimeters
//! - LOITER_TURNS: turns saturate at 255 and fractions are kept in 1/256ths;
//!   radii above 255 m lose their last digit (stored /10); sign of param3
//!   only survives as the loiter direction
//! - LOITER_TIME / LOITER_UNLIM / LAND: only the sign of the direction
//!   parameter is kept
//! - NAV_SCRIPT_TIME: arg1/arg2 are stored as half precision floats
//! - DO_ENGINE_CONTROL: height delay is kept in whole centimeters
//! - NAV_PAYLOAD_PLACE: max descent is kept in whole centimeters
//! - NAV_ATTITUDE_TIME: out-of-range angles are replaced with 0

use half::f16;
use libm::{fabsf, round, roundf};

use super::command::*;
use super::content::*;
use super::LOCATION_ALT_MAX_M;
use crate::navigation::{Location, LocationFlags};

pub const MAV_FRAME_GLOBAL: u8 = 0;
pub const MAV_FRAME_MISSION: u8 = 2;
pub const MAV_FRAME_GLOBAL_RELATIVE_ALT: u8 = 3;
pub const MAV_FRAME_GLOBAL_INT: u8 = 5;
pub const MAV_FRAME_GLOBAL_RELATIVE_ALT_INT: u8 = 6;
pub const MAV_FRAME_GLOBAL_TERRAIN_ALT: u8 = 10;
pub const MAV_FRAME_GLOBAL_TERRAIN_ALT_INT: u8 = 11;

/// DO_ENGINE_CONTROL param4 bit: allow starting while disarmed
const ENGINE_CONTROL_ALLOW_START_WHILE_DISARMED: u32 = 1 << 0;

/// MAV_MISSION_RESULT codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MissionResult {
    Accepted = 0,
    Error = 1,
    UnsupportedFrame = 2,
    Unsupported = 3,
    NoSpace = 4,
    Invalid = 5,
    InvalidParam1 = 6,
    InvalidParam2 = 7,
    InvalidParam3 = 8,
    InvalidParam4 = 9,
    InvalidParam5X = 10,
    InvalidParam6Y = 11,
    InvalidParam7 = 12,
    InvalidSequence = 13,
    Denied = 14,
}

impl core::fmt::Display for MissionResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            MissionResult::Accepted => "accepted",
            MissionResult::Error => "error",
            MissionResult::UnsupportedFrame => "unsupported frame",
            MissionResult::Unsupported => "unsupported command",
            MissionResult::NoSpace => "no space",
            MissionResult::Invalid => "invalid",
            MissionResult::InvalidParam1 => "invalid param1",
            MissionResult::InvalidParam2 => "invalid param2",
            MissionResult::InvalidParam3 => "invalid param3",
            MissionResult::InvalidParam4 => "invalid param4",
            MissionResult::InvalidParam5X => "invalid x",
            MissionResult::InvalidParam6Y => "invalid y",
            MissionResult::InvalidParam7 => "invalid z",
            MissionResult::InvalidSequence => "invalid sequence",
            MissionResult::Denied => "denied",
        };
        f.write_str(text)
    }
}

/// MISSION_ITEM_INT
///
/// Latitude/longitude are degrees * 1e7 for commands that carry a location,
/// otherwise x/y are plain integer parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionItemInt {
    pub target_system: u8,
    pub target_component: u8,
    /// Sequence number (list index)
    pub seq: u16,
    /// MAV_FRAME of x/y/z
    pub frame: u8,
    /// MAV_CMD id
    pub command: u16,
    pub current: u8,
    pub autocontinue: u8,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
    pub param4: f32,
    /// Latitude in degrees * 1e7, or parameter 5
    pub x: i32,
    /// Longitude in degrees * 1e7, or parameter 6
    pub y: i32,
    /// Altitude in meters, or parameter 7
    pub z: f32,
    pub mission_type: u8,
}

impl Default for MissionItemInt {
    fn default() -> Self {
        Self {
            target_system: 0,
            target_component: 0,
            seq: 0,
            frame: MAV_FRAME_GLOBAL,
            command: 0,
            current: 0,
            autocontinue: 1,
            param1: 0.0,
            param2: 0.0,
            param3: 0.0,
            param4: 0.0,
            x: 0,
            y: 0,
            z: 0.0,
            mission_type: 0,
        }
    }
}

impl MissionItemInt {
    /// NAV_WAYPOINT item in the relative-altitude frame
    ///
    /// # Arguments
    ///
    /// * `seq` - Sequence number
    /// * `lat` - Latitude in degrees * 1e7
    /// * `lon` - Longitude in degrees * 1e7
    /// * `alt` - Altitude in meters above home
    pub fn waypoint(seq: u16, lat: i32, lon: i32, alt: f32) -> Self {
        Self {
            seq,
            frame: MAV_FRAME_GLOBAL_RELATIVE_ALT,
            command: MAV_CMD_NAV_WAYPOINT,
            x: lat,
            y: lon,
            z: alt,
            ..Self::default()
        }
    }
}

/// MISSION_ITEM (float latitude/longitude in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MissionItem {
    pub target_system: u8,
    pub target_component: u8,
    pub seq: u16,
    pub frame: u8,
    pub command: u16,
    pub current: u8,
    pub autocontinue: u8,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
    pub param4: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub mission_type: u8,
}

// ============================================================================
// Float <-> int item conversion
// ============================================================================

/// MISSION_ITEM -> MISSION_ITEM_INT
///
/// Latitude/longitude are scaled by 1e7 only for commands that carry a
/// location; other commands copy x/y as integers.
pub fn convert_item_to_int(item: &MissionItem) -> Result<MissionItemInt, MissionResult> {
    let (x, y) = if cmd_has_location(item.command) {
        if fabsf(item.x) > 90.0 {
            return Err(MissionResult::InvalidParam5X);
        }
        if fabsf(item.y) > 180.0 {
            return Err(MissionResult::InvalidParam6Y);
        }
        (
            round(f64::from(item.x) * 1.0e7) as i32,
            round(f64::from(item.y) * 1.0e7) as i32,
        )
    } else {
        (item.x as i32, item.y as i32)
    };

    Ok(MissionItemInt {
        target_system: item.target_system,
        target_component: item.target_component,
        seq: item.seq,
        frame: item.frame,
        command: item.command,
        current: item.current,
        autocontinue: item.autocontinue,
        param1: item.param1,
        param2: item.param2,
        param3: item.param3,
        param4: item.param4,
        x,
        y,
        z: item.z,
        mission_type: item.mission_type,
    })
}

/// MISSION_ITEM_INT -> MISSION_ITEM
pub fn convert_int_to_item(item: &MissionItemInt) -> MissionItem {
    let (x, y) = if cmd_has_location(item.command) {
        (
            (f64::from(item.x) * 1.0e-7) as f32,
            (f64::from(item.y) * 1.0e-7) as f32,
        )
    } else {
        (item.x as f32, item.y as f32)
    };

    MissionItem {
        target_system: item.target_system,
        target_component: item.target_component,
        seq: item.seq,
        frame: item.frame,
        command: item.command,
        current: item.current,
        autocontinue: item.autocontinue,
        param1: item.param1,
        param2: item.param2,
        param3: item.param3,
        param4: item.param4,
        x,
        y,
        z: item.z,
        mission_type: item.mission_type,
    }
}

// ============================================================================
// Parameter validation
// ============================================================================

/// Reject NaN/infinite parameters
///
/// Infinity is never accepted. NaN is accepted in param4 of
/// WAYPOINT/LAND/TAKEOFF/VTOL_TAKEOFF (yaw "unchanged") and in param3/param4
/// of VTOL_LAND.
pub fn sanity_check_params(item: &MissionItemInt) -> Result<(), MissionResult> {
    // bit n set: param(n+1) must not be NaN
    let nan_mask: u8 = match item.command {
        MAV_CMD_NAV_WAYPOINT | MAV_CMD_NAV_LAND | MAV_CMD_NAV_TAKEOFF
        | MAV_CMD_NAV_VTOL_TAKEOFF => !(1 << 3),
        MAV_CMD_NAV_VTOL_LAND => !((1 << 2) | (1 << 3)),
        _ => 0xFF,
    };

    let params = [
        (item.param1, MissionResult::InvalidParam1),
        (item.param2, MissionResult::InvalidParam2),
        (item.param3, MissionResult::InvalidParam3),
        (item.param4, MissionResult::InvalidParam4),
    ];
    for (bit, (value, err)) in params.iter().enumerate() {
        if value.is_infinite() || (nan_mask & (1 << bit) != 0 && value.is_nan()) {
            return Err(*err);
        }
    }
    Ok(())
}

// ============================================================================
// Item <-> command conversion
// ============================================================================

/// MISSION_ITEM_INT -> MissionCommand
///
/// The returned command's index is the item's `seq`.
pub fn item_int_to_command(item: &MissionItemInt) -> Result<MissionCommand, MissionResult> {
    sanity_check_params(item)?;

    let id = item.command;
    if id == CMD_ID_NONE {
        return Err(MissionResult::Invalid);
    }
    let kind = ContentKind::for_command(id).ok_or(MissionResult::Unsupported)?;

    let mut cmd = MissionCommand::new(id, CommandContent::Empty);
    cmd.index = item.seq;

    let mut loc = Location::default();
    let p1_from = |v: f32| v as u16;

    let content = match id {
        MAV_CMD_NAV_WAYPOINT => {
            // Rover: param1 is the hold time in seconds
            cmd.p1 = p1_from(item.param1);
            CommandContent::Empty
        }
        MAV_CMD_NAV_LOITER_UNLIM => {
            cmd.p1 = p1_from(fabsf(item.param3));
            loc.flags.set(LocationFlags::LOITER_CCW, item.param3 < 0.0);
            CommandContent::Empty
        }
        MAV_CMD_NAV_LOITER_TURNS => {
            let turns = fabsf(item.param1);
            let mut p1 = if turns >= 1.0 {
                turns.min(255.0) as u16
            } else {
                cmd.type_specific_bits |= TSB_FRACTIONAL_TURNS;
                (turns * 256.0).min(255.0) as u16
            };
            let radius_m = fabsf(item.param3) as u32;
            if radius_m <= 255 {
                p1 |= (radius_m as u16) << 8;
            } else {
                p1 |= ((radius_m / 10).min(255) as u16) << 8;
                cmd.type_specific_bits |= TSB_LOITER_RADIUS_X10;
            }
            cmd.p1 = p1;
            loc.flags.set(LocationFlags::LOITER_CCW, item.param3 < 0.0);
            loc.flags.set(LocationFlags::LOITER_XTRACK, item.param4 > 0.0);
            CommandContent::Empty
        }
        MAV_CMD_NAV_LOITER_TIME => {
            cmd.p1 = p1_from(item.param1);
            loc.flags.set(LocationFlags::LOITER_CCW, item.param3 < 0.0);
            loc.flags.set(LocationFlags::LOITER_XTRACK, item.param4 > 0.0);
            CommandContent::Empty
        }
        MAV_CMD_NAV_RETURN_TO_LAUNCH => CommandContent::Empty,
        MAV_CMD_NAV_LAND => {
            cmd.p1 = p1_from(item.param1);
            if !item.param4.is_nan() {
                loc.flags.set(LocationFlags::LOITER_CCW, item.param4 < 0.0);
            }
            CommandContent::Empty
        }
        MAV_CMD_NAV_TAKEOFF
        | MAV_CMD_NAV_CONTINUE_AND_CHANGE_ALT
        | MAV_CMD_NAV_SPLINE_WAYPOINT
        | MAV_CMD_NAV_VTOL_LAND
        | MAV_CMD_DO_SET_HOME
        | MAV_CMD_DO_SET_ROI
        | MAV_CMD_NAV_GUIDED_ENABLE
        | MAV_CMD_DO_SET_MODE
        | MAV_CMD_DO_FENCE_ENABLE
        | MAV_CMD_DO_PARACHUTE
        | MAV_CMD_DO_INVERTED_FLIGHT
        | MAV_CMD_DO_AUTOTUNE_ENABLE
        | MAV_CMD_DO_SET_RESUME_REPEAT_DIST
        | MAV_CMD_DO_SPRAYER => {
            cmd.p1 = p1_from(item.param1);
            CommandContent::Empty
        }
        MAV_CMD_NAV_LOITER_TO_ALT => {
            cmd.p1 = p1_from(fabsf(item.param2));
            loc.flags.set(LocationFlags::LOITER_CCW, item.param2 < 0.0);
            loc.flags.set(LocationFlags::LOITER_XTRACK, item.param4 > 0.0);
            CommandContent::Empty
        }
        MAV_CMD_NAV_PAYLOAD_PLACE => {
            // max descent, m -> cm
            cmd.p1 = p1_from(roundf(item.param1 * 100.0));
            CommandContent::Empty
        }
        MAV_CMD_NAV_VTOL_TAKEOFF
        | MAV_CMD_DO_LAND_START
        | MAV_CMD_DO_GO_AROUND
        | MAV_CMD_DO_RETURN_PATH_START => CommandContent::Empty,
        MAV_CMD_NAV_DELAY => CommandContent::NavDelay(NavDelayCommand {
            seconds: item.param1,
            hour_utc: item.param2 as i8,
            min_utc: item.param3 as i8,
            sec_utc: item.param4 as i8,
        }),
        MAV_CMD_NAV_SET_YAW_SPEED => CommandContent::SetYawSpeed(SetYawSpeedCommand {
            angle_deg: item.param1,
            speed: item.param2,
            relative_angle: item.param3 as u8,
        }),
        MAV_CMD_NAV_ALTITUDE_WAIT => CommandContent::AltitudeWait(AltitudeWaitCommand {
            altitude: item.param1,
            descent_rate: item.param2,
            wiggle_time: item.param3 as u8,
        }),
        MAV_CMD_CONDITION_DELAY => CommandContent::Delay(ConditionDelay {
            seconds: item.param1,
        }),
        MAV_CMD_CONDITION_DISTANCE => CommandContent::Distance(ConditionDistance {
            meters: item.param1,
        }),
        MAV_CMD_CONDITION_YAW => CommandContent::Yaw(YawCommand {
            angle_deg: item.param1,
            turn_rate_dps: item.param2,
            direction: item.param3 as i8,
            relative_angle: item.param4 as u8,
        }),
        MAV_CMD_DO_JUMP | MAV_CMD_DO_JUMP_TAG => CommandContent::Jump(JumpCommand {
            target: item.param1 as u16,
            num_times: item.param2 as i16,
        }),
        MAV_CMD_JUMP_TAG => CommandContent::Jump(JumpCommand {
            target: item.param1 as u16,
            num_times: 0,
        }),
        MAV_CMD_DO_CHANGE_SPEED => CommandContent::Speed(ChangeSpeedCommand {
            speed_type: item.param1 as u8,
            target_ms: item.param2,
            throttle_pct: item.param3,
        }),
        MAV_CMD_DO_SET_RELAY => CommandContent::Relay(SetRelayCommand {
            num: item.param1 as u8,
            state: item.param2 as u8,
        }),
        MAV_CMD_DO_REPEAT_RELAY => CommandContent::RepeatRelay(RepeatRelayCommand {
            num: item.param1 as u8,
            repeat_count: item.param2 as i16,
            cycle_time: item.param3,
        }),
        MAV_CMD_DO_SET_SERVO => CommandContent::Servo(SetServoCommand {
            channel: item.param1 as u16,
            pwm: item.param2 as u16,
        }),
        MAV_CMD_DO_REPEAT_SERVO => CommandContent::RepeatServo(RepeatServoCommand {
            channel: item.param1 as u16,
            pwm: item.param2 as u16,
            repeat_count: item.param3 as i16,
            cycle_time: item.param4,
        }),
        MAV_CMD_DO_DIGICAM_CONFIGURE => {
            CommandContent::DigicamConfigure(DigicamConfigureCommand {
                shooting_mode: item.param1 as u8,
                shutter_speed: item.param2 as u16,
                aperture: item.param3 as u8,
                iso: item.param4 as u16,
                exposure_type: item.x as u8,
                cmd_id: item.y as u8,
                engine_cutoff_time: item.z,
            })
        }
        MAV_CMD_DO_DIGICAM_CONTROL => CommandContent::DigicamControl(DigicamControlCommand {
            session: item.param1 as u8,
            zoom_pos: item.param2 as u8,
            zoom_step: item.param3 as i8,
            focus_lock: item.param4 as u8,
            shooting_cmd: item.x as u8,
            cmd_id: item.y as u8,
        }),
        MAV_CMD_DO_MOUNT_CONTROL => CommandContent::MountControl(MountControlCommand {
            pitch: item.param1,
            roll: item.param2,
            yaw: item.param3,
        }),
        MAV_CMD_DO_SET_CAM_TRIGG_DIST => CommandContent::CamTriggDist(CamTriggDistCommand {
            meters: item.param1,
            trigger: item.param3 as u8,
        }),
        MAV_CMD_DO_GRIPPER => CommandContent::Gripper(GripperCommand {
            num: item.param1 as u8,
            action: item.param2 as u8,
        }),
        MAV_CMD_DO_GUIDED_LIMITS => {
            cmd.p1 = p1_from(item.param1);
            CommandContent::GuidedLimits(GuidedLimitsCommand {
                alt_min: item.param2,
                alt_max: item.param3,
                horiz_max: item.param4,
            })
        }
        MAV_CMD_DO_VTOL_TRANSITION => CommandContent::VtolTransition(VtolTransitionCommand {
            target_state: item.param1 as u8,
        }),
        MAV_CMD_DO_ENGINE_CONTROL => CommandContent::EngineControl(EngineControlCommand {
            start_control: item.param1 > 0.0,
            cold_start: item.param2 > 0.0,
            height_delay_cm: roundf(item.param3 * 100.0) as u16,
            allow_disarmed_start: (item.param4 as u32) & ENGINE_CONTROL_ALLOW_START_WHILE_DISARMED
                != 0,
        }),
        MAV_CMD_DO_AUX_FUNCTION => CommandContent::AuxFunction(AuxFunctionCommand {
            function: item.param1 as u16,
            switchpos: item.param2 as u8,
        }),
        MAV_CMD_DO_WINCH => CommandContent::Winch(WinchCommand {
            num: item.param1 as u8,
            action: item.param2 as u8,
            release_length: item.param3,
            release_rate: item.param4,
        }),
        MAV_CMD_DO_SEND_SCRIPT_MESSAGE => {
            cmd.p1 = p1_from(item.param1);
            CommandContent::Scripting(ScriptingCommand {
                p1: item.param2,
                p2: item.param3,
                p3: item.param4,
            })
        }
        MAV_CMD_NAV_SCRIPT_TIME => CommandContent::NavScriptTime(NavScriptTimeCommand {
            command: item.param1 as u8,
            timeout_s: item.param2 as u8,
            arg1: f16::from_f32(item.param3),
            arg2: f16::from_f32(item.param4),
            arg3: item.x as i16,
            arg4: item.y as i16,
        }),
        MAV_CMD_NAV_ATTITUDE_TIME => CommandContent::NavAttitudeTime(NavAttitudeTimeCommand {
            time_sec: item.param1.clamp(0.0, f32::from(u16::MAX)) as u16,
            roll_deg: if fabsf(item.param2) <= 180.0 {
                item.param2 as i16
            } else {
                0
            },
            pitch_deg: if fabsf(item.param3) <= 90.0 {
                item.param3 as i8
            } else {
                0
            },
            yaw_deg: if (-180.0..=180.0).contains(&item.param4) {
                item.param4 as i16
            } else {
                0
            },
            climb_rate: item.x as i16,
        }),
        _ => return Err(MissionResult::Unsupported),
    };

    cmd.content = if kind == ContentKind::Location {
        if cmd_has_location(id) {
            copy_location_from_item(item, &mut loc)?;
        }
        CommandContent::Location(loc)
    } else {
        content
    };

    Ok(cmd)
}

/// Fill `loc` from the item's x/y/z and frame
fn copy_location_from_item(item: &MissionItemInt, loc: &mut Location) -> Result<(), MissionResult> {
    match item.frame {
        MAV_FRAME_GLOBAL | MAV_FRAME_MISSION | MAV_FRAME_GLOBAL_INT => {}
        MAV_FRAME_GLOBAL_RELATIVE_ALT | MAV_FRAME_GLOBAL_RELATIVE_ALT_INT => {
            loc.flags.insert(LocationFlags::RELATIVE_ALT);
        }
        MAV_FRAME_GLOBAL_TERRAIN_ALT | MAV_FRAME_GLOBAL_TERRAIN_ALT_INT => {
            // Terrain altitudes do not have home altitude added
            loc.flags
                .insert(LocationFlags::RELATIVE_ALT | LocationFlags::TERRAIN_ALT);
        }
        _ => return Err(MissionResult::UnsupportedFrame),
    }

    if item.x.unsigned_abs() > 900_000_000 {
        return Err(MissionResult::InvalidParam5X);
    }
    if item.y.unsigned_abs() > 1_800_000_000 {
        return Err(MissionResult::InvalidParam6Y);
    }
    if item.z.is_nan() || fabsf(item.z) >= LOCATION_ALT_MAX_M {
        return Err(MissionResult::InvalidParam7);
    }

    loc.lat = item.x;
    loc.lng = item.y;
    loc.alt = roundf(item.z * 100.0) as i32;
    Ok(())
}

/// MissionCommand -> MISSION_ITEM_INT
///
/// `seq` is the command's index; `current` is left 0 for the caller to set.
pub fn command_to_item_int(cmd: &MissionCommand) -> Result<MissionItemInt, MissionResult> {
    if cmd.id == CMD_ID_NONE {
        return Err(MissionResult::Invalid);
    }
    if !cmd.content_matches_id() {
        return Err(MissionResult::Unsupported);
    }

    let mut item = MissionItemInt {
        seq: cmd.index,
        command: cmd.id,
        ..MissionItemInt::default()
    };
    let p1 = f32::from(cmd.p1);
    let loc = cmd.location().copied().unwrap_or_default();

    match (&cmd.content, cmd.id) {
        (_, MAV_CMD_NAV_WAYPOINT) => item.param1 = p1,
        (_, MAV_CMD_NAV_LOITER_UNLIM) => {
            item.param3 = if loc.loiter_ccw() { -p1 } else { p1 };
        }
        (_, MAV_CMD_NAV_LOITER_TURNS) => {
            item.param1 = cmd.loiter_turns();
            let radius = f32::from(cmd.loiter_radius_m());
            item.param3 = if loc.loiter_ccw() { -radius } else { radius };
            item.param4 = if loc.loiter_xtrack() { 1.0 } else { 0.0 };
        }
        (_, MAV_CMD_NAV_LOITER_TIME) => {
            item.param1 = p1;
            item.param3 = if loc.loiter_ccw() { -1.0 } else { 1.0 };
            item.param4 = if loc.loiter_xtrack() { 1.0 } else { 0.0 };
        }
        (_, MAV_CMD_NAV_LAND) => {
            item.param1 = p1;
            item.param4 = if loc.loiter_ccw() { -1.0 } else { 0.0 };
        }
        (_, MAV_CMD_NAV_LOITER_TO_ALT) => {
            item.param2 = if loc.loiter_ccw() { -p1 } else { p1 };
            item.param4 = if loc.loiter_xtrack() { 1.0 } else { 0.0 };
        }
        (_, MAV_CMD_NAV_PAYLOAD_PLACE) => item.param1 = p1 / 100.0,
        (CommandContent::NavDelay(c), _) => {
            item.param1 = c.seconds;
            item.param2 = f32::from(c.hour_utc);
            item.param3 = f32::from(c.min_utc);
            item.param4 = f32::from(c.sec_utc);
        }
        (CommandContent::SetYawSpeed(c), _) => {
            item.param1 = c.angle_deg;
            item.param2 = c.speed;
            item.param3 = f32::from(c.relative_angle);
        }
        (CommandContent::AltitudeWait(c), _) => {
            item.param1 = c.altitude;
            item.param2 = c.descent_rate;
            item.param3 = f32::from(c.wiggle_time);
        }
        (CommandContent::Delay(c), _) => item.param1 = c.seconds,
        (CommandContent::Distance(c), _) => item.param1 = c.meters,
        (CommandContent::Yaw(c), _) => {
            item.param1 = c.angle_deg;
            item.param2 = c.turn_rate_dps;
            item.param3 = f32::from(c.direction);
            item.param4 = f32::from(c.relative_angle);
        }
        (CommandContent::Jump(c), _) => {
            item.param1 = f32::from(c.target);
            if cmd.id != MAV_CMD_JUMP_TAG {
                item.param2 = f32::from(c.num_times);
            }
        }
        (CommandContent::Speed(c), _) => {
            item.param1 = f32::from(c.speed_type);
            item.param2 = c.target_ms;
            item.param3 = c.throttle_pct;
        }
        (CommandContent::Relay(c), _) => {
            item.param1 = f32::from(c.num);
            item.param2 = f32::from(c.state);
        }
        (CommandContent::RepeatRelay(c), _) => {
            item.param1 = f32::from(c.num);
            item.param2 = f32::from(c.repeat_count);
            item.param3 = c.cycle_time;
        }
        (CommandContent::Servo(c), _) => {
            item.param1 = f32::from(c.channel);
            item.param2 = f32::from(c.pwm);
        }
        (CommandContent::RepeatServo(c), _) => {
            item.param1 = f32::from(c.channel);
            item.param2 = f32::from(c.pwm);
            item.param3 = f32::from(c.repeat_count);
            item.param4 = c.cycle_time;
        }
        (CommandContent::DigicamConfigure(c), _) => {
            item.param1 = f32::from(c.shooting_mode);
            item.param2 = f32::from(c.shutter_speed);
            item.param3 = f32::from(c.aperture);
            item.param4 = f32::from(c.iso);
            item.x = i32::from(c.exposure_type);
            item.y = i32::from(c.cmd_id);
            item.z = c.engine_cutoff_time;
        }
        (CommandContent::DigicamControl(c), _) => {
            item.param1 = f32::from(c.session);
            item.param2 = f32::from(c.zoom_pos);
            item.param3 = f32::from(c.zoom_step);
            item.param4 = f32::from(c.focus_lock);
            item.x = i32::from(c.shooting_cmd);
            item.y = i32::from(c.cmd_id);
        }
        (CommandContent::MountControl(c), _) => {
            item.param1 = c.pitch;
            item.param2 = c.roll;
            item.param3 = c.yaw;
        }
        (CommandContent::CamTriggDist(c), _) => {
            item.param1 = c.meters;
            item.param3 = f32::from(c.trigger);
        }
        (CommandContent::Gripper(c), _) => {
            item.param1 = f32::from(c.num);
            item.param2 = f32::from(c.action);
        }
        (CommandContent::GuidedLimits(c), _) => {
            item.param1 = p1;
            item.param2 = c.alt_min;
            item.param3 = c.alt_max;
            item.param4 = c.horiz_max;
        }
        (CommandContent::VtolTransition(c), _) => item.param1 = f32::from(c.target_state),
        (CommandContent::EngineControl(c), _) => {
            item.param1 = if c.start_control { 1.0 } else { 0.0 };
            item.param2 = if c.cold_start { 1.0 } else { 0.0 };
            item.param3 = f32::from(c.height_delay_cm) * 0.01;
            item.param4 = if c.allow_disarmed_start {
                ENGINE_CONTROL_ALLOW_START_WHILE_DISARMED as f32
            } else {
                0.0
            };
        }
        (CommandContent::AuxFunction(c), _) => {
            item.param1 = f32::from(c.function);
            item.param2 = f32::from(c.switchpos);
        }
        (CommandContent::Winch(c), _) => {
            item.param1 = f32::from(c.num);
            item.param2 = f32::from(c.action);
            item.param3 = c.release_length;
            item.param4 = c.release_rate;
        }
        (CommandContent::Scripting(c), _) => {
            item.param1 = p1;
            item.param2 = c.p1;
            item.param3 = c.p2;
            item.param4 = c.p3;
        }
        (CommandContent::NavScriptTime(c), _) => {
            item.param1 = f32::from(c.command);
            item.param2 = f32::from(c.timeout_s);
            item.param3 = c.arg1.to_f32();
            item.param4 = c.arg2.to_f32();
            item.x = i32::from(c.arg3);
            item.y = i32::from(c.arg4);
        }
        (CommandContent::NavAttitudeTime(c), _) => {
            item.param1 = f32::from(c.time_sec);
            item.param2 = f32::from(c.roll_deg);
            item.param3 = f32::from(c.pitch_deg);
            item.param4 = f32::from(c.yaw_deg);
            item.x = i32::from(c.climb_rate);
        }
        (CommandContent::Location(_), MAV_CMD_NAV_RETURN_TO_LAUNCH)
        | (CommandContent::Location(_), MAV_CMD_NAV_VTOL_TAKEOFF)
        | (CommandContent::Location(_), MAV_CMD_DO_LAND_START)
        | (CommandContent::Location(_), MAV_CMD_DO_GO_AROUND)
        | (CommandContent::Location(_), MAV_CMD_DO_RETURN_PATH_START) => {}
        // Commands whose only parameter is p1
        _ => item.param1 = p1,
    }

    if cmd_has_location(cmd.id) {
        item.x = loc.lat;
        item.y = loc.lng;
        item.z = loc.alt as f32 / 100.0;
        item.frame = if loc.terrain_alt() {
            if !loc.relative_alt() {
                return Err(MissionResult::UnsupportedFrame);
            }
            MAV_FRAME_GLOBAL_TERRAIN_ALT
        } else if loc.relative_alt() {
            MAV_FRAME_GLOBAL_RELATIVE_ALT
        } else {
            MAV_FRAME_GLOBAL
        };
    }

    Ok(item)
}
