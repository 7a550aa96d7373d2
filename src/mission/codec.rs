//! Command Record Codec
//!
//! Persisted layout of the mission list:
//!
//! ```text
//! offset 0   version marker  u16 LE (MISSION_VERSION)
//! offset 2   command count   u16 LE (home included)
//! offset 4   record[0]       20 bytes
//! offset 24  record[1]       20 bytes
//! ...
//!
//! record:
//!   [0]      format tag (0 = legacy, 1 = current)
//!   [1..3]   id  u16 LE
//!   [3..5]   p1  u16 LE
//!   [5..20]  payload, layout selected by id
//! ```
//!
//! All multi-byte fields are little-endian. Unused payload bytes are written
//! as zero and ignored on read.

use half::f16;

use super::command::MAV_CMD_NAV_SCRIPT_TIME;
use super::content::*;
use super::error::{MissionError, Result};
use crate::navigation::{Location, LocationFlags};
use crate::platform::StorageAccess;

/// Version marker at the start of the storage region
pub const MISSION_VERSION: u16 = 0x65AE;

/// Bytes before the first record (version + count)
pub const STORAGE_HEADER_SIZE: usize = 4;

/// Record header: format tag, id, p1
pub const RECORD_HEADER_SIZE: usize = 5;

/// Record payload
pub const PAYLOAD_SIZE: usize = 15;

/// Full record
pub const RECORD_SIZE: usize = RECORD_HEADER_SIZE + PAYLOAD_SIZE;

/// Format tag of records written before NAV_SCRIPT_TIME switched to f16 args
pub const FORMAT_LEGACY: u8 = 0;

/// Format tag of records written by this codec
pub const FORMAT_CURRENT: u8 = 1;

const _: () = assert!(ContentKind::MAX_ENCODED_LEN <= PAYLOAD_SIZE);
const _: () = assert!(NavScriptTimeCommand::LEGACY_ENCODED_LEN <= PAYLOAD_SIZE);
const _: () = assert!(RECORD_SIZE == 20);

/// Storage offset of record `index`
pub const fn record_offset(index: u16) -> usize {
    STORAGE_HEADER_SIZE + index as usize * RECORD_SIZE
}

/// Number of records a region of `storage_size` bytes can hold
///
/// Capped one below `CMD_INDEX_NONE` so that every storable index is valid.
pub fn commands_max_for(storage_size: usize) -> u16 {
    let records = storage_size.saturating_sub(STORAGE_HEADER_SIZE) / RECORD_SIZE;
    records.min(usize::from(CMD_INDEX_NONE - 1)) as u16
}

// ============================================================================
// Storage header
// ============================================================================

/// Read the version marker
pub fn read_version<S: StorageAccess>(storage: &S) -> Result<u16> {
    let mut buf = [0u8; 2];
    storage.read(0, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Read the stored command count
pub fn read_count<S: StorageAccess>(storage: &S) -> Result<u16> {
    let mut buf = [0u8; 2];
    storage.read(2, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Write the stored command count
pub fn write_count<S: StorageAccess>(storage: &mut S, count: u16) -> Result<()> {
    storage.write(2, &count.to_le_bytes())?;
    Ok(())
}

/// Write version marker and count in one block
pub fn write_header<S: StorageAccess>(storage: &mut S, count: u16) -> Result<()> {
    let mut buf = [0u8; STORAGE_HEADER_SIZE];
    buf[0..2].copy_from_slice(&MISSION_VERSION.to_le_bytes());
    buf[2..4].copy_from_slice(&count.to_le_bytes());
    storage.write(0, &buf)?;
    Ok(())
}

// ============================================================================
// Records
// ============================================================================

/// Read and decode the record at `index`
///
/// Bounds against the command count are the caller's concern; this only
/// fails on storage errors or undecodable bytes.
pub fn read_record<S: StorageAccess>(storage: &S, index: u16) -> Result<MissionCommand> {
    let mut buf = [0u8; RECORD_SIZE];
    storage.read(record_offset(index), &mut buf)?;
    decode_record(index, &buf)
}

/// Encode and write `cmd` at `index` as one contiguous block
pub fn write_record<S: StorageAccess>(
    storage: &mut S,
    index: u16,
    cmd: &MissionCommand,
) -> Result<()> {
    let buf = encode_record(cmd)?;
    storage.write(record_offset(index), &buf)?;
    Ok(())
}

/// Encode a command into its record bytes
pub fn encode_record(cmd: &MissionCommand) -> Result<[u8; RECORD_SIZE]> {
    if !cmd.content_matches_id() {
        return Err(MissionError::InvalidCommand);
    }

    let mut buf = [0u8; RECORD_SIZE];
    buf[0] = FORMAT_CURRENT;
    buf[1..3].copy_from_slice(&cmd.id.to_le_bytes());
    buf[3..5].copy_from_slice(&cmd.p1.to_le_bytes());

    let mut w = PayloadWriter::new(&mut buf[RECORD_HEADER_SIZE..]);
    encode_payload(&mut w, cmd);
    Ok(buf)
}

/// Decode record bytes read from `index`
pub fn decode_record(index: u16, buf: &[u8; RECORD_SIZE]) -> Result<MissionCommand> {
    let tag = buf[0];
    let id = u16::from_le_bytes([buf[1], buf[2]]);
    let p1 = u16::from_le_bytes([buf[3], buf[4]]);

    if tag != FORMAT_LEGACY && tag != FORMAT_CURRENT {
        return Err(MissionError::Corrupt);
    }
    let kind = ContentKind::for_command(id).ok_or(MissionError::Corrupt)?;

    let mut r = PayloadReader::new(&buf[RECORD_HEADER_SIZE..]);
    let mut type_specific_bits = 0;
    let content = if tag == FORMAT_LEGACY && id == MAV_CMD_NAV_SCRIPT_TIME {
        CommandContent::NavScriptTime(decode_legacy_script_time(&mut r))
    } else {
        decode_payload(&mut r, kind, &mut type_specific_bits)
    };

    Ok(MissionCommand {
        index,
        id,
        p1,
        content,
        type_specific_bits,
    })
}

/// Legacy NAV_SCRIPT_TIME: command, timeout, two f32 arguments
fn decode_legacy_script_time(r: &mut PayloadReader<'_>) -> NavScriptTimeCommand {
    let command = r.u8();
    let timeout_s = r.u8();
    let arg1 = r.f32();
    let arg2 = r.f32();
    NavScriptTimeCommand {
        command,
        timeout_s,
        arg1: f16::from_f32(arg1),
        arg2: f16::from_f32(arg2),
        arg3: 0,
        arg4: 0,
    }
}

/// Legacy NAV_SCRIPT_TIME record bytes, as older firmware wrote them
pub fn encode_legacy_script_time(
    p1: u16,
    command: u8,
    timeout_s: u8,
    arg1: f32,
    arg2: f32,
) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0] = FORMAT_LEGACY;
    buf[1..3].copy_from_slice(&MAV_CMD_NAV_SCRIPT_TIME.to_le_bytes());
    buf[3..5].copy_from_slice(&p1.to_le_bytes());
    let mut w = PayloadWriter::new(&mut buf[RECORD_HEADER_SIZE..]);
    w.u8(command);
    w.u8(timeout_s);
    w.f32(arg1);
    w.f32(arg2);
    buf
}

fn encode_payload(w: &mut PayloadWriter<'_>, cmd: &MissionCommand) {
    match &cmd.content {
        CommandContent::Empty => {}
        CommandContent::Location(loc) => {
            w.u8(loc.flags.bits());
            w.i32(loc.alt);
            w.i32(loc.lat);
            w.i32(loc.lng);
            w.u8(cmd.type_specific_bits);
        }
        CommandContent::Jump(c) => {
            w.u16(c.target);
            w.i16(c.num_times);
        }
        CommandContent::Delay(c) => w.f32(c.seconds),
        CommandContent::Distance(c) => w.f32(c.meters),
        CommandContent::Yaw(c) => {
            w.f32(c.angle_deg);
            w.f32(c.turn_rate_dps);
            w.i8(c.direction);
            w.u8(c.relative_angle);
        }
        CommandContent::Speed(c) => {
            w.u8(c.speed_type);
            w.f32(c.target_ms);
            w.f32(c.throttle_pct);
        }
        CommandContent::Relay(c) => {
            w.u8(c.num);
            w.u8(c.state);
        }
        CommandContent::RepeatRelay(c) => {
            w.u8(c.num);
            w.i16(c.repeat_count);
            w.f32(c.cycle_time);
        }
        CommandContent::Servo(c) => {
            w.u16(c.channel);
            w.u16(c.pwm);
        }
        CommandContent::RepeatServo(c) => {
            w.u16(c.channel);
            w.u16(c.pwm);
            w.i16(c.repeat_count);
            w.f32(c.cycle_time);
        }
        CommandContent::MountControl(c) => {
            w.f32(c.pitch);
            w.f32(c.roll);
            w.f32(c.yaw);
        }
        CommandContent::DigicamConfigure(c) => {
            w.u8(c.shooting_mode);
            w.u16(c.shutter_speed);
            w.u8(c.aperture);
            w.u16(c.iso);
            w.u8(c.exposure_type);
            w.u8(c.cmd_id);
            w.f32(c.engine_cutoff_time);
        }
        CommandContent::DigicamControl(c) => {
            w.u8(c.session);
            w.u8(c.zoom_pos);
            w.i8(c.zoom_step);
            w.u8(c.focus_lock);
            w.u8(c.shooting_cmd);
            w.u8(c.cmd_id);
        }
        CommandContent::CamTriggDist(c) => {
            w.f32(c.meters);
            w.u8(c.trigger);
        }
        CommandContent::Gripper(c) => {
            w.u8(c.num);
            w.u8(c.action);
        }
        CommandContent::AuxFunction(c) => {
            w.u16(c.function);
            w.u8(c.switchpos);
        }
        CommandContent::GuidedLimits(c) => {
            w.f32(c.alt_min);
            w.f32(c.alt_max);
            w.f32(c.horiz_max);
        }
        CommandContent::AltitudeWait(c) => {
            w.f32(c.altitude);
            w.f32(c.descent_rate);
            w.u8(c.wiggle_time);
        }
        CommandContent::VtolTransition(c) => w.u8(c.target_state),
        CommandContent::EngineControl(c) => {
            w.bool(c.start_control);
            w.bool(c.cold_start);
            w.u16(c.height_delay_cm);
            w.bool(c.allow_disarmed_start);
        }
        CommandContent::NavDelay(c) => {
            w.f32(c.seconds);
            w.i8(c.hour_utc);
            w.i8(c.min_utc);
            w.i8(c.sec_utc);
        }
        CommandContent::SetYawSpeed(c) => {
            w.f32(c.angle_deg);
            w.f32(c.speed);
            w.u8(c.relative_angle);
        }
        CommandContent::Winch(c) => {
            w.u8(c.num);
            w.u8(c.action);
            w.f32(c.release_length);
            w.f32(c.release_rate);
        }
        CommandContent::Scripting(c) => {
            w.f32(c.p1);
            w.f32(c.p2);
            w.f32(c.p3);
        }
        CommandContent::NavScriptTime(c) => {
            w.u8(c.command);
            w.u8(c.timeout_s);
            w.f16(c.arg1);
            w.f16(c.arg2);
            w.i16(c.arg3);
            w.i16(c.arg4);
        }
        CommandContent::NavAttitudeTime(c) => {
            w.u16(c.time_sec);
            w.i16(c.roll_deg);
            w.i8(c.pitch_deg);
            w.i16(c.yaw_deg);
            w.i16(c.climb_rate);
        }
    }
}

fn decode_payload(
    r: &mut PayloadReader<'_>,
    kind: ContentKind,
    type_specific_bits: &mut u8,
) -> CommandContent {
    match kind {
        ContentKind::Empty => CommandContent::Empty,
        ContentKind::Location => {
            let flags = LocationFlags::from_bits_truncate(r.u8());
            let alt = r.i32();
            let lat = r.i32();
            let lng = r.i32();
            *type_specific_bits = r.u8();
            CommandContent::Location(Location {
                lat,
                lng,
                alt,
                flags,
            })
        }
        ContentKind::Jump => CommandContent::Jump(JumpCommand {
            target: r.u16(),
            num_times: r.i16(),
        }),
        ContentKind::Delay => CommandContent::Delay(ConditionDelay { seconds: r.f32() }),
        ContentKind::Distance => CommandContent::Distance(ConditionDistance { meters: r.f32() }),
        ContentKind::Yaw => CommandContent::Yaw(YawCommand {
            angle_deg: r.f32(),
            turn_rate_dps: r.f32(),
            direction: r.i8(),
            relative_angle: r.u8(),
        }),
        ContentKind::Speed => CommandContent::Speed(ChangeSpeedCommand {
            speed_type: r.u8(),
            target_ms: r.f32(),
            throttle_pct: r.f32(),
        }),
        ContentKind::Relay => CommandContent::Relay(SetRelayCommand {
            num: r.u8(),
            state: r.u8(),
        }),
        ContentKind::RepeatRelay => CommandContent::RepeatRelay(RepeatRelayCommand {
            num: r.u8(),
            repeat_count: r.i16(),
            cycle_time: r.f32(),
        }),
        ContentKind::Servo => CommandContent::Servo(SetServoCommand {
            channel: r.u16(),
            pwm: r.u16(),
        }),
        ContentKind::RepeatServo => CommandContent::RepeatServo(RepeatServoCommand {
            channel: r.u16(),
            pwm: r.u16(),
            repeat_count: r.i16(),
            cycle_time: r.f32(),
        }),
        ContentKind::MountControl => CommandContent::MountControl(MountControlCommand {
            pitch: r.f32(),
            roll: r.f32(),
            yaw: r.f32(),
        }),
        ContentKind::DigicamConfigure => CommandContent::DigicamConfigure(DigicamConfigureCommand {
            shooting_mode: r.u8(),
            shutter_speed: r.u16(),
            aperture: r.u8(),
            iso: r.u16(),
            exposure_type: r.u8(),
            cmd_id: r.u8(),
            engine_cutoff_time: r.f32(),
        }),
        ContentKind::DigicamControl => CommandContent::DigicamControl(DigicamControlCommand {
            session: r.u8(),
            zoom_pos: r.u8(),
            zoom_step: r.i8(),
            focus_lock: r.u8(),
            shooting_cmd: r.u8(),
            cmd_id: r.u8(),
        }),
        ContentKind::CamTriggDist => CommandContent::CamTriggDist(CamTriggDistCommand {
            meters: r.f32(),
            trigger: r.u8(),
        }),
        ContentKind::Gripper => CommandContent::Gripper(GripperCommand {
            num: r.u8(),
            action: r.u8(),
        }),
        ContentKind::AuxFunction => CommandContent::AuxFunction(AuxFunctionCommand {
            function: r.u16(),
            switchpos: r.u8(),
        }),
        ContentKind::GuidedLimits => CommandContent::GuidedLimits(GuidedLimitsCommand {
            alt_min: r.f32(),
            alt_max: r.f32(),
            horiz_max: r.f32(),
        }),
        ContentKind::AltitudeWait => CommandContent::AltitudeWait(AltitudeWaitCommand {
            altitude: r.f32(),
            descent_rate: r.f32(),
            wiggle_time: r.u8(),
        }),
        ContentKind::VtolTransition => CommandContent::VtolTransition(VtolTransitionCommand {
            target_state: r.u8(),
        }),
        ContentKind::EngineControl => CommandContent::EngineControl(EngineControlCommand {
            start_control: r.bool(),
            cold_start: r.bool(),
            height_delay_cm: r.u16(),
            allow_disarmed_start: r.bool(),
        }),
        ContentKind::NavDelay => CommandContent::NavDelay(NavDelayCommand {
            seconds: r.f32(),
            hour_utc: r.i8(),
            min_utc: r.i8(),
            sec_utc: r.i8(),
        }),
        ContentKind::SetYawSpeed => CommandContent::SetYawSpeed(SetYawSpeedCommand {
            angle_deg: r.f32(),
            speed: r.f32(),
            relative_angle: r.u8(),
        }),
        ContentKind::Winch => CommandContent::Winch(WinchCommand {
            num: r.u8(),
            action: r.u8(),
            release_length: r.f32(),
            release_rate: r.f32(),
        }),
        ContentKind::Scripting => CommandContent::Scripting(ScriptingCommand {
            p1: r.f32(),
            p2: r.f32(),
            p3: r.f32(),
        }),
        ContentKind::NavScriptTime => CommandContent::NavScriptTime(NavScriptTimeCommand {
            command: r.u8(),
            timeout_s: r.u8(),
            arg1: r.f16(),
            arg2: r.f16(),
            arg3: r.i16(),
            arg4: r.i16(),
        }),
        ContentKind::NavAttitudeTime => CommandContent::NavAttitudeTime(NavAttitudeTimeCommand {
            time_sec: r.u16(),
            roll_deg: r.i16(),
            pitch_deg: r.i8(),
            yaw_deg: r.i16(),
            climb_rate: r.i16(),
        }),
    }
}

// ============================================================================
// Payload cursors
// ============================================================================

/// Little-endian writer over a payload slice
///
/// Every layout is statically checked to fit, so writes never run past the
/// end of the slice.
struct PayloadWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> PayloadWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn put<const N: usize>(&mut self, bytes: [u8; N]) {
        self.buf[self.pos..self.pos + N].copy_from_slice(&bytes);
        self.pos += N;
    }

    fn u8(&mut self, v: u8) {
        self.put([v]);
    }

    fn i8(&mut self, v: i8) {
        self.put(v.to_le_bytes());
    }

    fn bool(&mut self, v: bool) {
        self.put([u8::from(v)]);
    }

    fn u16(&mut self, v: u16) {
        self.put(v.to_le_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.put(v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.put(v.to_le_bytes());
    }

    fn f32(&mut self, v: f32) {
        self.put(v.to_le_bytes());
    }

    fn f16(&mut self, v: f16) {
        self.put(v.to_le_bytes());
    }
}

/// Little-endian reader over a payload slice
struct PayloadReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn i8(&mut self) -> i8 {
        i8::from_le_bytes(self.take())
    }

    fn bool(&mut self) -> bool {
        self.u8() != 0
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.take())
    }

    fn f16(&mut self) -> f16 {
        f16::from_le_bytes(self.take())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
