//! Geographic location type
//!
//! Latitude/longitude are stored as degrees * 1e7 and altitude in
//! centimeters, matching the packed form used in mission storage. Distances
//! use a flat-earth approximation which is accurate to well under a meter
//! over the leg lengths a mission contains.

use bitflags::bitflags;
use libm::{atan2f, cosf, roundf, sqrtf};

/// Meters per 1e-7 degree of latitude
pub const LOCATION_SCALING_FACTOR: f32 = 0.011_131_884;

/// 1e-7 degrees of latitude per meter
pub const LOCATION_SCALING_FACTOR_INV: f32 = 89.832_05;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

bitflags! {
    /// Altitude frame and loiter modifiers packed alongside a location
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LocationFlags: u8 {
        /// Altitude is relative to home
        const RELATIVE_ALT = 0b0000_0001;
        /// Loiter counter-clockwise
        const LOITER_CCW = 0b0000_0100;
        /// Altitude is above terrain
        const TERRAIN_ALT = 0b0000_1000;
        /// Altitude is relative to the EKF origin
        const ORIGIN_ALT = 0b0001_0000;
        /// Cross-track from the tangent exit point rather than the center
        const LOITER_XTRACK = 0b0010_0000;
    }
}

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Latitude in degrees * 1e7
    pub lat: i32,
    /// Longitude in degrees * 1e7
    pub lng: i32,
    /// Altitude in centimeters
    pub alt: i32,
    /// Frame and loiter flags
    pub flags: LocationFlags,
}

impl Default for Location {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Location {
    /// Create an absolute-altitude location
    pub const fn new(lat: i32, lng: i32, alt_cm: i32) -> Self {
        Self {
            lat,
            lng,
            alt: alt_cm,
            flags: LocationFlags::empty(),
        }
    }

    /// Builder: set flags
    pub const fn with_flags(mut self, flags: LocationFlags) -> Self {
        self.flags = flags;
        self
    }

    /// True when latitude and longitude are both unset
    pub fn is_zero(&self) -> bool {
        self.lat == 0 && self.lng == 0
    }

    /// Altitude is relative to home
    pub fn relative_alt(&self) -> bool {
        self.flags.contains(LocationFlags::RELATIVE_ALT)
    }

    /// Altitude is above terrain
    pub fn terrain_alt(&self) -> bool {
        self.flags.contains(LocationFlags::TERRAIN_ALT)
    }

    /// Loiter direction is counter-clockwise
    pub fn loiter_ccw(&self) -> bool {
        self.flags.contains(LocationFlags::LOITER_CCW)
    }

    /// Loiter exits along the tangent
    pub fn loiter_xtrack(&self) -> bool {
        self.flags.contains(LocationFlags::LOITER_XTRACK)
    }

    /// North/east offset in meters from `self` to `other`
    pub fn distance_ne_to(&self, other: &Location) -> (f32, f32) {
        let mid_lat = ((i64::from(self.lat) + i64::from(other.lat)) / 2) as i32;
        let d_lat = (i64::from(other.lat) - i64::from(self.lat)) as f32;
        let d_lng = wrap_longitude(i64::from(other.lng) - i64::from(self.lng)) as f32;
        (
            d_lat * LOCATION_SCALING_FACTOR,
            d_lng * LOCATION_SCALING_FACTOR * longitude_scale(mid_lat),
        )
    }

    /// Horizontal distance in meters
    pub fn distance_to(&self, other: &Location) -> f32 {
        let (north, east) = self.distance_ne_to(other);
        sqrtf(north * north + east * east)
    }

    /// Bearing to `other` in centidegrees (0..36000)
    pub fn bearing_cd_to(&self, other: &Location) -> i32 {
        let (north, east) = self.distance_ne_to(other);
        let bearing = atan2f(east, north) * RAD_TO_DEG;
        let bearing_cd = roundf(bearing * 100.0) as i32;
        bearing_cd.rem_euclid(36000)
    }

    /// Location displaced by the given north/east distances in meters
    ///
    /// Altitude and flags are kept.
    pub fn offset_ne(&self, north_m: f32, east_m: f32) -> Location {
        let d_lat = roundf(north_m * LOCATION_SCALING_FACTOR_INV) as i64;
        let lat = (i64::from(self.lat) + d_lat).clamp(-900_000_000, 900_000_000) as i32;
        let d_lng = roundf(east_m * LOCATION_SCALING_FACTOR_INV / longitude_scale(lat)) as i64;
        let lng = wrap_longitude(i64::from(self.lng) + d_lng) as i32;
        Location { lat, lng, ..*self }
    }

    /// Point at fraction `t` (0..=1) of the way from `self` to `other`
    ///
    /// Altitude is interpolated linearly; flags are taken from `self`.
    pub fn interpolate_to(&self, other: &Location, t: f32) -> Location {
        let t = t.clamp(0.0, 1.0);
        let (north, east) = self.distance_ne_to(other);
        let mut loc = self.offset_ne(north * t, east * t);
        let d_alt = (i64::from(other.alt) - i64::from(self.alt)) as f32;
        loc.alt = (i64::from(self.alt) + roundf(d_alt * t) as i64) as i32;
        loc
    }

    /// Distance in meters from `self` to the closest point of segment `start`-`end`
    pub fn distance_to_segment(&self, start: &Location, end: &Location) -> f32 {
        let (seg_n, seg_e) = start.distance_ne_to(end);
        let (pos_n, pos_e) = start.distance_ne_to(self);
        let seg_len_sq = seg_n * seg_n + seg_e * seg_e;
        if seg_len_sq <= f32::EPSILON {
            return sqrtf(pos_n * pos_n + pos_e * pos_e);
        }
        let t = ((pos_n * seg_n + pos_e * seg_e) / seg_len_sq).clamp(0.0, 1.0);
        let d_n = pos_n - seg_n * t;
        let d_e = pos_e - seg_e * t;
        sqrtf(d_n * d_n + d_e * d_e)
    }
}

/// Cosine of latitude, floored to avoid blow-up near the poles
fn longitude_scale(lat: i32) -> f32 {
    let scale = cosf(lat as f32 * 1.0e-7 * DEG_TO_RAD);
    scale.max(0.01)
}

/// Wrap a longitude (or longitude delta) in 1e-7 degrees into -180..180
fn wrap_longitude(lng: i64) -> i64 {
    const FULL: i64 = 3_600_000_000;
    const HALF: i64 = 1_800_000_000;
    let wrapped = (lng + HALF).rem_euclid(FULL) - HALF;
    if wrapped == -HALF {
        HALF
    } else {
        wrapped
    }
}
