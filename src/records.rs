//! Typed navigation records produced by sentence translation.
//!
//! Every record carries the [`Header`] the caller supplied for the decode
//! call, unmodified, so the publishing side can route and label records
//! without the core knowing about topics or frame prefixes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Logical timestamp and frame context supplied by the caller.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Decode-time stamp; also supplies the UTC date for time-of-day fields.
    pub stamp: OffsetDateTime,
    /// Coordinate frame the records belong to, owned by the caller.
    pub frame_id: String,
}

/// Fix quality reported by the receiver.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    /// No usable fix.
    NoFix,
    /// Unaugmented satellite fix.
    Fix,
    /// Fix with satellite-based augmentation.
    SbasFix,
    /// Fix with ground-based augmentation.
    GbasFix,
}

impl FixStatus {
    /// Maps a GGA quality indicator to a fix status.
    ///
    /// Quality 9 is the NovAtel OEM4 convention for reporting a WAAS (SBAS)
    /// fix; any unlisted code is treated as no fix.
    pub fn from_gga_quality(quality: i32) -> Self {
        match quality {
            0 => Self::NoFix,
            1 => Self::Fix,
            2 => Self::SbasFix,
            4 | 5 => Self::GbasFix,
            9 => Self::SbasFix,
            _ => Self::NoFix,
        }
    }
}

/// Position error representation attached to a fix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionCovariance {
    /// No error estimate available.
    Unknown,
    /// Diagonal approximation derived from HDOP: horizontal variance is
    /// hdop², vertical is (2·hdop)². A rough error proxy, not a true
    /// covariance.
    Approximated {
        /// Variance of the horizontal components, in m².
        horizontal: f64,
        /// Variance of the vertical component, in m².
        vertical: f64,
    },
}

/// A three-component vector.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A satellite position fix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct NavSatFix {
    pub header: Header,
    pub status: FixStatus,
    /// Signed decimal degrees, north positive.
    pub latitude: f64,
    /// Signed decimal degrees, east positive.
    pub longitude: f64,
    /// Meters above the ellipsoid, geoid separation applied; NaN when the
    /// sentence carries no altitude.
    pub altitude: f64,
    pub covariance: PositionCovariance,
}

/// Ground velocity in the global frame, derived from RMC speed and course.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityGlobal {
    pub header: Header,
    /// East (x) and north (y) components in m/s.
    pub vector: Vector3,
}

/// Forward speed in the body frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityLocal {
    pub header: Header,
    /// Forward (x) speed in m/s; y and z are zero.
    pub linear: Vector3,
}

/// True heading reported by a heading sensor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingReading {
    pub header: Header,
    /// Degrees clockwise from true north.
    pub degrees: f64,
}

/// Rate of turn around the vertical axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RateOfTurn {
    pub header: Header,
    /// Angular rate; only z is populated.
    pub angular: Vector3,
}

/// Speed over ground from a course/speed sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedOverGround {
    pub header: Header,
    /// Forward (x) speed; y and z are zero.
    pub linear: Vector3,
}

/// Multi-antenna attitude reading.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AttitudeReading {
    pub header: Header,
    /// Roll (x), pitch (y) and yaw (z), in degrees.
    pub angular: Vector3,
}

/// Receiver time, anchored to the supplied UTC date.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TimeReference {
    pub header: Header,
    /// Time of day reported by the receiver, on the caller-supplied date.
    pub time_ref: OffsetDateTime,
    /// Label identifying the time source; defaults to the frame id.
    pub source: String,
}

/// One record emitted by sentence translation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NavRecord {
    Fix(NavSatFix),
    VelocityGlobal(VelocityGlobal),
    VelocityLocal(VelocityLocal),
    Heading(HeadingReading),
    RateOfTurn(RateOfTurn),
    SpeedOverGround(SpeedOverGround),
    Attitude(AttitudeReading),
    TimeReference(TimeReference),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gga_quality_mapping() {
        assert_eq!(FixStatus::from_gga_quality(0), FixStatus::NoFix);
        assert_eq!(FixStatus::from_gga_quality(1), FixStatus::Fix);
        assert_eq!(FixStatus::from_gga_quality(2), FixStatus::SbasFix);
        assert_eq!(FixStatus::from_gga_quality(4), FixStatus::GbasFix);
        assert_eq!(FixStatus::from_gga_quality(5), FixStatus::GbasFix);
        assert_eq!(FixStatus::from_gga_quality(9), FixStatus::SbasFix);
        assert_eq!(FixStatus::from_gga_quality(3), FixStatus::NoFix);
        assert_eq!(FixStatus::from_gga_quality(7), FixStatus::NoFix);
        assert_eq!(FixStatus::from_gga_quality(-1), FixStatus::NoFix);
    }
}
