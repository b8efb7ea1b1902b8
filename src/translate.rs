//! Sentence-type-specific rules turning decoded fields into navigation
//! records.
//!
//! Translation never fails: missing or NaN inputs flow into the output
//! records, except where a rule explicitly gates emission (the attitude
//! fix-quality gate, the heading presence gate, the velocity validity gate).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AttitudeReading, DecodedFields, FixStatus, HeadingReading, Header, NavRecord, NavSatFix,
    PositionCovariance, RateOfTurn, SentenceType, SpeedOverGround, TimeReference, Vector3,
    VelocityGlobal, VelocityLocal,
};

/// Decoding-time configuration, owned by the caller and passed into every
/// translate call. Never ambient state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverConfig {
    /// When set, RMC instead of GGA is the authoritative fix source.
    pub use_rmc_fix: bool,
    /// Label for time-reference records; the frame id when unset.
    pub time_ref_source: Option<String>,
}

/// Translates a decoded sentence into zero or more navigation records.
///
/// A type with no translation rule produces an empty batch; that is not an
/// error, the sentence simply carried no actionable data.
pub fn translate(
    sentence_type: SentenceType,
    fields: &DecodedFields,
    config: &DriverConfig,
    header: &Header,
) -> Vec<NavRecord> {
    match sentence_type {
        SentenceType::Gga => translate_gga(fields, config, header),
        SentenceType::Rmc => translate_rmc(fields, config, header),
        SentenceType::Hdt => translate_hdt(fields, header),
        SentenceType::Rot => translate_rot(fields, header),
        SentenceType::Vtg => translate_vtg(fields, header),
        SentenceType::Avr => translate_avr(fields, header),
        // decoded for diagnostics only; nothing to publish
        SentenceType::Pjt | SentenceType::Llq => Vec::new(),
    }
}

fn signed_position(fields: &DecodedFields) -> (f64, f64) {
    let mut latitude = fields.float("latitude");
    if fields.text("latitude_direction") == "S" {
        latitude = -latitude;
    }

    let mut longitude = fields.float("longitude");
    if fields.text("longitude_direction") == "W" {
        longitude = -longitude;
    }

    (latitude, longitude)
}

fn time_reference(
    fields: &DecodedFields,
    config: &DriverConfig,
    header: &Header,
) -> Option<NavRecord> {
    let seconds = fields.float("utc_time");
    if seconds.is_nan() {
        return None;
    }
    let time_ref = OffsetDateTime::from_unix_timestamp(seconds as i64).ok()?;

    Some(NavRecord::TimeReference(TimeReference {
        header: header.clone(),
        time_ref,
        source: config
            .time_ref_source
            .clone()
            .unwrap_or_else(|| header.frame_id.clone()),
    }))
}

fn translate_gga(fields: &DecodedFields, config: &DriverConfig, header: &Header) -> Vec<NavRecord> {
    // GGA is the fix source unless the caller prefers RMC
    if config.use_rmc_fix {
        return Vec::new();
    }

    let (latitude, longitude) = signed_position(fields);
    let hdop = fields.float("hdop");

    let fix = NavSatFix {
        header: header.clone(),
        status: FixStatus::from_gga_quality(fields.int("fix_type")),
        latitude,
        longitude,
        // GGA altitude is above the ellipsoid; adjust by the geoid separation
        altitude: fields.float("altitude") + fields.float("mean_sea_level"),
        covariance: PositionCovariance::Approximated {
            horizontal: hdop * hdop,
            vertical: (2.0 * hdop) * (2.0 * hdop),
        },
    };

    let mut records = vec![NavRecord::Fix(fix)];
    records.extend(time_reference(fields, config, header));
    records
}

fn translate_rmc(fields: &DecodedFields, config: &DriverConfig, header: &Header) -> Vec<NavRecord> {
    let mut records = Vec::new();
    let fix_valid = fields.flag("fix_valid");

    if config.use_rmc_fix {
        let (latitude, longitude) = signed_position(fields);

        records.push(NavRecord::Fix(NavSatFix {
            header: header.clone(),
            status: if fix_valid {
                FixStatus::Fix
            } else {
                FixStatus::NoFix
            },
            latitude,
            longitude,
            // RMC carries no altitude
            altitude: f64::NAN,
            covariance: PositionCovariance::Unknown,
        }));
        records.extend(time_reference(fields, config, header));
    }

    // RMC is the only velocity source, published regardless of the fix
    // source selection
    if fix_valid {
        let speed = fields.float("speed");
        let course = fields.float("true_course");

        records.push(NavRecord::VelocityGlobal(VelocityGlobal {
            header: header.clone(),
            vector: Vector3 {
                x: speed * course.sin(),
                y: speed * course.cos(),
                z: 0.0,
            },
        }));
        records.push(NavRecord::VelocityLocal(VelocityLocal {
            header: header.clone(),
            linear: Vector3 {
                x: speed,
                ..Vector3::default()
            },
        }));
    }

    records
}

fn translate_hdt(fields: &DecodedFields, header: &Header) -> Vec<NavRecord> {
    let degrees = fields.float("heading_north");
    // zero is a legitimate heading; only an absent field suppresses the record
    if degrees.is_nan() {
        return Vec::new();
    }

    vec![NavRecord::Heading(HeadingReading {
        header: header.clone(),
        degrees,
    })]
}

fn translate_rot(fields: &DecodedFields, header: &Header) -> Vec<NavRecord> {
    let rate = f64::from(fields.int("rate"));

    vec![NavRecord::RateOfTurn(RateOfTurn {
        header: header.clone(),
        angular: Vector3 {
            z: rate * (std::f64::consts::PI / 180.0) * 60.0,
            ..Vector3::default()
        },
    })]
}

fn translate_vtg(fields: &DecodedFields, header: &Header) -> Vec<NavRecord> {
    vec![NavRecord::SpeedOverGround(SpeedOverGround {
        header: header.clone(),
        linear: Vector3 {
            x: fields.float("speed_kph") / 360.0 * 1000.0,
            ..Vector3::default()
        },
    })]
}

fn translate_avr(fields: &DecodedFields, header: &Header) -> Vec<NavRecord> {
    if fields.int("fix_type") <= 0 {
        return Vec::new();
    }

    vec![NavRecord::Attitude(AttitudeReading {
        header: header.clone(),
        angular: Vector3 {
            x: fields.float("roll"),
            y: fields.float("pitch"),
            z: fields.float("yaw"),
        },
    })]
}
