//! Pure field converters used by the field tables.
//!
//! Converters never fail: numeric converters degrade to NaN (decimal) or 0
//! (integer) on unparsable input, so a single bad field never discards the
//! rest of an otherwise well-formed sentence.

use time::{Date, PrimitiveDateTime, Time};

/// Meters per second in one knot.
pub const KNOTS_TO_MPS: f64 = 0.514444444444;

/// Parses a decimal field, NaN when empty or unparsable.
pub fn safe_f64(field: &str) -> f64 {
    field.parse().unwrap_or(f64::NAN)
}

/// Parses an integer field, 0 when empty or unparsable.
pub fn safe_i32(field: &str) -> i32 {
    field.parse().unwrap_or(0)
}

/// `ddmm.mmmm` latitude to decimal degrees.
///
/// Unsigned; the hemisphere sign is applied during translation from the
/// paired `N`/`S` field.
pub fn latitude_dmm(field: &str) -> f64 {
    safe_f64(field.get(..2).unwrap_or("")) + safe_f64(field.get(2..).unwrap_or("")) / 60.0
}

/// `dddmm.mmmm` longitude to decimal degrees (unsigned, as above).
pub fn longitude_dmm(field: &str) -> f64 {
    safe_f64(field.get(..3).unwrap_or("")) + safe_f64(field.get(3..).unwrap_or("")) / 60.0
}

/// `hhmmss[.sss]` time of day to Unix epoch seconds on the supplied UTC date.
///
/// NaN when any of the three two-digit groups is missing or unparsable.
/// The date comes from the decode-time clock, not the sentence, so a
/// sentence stamped just before UTC midnight but decoded just after it is
/// attributed to the wrong calendar day.
pub fn day_seconds(field: &str, date: Date) -> f64 {
    let (Some(hours), Some(minutes), Some(seconds)) =
        (field.get(0..2), field.get(2..4), field.get(4..6))
    else {
        return f64::NAN;
    };

    let (Ok(hours), Ok(minutes), Ok(seconds)) = (
        hours.parse::<u8>(),
        minutes.parse::<u8>(),
        seconds.parse::<u8>(),
    ) else {
        return f64::NAN;
    };

    let Ok(time) = Time::from_hms(hours, minutes, seconds) else {
        return f64::NAN;
    };

    PrimitiveDateTime::new(date, time).assume_utc().unix_timestamp() as f64
}

/// `"A"` means valid; anything else (including `"V"`) does not.
pub fn status_flag(field: &str) -> bool {
    field == "A"
}

/// Speed in knots to meters per second.
pub fn knots_to_mps(field: &str) -> f64 {
    safe_f64(field) * KNOTS_TO_MPS
}

/// Angle in degrees to radians.
pub fn degrees_to_radians(field: &str) -> f64 {
    safe_f64(field).to_radians()
}
