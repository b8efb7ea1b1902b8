//! # NMEA navigation sentence decoder
//!
//! Decodes ASCII NMEA 0183 sentences from GNSS/inertial receivers into typed
//! navigation records: position fix, velocity, heading, rate of turn, ground
//! speed, attitude and time reference.
//!
//! The pipeline for one sentence is:
//!
//! ```text
//! raw text -> framing (checksum) -> classify (type) -> decode (fields) -> translate (records)
//! ```
//!
//! Each stage is a pure function; the only inputs besides the sentence text
//! are the caller-supplied timestamp (whose UTC date anchors time-of-day
//! fields) and an immutable [`DriverConfig`]. Rejected sentences come back as
//! [`Reject`] values and are always recoverable: log, skip, read the next
//! line.
//!
//! ## Usage
//!
//! ```rust
//! use nmea_navsat::{DriverConfig, NavRecord, decode_sentence};
//! use time::macros::datetime;
//!
//! let records = decode_sentence(
//!     "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
//!     "gps",
//!     datetime!(2017-03-15 12:36:00 UTC),
//!     &DriverConfig::default(),
//! )
//! .unwrap();
//!
//! assert!(matches!(records[0], NavRecord::Fix(_)));
//! ```

pub mod classify;
pub mod convert;
pub mod driver;
pub mod error;
pub mod fields;
pub mod framing;
pub mod records;
pub mod translate;

pub use classify::{ClassifiedSentence, SentenceType, classify};
pub use driver::{NavSatDriver, decode_sentence};
pub use error::Reject;
pub use fields::{Converter, DecodedFields, FieldSpec, FieldValue, decode, field_table};
pub use framing::{Frame, frame, validate_checksum};
pub use records::{
    AttitudeReading, FixStatus, HeadingReading, Header, NavRecord, NavSatFix, PositionCovariance,
    RateOfTurn, SpeedOverGround, TimeReference, Vector3, VelocityGlobal, VelocityLocal,
};
pub use translate::{DriverConfig, translate};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
