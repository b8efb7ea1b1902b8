//! Table-driven field extraction.
//!
//! Each supported sentence type carries a fixed ordered list of
//! (field name, converter, token index) entries. Decoding reads the token at
//! each index from the comma-split body and applies the converter, producing
//! a named field mapping. Token indices count from the tag token, matching
//! the field numbering in receiver documentation.

use std::collections::BTreeMap;

use time::Date;

use crate::{ClassifiedSentence, Reject, SentenceType, convert};

/// A decoded field value. Floats use NaN for "absent or unparsable", which
/// is data degradation, never an error by itself.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(i32),
    Text(String),
    Flag(bool),
}

/// Per-field type conversion applied to a raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Decimal number, NaN on parse failure.
    Float,
    /// Integer, 0 on parse failure.
    Int,
    /// Token passed through unchanged.
    Text,
    /// `"A"` is valid, anything else is not.
    Flag,
    /// `ddmm.mmmm` to unsigned decimal degrees.
    Latitude,
    /// `dddmm.mmmm` to unsigned decimal degrees.
    Longitude,
    /// `hhmmss` plus the supplied UTC date to epoch seconds.
    UtcTime,
    /// Knots to meters per second.
    KnotsToMps,
    /// Degrees to radians.
    DegreesToRadians,
}

impl Converter {
    fn apply(self, token: &str, date: Date) -> FieldValue {
        match self {
            Self::Float => FieldValue::Float(convert::safe_f64(token)),
            Self::Int => FieldValue::Int(convert::safe_i32(token)),
            Self::Text => FieldValue::Text(token.to_owned()),
            Self::Flag => FieldValue::Flag(convert::status_flag(token)),
            Self::Latitude => FieldValue::Float(convert::latitude_dmm(token)),
            Self::Longitude => FieldValue::Float(convert::longitude_dmm(token)),
            Self::UtcTime => FieldValue::Float(convert::day_seconds(token, date)),
            Self::KnotsToMps => FieldValue::Float(convert::knots_to_mps(token)),
            Self::DegreesToRadians => FieldValue::Float(convert::degrees_to_radians(token)),
        }
    }
}

/// One entry of a sentence field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, unique within its sentence type.
    pub name: &'static str,
    /// Conversion applied to the token.
    pub converter: Converter,
    /// Token index into the comma-split body.
    pub index: usize,
}

const fn field(name: &'static str, converter: Converter, index: usize) -> FieldSpec {
    FieldSpec {
        name,
        converter,
        index,
    }
}

/// GGA - Global Positioning System Fix Data
///
/// ```text
///                                                       11
///          1         2       3 4        5 6 7  8   9  10 |  12 13  14
///          |         |       | |        | | |  |   |   | |   | |   |
///   $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh
/// ```
const GGA_FIELDS: &[FieldSpec] = &[
    field("fix_type", Converter::Int, 6),
    field("latitude", Converter::Latitude, 2),
    field("latitude_direction", Converter::Text, 3),
    field("longitude", Converter::Longitude, 4),
    field("longitude_direction", Converter::Text, 5),
    field("altitude", Converter::Float, 9),
    field("mean_sea_level", Converter::Float, 11),
    field("hdop", Converter::Float, 8),
    field("num_satellites", Converter::Int, 7),
    field("utc_time", Converter::UtcTime, 1),
];

/// RMC - Recommended Minimum Navigation Information
///
/// ```text
///          1         2 3       4 5        6  7   8   9    10 11
///          |         | |       | |        |  |   |   |    |  |
///   $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh
/// ```
const RMC_FIELDS: &[FieldSpec] = &[
    field("utc_time", Converter::UtcTime, 1),
    field("fix_valid", Converter::Flag, 2),
    field("latitude", Converter::Latitude, 3),
    field("latitude_direction", Converter::Text, 4),
    field("longitude", Converter::Longitude, 5),
    field("longitude_direction", Converter::Text, 6),
    field("speed", Converter::KnotsToMps, 7),
    field("true_course", Converter::DegreesToRadians, 8),
];

/// VTG - Track made good and Ground speed
const VTG_FIELDS: &[FieldSpec] = &[
    field("speed_knots", Converter::Float, 5),
    field("speed_kph", Converter::Float, 7),
    field("mode", Converter::Text, 9),
];

/// HDT - Heading, True
const HDT_FIELDS: &[FieldSpec] = &[field("heading_north", Converter::Float, 1)];

/// ROT - Rate Of Turn
const ROT_FIELDS: &[FieldSpec] = &[
    field("rate", Converter::Int, 1),
    field("validity", Converter::Text, 2),
];

/// AVR - Trimble multi-antenna attitude
///
/// ```text
///            1      2      3    4     5    6      7   8    9 10  11
///            |      |      |    |     |    |      |   |    | |   |
///   $PTNLAVR,hhmmss,+yyy.yy,Yaw,+pp.pp,Tilt,+rr.rr,Roll,r.rr,q,p.p,nn*hh
/// ```
const AVR_FIELDS: &[FieldSpec] = &[
    field("yaw", Converter::Float, 2),
    field("pitch", Converter::Float, 4),
    field("roll", Converter::Float, 6),
    field("fix_type", Converter::Int, 9),
    field("pdop", Converter::Float, 10),
    field("num_satellites", Converter::Int, 11),
];

/// PJT - Trimble coordinate system and project name
const PJT_FIELDS: &[FieldSpec] = &[
    field("coordinate_system", Converter::Text, 1),
    field("project_name", Converter::Text, 2),
];

/// LLQ - local grid position and quality
const LLQ_FIELDS: &[FieldSpec] = &[
    field("easting", Converter::Float, 3),
    field("northing", Converter::Float, 5),
    field("fix_type", Converter::Int, 7),
    field("position_quality", Converter::Float, 9),
    field("height", Converter::Float, 10),
    field("utc_time", Converter::UtcTime, 1),
];

/// The fixed field table for a sentence type.
pub fn field_table(sentence_type: SentenceType) -> &'static [FieldSpec] {
    match sentence_type {
        SentenceType::Gga => GGA_FIELDS,
        SentenceType::Rmc => RMC_FIELDS,
        SentenceType::Vtg => VTG_FIELDS,
        SentenceType::Hdt => HDT_FIELDS,
        SentenceType::Rot => ROT_FIELDS,
        SentenceType::Avr => AVR_FIELDS,
        SentenceType::Pjt => PJT_FIELDS,
        SentenceType::Llq => LLQ_FIELDS,
    }
}

/// Named field mapping produced by [`decode`].
///
/// Contains exactly the fields declared in the sentence type's table. The
/// typed accessors return the degraded value (NaN, 0, "", false) when asked
/// for a missing name or a mismatched type, mirroring converter degradation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedFields(BTreeMap<&'static str, FieldValue>);

impl DecodedFields {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn float(&self, name: &str) -> f64 {
        match self.0.get(name) {
            Some(FieldValue::Float(value)) => *value,
            _ => f64::NAN,
        }
    }

    pub fn int(&self, name: &str) -> i32 {
        match self.0.get(name) {
            Some(FieldValue::Int(value)) => *value,
            _ => 0,
        }
    }

    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decodes a classified sentence into its named field mapping.
///
/// `date` is the caller-supplied UTC date used to anchor time-of-day fields.
/// Fails only when the token sequence is shorter than an index in the field
/// table; all per-field conversion problems degrade inside the values.
pub fn decode(sentence: &ClassifiedSentence<'_>, date: Date) -> Result<DecodedFields, Reject> {
    let table = field_table(sentence.sentence_type);
    let mut fields = DecodedFields::default();

    for spec in table {
        let token =
            sentence
                .tokens
                .get(spec.index)
                .copied()
                .ok_or(Reject::TruncatedSentence {
                    field: spec.name,
                    index: spec.index,
                    tokens: sentence.tokens.len(),
                })?;
        fields.0.insert(spec.name, spec.converter.apply(token, date));
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify;
    use time::macros::date;

    fn decoded(body: &str) -> DecodedFields {
        decode(&classify(body).unwrap(), date!(2017 - 03 - 15)).unwrap()
    }

    #[test]
    fn gga_fields() {
        let fields = decoded("GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,");

        assert_eq!(fields.len(), field_table(SentenceType::Gga).len());
        assert_eq!(fields.int("fix_type"), 1);
        assert_eq!(fields.int("num_satellites"), 8);
        assert!((fields.float("latitude") - 48.1173).abs() < 1e-6);
        assert_eq!(fields.text("latitude_direction"), "N");
        assert!((fields.float("longitude") - 11.516_666_7).abs() < 1e-6);
        assert_eq!(fields.text("longitude_direction"), "E");
        assert_eq!(fields.float("altitude"), 545.4);
        assert_eq!(fields.float("mean_sea_level"), 46.9);
        assert_eq!(fields.float("hdop"), 0.9);
        assert_eq!(fields.float("utc_time"), 1_489_581_319.0);
    }

    #[test]
    fn gga_empty_altitude_degrades_to_nan() {
        let fields = decoded("GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,,M,46.9,M,,");

        assert!(fields.float("altitude").is_nan());
        assert_eq!(fields.int("fix_type"), 1);
        assert!((fields.float("latitude") - 48.1173).abs() < 1e-6);
    }

    #[test]
    fn rmc_fields() {
        let fields =
            decoded("GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W");

        assert!(fields.flag("fix_valid"));
        assert!((fields.float("speed") - 22.4 * convert::KNOTS_TO_MPS).abs() < 1e-9);
        assert!((fields.float("true_course") - 84.4_f64.to_radians()).abs() < 1e-12);
        assert_eq!(fields.float("utc_time"), 1_489_581_319.0);
    }

    #[test]
    fn avr_fields() {
        let fields = decoded("PTNLAVR,123519,+274.07,Yaw,-3.51,Tilt,+1.20,Roll,1.2,3,1.4,10");

        assert_eq!(fields.float("yaw"), 274.07);
        assert_eq!(fields.float("pitch"), -3.51);
        assert_eq!(fields.float("roll"), 1.20);
        assert_eq!(fields.int("fix_type"), 3);
        assert_eq!(fields.float("pdop"), 1.4);
        assert_eq!(fields.int("num_satellites"), 10);
    }

    #[test]
    fn llq_fields() {
        let fields =
            decoded("GPLLQ,034137.00,210307,401346.543,M,3185009.117,M,3,15,0.011,1.393");

        assert_eq!(fields.float("easting"), 401_346.543);
        assert_eq!(fields.float("northing"), 3_185_009.117);
        assert_eq!(fields.int("fix_type"), 3);
        assert_eq!(fields.float("position_quality"), 0.011);
        assert_eq!(fields.float("height"), 1.393);
    }

    #[test]
    fn truncated_sentence_rejects() {
        let sentence = classify("GPGGA,123519,4807.038,N").unwrap();
        let result = decode(&sentence, date!(2017 - 03 - 15));

        assert_eq!(
            result,
            Err(Reject::TruncatedSentence {
                field: "fix_type",
                index: 6,
                tokens: 4,
            })
        );
    }

    #[test]
    fn accessors_degrade_on_missing_names() {
        let fields = decoded("GPHDT,274.07,T");

        assert_eq!(fields.float("heading_north"), 274.07);
        assert!(fields.float("no_such_field").is_nan());
        assert_eq!(fields.int("heading_north"), 0);
        assert_eq!(fields.text("heading_north"), "");
        assert!(!fields.flag("heading_north"));
    }
}
