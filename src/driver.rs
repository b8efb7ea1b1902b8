//! The decode pipeline: checksum, classification, field decoding and
//! translation in one call, plus a receiver-facing façade that logs the
//! sentences it drops.

use log::{debug, warn};
use time::{OffsetDateTime, UtcOffset};

use crate::{DriverConfig, Header, NavRecord, Reject, classify, decode, framing, translate};

/// Runs the full decode pipeline on one sentence.
///
/// Pure and stateless: the output depends only on the sentence text, the
/// supplied stamp (whose UTC date anchors time-of-day fields) and the
/// configuration snapshot, so concurrent calls need no synchronization.
/// A trailing CR/LF from the transport is tolerated.
pub fn decode_sentence(
    sentence: &str,
    frame_id: &str,
    stamp: OffsetDateTime,
    config: &DriverConfig,
) -> Result<Vec<NavRecord>, Reject> {
    let line = sentence.trim_end_matches(['\r', '\n']);
    let frame = framing::frame(line)?;

    let expected = framing::checksum(frame.body);
    if expected != frame.checksum {
        return Err(Reject::InvalidChecksum {
            expected,
            found: frame.checksum,
        });
    }

    let classified = classify(frame.body)?;
    let date = stamp.to_offset(UtcOffset::UTC).date();
    let fields = decode(&classified, date)?;

    let header = Header {
        stamp,
        frame_id: frame_id.to_owned(),
    };
    Ok(translate(classified.sentence_type, &fields, config, &header))
}

/// Receiver-facing façade over [`decode_sentence`].
///
/// Holds the configuration snapshot and logs discarded lines (warn for
/// checksum failures, debug for the rest), so one malformed line in a
/// receiver stream never interrupts processing of the next.
#[derive(Debug, Clone, Default)]
pub struct NavSatDriver {
    config: DriverConfig,
}

impl NavSatDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Decodes one sentence, returning its record batch, or [`None`] after
    /// logging when the sentence was discarded.
    pub fn add_sentence(
        &self,
        sentence: &str,
        frame_id: &str,
        stamp: OffsetDateTime,
    ) -> Option<Vec<NavRecord>> {
        match decode_sentence(sentence, frame_id, stamp, &self.config) {
            Ok(records) => Some(records),
            Err(reject @ Reject::InvalidChecksum { .. }) => {
                warn!("discarding sentence ({reject}): {sentence:?}");
                None
            }
            Err(reject) => {
                debug!("discarding sentence ({reject}): {sentence:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixStatus, PositionCovariance, convert};
    use time::macros::datetime;

    const STAMP: OffsetDateTime = datetime!(2017-03-15 12:36:00 UTC);

    #[test]
    fn gga_scenario_end_to_end() {
        let records = decode_sentence(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
            "gps",
            STAMP,
            &DriverConfig::default(),
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        let NavRecord::Fix(fix) = &records[0] else {
            panic!("expected fix, got {records:?}");
        };
        assert_eq!(fix.status, FixStatus::Fix);
        assert!((fix.latitude - 48.1173).abs() < 1e-4);
        assert!((fix.longitude - 11.5167).abs() < 1e-4);
        assert!((fix.altitude - 592.3).abs() < 1e-9);
        assert_eq!(fix.header.frame_id, "gps");
        assert_eq!(fix.header.stamp, STAMP);

        let NavRecord::TimeReference(time_ref) = &records[1] else {
            panic!("expected time reference, got {records:?}");
        };
        assert_eq!(time_ref.time_ref, datetime!(2017-03-15 12:35:19 UTC));
    }

    #[test]
    fn rmc_scenario_with_rmc_fix_source() {
        let config = DriverConfig {
            use_rmc_fix: true,
            ..DriverConfig::default()
        };
        let records = decode_sentence(
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
            "gps",
            STAMP,
            &config,
        )
        .unwrap();

        let NavRecord::Fix(fix) = &records[0] else {
            panic!("expected fix, got {records:?}");
        };
        assert_eq!(fix.status, FixStatus::Fix);
        assert_eq!(fix.covariance, PositionCovariance::Unknown);

        let NavRecord::VelocityGlobal(velocity) = &records[2] else {
            panic!("expected global velocity, got {records:?}");
        };
        let speed = 22.4 * convert::KNOTS_TO_MPS;
        let course = 84.4_f64.to_radians();
        assert!((velocity.vector.x - speed * course.sin()).abs() < 1e-9);
        assert!((velocity.vector.y - speed * course.cos()).abs() < 1e-9);
    }

    #[test]
    fn quality_codes_map_to_statuses() {
        let cases = [
            ("$GPGGA,123519,4807.038,N,01131.000,E,9,08,0.9,545.4,M,46.9,M,,*4F", FixStatus::SbasFix),
            ("$GPGGA,123519,4807.038,N,01131.000,E,4,08,0.9,545.4,M,46.9,M,,*42", FixStatus::GbasFix),
            ("$GPGGA,123519,4807.038,N,01131.000,E,7,08,0.9,545.4,M,46.9,M,,*41", FixStatus::NoFix),
        ];

        for (sentence, status) in cases {
            let records =
                decode_sentence(sentence, "gps", STAMP, &DriverConfig::default()).unwrap();
            let NavRecord::Fix(fix) = &records[0] else {
                panic!("expected fix for {sentence}");
            };
            assert_eq!(fix.status, status, "sentence: {sentence}");
        }
    }

    #[test]
    fn tampered_checksum_rejects() {
        let result = decode_sentence(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*48",
            "gps",
            STAMP,
            &DriverConfig::default(),
        );

        assert_eq!(
            result,
            Err(Reject::InvalidChecksum {
                expected: 0x47,
                found: 0x48,
            })
        );
    }

    #[test]
    fn unsupported_type_rejects_without_crashing() {
        let result = decode_sentence(
            "$GPZDA,201530.00,04,07,2002,00,00*60",
            "gps",
            STAMP,
            &DriverConfig::default(),
        );

        assert_eq!(result, Err(Reject::UnknownSentenceType("ZDA".to_owned())));
    }

    #[test]
    fn truncated_sentence_rejects() {
        let result = decode_sentence(
            "$GPGGA,123519,4807.038,N*27",
            "gps",
            STAMP,
            &DriverConfig::default(),
        );

        assert!(matches!(result, Err(Reject::TruncatedSentence { .. })));
    }

    #[test]
    fn trailing_crlf_is_tolerated() {
        let records = decode_sentence(
            "$GPHDT,274.07,T*03\r\n",
            "gps",
            STAMP,
            &DriverConfig::default(),
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], NavRecord::Heading(_)));
    }

    #[test]
    fn decoding_is_idempotent() {
        let records = decode_sentence(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
            "gps",
            STAMP,
            &DriverConfig::default(),
        )
        .unwrap();
        assert_eq!(
            records,
            decode_sentence(
                "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
                "gps",
                STAMP,
                &DriverConfig::default(),
            )
            .unwrap()
        );

        // the RMC fix carries a NaN altitude, which defeats derived
        // equality; the rendered batches are total over NaN
        let sentence = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
        let config = DriverConfig {
            use_rmc_fix: true,
            time_ref_source: Some("gps_clock".to_owned()),
        };

        let first = decode_sentence(sentence, "gps", STAMP, &config).unwrap();
        let second = decode_sentence(sentence, "gps", STAMP, &config).unwrap();
        assert_eq!(format!("{first:?}"), format!("{second:?}"));

        let NavRecord::Fix(fix) = &first[0] else {
            panic!("expected fix, got {first:?}");
        };
        assert!(fix.altitude.is_nan());
    }

    #[test]
    fn driver_drops_bad_lines_and_keeps_going() {
        let driver = NavSatDriver::new(DriverConfig::default());

        assert!(driver.add_sentence("garbage", "gps", STAMP).is_none());
        assert!(
            driver
                .add_sentence("$GPZDA,201530.00,04,07,2002,00,00*60", "gps", STAMP)
                .is_none()
        );

        let records = driver
            .add_sentence("$GPHDT,274.07,T*03", "gps", STAMP)
            .unwrap();
        assert_eq!(records.len(), 1);
    }
}
