//! Rejection reasons for sentences that cannot be decoded.
//!
//! Every reject is recoverable at single-sentence granularity: the caller is
//! expected to log, drop the line, and continue with the next one. Numeric
//! conversion problems inside a well-formed sentence are *not* rejects; they
//! degrade to NaN/0 for the affected field only.

use thiserror::Error;

/// Why a sentence was discarded instead of producing navigation records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reject {
    /// The trailing checksum does not match the XOR of the sentence body.
    ///
    /// Carries both the checksum calculated from the body and the one found
    /// after the `*` delimiter.
    #[error("invalid checksum: expected {expected:02X}, found {found:02X}")]
    InvalidChecksum {
        /// Checksum calculated from the bytes between `$` and `*`.
        expected: u8,
        /// Checksum carried by the sentence.
        found: u8,
    },

    /// The sentence does not match the NMEA 0183 envelope
    /// (`$` + talker/vendor tag + body + `*` + two hex digits).
    #[error("sentence does not match the NMEA 0183 envelope")]
    MalformedEnvelope,

    /// The envelope is valid but the sentence type is not one this crate
    /// knows how to decode. Carries the offending type tag.
    #[error("unsupported sentence type {0:?}")]
    UnknownSentenceType(String),

    /// The sentence has fewer comma-separated tokens than its field table
    /// requires.
    #[error("truncated sentence: field {field:?} expects token {index} but only {tokens} present")]
    TruncatedSentence {
        /// Name of the field whose token was missing.
        field: &'static str,
        /// Token index the field table points at.
        index: usize,
        /// Number of tokens actually present.
        tokens: usize,
    },
}
