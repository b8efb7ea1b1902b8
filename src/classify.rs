//! Sentence classification: talker/vendor tag extraction and type resolution.

use crate::Reject;

/// Trimble proprietary vendor tag.
const VENDOR_TAG: &str = "PTNL";

/// The sentence types this crate knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Global positioning system fix data.
    Gga,
    /// Recommended minimum navigation information.
    Rmc,
    /// Track made good and ground speed.
    Vtg,
    /// Heading, true.
    Hdt,
    /// Rate of turn.
    Rot,
    /// Trimble multi-antenna attitude (yaw, tilt, roll).
    Avr,
    /// Trimble coordinate system and project metadata.
    Pjt,
    /// Leica-style local grid position and quality.
    Llq,
}

impl SentenceType {
    /// Resolves a bare type tag, talker/vendor prefix already removed.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "GGA" => Some(Self::Gga),
            "RMC" => Some(Self::Rmc),
            "VTG" => Some(Self::Vtg),
            "HDT" => Some(Self::Hdt),
            "ROT" => Some(Self::Rot),
            "AVR" => Some(Self::Avr),
            "PJT" => Some(Self::Pjt),
            "LLQ" => Some(Self::Llq),
            _ => None,
        }
    }
}

/// A sentence that passed envelope matching, split into its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSentence<'a> {
    /// Two-letter talker ("GP", "GN", ...) or the vendor tag ("PTNL").
    pub talker: &'a str,
    /// Resolved sentence type.
    pub sentence_type: SentenceType,
    /// Comma-split tokens of the body, tag token included, so field table
    /// indices line up with the receiver documentation.
    pub tokens: Vec<&'a str>,
}

/// Classifies a framed sentence body (the part between `$` and `*`).
///
/// The tag token is either the vendor tag `PTNL` immediately followed by the
/// vendor type name, or a two-letter talker followed by the standard type
/// name. The vendor `DG` message is not comma separated on BD9xx receivers,
/// so only the two letters after `PTNL` name its type.
pub fn classify(body: &str) -> Result<ClassifiedSentence<'_>, Reject> {
    let tokens: Vec<&str> = body.split(',').collect();
    // split always yields at least one token
    let tag = tokens[0];

    let (talker, type_tag) = if let Some(vendor) = tag.strip_prefix(VENDOR_TAG) {
        if vendor.starts_with("DG") {
            (VENDOR_TAG, "DG")
        } else {
            (VENDOR_TAG, vendor)
        }
    } else if tag.len() > 2 && tag.as_bytes()[..2].iter().all(|b| b.is_ascii_uppercase()) {
        (&tag[..2], &tag[2..])
    } else {
        return Err(Reject::MalformedEnvelope);
    };

    match SentenceType::from_tag(type_tag) {
        Some(sentence_type) => Ok(ClassifiedSentence {
            talker,
            sentence_type,
            tokens,
        }),
        None => Err(Reject::UnknownSentenceType(type_tag.to_owned())),
    }
}
