//! Sentence framing: the `$<body>*<CC>` envelope and its XOR checksum.

use nom::{
    IResult, Parser,
    bytes::complete::{take, take_until},
    character::complete::char,
    combinator::{all_consuming, map_res},
};

use crate::Reject;

/// A framed sentence, split but not yet verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Everything strictly between `$` and `*`.
    pub body: &'a str,
    /// Checksum byte carried after the `*` delimiter.
    pub checksum: u8,
}

/// XOR of every byte in the sentence body.
pub(crate) fn checksum(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, byte| acc ^ byte)
}

fn hex_byte(i: &str) -> IResult<&str, u8> {
    map_res(take(2u8), |cc: &str| u8::from_str_radix(cc, 16)).parse(i)
}

fn envelope(i: &str) -> IResult<&str, (&str, u8)> {
    let (i, _) = char('$').parse(i)?;
    let (i, body) = take_until("*").parse(i)?;
    let (i, _) = char('*').parse(i)?;
    let (i, cc) = all_consuming(hex_byte).parse(i)?;
    Ok((i, (body, cc)))
}

/// Splits a raw sentence into body and carried checksum.
///
/// Accepts ASCII input of the shape `$<body>*<CC>` where `CC` is two hex
/// digits (either case); anything else is [`Reject::MalformedEnvelope`].
/// The checksum is extracted here, not verified.
pub fn frame(sentence: &str) -> Result<Frame<'_>, Reject> {
    if !sentence.is_ascii() {
        return Err(Reject::MalformedEnvelope);
    }

    match envelope(sentence) {
        Ok((_, (body, checksum))) => Ok(Frame { body, checksum }),
        Err(_) => Err(Reject::MalformedEnvelope),
    }
}

/// Returns true when the trailing checksum matches the XOR of the body.
///
/// Never fails: input lacking the `$` and `*` delimiters returns false.
pub fn validate_checksum(sentence: &str) -> bool {
    match frame(sentence) {
        Ok(frame) => checksum(frame.body) == frame.checksum,
        Err(_) => false,
    }
}
