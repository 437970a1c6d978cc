//! IUPAC nucleotide ambiguity codes.

use crate::error::{Result, SangerError};

///
/// The 15 IUPAC DNA codes and the bases each one stands for, `/`-joined.
///
pub const IUPAC_CODES: [(char, &str); 15] = [
    ('A', "A"),
    ('C', "C"),
    ('G', "G"),
    ('T', "T"),
    ('R', "A/G"),
    ('Y', "C/T"),
    ('S', "G/C"),
    ('W', "A/T"),
    ('K', "G/T"),
    ('M', "A/C"),
    ('B', "C/G/T"),
    ('D', "A/G/T"),
    ('H', "A/C/T"),
    ('V', "A/C/G"),
    ('N', "N"),
];

///
/// Decode an ambiguity code into the bases it represents.
///
/// Lower-case codes are accepted. Any other character is an
/// [`SangerError::UnknownAmbiguityCode`].
///
/// ```
/// use seqcheck_sanger::iupac::decode;
///
/// assert_eq!(decode('R').unwrap(), "A/G");
/// assert!(decode('X').is_err());
/// ```
pub fn decode(code: char) -> Result<&'static str> {
    let upper = code.to_ascii_uppercase();
    IUPAC_CODES
        .iter()
        .find(|(symbol, _)| *symbol == upper)
        .map(|(_, bases)| *bases)
        .ok_or(SangerError::UnknownAmbiguityCode(code))
}

/// True for codes standing for more than one base.
pub fn is_ambiguous(code: char) -> bool {
    decode(code).is_ok_and(|bases| bases.len() > 1)
}
