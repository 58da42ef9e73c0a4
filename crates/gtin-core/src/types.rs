//! # Domain Types
//!
//! Typed digit strings used throughout gtin-core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Payload      │   │   CheckDigit    │   │     Ean13       │       │
//! │  │  ─────────────  │ + │  ─────────────  │ = │  ─────────────  │       │
//! │  │  [u8; 12]       │   │  u8 in 0..=9    │   │  [u8; 13]       │       │
//! │  │  prefix + item  │   │  mod-10 sum     │   │  proven valid   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  PrefixRange    │   GS1 classification of the first 3 digits        │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Digits are stored as values (`0..=9`), not ASCII bytes. Fixed-size
//! arrays keep the arithmetic allocation-free.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::checksum::check_digit_of;
use crate::error::{CodeError, PayloadError};
use crate::{CODE_LEN, PAYLOAD_LEN, PREFIX_LEN};

// =============================================================================
// Payload
// =============================================================================

/// The first 12 digits of an EAN-13 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    /// Parses exactly 12 ASCII digits.
    ///
    /// Length is checked first, counting characters, so `"12345"` is a
    /// `WrongLength` even though it is all digits.
    pub fn parse(s: &str) -> Result<Self, PayloadError> {
        let actual = s.chars().count();
        if actual != PAYLOAD_LEN {
            return Err(PayloadError::WrongLength {
                expected: PAYLOAD_LEN,
                actual,
            });
        }

        let mut digits = [0u8; PAYLOAD_LEN];
        for (position, (slot, c)) in digits.iter_mut().zip(s.chars()).enumerate() {
            *slot = ascii_digit(c).ok_or(PayloadError::NonDigitCharacter { position, found: c })?;
        }

        Ok(Payload(digits))
    }

    /// Wraps digit values that are already known to be in `0..=9`.
    pub(crate) const fn from_digits(digits: [u8; PAYLOAD_LEN]) -> Self {
        Payload(digits)
    }

    /// Returns the digit values.
    #[inline]
    pub const fn digits(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// Computes the check digit for this payload.
    #[inline]
    pub fn check_digit(&self) -> CheckDigit {
        check_digit_of(&self.0)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.0)
    }
}

// =============================================================================
// Check Digit
// =============================================================================

/// A GS1 check digit, always in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckDigit(u8);

impl CheckDigit {
    /// Only the checksum module builds these, from a `total % 10` result.
    pub(crate) const fn new(value: u8) -> Self {
        CheckDigit(value)
    }

    /// Returns the digit value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CheckDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Ean13
// =============================================================================

/// A checksum-correct 13-digit EAN-13 code.
///
/// Only validation ([`crate::validate_code`], [`FromStr`]) and generation
/// produce values of this type, so holding one proves the code is valid.
///
/// ## Example
/// ```rust
/// use gtin_core::Ean13;
///
/// let code: Ean13 = "4006381333931".parse().unwrap();
/// assert_eq!(code.check_digit().value(), 1);
/// assert!("4006381333932".parse::<Ean13>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ean13([u8; CODE_LEN]);

impl Ean13 {
    /// Appends the computed check digit to a payload.
    pub fn from_payload(payload: Payload) -> Self {
        let mut digits = [0u8; CODE_LEN];
        let (head, tail) = digits.split_at_mut(PAYLOAD_LEN);
        head.copy_from_slice(payload.digits());
        tail[0] = payload.check_digit().value();
        Ean13(digits)
    }

    /// Returns the payload (first 12 digits).
    pub fn payload(&self) -> Payload {
        let mut digits = [0u8; PAYLOAD_LEN];
        digits.copy_from_slice(&self.0[..PAYLOAD_LEN]);
        Payload::from_digits(digits)
    }

    /// Returns the trailing check digit.
    #[inline]
    pub const fn check_digit(&self) -> CheckDigit {
        CheckDigit::new(self.0[PAYLOAD_LEN])
    }

    /// Returns the leading three digits as a number (`0..=999`).
    pub fn prefix(&self) -> u16 {
        prefix_value(&self.0)
    }

    /// Classifies the prefix against the GS1 allocation table.
    pub fn prefix_range(&self) -> PrefixRange {
        PrefixRange::of(self.prefix())
    }

    /// Returns all 13 digit values.
    #[inline]
    pub const fn digits(&self) -> &[u8; CODE_LEN] {
        &self.0
    }
}

impl fmt::Display for Ean13 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.0)
    }
}

impl FromStr for Ean13 {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validation::validate_code(s)
    }
}

impl Serialize for Ean13 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ean13 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// Prefix Range
// =============================================================================

/// GS1 allocation of a 3-digit prefix.
///
/// ## Ranges
/// ```text
/// 000-019, 030-039, 060-139   UpcCompatible
/// 020-029, 040-049, 200-299   RestrictedCirculation (in-store, internal)
/// 050-059, 981-984, 990-999   Coupon
/// 977                         SerialPublication (ISSN)
/// 978-979                     Bookland (ISBN)
/// 980                         RefundReceipt
/// everything else             Gs1Member (national member organisations)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrefixRange {
    UpcCompatible,
    RestrictedCirculation,
    Coupon,
    SerialPublication,
    Bookland,
    RefundReceipt,
    Gs1Member,
}

impl PrefixRange {
    /// Classifies a prefix value. Values above 999 are never produced by
    /// [`Ean13::prefix`] and classify as `Gs1Member`.
    pub const fn of(prefix: u16) -> Self {
        match prefix {
            0..=19 | 30..=39 | 60..=139 => PrefixRange::UpcCompatible,
            20..=29 | 40..=49 | 200..=299 => PrefixRange::RestrictedCirculation,
            50..=59 | 981..=984 | 990..=999 => PrefixRange::Coupon,
            977 => PrefixRange::SerialPublication,
            978..=979 => PrefixRange::Bookland,
            980 => PrefixRange::RefundReceipt,
            _ => PrefixRange::Gs1Member,
        }
    }

    /// Codes in this range must never leave the issuing company or region.
    #[inline]
    pub const fn is_restricted(&self) -> bool {
        matches!(self, PrefixRange::RestrictedCirculation)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Digit value of an ASCII decimal character. Non-ASCII digits are rejected.
#[inline]
pub(crate) fn ascii_digit(c: char) -> Option<u8> {
    if c.is_ascii_digit() {
        Some(c as u8 - b'0')
    } else {
        None
    }
}

/// Numeric value of the leading three digits.
pub(crate) fn prefix_value(digits: &[u8]) -> u16 {
    digits
        .iter()
        .take(PREFIX_LEN)
        .fold(0u16, |acc, &d| acc * 10 + u16::from(d))
}

fn write_digits(f: &mut fmt::Formatter<'_>, digits: &[u8]) -> fmt::Result {
    for d in digits {
        write!(f, "{d}")?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_parse() {
        let payload = Payload::parse("400638133393").unwrap();
        assert_eq!(payload.digits(), &[4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3]);
        assert_eq!(payload.to_string(), "400638133393");
    }

    #[test]
    fn test_payload_parse_wrong_length() {
        assert_eq!(
            Payload::parse("12345"),
            Err(PayloadError::WrongLength {
                expected: 12,
                actual: 5
            })
        );
        assert_eq!(
            Payload::parse(""),
            Err(PayloadError::WrongLength {
                expected: 12,
                actual: 0
            })
        );
    }

    #[test]
    fn test_payload_parse_counts_characters() {
        // 12 characters, 14 bytes
        let err = Payload::parse("40063813339é").unwrap_err();
        assert_eq!(
            err,
            PayloadError::NonDigitCharacter {
                position: 11,
                found: 'é'
            }
        );
    }

    #[test]
    fn test_payload_parse_rejects_whitespace() {
        assert!(matches!(
            Payload::parse(" 40063813339"),
            Err(PayloadError::NonDigitCharacter { position: 0, found: ' ' })
        ));
    }

    #[test]
    fn test_ean13_from_payload() {
        let payload = Payload::parse("400638133393").unwrap();
        let code = Ean13::from_payload(payload);
        assert_eq!(code.to_string(), "4006381333931");
        assert_eq!(code.payload(), payload);
        assert_eq!(code.check_digit().value(), 1);
        assert_eq!(code.prefix(), 400);
    }

    #[test]
    fn test_ean13_serde_as_string() {
        let code: Ean13 = "5901234123457".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"5901234123457\"");

        let back: Ean13 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        assert!(serde_json::from_str::<Ean13>("\"5901234123458\"").is_err());
    }

    #[test]
    fn test_prefix_range() {
        assert_eq!(PrefixRange::of(0), PrefixRange::UpcCompatible);
        assert_eq!(PrefixRange::of(25), PrefixRange::RestrictedCirculation);
        assert_eq!(PrefixRange::of(200), PrefixRange::RestrictedCirculation);
        assert_eq!(PrefixRange::of(299), PrefixRange::RestrictedCirculation);
        assert_eq!(PrefixRange::of(400), PrefixRange::Gs1Member);
        assert_eq!(PrefixRange::of(977), PrefixRange::SerialPublication);
        assert_eq!(PrefixRange::of(978), PrefixRange::Bookland);
        assert_eq!(PrefixRange::of(980), PrefixRange::RefundReceipt);
        assert_eq!(PrefixRange::of(995), PrefixRange::Coupon);
        assert!(PrefixRange::of(250).is_restricted());
        assert!(!PrefixRange::of(590).is_restricted());
    }

    #[test]
    fn test_ean13_prefix_range() {
        let code: Ean13 = "9780306406157".parse().unwrap();
        assert_eq!(code.prefix_range(), PrefixRange::Bookland);
    }
}
