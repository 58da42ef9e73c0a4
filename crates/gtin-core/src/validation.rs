//! # Validation Module
//!
//! Validation of untrusted candidate codes (user-typed or scanned barcodes,
//! import files).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Steps                                   │
//! │                                                                         │
//! │  "  4006381333931 "                                                     │
//! │        │                                                                │
//! │        ▼  trim surrounding whitespace (nothing else)                    │
//! │  "4006381333931"                                                        │
//! │        │                                                                │
//! │        ├── not 13 ASCII digits? ──► false                               │
//! │        │                                                                │
//! │        ▼  split                                                         │
//! │  "400638133393" | 1                                                     │
//! │        │                                                                │
//! │        ▼  checksum                                                      │
//! │  computed 1 == found 1 ──► true                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `is_valid_code` is total: malformed input is `false`, never an error.
//! Dashes and internal spaces are not stripped.
//!
//! ## Usage
//! ```rust
//! use gtin_core::validation::{is_valid_code, validate_code};
//! use gtin_core::CodeError;
//!
//! assert!(is_valid_code("4006381333931"));
//! assert!(!is_valid_code("400-6381333931"));
//!
//! assert_eq!(
//!     validate_code("4006381333932"),
//!     Err(CodeError::CheckDigitMismatch { expected: 1, found: 2 })
//! );
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CodeError, ValidationResult};
use crate::types::{ascii_digit, prefix_value, Ean13, Payload, PrefixRange};
use crate::{CODE_LEN, PAYLOAD_LEN};

// =============================================================================
// Validators
// =============================================================================

/// Returns whether `candidate` is a well-formed, checksum-correct EAN-13.
pub fn is_valid_code(candidate: &str) -> bool {
    validate_code(candidate).is_ok()
}

/// Like [`is_valid_code`], with absent input yielding `false`.
pub fn is_valid_code_opt(candidate: Option<&str>) -> bool {
    candidate.is_some_and(is_valid_code)
}

/// Validates `candidate`, reporting why it failed.
///
/// ## Rules
/// - Surrounding whitespace is trimmed
/// - Exactly 13 ASCII digits must remain
/// - The last digit must equal the check digit of the first 12
pub fn validate_code(candidate: &str) -> ValidationResult<Ean13> {
    let digits = parse_digits(candidate)?;
    let payload = payload_of(&digits);
    let expected = payload.check_digit().value();
    let found = digits[PAYLOAD_LEN];

    if expected != found {
        return Err(CodeError::CheckDigitMismatch { expected, found });
    }

    Ok(Ean13::from_payload(payload))
}

/// Trims `candidate` and reads exactly 13 ASCII digits.
fn parse_digits(candidate: &str) -> ValidationResult<[u8; CODE_LEN]> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(CodeError::Empty);
    }

    let actual = trimmed.chars().count();
    if actual != CODE_LEN {
        return Err(CodeError::WrongLength { actual });
    }

    let mut digits = [0u8; CODE_LEN];
    for (position, (slot, c)) in digits.iter_mut().zip(trimmed.chars()).enumerate() {
        *slot = ascii_digit(c).ok_or(CodeError::NonDigitCharacter { position, found: c })?;
    }

    Ok(digits)
}

fn payload_of(digits: &[u8; CODE_LEN]) -> Payload {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload.copy_from_slice(&digits[..PAYLOAD_LEN]);
    Payload::from_digits(payload)
}

// =============================================================================
// Code Report
// =============================================================================

/// Everything a form or import tool wants to show about a candidate code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CodeReport {
    /// Input exactly as received.
    pub input: String,

    /// Input with surrounding whitespace removed.
    pub trimmed: String,

    /// Whether the code passed validation.
    pub valid: bool,

    /// Leading three digits, when the input is 13 digits.
    pub prefix: Option<String>,

    /// GS1 classification of `prefix`.
    pub prefix_range: Option<PrefixRange>,

    /// Check digit computed from the first 12 digits.
    pub expected_check_digit: Option<u8>,

    /// Check digit found in the input.
    pub found_check_digit: Option<u8>,

    /// Human-readable failure reason.
    pub reason: Option<String>,
}

/// Builds a [`CodeReport`] for `candidate`. Never fails.
///
/// ## Example
/// ```rust
/// use gtin_core::inspect_code;
///
/// let report = inspect_code("2000000000421");
/// assert!(!report.valid);
/// assert_eq!(report.expected_check_digit, Some(8));
/// assert_eq!(report.found_check_digit, Some(1));
/// ```
pub fn inspect_code(candidate: &str) -> CodeReport {
    let mut report = CodeReport {
        input: candidate.to_string(),
        trimmed: candidate.trim().to_string(),
        valid: false,
        prefix: None,
        prefix_range: None,
        expected_check_digit: None,
        found_check_digit: None,
        reason: None,
    };

    let digits = match parse_digits(candidate) {
        Ok(digits) => digits,
        Err(err) => {
            report.reason = Some(err.to_string());
            return report;
        }
    };

    let prefix = prefix_value(&digits);
    let expected = payload_of(&digits).check_digit().value();
    let found = digits[PAYLOAD_LEN];

    report.prefix = Some(format!("{prefix:03}"));
    report.prefix_range = Some(PrefixRange::of(prefix));
    report.expected_check_digit = Some(expected);
    report.found_check_digit = Some(found);
    report.valid = expected == found;
    if !report.valid {
        report.reason = Some(CodeError::CheckDigitMismatch { expected, found }.to_string());
    }

    report
}

// =============================================================================
// Unit Tests
// =============================================================================
