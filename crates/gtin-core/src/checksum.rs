//! # Checksum Module
//!
//! GS1 weighted mod-10 check digit for a 12-digit payload.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Payload:   4  0  0  6  3  8  1  3  3  3  9  3                          │
//! │  Position:  1  2  3  4  5  6  7  8  9 10 11 12   (1-indexed)            │
//! │  Weight:    1  3  1  3  1  3  1  3  1  3  1  3                          │
//! │                                                                         │
//! │  odd sum  = 4+0+3+1+3+9 = 20                                            │
//! │  even sum = 0+6+8+3+3+3 = 23                                            │
//! │  total    = 20 + 3*23   = 89                                            │
//! │  check    = (10 - 89 % 10) % 10 = 1                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The outer `% 10` maps a total ending in 0 to check digit 0, not 10.

use crate::error::CodecResult;
use crate::types::{CheckDigit, Payload};
use crate::PAYLOAD_LEN;

/// Computes the check digit of a 12-digit payload string.
///
/// ## Rules
/// - Exactly 12 characters
/// - ASCII digits only (no whitespace, sign, or separators)
///
/// ## Example
/// ```rust
/// use gtin_core::{compute_check_digit, CodecError};
///
/// assert_eq!(compute_check_digit("400638133393").unwrap().value(), 1);
/// assert!(matches!(
///     compute_check_digit("12345"),
///     Err(CodecError::InvalidPayload(_))
/// ));
/// ```
pub fn compute_check_digit(payload: &str) -> CodecResult<CheckDigit> {
    let payload = Payload::parse(payload)?;
    Ok(payload.check_digit())
}

/// Check digit over digit values already known to be in `0..=9`.
pub fn check_digit_of(digits: &[u8; PAYLOAD_LEN]) -> CheckDigit {
    let (odd_sum, even_sum) = digits
        .iter()
        .enumerate()
        .fold((0u32, 0u32), |(odd, even), (i, &d)| {
            if i % 2 == 0 {
                (odd + u32::from(d), even)
            } else {
                (odd, even + u32::from(d))
            }
        });

    let total = odd_sum + 3 * even_sum;
    // total % 10 is in 0..=9, so the cast cannot truncate
    CheckDigit::new(((10 - total % 10) % 10) as u8)
}

// =============================================================================
// Unit Tests
// =============================================================================
