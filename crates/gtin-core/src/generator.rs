//! # Generator Module
//!
//! Synthesizes checksum-correct EAN-13 codes from a prefix and an optional
//! product id.
//!
//! ## Payload Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   prefix (3)      product segment (9)                  check (1)        │
//! │  ┌─────────┐  ┌───────────────────────────┐           ┌───┐            │
//! │  │ 2  0  0 │  │ 0  0  0  0  0  0  0  4  2 │  ──────►  │ 8 │            │
//! │  └─────────┘  └───────────────────────────┘           └───┘            │
//! │   "200"        product_id = 42, zero-padded           mod-10            │
//! │                or 9 random digits when absent                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prefix Normalization
//! Left-pad with `'0'` to three characters, then keep the leftmost three:
//! `""` → `"000"`, `"5"` → `"005"`, `"4006"` → `"400"`. Longer prefixes are
//! truncated, not rejected.
//!
//! ## Randomness
//! The digit source is owned by [`CodeGenerator`], so tests can seed it.
//! Nothing here guarantees uniqueness across calls; callers that need it
//! keep their own allocation table.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{CodecError, CodecResult};
use crate::types::{ascii_digit, Ean13, Payload};
use crate::{PAYLOAD_LEN, PREFIX_LEN, PRODUCT_DIGITS, PRODUCT_ID_LIMIT};

// =============================================================================
// Overflow Policy
// =============================================================================

/// What to do with a product id that needs ten or more digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail with `InvalidArgument`.
    #[default]
    Reject,

    /// Keep the leftmost nine digits and drop the rest.
    Truncate,
}

impl FromStr for OverflowPolicy {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(OverflowPolicy::Reject),
            "truncate" => Ok(OverflowPolicy::Truncate),
            other => Err(CodecError::invalid_argument(
                "overflow_policy",
                format!("expected 'reject' or 'truncate', got '{other}'"),
            )),
        }
    }
}

// =============================================================================
// Code Generator
// =============================================================================

/// Generates EAN-13 codes using an owned random digit source.
///
/// ## Example
/// ```rust
/// use gtin_core::{is_valid_code, CodeGenerator};
///
/// let mut generator = CodeGenerator::seeded(7);
/// let code = generator.generate("200", None).unwrap();
/// assert!(code.to_string().starts_with("200"));
/// assert!(is_valid_code(&code.to_string()));
///
/// // Same seed, same codes
/// let again = CodeGenerator::seeded(7).generate("200", None).unwrap();
/// assert_eq!(code, again);
/// ```
#[derive(Debug, Clone)]
pub struct CodeGenerator<R = ThreadRng> {
    rng: R,
    overflow: OverflowPolicy,
}

impl CodeGenerator<ThreadRng> {
    /// Generator backed by the thread-local random source.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for CodeGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator<StdRng> {
    /// Deterministic generator: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CodeGenerator<R> {
    /// Generator backed by any random source.
    pub fn with_rng(rng: R) -> Self {
        CodeGenerator {
            rng,
            overflow: OverflowPolicy::default(),
        }
    }

    /// Sets how product ids of ten or more digits are handled.
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    /// Returns the active overflow policy.
    #[inline]
    pub fn policy(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Generates a code from `prefix` and an optional `product_id`.
    ///
    /// ## Errors
    /// - `InvalidArgument { field: "prefix" }` if the normalized prefix
    ///   contains non-digits
    /// - `InvalidArgument { field: "product_id" }` if the id is negative, or
    ///   needs ten digits under `OverflowPolicy::Reject`
    pub fn generate(&mut self, prefix: &str, product_id: Option<i64>) -> CodecResult<Ean13> {
        let mut digits = [0u8; PAYLOAD_LEN];
        let (head, tail) = digits.split_at_mut(PREFIX_LEN);

        head.copy_from_slice(&normalize_prefix(prefix)?);

        match product_id {
            Some(id) => tail.copy_from_slice(&product_segment(id, self.overflow)?),
            None => {
                for slot in tail.iter_mut() {
                    *slot = self.rng.random_range(0..10u8);
                }
            }
        }

        let code = Ean13::from_payload(Payload::from_digits(digits));
        debug!(
            prefix,
            product_id,
            from_product_id = product_id.is_some(),
            %code,
            "Generated code"
        );
        Ok(code)
    }
}

/// Generates a code with a fresh thread-local generator and the default
/// `Reject` overflow policy.
///
/// Pass [`crate::DEFAULT_PREFIX`] when the caller has no prefix of its own.
///
/// ## Example
/// ```rust
/// use gtin_core::{generate_code, CodecError, DEFAULT_PREFIX};
///
/// let code = generate_code(DEFAULT_PREFIX, Some(42)).unwrap();
/// assert_eq!(code.to_string(), "2000000000428");
///
/// assert!(matches!(
///     generate_code("200", Some(-1)),
///     Err(CodecError::InvalidArgument { .. })
/// ));
/// ```
pub fn generate_code(prefix: &str, product_id: Option<i64>) -> CodecResult<Ean13> {
    CodeGenerator::new().generate(prefix, product_id)
}

// =============================================================================
// Normalization
// =============================================================================

/// Pads `prefix` with leading zeros to three characters, keeps the leftmost
/// three, and requires them to be ASCII digits.
///
/// ```rust
/// use gtin_core::generator::normalize_prefix;
///
/// assert_eq!(normalize_prefix("5").unwrap(), [0, 0, 5]);
/// assert_eq!(normalize_prefix("4006").unwrap(), [4, 0, 0]);
/// assert!(normalize_prefix("ab").is_err());
/// ```
pub fn normalize_prefix(prefix: &str) -> CodecResult<[u8; PREFIX_LEN]> {
    let padding = PREFIX_LEN.saturating_sub(prefix.chars().count());
    let normalized = std::iter::repeat('0')
        .take(padding)
        .chain(prefix.chars())
        .take(PREFIX_LEN);

    let mut digits = [0u8; PREFIX_LEN];
    for (slot, c) in digits.iter_mut().zip(normalized) {
        *slot = ascii_digit(c).ok_or_else(|| {
            CodecError::invalid_argument("prefix", format!("'{prefix}' must contain only digits"))
        })?;
    }

    Ok(digits)
}

/// Renders `id` as nine zero-padded digits.
///
/// Ids of `10^9` or more render to ten or more characters. Under `Truncate`
/// the leftmost nine are kept, so the low-order digits are the ones lost.
fn product_segment(id: i64, overflow: OverflowPolicy) -> CodecResult<[u8; PRODUCT_DIGITS]> {
    if id < 0 {
        return Err(CodecError::invalid_argument(
            "product_id",
            format!("{id} must not be negative"),
        ));
    }

    let rendered = format!("{id:0width$}", width = PRODUCT_DIGITS);
    if id >= PRODUCT_ID_LIMIT {
        match overflow {
            OverflowPolicy::Reject => {
                return Err(CodecError::invalid_argument(
                    "product_id",
                    format!("{id} must be below {PRODUCT_ID_LIMIT}"),
                ));
            }
            OverflowPolicy::Truncate => {
                warn!(
                    product_id = id,
                    dropped = &rendered[PRODUCT_DIGITS..],
                    "Product id exceeds nine digits, truncating"
                );
            }
        }
    }

    let mut digits = [0u8; PRODUCT_DIGITS];
    for (slot, c) in digits.iter_mut().zip(rendered.chars()) {
        // `rendered` is a non-negative integer, so every char is a digit
        *slot = ascii_digit(c).unwrap_or_default();
    }

    Ok(digits)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::is_valid_code;

    fn seeded(prefix: &str, id: Option<i64>) -> String {
        CodeGenerator::seeded(42)
            .generate(prefix, id)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_generate_with_product_id() {
        let code = generate_code("200", Some(42)).unwrap().to_string();
        assert!(code.starts_with("200000000042"));
        assert_eq!(code, "2000000000428");
        assert!(is_valid_code(&code));
    }

    #[test]
    fn test_product_id_bounds() {
        assert_eq!(seeded("200", Some(0)), "2000000000008");
        assert!(seeded("200", Some(999_999_999)).starts_with("200999999999"));
    }

    #[test]
    fn test_prefix_padding_and_truncation() {
        assert!(seeded("", Some(1)).starts_with("000000000001"));
        assert!(seeded("5", Some(1)).starts_with("005000000001"));
        assert!(seeded("12", Some(1)).starts_with("012000000001"));
        assert!(seeded("4006", Some(1)).starts_with("400000000001"));
        // Garbage past the third character is truncated away
        assert!(seeded("590xyz", Some(1)).starts_with("590000000001"));
    }

    #[test]
    fn test_non_digit_prefix_rejected() {
        let err = CodeGenerator::seeded(1).generate("ab", Some(1)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { ref field, .. } if field == "prefix"));
        assert!(generate_code("-20", None).is_err());
        assert!(generate_code(" 20", None).is_err());
    }

    #[test]
    fn test_negative_product_id_rejected() {
        for policy in [OverflowPolicy::Reject, OverflowPolicy::Truncate] {
            let mut generator = CodeGenerator::seeded(1).overflow_policy(policy);
            assert!(matches!(
                generator.generate("200", Some(-1)),
                Err(CodecError::InvalidArgument { .. })
            ));
            assert!(generator.generate("200", Some(i64::MIN)).is_err());
        }
    }

    #[test]
    fn test_overflow_rejected_by_default() {
        let err = generate_code("200", Some(PRODUCT_ID_LIMIT)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid product_id: 1000000000 must be below 1000000000"
        );
    }

    #[test]
    fn test_overflow_truncates_when_lenient() {
        let mut generator = CodeGenerator::seeded(1).overflow_policy(OverflowPolicy::Truncate);
        let code = generator.generate("200", Some(1_234_567_890)).unwrap().to_string();
        assert!(code.starts_with("200123456789"));
        assert!(is_valid_code(&code));

        let code = generator.generate("200", Some(i64::MAX)).unwrap().to_string();
        assert!(code.starts_with("200922337203"));
    }

    #[test]
    fn test_random_codes_are_valid() {
        let mut generator = CodeGenerator::new();
        for _ in 0..200 {
            let code = generator.generate("200", None).unwrap().to_string();
            assert_eq!(code.len(), 13);
            assert!(code.starts_with("200"));
            assert!(is_valid_code(&code));
        }
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let mut a = CodeGenerator::seeded(2024);
        let mut b = CodeGenerator::seeded(2024);
        for _ in 0..20 {
            assert_eq!(a.generate("299", None).unwrap(), b.generate("299", None).unwrap());
        }
    }

    #[test]
    fn test_random_digits_vary() {
        let mut generator = CodeGenerator::seeded(9);
        let codes: std::collections::HashSet<_> = (0..50)
            .map(|_| generator.generate("200", None).unwrap())
            .collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_overflow_policy_from_str() {
        assert_eq!("reject".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Reject);
        assert_eq!(" Truncate ".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Truncate);
        assert!("drop".parse::<OverflowPolicy>().is_err());
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Reject);
    }
}
