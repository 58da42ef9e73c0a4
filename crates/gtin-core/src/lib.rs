//! # gtin-core: Pure EAN-13 Codec for GTIN Forge
//!
//! This crate computes, validates and synthesizes 13-digit EAN-13 / GTIN-13
//! product identifiers under the GS1 mod-10 check-digit scheme. Everything
//! is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GTIN Forge Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Callers (UI forms, import pipelines, `gtin` CLI)       │   │
//! │  │      raw strings / numbers in ──► booleans / codes out          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gtin-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐     ┌────────────┐     ┌────────────┐         │   │
//! │  │   │  checksum  │◄────│ validation │     │ generator  │         │   │
//! │  │   │  mod-10    │◄────┼────────────┼─────│ prefix+id  │         │   │
//! │  │   └────────────┘     └────────────┘     └────────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Typed digit strings (Payload, CheckDigit, Ean13, PrefixRange)
//! - [`checksum`] - GS1 weighted mod-10 check digit
//! - [`validation`] - Total validation of untrusted candidate strings
//! - [`generator`] - Code synthesis from a prefix and an optional product id
//! - [`error`] - Codec error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gtin_core::{compute_check_digit, generate_code, is_valid_code};
//!
//! assert!(is_valid_code("4006381333931"));
//! assert_eq!(compute_check_digit("400638133393").unwrap().value(), 1);
//!
//! let code = generate_code("200", Some(42)).unwrap();
//! assert_eq!(code.to_string(), "2000000000428");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checksum;
pub mod error;
pub mod generator;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checksum::compute_check_digit;
pub use error::{CodeError, CodecError, CodecResult, PayloadError, ValidationResult};
pub use generator::{generate_code, CodeGenerator, OverflowPolicy};
pub use types::*;
pub use validation::{inspect_code, is_valid_code, is_valid_code_opt, validate_code, CodeReport};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of digits in a payload (everything but the check digit).
pub const PAYLOAD_LEN: usize = 12;

/// Number of digits in a full EAN-13 code.
pub const CODE_LEN: usize = 13;

/// Number of leading payload digits the generator treats as the prefix.
pub const PREFIX_LEN: usize = 3;

/// Number of product digits following the prefix.
pub const PRODUCT_DIGITS: usize = PAYLOAD_LEN - PREFIX_LEN;

/// Prefix used when a caller has no registered range of its own.
///
/// `200`-`299` is GS1's restricted-circulation range, safe for in-store use.
pub const DEFAULT_PREFIX: &str = "200";

/// Exclusive upper bound for product ids (they must fit in nine digits).
pub const PRODUCT_ID_LIMIT: i64 = 1_000_000_000;
