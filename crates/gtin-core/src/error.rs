//! # Error Types
//!
//! Typed errors for gtin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CodecError           - returned by checksum and generation             │
//! │  ├── InvalidPayload   - wraps PayloadError                              │
//! │  └── InvalidArgument  - bad prefix or product id                        │
//! │                                                                         │
//! │  CodeError            - why a candidate code failed validation          │
//! │                         (never escapes `is_valid_code`)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (position, character, lengths)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Payload Error
// =============================================================================

/// A 12-digit payload was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// Payload did not have exactly `expected` characters.
    #[error("payload must be {expected} digits, got {actual} characters")]
    WrongLength { expected: usize, actual: usize },

    /// Payload contained something other than an ASCII digit.
    ///
    /// `position` is 0-indexed and counts characters, not bytes.
    #[error("payload has non-digit character {found:?} at position {position}")]
    NonDigitCharacter { position: usize, found: char },
}

// =============================================================================
// Codec Error
// =============================================================================

/// Errors from check digit computation and code generation.
///
/// These are precondition failures: the caller is expected to normalize
/// input first, so they fail loudly instead of producing a wrong digit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Malformed payload handed to the checksum step.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),

    /// An argument to the generator is outside its domain.
    ///
    /// ## When This Occurs
    /// - Negative product id
    /// - Product id of 10 digits or more under `OverflowPolicy::Reject`
    /// - Prefix containing non-digits after normalization
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },
}

impl CodecError {
    pub(crate) fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Code Error
// =============================================================================

/// Reasons a candidate string is not a valid EAN-13 code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Nothing left after trimming whitespace.
    #[error("code is empty")]
    Empty,

    /// Trimmed input was not 13 characters long.
    #[error("code must be 13 digits, got {actual} characters")]
    WrongLength { actual: usize },

    /// Trimmed input contained a non-digit.
    #[error("code has non-digit character {found:?} at position {position}")]
    NonDigitCharacter { position: usize, found: char },

    /// Well-formed, but the final digit does not match the payload.
    #[error("check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch { expected: u8, found: u8 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CodecError.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, CodeError>;

// =============================================================================
// Unit Tests
// =============================================================================
