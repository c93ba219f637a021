//! # Seal Errors
//!
//! This module defines the [`SealError`] enum used throughout the crate for reporting
//! option, token, cryptographic and payload failures.
//!
//! Callers that log failures should prefer [`SealError::kind`]: it names the failure without
//! exposing any message text.

use std::borrow::Cow;

/// A specialized error enum for sealing and unsealing failures.
#[ironseal_derive::ironseal_error]
pub enum SealError {
    /// The password is empty, shorter than the configured minimum, or a raw key is shorter
    /// than the algorithm key length.
    #[error("Weak password{}: {message}", format_context(context))]
    WeakPassword { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The algorithm name is unknown or the algorithm is used in the wrong role.
    #[error("Unsupported algorithm{}: {message}", format_context(context))]
    UnsupportedAlgorithm { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Option values outside their valid range (zero iterations, salt size, clock offset).
    #[error("Invalid options{}: {message}", format_context(context))]
    InvalidOptions { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The token does not follow the wire grammar.
    #[error("Malformed token{}: {message}", format_context(context))]
    MalformedToken { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The token is well formed but carries a foreign version tag.
    #[error("Unsupported token version{}: {message}", format_context(context))]
    UnsupportedVersion { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The MAC does not match. Wrong password or tampered token.
    #[redacted]
    #[error("Integrity check failed")]
    IntegrityCheckFailed {},

    /// The ciphertext could not be decrypted.
    #[redacted]
    #[error("Decryption failed")]
    DecryptionFailed {},

    /// The token expiration plus the allowed clock skew lies in the past.
    #[error("Token expired{}: {message}", format_context(context))]
    TokenExpired { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The payload could not be encoded as JSON.
    #[error("Serialization error{}: {source}", format_context(context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The decrypted plaintext is not a valid framed JSON document of the requested type.
    #[error("Deserialization error{}: {message}", format_context(context))]
    Deserialization { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// OS random source or clock failures.
    #[error("Internal seal error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
