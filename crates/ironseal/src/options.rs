//! Seal and unseal options.
//!
//! Defaults match the other `Fe26.2` implementations so tokens interoperate without
//! configuration.

use serde::{Deserialize, Serialize};

use crate::algorithm::{Algorithm, Role};
use crate::error::SealError;

const DEFAULT_ITERATIONS: u32 = 1;
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 32;
const DEFAULT_SALT_BITS: u32 = 256;
const DEFAULT_TIMESTAMP_SKEW_SEC: u64 = 60;

/// Upper bound for generated salts, in bits.
pub const MAX_SALT_BITS: u32 = 1 << 31;

/// Key derivation settings for one role (encryption or integrity).
///
/// In config files `algorithm` is required, the remaining fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmOptions {
    pub algorithm: Algorithm,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Minimum password length in bytes.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    #[serde(default = "default_salt_bits")]
    pub salt_bits: u32,
}

const fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

const fn default_min_password_length() -> usize {
    DEFAULT_MIN_PASSWORD_LENGTH
}

const fn default_salt_bits() -> u32 {
    DEFAULT_SALT_BITS
}

impl AlgorithmOptions {
    /// `aes-256-cbc`, 1 iteration, 32-byte minimum password, 256-bit salt.
    #[must_use]
    pub const fn encryption() -> Self {
        Self::with_algorithm(Algorithm::Aes256Cbc)
    }

    /// `sha256`, 1 iteration, 32-byte minimum password, 256-bit salt.
    #[must_use]
    pub const fn integrity() -> Self {
        Self::with_algorithm(Algorithm::Sha256)
    }

    #[must_use]
    pub const fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            iterations: DEFAULT_ITERATIONS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            salt_bits: DEFAULT_SALT_BITS,
        }
    }

    #[must_use]
    pub const fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub const fn min_password_length(mut self, length: usize) -> Self {
        self.min_password_length = length;
        self
    }

    #[must_use]
    pub const fn salt_bits(mut self, bits: u32) -> Self {
        self.salt_bits = bits;
        self
    }

    /// Checks the iteration count and that the algorithm fits `role`.
    ///
    /// # Errors
    /// * [`SealError::InvalidOptions`] If `iterations` is zero.
    /// * [`SealError::UnsupportedAlgorithm`] If the algorithm belongs to the other role.
    pub fn validate(&self, role: Role) -> Result<(), SealError> {
        if self.iterations == 0 {
            return Err(SealError::InvalidOptions {
                message: "iterations must be greater than zero".into(),
                context: Some(format!("{role} options").into()),
            });
        }
        self.algorithm.profile_for(role).map(|_| ())
    }
}

/// Options for a single seal or unseal call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealOptions {
    pub encryption: AlgorithmOptions,
    pub integrity: AlgorithmOptions,
    /// Token lifetime in milliseconds. `0` seals a token that never expires.
    pub ttl: u64,
    /// Tolerated clock difference between sealer and unsealer, in seconds.
    pub timestamp_skew_sec: u64,
    /// Correction added to the local clock, in milliseconds.
    pub localtime_offset_msec: i64,
}

impl Default for SealOptions {
    fn default() -> Self {
        Self {
            encryption: AlgorithmOptions::encryption(),
            integrity: AlgorithmOptions::integrity(),
            ttl: 0,
            timestamp_skew_sec: DEFAULT_TIMESTAMP_SKEW_SEC,
            localtime_offset_msec: 0,
        }
    }
}

impl SealOptions {
    #[must_use]
    pub const fn ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub const fn timestamp_skew_sec(mut self, skew: u64) -> Self {
        self.timestamp_skew_sec = skew;
        self
    }

    #[must_use]
    pub const fn localtime_offset_msec(mut self, offset: i64) -> Self {
        self.localtime_offset_msec = offset;
        self
    }

    /// Sets the PBKDF2 iteration count for both roles.
    #[must_use]
    pub const fn iterations(mut self, iterations: u32) -> Self {
        self.encryption.iterations = iterations;
        self.integrity.iterations = iterations;
        self
    }

    #[must_use]
    pub const fn encryption_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.encryption.algorithm = algorithm;
        self
    }

    /// # Errors
    /// See [`AlgorithmOptions::validate`].
    pub fn validate(&self) -> Result<(), SealError> {
        self.encryption.validate(Role::Encryption)?;
        self.integrity.validate(Role::Integrity)
    }
}
