//! Closed set of algorithm identifiers and their parameters.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::SealError;

/// What an algorithm is used for inside a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Role {
    #[strum(serialize = "encryption")]
    Encryption,
    #[strum(serialize = "integrity")]
    Integrity,
}

/// Fixed parameters of an [`Algorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub role: Role,
    /// Key length in bytes.
    pub key_len: usize,
    /// IV length in bytes, `0` for integrity algorithms.
    pub iv_len: usize,
}

/// Supported algorithms, named by their wire identifiers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(parse_err_ty = SealError, parse_err_fn = unknown_algorithm)]
pub enum Algorithm {
    /// AES-256 in CBC mode with PKCS#7 padding.
    #[serde(rename = "aes-256-cbc")]
    #[strum(serialize = "aes-256-cbc")]
    Aes256Cbc,

    /// AES-128 in CTR mode with a 128-bit big-endian counter.
    #[serde(rename = "aes-128-ctr")]
    #[strum(serialize = "aes-128-ctr")]
    Aes128Ctr,

    /// HMAC-SHA256.
    #[serde(rename = "sha256")]
    #[strum(serialize = "sha256")]
    Sha256,
}

impl Algorithm {
    #[must_use]
    pub const fn profile(self) -> Profile {
        match self {
            Self::Aes256Cbc => Profile { role: Role::Encryption, key_len: 32, iv_len: 16 },
            Self::Aes128Ctr => Profile { role: Role::Encryption, key_len: 16, iv_len: 16 },
            Self::Sha256 => Profile { role: Role::Integrity, key_len: 32, iv_len: 0 },
        }
    }

    /// Returns the profile if the algorithm may be used in `role`.
    ///
    /// # Errors
    /// * [`SealError::UnsupportedAlgorithm`] If the algorithm belongs to the other role.
    pub fn profile_for(self, role: Role) -> Result<Profile, SealError> {
        let profile = self.profile();
        if profile.role == role { Ok(profile) } else { Err(self.role_mismatch(role)) }
    }

    pub(crate) fn role_mismatch(self, role: Role) -> SealError {
        SealError::UnsupportedAlgorithm {
            message: format!("'{self}' is not an {role} algorithm").into(),
            context: None,
        }
    }
}

fn unknown_algorithm(value: &str) -> SealError {
    SealError::UnsupportedAlgorithm {
        message: format!("Unknown algorithm '{value}'").into(),
        context: None,
    }
}
