//! # Key Derivation
//!
//! Turns a [`Password`] and a hex salt into the key for one algorithm.
//!
//! Text passwords are stretched with PBKDF2-HMAC-SHA1. The salt enters PBKDF2 as its ASCII hex
//! text, not as the decoded bytes, which is what every `Fe26.2` implementation does. Raw key
//! passwords skip stretching entirely.

use getrandom::fill;
use sha1::Sha1;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithm::{Algorithm, Role};
use crate::encoding::hex_salt;
use crate::error::SealError;
use crate::options::{AlgorithmOptions, MAX_SALT_BITS};
use crate::password::Password;

/// Key material for a single cipher or MAC operation. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: Vec<u8>,
}

impl DerivedKey {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}

/// Result of [`generate_key`]: the key together with the salt and IV that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    pub algorithm: Algorithm,
    pub key: DerivedKey,
    /// Lowercase hex salt.
    pub salt: String,
    /// `None` for integrity algorithms.
    pub iv: Option<Vec<u8>>,
}

/// Derives the key for `options.algorithm` from `password` and `salt`.
///
/// * Text passwords must be non-empty and at least `min_password_length` bytes long.
/// * Key passwords must be at least as long as the algorithm key. Ciphers use the leading
///   key-length bytes, HMAC uses the whole buffer.
///
/// # Errors
/// * [`SealError::WeakPassword`] If the password fails the length checks.
/// * [`SealError::InvalidOptions`] If `iterations` is zero.
pub fn derive(
    password: &Password,
    salt: &str,
    options: &AlgorithmOptions,
) -> Result<DerivedKey, SealError> {
    if options.iterations == 0 {
        return Err(SealError::InvalidOptions {
            message: "iterations must be greater than zero".into(),
            context: None,
        });
    }

    let profile = options.algorithm.profile();

    match password {
        Password::Text(text) => {
            if text.is_empty() {
                return Err(SealError::WeakPassword {
                    message: "Empty password".into(),
                    context: None,
                });
            }
            if text.len() < options.min_password_length {
                return Err(SealError::WeakPassword {
                    message: format!(
                        "Password must be at least {} bytes",
                        options.min_password_length
                    )
                    .into(),
                    context: None,
                });
            }

            let mut key = DerivedKey { bytes: vec![0u8; profile.key_len] };
            pbkdf2::pbkdf2_hmac::<Sha1>(
                text.as_bytes(),
                salt.as_bytes(),
                options.iterations,
                &mut key.bytes,
            );
            Ok(key)
        }
        Password::Key(raw) => {
            if raw.len() < profile.key_len {
                return Err(SealError::WeakPassword {
                    message: format!(
                        "Key must be at least {} bytes for {}",
                        profile.key_len, options.algorithm
                    )
                    .into(),
                    context: None,
                });
            }

            let bytes = match profile.role {
                Role::Encryption => raw[..profile.key_len].to_vec(),
                Role::Integrity => raw.to_vec(),
            };
            Ok(DerivedKey { bytes })
        }
    }
}

/// Generates a key, filling in a random salt and IV where none is supplied.
///
/// Raw key passwords do not feed the salt into the key, but still get one so every token
/// carries the same fields. Integrity algorithms get no IV.
///
/// # Errors
/// * [`SealError::InvalidOptions`] If `salt_bits` is outside `1..=2^31` and a salt has to be
///   generated, or a supplied IV has the wrong length.
/// * [`SealError::Internal`] If the OS random source fails.
/// * See [`derive`] for password failures.
pub fn generate_key(
    password: &Password,
    options: &AlgorithmOptions,
    salt: Option<&str>,
    iv: Option<&[u8]>,
) -> Result<GeneratedKey, SealError> {
    let profile = options.algorithm.profile();

    let salt = match salt {
        Some(salt) if !salt.is_empty() => salt.to_owned(),
        _ => random_salt(options.salt_bits)?,
    };

    let key = derive(password, &salt, options)?;

    let iv = match (profile.iv_len, iv) {
        (0, _) => None,
        (len, Some(iv)) if iv.len() == len => Some(iv.to_vec()),
        (len, Some(iv)) => {
            return Err(SealError::InvalidOptions {
                message: format!("IV must be {len} bytes, got {}", iv.len()).into(),
                context: Some(format!("{} key", options.algorithm).into()),
            });
        }
        (len, None) => Some(random_bytes(len)?),
    };

    Ok(GeneratedKey { algorithm: options.algorithm, key, salt, iv })
}

/// Returns `ceil(bits / 8)` random bytes as lowercase hex.
///
/// # Errors
/// * [`SealError::InvalidOptions`] If `bits` is zero or above `2^31`.
/// * [`SealError::Internal`] If the OS random source fails.
pub fn random_salt(bits: u32) -> Result<String, SealError> {
    if bits == 0 || bits > MAX_SALT_BITS {
        return Err(SealError::InvalidOptions {
            message: format!("salt_bits must be within 1..={MAX_SALT_BITS}, got {bits}").into(),
            context: None,
        });
    }
    Ok(hex_salt(random_bytes(bits.div_ceil(8) as usize)?))
}

pub(crate) fn random_bytes(len: usize) -> Result<Vec<u8>, SealError> {
    let mut bytes = vec![0u8; len];
    fill(&mut bytes).map_err(|e| SealError::Internal {
        message: e.to_string().into(),
        context: Some("System RNG unavailable".into()),
    })?;
    Ok(bytes)
}
