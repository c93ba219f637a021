//! HMAC over the token prefix.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::algorithm::{Algorithm, Role};
use crate::encoding::encode;
use crate::error::SealError;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64url-encoded MAC of `data`.
///
/// # Errors
/// * [`SealError::UnsupportedAlgorithm`] If `algorithm` is an encryption algorithm.
pub fn compute(data: &[u8], key: &[u8], algorithm: Algorithm) -> Result<String, SealError> {
    match algorithm {
        Algorithm::Sha256 => {
            // HMAC accepts keys of any length.
            let mut mac = <HmacSha256 as Mac>::new_from_slice(key).map_err(|e| {
                SealError::Internal { message: e.to_string().into(), context: None }
            })?;
            mac.update(data);
            Ok(encode(mac.finalize().into_bytes()))
        }
        Algorithm::Aes256Cbc | Algorithm::Aes128Ctr => {
            Err(algorithm.role_mismatch(Role::Integrity))
        }
    }
}

/// Recomputes the MAC and compares the encoded forms in constant time.
///
/// # Errors
/// * [`SealError::UnsupportedAlgorithm`] If `algorithm` is an encryption algorithm.
pub fn verify(data: &[u8], key: &[u8], mac: &str, algorithm: Algorithm) -> Result<bool, SealError> {
    let expected = compute(data, key, algorithm)?;
    Ok(expected.as_bytes().ct_eq(mac.as_bytes()).into())
}
