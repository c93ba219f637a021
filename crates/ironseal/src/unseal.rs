use serde::de::DeserializeOwned;
use tracing::instrument;
use zeroize::Zeroizing;

use crate::clock;
use crate::encoding::decode;
use crate::error::{SealError, SealErrorExt};
use crate::key::derive;
use crate::options::SealOptions;
use crate::password::Credentials;
use crate::token::SealedToken;
use crate::{cipher, integrity, payload};

/// Unseals `token` using the current system time.
///
/// # Errors
/// See [`unseal_at`].
pub fn unseal<T>(
    token: &str,
    password: impl Into<Credentials>,
    options: &SealOptions,
) -> Result<T, SealError>
where
    T: DeserializeOwned,
{
    unseal_at(token, password, options, clock::now_ms()?)
}

/// Unseals `token` as if the current time were `now_ms`.
///
/// The MAC is verified before the encryption key is derived or any field is decoded.
///
/// # Errors
/// * [`SealError::MalformedToken`] / [`SealError::UnsupportedVersion`] If the token does not parse.
/// * [`SealError::WeakPassword`] If either secret is too short.
/// * [`SealError::IntegrityCheckFailed`] On a wrong password or a tampered token.
/// * [`SealError::DecryptionFailed`] If the authenticated ciphertext does not decrypt.
/// * [`SealError::TokenExpired`] If the expiration plus skew lies in the past.
/// * [`SealError::Deserialization`] If the plaintext is not valid JSON for `T`.
#[instrument(
    level = "trace",
    skip_all,
    fields(
        encryption = %options.encryption.algorithm,
        integrity = %options.integrity.algorithm,
        iterations = options.encryption.iterations,
    )
)]
pub fn unseal_at<T>(
    token: &str,
    password: impl Into<Credentials>,
    options: &SealOptions,
    now_ms: u64,
) -> Result<T, SealError>
where
    T: DeserializeOwned,
{
    options.validate()?;
    let credentials = password.into();
    let sealed = SealedToken::parse(token)?;

    let integrity_key = derive(&credentials.integrity, &sealed.integrity.salt, &options.integrity)?;
    let authentic = integrity::verify(
        sealed.mac_base().as_bytes(),
        integrity_key.as_bytes(),
        &sealed.integrity.mac,
        options.integrity.algorithm,
    )?;
    if !authentic {
        return Err(SealError::IntegrityCheckFailed {});
    }

    let iv = decode(&sealed.encryption.iv).context("Decoding IV")?;
    let ciphertext = decode(&sealed.encryption.ciphertext).context("Decoding ciphertext")?;

    let key = derive(&credentials.encryption, &sealed.encryption.salt, &options.encryption)?;
    let plaintext = Zeroizing::new(cipher::decrypt(
        &ciphertext,
        key.as_bytes(),
        &iv,
        options.encryption.algorithm,
    )?);

    let (json, expiration) = payload::split(&plaintext)?;
    if let Some(expiration) = expiration {
        clock::check_expiration(expiration, now_ms, options)?;
    }

    serde_json::from_slice(json).map_err(|e| SealError::Deserialization {
        message: e.to_string().into(),
        context: Some("Decoding payload JSON".into()),
    })
}
