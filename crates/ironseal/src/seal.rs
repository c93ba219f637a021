use serde::Serialize;
use tracing::instrument;

use crate::clock;
use crate::encoding::encode;
use crate::error::SealError;
use crate::key::{GeneratedKey, generate_key};
use crate::options::SealOptions;
use crate::password::Credentials;
use crate::token::{EncryptionEnvelope, IntegrityEnvelope, SealedToken};
use crate::{cipher, integrity, payload};

/// Seals `payload` into a token using the current system time.
///
/// # Errors
/// See [`seal_at`].
pub fn seal<T>(
    payload: &T,
    password: impl Into<Credentials>,
    options: &SealOptions,
) -> Result<String, SealError>
where
    T: Serialize + ?Sized,
{
    seal_at(payload, password, options, clock::now_ms()?)
}

/// Seals `payload` into a token as if the current time were `now_ms`.
///
/// A fresh encryption salt, IV and integrity salt are drawn for every call, so sealing the same
/// payload twice never yields the same token.
///
/// # Errors
/// * [`SealError::InvalidOptions`] / [`SealError::UnsupportedAlgorithm`] For invalid options.
/// * [`SealError::WeakPassword`] If either secret is too short.
/// * [`SealError::Serialization`] If the payload cannot be encoded as JSON.
/// * [`SealError::Internal`] If the OS random source fails.
#[instrument(
    level = "trace",
    skip_all,
    fields(
        encryption = %options.encryption.algorithm,
        integrity = %options.integrity.algorithm,
        iterations = options.encryption.iterations,
        ttl = options.ttl,
    )
)]
pub fn seal_at<T>(
    payload: &T,
    password: impl Into<Credentials>,
    options: &SealOptions,
    now_ms: u64,
) -> Result<String, SealError>
where
    T: Serialize + ?Sized,
{
    options.validate()?;
    let credentials = password.into();

    let expiration =
        if options.ttl > 0 { Some(clock::expiration(now_ms, options)?) } else { None };
    let plaintext = payload::serialize(payload, expiration)?;

    let GeneratedKey { key, salt, iv, .. } =
        generate_key(&credentials.encryption, &options.encryption, None, None)?;
    let iv = iv.ok_or_else(|| SealError::from("Encryption key generated without an IV"))?;
    let ciphertext = cipher::encrypt(&plaintext, key.as_bytes(), &iv, options.encryption.algorithm)?;

    let encryption = EncryptionEnvelope { salt, iv: encode(&iv), ciphertext: encode(&ciphertext) };

    let GeneratedKey { key, salt, .. } =
        generate_key(&credentials.integrity, &options.integrity, None, None)?;
    let mac = integrity::compute(
        encryption.mac_base().as_bytes(),
        key.as_bytes(),
        options.integrity.algorithm,
    )?;

    Ok(SealedToken::new(encryption, IntegrityEnvelope { salt, mac }).to_string())
}
