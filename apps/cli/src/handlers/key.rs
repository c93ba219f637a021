use anyhow::{Context, Result, bail};
use ironseal::encoding::is_hex_salt;
use ironseal::{Algorithm, AlgorithmOptions, Credentials, Role, SealOptions};
use serde::Serialize;

/// What `ironseal key` prints.
#[derive(Debug, Serialize)]
struct KeyReport {
    algorithm: Algorithm,
    key: String,
    salt: String,
    iv: Option<String>,
}

/// Derives a key for `algorithm` with the configured options for its role and prints it as JSON.
///
/// # Errors
/// Fails on a non-hex salt or IV, or when key generation rejects the password or IV length.
pub fn generate(
    algorithm: Algorithm,
    salt: Option<String>,
    iv: Option<String>,
    credentials: &Credentials,
    options: &SealOptions,
) -> Result<()> {
    if let Some(salt) = &salt
        && !is_hex_salt(salt)
    {
        bail!("Salt must be lowercase hex");
    }
    let iv = iv.as_deref().map(hex::decode).transpose().context("IV is not valid hex")?;

    let (password, base) = match algorithm.profile().role {
        Role::Encryption => (&credentials.encryption, options.encryption),
        Role::Integrity => (&credentials.integrity, options.integrity),
    };
    let key_options = AlgorithmOptions { algorithm, ..base };

    let generated = ironseal::generate_key(password, &key_options, salt.as_deref(), iv.as_deref())?;

    let report = KeyReport {
        algorithm: generated.algorithm,
        key: hex::encode(generated.key.as_bytes()),
        salt: generated.salt,
        iv: generated.iv.map(hex::encode),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
