use anyhow::{Context, Result};
use ironseal::{Credentials, SealOptions};
use serde_json::Value;
use tracing::info;

use crate::services::input;

/// Seals a JSON document given as an argument or on stdin and prints the token.
///
/// # Errors
/// Fails on invalid JSON or when [`ironseal::seal`] rejects the password or options.
pub fn seal_json(json: Option<String>, credentials: &Credentials, options: &SealOptions) -> Result<()> {
    let raw = input::argument_or_stdin(json)?;
    let payload: Value = serde_json::from_str(&raw).context("Payload is not valid JSON")?;

    let token = ironseal::seal(&payload, credentials, options)?;
    info!(
        algorithm = %options.encryption.algorithm,
        ttl = options.ttl,
        length = token.len(),
        "Payload sealed"
    );

    println!("{token}");
    Ok(())
}
