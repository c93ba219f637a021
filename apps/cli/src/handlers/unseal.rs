use anyhow::{Result, anyhow};
use ironseal::{Credentials, SealOptions};
use serde_json::Value;
use tracing::{info, warn};

use crate::services::input;

/// Verifies a token given as an argument or on stdin and prints its JSON payload.
///
/// Rejections are logged by kind only.
///
/// # Errors
/// Fails when the token is malformed, forged, expired, or sealed with another password.
pub fn unseal_token(
    token: Option<String>,
    credentials: &Credentials,
    options: &SealOptions,
) -> Result<()> {
    let token = input::argument_or_stdin(token)?;

    match ironseal::unseal::<Value>(&token, credentials, options) {
        Ok(payload) => {
            info!("Token accepted");
            println!("{}", serde_json::to_string(&payload)?);
            Ok(())
        },
        Err(err) => {
            warn!(kind = err.kind(), "Token rejected");
            Err(anyhow!("{}: {err}", err.kind()))
        },
    }
}
