//! Reading secrets and payloads from the environment, files and stdin.

use anyhow::{Context, Result, anyhow};
use ironseal::Credentials;
use std::io::Read;
use std::path::Path;

/// Environment variable holding the password when no password file is given.
pub const PASSWORD_ENV: &str = "IRONSEAL_PASSWORD";

/// Loads the password from `file`, or from [`PASSWORD_ENV`] when no file is given.
///
/// Trailing line breaks are stripped so `echo secret > file` works as expected.
///
/// # Errors
/// Fails if the file cannot be read or the variable is unset or empty.
pub fn read_credentials(file: Option<&Path>) -> Result<Credentials> {
    let mut secret = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read password file {}", path.display()))?,
        None => std::env::var(PASSWORD_ENV)
            .map_err(|_| anyhow!("No password: set {PASSWORD_ENV} or pass --password-file"))?,
    };

    let trimmed = secret.trim_end_matches(['\r', '\n']).len();
    secret.truncate(trimmed);

    if secret.is_empty() {
        return Err(anyhow!("Password is empty"));
    }

    Ok(Credentials::from(secret))
}

/// Returns `argument` or, when it is absent, everything on stdin.
///
/// Surrounding whitespace is trimmed in both cases.
///
/// # Errors
/// Fails if stdin cannot be read.
pub fn argument_or_stdin(argument: Option<String>) -> Result<String> {
    let raw = match argument {
        Some(value) => value,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
            buffer
        },
    };

    Ok(raw.trim().to_owned())
}
