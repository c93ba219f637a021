//! Secrets accepted by [`crate::seal`] and [`crate::unseal`].

use std::fmt;
use zeroize::Zeroizing;

/// A sealing secret. Both forms are wiped from memory on drop.
#[derive(Clone)]
pub enum Password {
    /// Human-supplied text, stretched with PBKDF2.
    Text(Zeroizing<String>),
    /// Raw key material, used directly without stretching.
    Key(Zeroizing<Vec<u8>>),
}

impl Password {
    #[must_use]
    pub fn text(secret: impl Into<String>) -> Self {
        Self::Text(Zeroizing::new(secret.into()))
    }

    #[must_use]
    pub fn key(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Key(Zeroizing::new(bytes.into()))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Key(key) => key.as_slice(),
        }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(_) => f.write_str("Password::Text(<redacted>)"),
            Self::Key(_) => f.write_str("Password::Key(<redacted>)"),
        }
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<Vec<u8>> for Password {
    fn from(value: Vec<u8>) -> Self {
        Self::key(value)
    }
}

impl From<&[u8]> for Password {
    fn from(value: &[u8]) -> Self {
        Self::key(value)
    }
}

/// The pair of secrets used for one token.
///
/// Converting from a single secret uses it for both keys, which is the common case.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub encryption: Password,
    pub integrity: Password,
}

impl Credentials {
    #[must_use]
    pub fn new(encryption: impl Into<Password>, integrity: impl Into<Password>) -> Self {
        Self { encryption: encryption.into(), integrity: integrity.into() }
    }
}

impl From<Password> for Credentials {
    fn from(value: Password) -> Self {
        Self { encryption: value.clone(), integrity: value }
    }
}

impl From<&str> for Credentials {
    fn from(value: &str) -> Self {
        Password::text(value).into()
    }
}

impl From<String> for Credentials {
    fn from(value: String) -> Self {
        Password::text(value).into()
    }
}

impl From<&Credentials> for Credentials {
    fn from(value: &Credentials) -> Self {
        value.clone()
    }
}
