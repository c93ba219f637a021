//! # Token Codec
//!
//! Wire layout of a sealed token:
//!
//! ```text
//! Fe26.2**<encryption salt>*<iv>*<ciphertext>**<integrity salt>*<mac>
//! ```
//!
//! The MAC covers every character before the integrity salt, including the first `*` of the
//! second `**` separator:
//!
//! ```text
//! Fe26.2**<encryption salt>*<iv>*<ciphertext>*
//! ```
//!
//! Other `Fe26.2` producers place an optional password id between the first two stars and an
//! expiration between the last two. Tokens that leave both empty share this exact layout.
//!
//! Parsing validates structure and alphabets only. It never decodes base64 and never runs a
//! cryptographic primitive.

use std::fmt;
use std::str::FromStr;

use crate::encoding::{is_base64url, is_hex_salt};
use crate::error::SealError;

/// The only accepted version tag.
pub const VERSION_TAG: &str = "Fe26.2";

const SECTION_SEPARATOR: &str = "**";
const FIELD_SEPARATOR: char = '*';

/// Salt, IV and ciphertext, kept in their encoded text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionEnvelope {
    /// Lowercase hex.
    pub salt: String,
    /// base64url.
    pub iv: String,
    /// base64url.
    pub ciphertext: String,
}

/// Integrity salt and MAC, kept in their encoded text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityEnvelope {
    /// Lowercase hex.
    pub salt: String,
    /// base64url.
    pub mac: String,
}

/// A structurally valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedToken {
    pub encryption: EncryptionEnvelope,
    pub integrity: IntegrityEnvelope,
}

impl EncryptionEnvelope {
    /// The string the integrity MAC is computed over.
    #[must_use]
    pub fn mac_base(&self) -> String {
        format!("{VERSION_TAG}{SECTION_SEPARATOR}{}*{}*{}*", self.salt, self.iv, self.ciphertext)
    }
}

impl SealedToken {
    #[must_use]
    pub const fn new(encryption: EncryptionEnvelope, integrity: IntegrityEnvelope) -> Self {
        Self { encryption, integrity }
    }

    #[must_use]
    pub const fn version(&self) -> &'static str {
        VERSION_TAG
    }

    #[must_use]
    pub fn mac_base(&self) -> String {
        self.encryption.mac_base()
    }

    /// Parses the wire form.
    ///
    /// # Errors
    /// * [`SealError::MalformedToken`] On wrong field counts, empty fields, or characters
    ///   outside the field alphabet.
    /// * [`SealError::UnsupportedVersion`] If the version is well formed but not `Fe26.2`.
    pub fn parse(token: &str) -> Result<Self, SealError> {
        let sections: Vec<&str> = token.split(SECTION_SEPARATOR).collect();
        let [version, encryption, integrity] = sections.as_slice() else {
            return Err(malformed(format!(
                "Expected 3 sections separated by '**', found {}",
                sections.len()
            )));
        };

        let encryption: Vec<&str> = encryption.split(FIELD_SEPARATOR).collect();
        let [salt, iv, ciphertext] = encryption.as_slice() else {
            return Err(malformed(format!(
                "Expected 3 encryption fields, found {}",
                encryption.len()
            )));
        };

        let integrity: Vec<&str> = integrity.split(FIELD_SEPARATOR).collect();
        let [integrity_salt, mac] = integrity.as_slice() else {
            return Err(malformed(format!(
                "Expected 2 integrity fields, found {}",
                integrity.len()
            )));
        };

        check_field("version", version, |v| {
            !v.is_empty() && v.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'.')
        })?;
        check_field("encryption salt", salt, is_hex_salt)?;
        check_field("iv", iv, is_base64url)?;
        check_field("ciphertext", ciphertext, is_base64url)?;
        check_field("integrity salt", integrity_salt, is_hex_salt)?;
        check_field("mac", mac, is_base64url)?;

        if *version != VERSION_TAG {
            return Err(SealError::UnsupportedVersion {
                message: format!("Expected '{VERSION_TAG}', found '{version}'").into(),
                context: None,
            });
        }

        Ok(Self {
            encryption: EncryptionEnvelope {
                salt: (*salt).to_owned(),
                iv: (*iv).to_owned(),
                ciphertext: (*ciphertext).to_owned(),
            },
            integrity: IntegrityEnvelope {
                salt: (*integrity_salt).to_owned(),
                mac: (*mac).to_owned(),
            },
        })
    }
}

fn malformed(message: String) -> SealError {
    SealError::MalformedToken { message: message.into(), context: None }
}

fn check_field(name: &str, value: &str, valid: impl Fn(&str) -> bool) -> Result<(), SealError> {
    if value.is_empty() {
        return Err(malformed(format!("Empty {name}")));
    }
    if !valid(value) {
        return Err(malformed(format!("Invalid characters in {name}")));
    }
    Ok(())
}

impl fmt::Display for SealedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}*{}", self.mac_base(), self.integrity.salt, self.integrity.mac)
    }
}

impl FromStr for SealedToken {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
