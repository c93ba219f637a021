//! # Seal Extensions
//!
//! The [`SealExt`] extension trait lets any JSON-serializable value seal itself and be
//! restored from a token without naming the free functions.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SealError;
use crate::options::SealOptions;
use crate::password::Credentials;

/// An extension trait for ergonomic sealing.
///
/// Implemented automatically for every type that is both [`Serialize`] and [`DeserializeOwned`].
pub trait SealExt: Serialize + DeserializeOwned {
    /// Seals `self` into a token.
    ///
    /// # Errors
    /// See [`crate::seal_at`].
    fn seal(&self, password: impl Into<Credentials>, options: &SealOptions) -> Result<String, SealError> {
        crate::seal::seal(self, password, options)
    }

    /// Restores a value from a token.
    ///
    /// # Errors
    /// See [`crate::unseal_at`].
    fn unseal(
        token: &str,
        password: impl Into<Credentials>,
        options: &SealOptions,
    ) -> Result<Self, SealError> {
        crate::unseal::unseal(token, password, options)
    }
}

impl<T: Serialize + DeserializeOwned> SealExt for T {}
