//! Password-based sealed tokens in the `Fe26.2` format.
//!
//! [`seal`] turns a password and any serializable payload into an opaque, tamper-evident,
//! optionally time-bounded token string. [`unseal`] verifies and decodes it with the same
//! password. The token carries every piece of state, so no server-side session store is needed.
//!
//! Tokens interoperate with other `Fe26.2` implementations (hapi `iron` and its ports) as long
//! as those tokens carry no password id and no outer expiration field.
//!
//! ## Token Format
//!
//! ```text
//! Fe26.2**<encryption salt>*<iv>*<ciphertext>**<integrity salt>*<mac>
//! ```
//!
//! * Salts are lowercase hex and feed PBKDF2-HMAC-SHA1 as text.
//! * IV, ciphertext and MAC are base64url without padding.
//! * The MAC is HMAC-SHA256 over everything before the integrity salt.
//! * Expiration (when `ttl > 0`) travels inside the ciphertext, after the JSON payload.
//!
//! ## Unseal Order
//!
//! Parse, verify the MAC, decrypt, check expiration, deserialize. Nothing is decrypted before
//! the MAC has been verified, and the two cryptographic failures ([`SealError::IntegrityCheckFailed`],
//! [`SealError::DecryptionFailed`]) carry no detail.
//!
//! ## Examples
//!
//! ```rust
//! use ironseal::prelude::*;
//!
//! # fn main() -> Result<(), SealError> {
//! let password = "a password that is at least 32 bytes long";
//! let options = SealOptions::default().ttl(60_000);
//!
//! let token = seal(&vec!["read", "write"], password, &options)?;
//! let scopes: Vec<String> = unseal(&token, password, &options)?;
//!
//! assert_eq!(scopes, ["read", "write"]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Via the extension trait
//! ```rust
//! use ironseal::prelude::*;
//!
//! # fn main() -> Result<(), SealError> {
//! let password = Password::key(vec![7u8; 32]);
//! let options = SealOptions::default();
//!
//! let token = 42u64.seal(password.clone(), &options)?;
//! assert_eq!(u64::unseal(&token, password, &options)?, 42);
//! # Ok(())
//! # }
//! ```

mod algorithm;
pub mod cipher;
mod clock;
pub mod encoding;
mod error;
pub mod extensions;
pub mod integrity;
pub mod key;
mod options;
mod password;
pub mod payload;
mod seal;
pub mod token;
mod unseal;

pub use algorithm::{Algorithm, Profile, Role};
pub use clock::now_ms;
pub use error::{SealError, SealErrorExt};
pub use key::{DerivedKey, GeneratedKey, derive, generate_key};
pub use options::{AlgorithmOptions, MAX_SALT_BITS, SealOptions};
pub use password::{Credentials, Password};
pub use seal::{seal, seal_at};
pub use token::{SealedToken, VERSION_TAG};
pub use unseal::{unseal, unseal_at};

pub mod prelude {
    pub use crate::algorithm::Algorithm;
    pub use crate::error::{SealError, SealErrorExt};
    pub use crate::extensions::SealExt;
    pub use crate::options::{AlgorithmOptions, SealOptions};
    pub use crate::password::{Credentials, Password};
    pub use crate::seal::seal;
    pub use crate::unseal::unseal;
}
