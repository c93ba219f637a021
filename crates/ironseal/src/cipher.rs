//! Symmetric encryption for the encryption envelope.

use aes::{Aes128, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyIvInit, StreamCipher};

use crate::algorithm::{Algorithm, Role};
use crate::error::SealError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Encrypts `plaintext` with an encryption algorithm.
///
/// # Errors
/// * [`SealError::UnsupportedAlgorithm`] If `algorithm` is an integrity algorithm.
/// * [`SealError::InvalidOptions`] If the key or IV length does not fit the algorithm.
pub fn encrypt(
    plaintext: &[u8],
    key: &[u8],
    iv: &[u8],
    algorithm: Algorithm,
) -> Result<Vec<u8>, SealError> {
    let invalid_length = |_: InvalidLength| SealError::InvalidOptions {
        message: format!("Invalid key or IV length for {algorithm}").into(),
        context: None,
    };

    match algorithm {
        Algorithm::Aes256Cbc => Ok(Aes256CbcEnc::new_from_slices(key, iv)
            .map_err(invalid_length)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        Algorithm::Aes128Ctr => {
            let mut cipher = Aes128Ctr::new_from_slices(key, iv).map_err(invalid_length)?;
            let mut buf = plaintext.to_vec();
            cipher.apply_keystream(&mut buf);
            Ok(buf)
        }
        Algorithm::Sha256 => Err(algorithm.role_mismatch(Role::Encryption)),
    }
}

/// Decrypts `ciphertext`. Every failure collapses into [`SealError::DecryptionFailed`].
///
/// # Errors
/// * [`SealError::UnsupportedAlgorithm`] If `algorithm` is an integrity algorithm.
/// * [`SealError::DecryptionFailed`] On bad padding or a key/IV length mismatch.
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8],
    algorithm: Algorithm,
) -> Result<Vec<u8>, SealError> {
    match algorithm {
        Algorithm::Aes256Cbc => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|_| SealError::DecryptionFailed {})?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| SealError::DecryptionFailed {}),
        Algorithm::Aes128Ctr => {
            let mut cipher =
                Aes128Ctr::new_from_slices(key, iv).map_err(|_| SealError::DecryptionFailed {})?;
            let mut buf = ciphertext.to_vec();
            cipher.apply_keystream(&mut buf);
            Ok(buf)
        }
        Algorithm::Sha256 => Err(algorithm.role_mismatch(Role::Encryption)),
    }
}
