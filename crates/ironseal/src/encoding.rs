//! Text encodings of the token fields.
//!
//! IV, ciphertext and MAC are base64url without padding. Salts are lowercase hex.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::SealError;

/// Encodes bytes as base64url without padding.
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes strict base64url without padding.
///
/// # Errors
/// * [`SealError::MalformedToken`] If the text is not canonical unpadded base64url.
pub fn decode(text: &str) -> Result<Vec<u8>, SealError> {
    URL_SAFE_NO_PAD.decode(text).map_err(|e| SealError::MalformedToken {
        message: format!("Invalid base64url: {e}").into(),
        context: None,
    })
}

/// Encodes salt bytes as lowercase hex.
#[must_use]
pub fn hex_salt(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Returns `true` for a non-empty string over `[A-Za-z0-9_-]`.
#[must_use]
pub fn is_base64url(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Returns `true` for a non-empty string over `[0-9a-f]`.
#[must_use]
pub fn is_hex_salt(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_url_safe_without_padding() {
        assert_eq!(encode([0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"Hello World!"), "SGVsbG8gV29ybGQh");
    }

    #[test]
    fn test_decode_rejects_padding_and_foreign_alphabet() {
        assert_eq!(decode("-_8").unwrap(), vec![0xfb, 0xff]);
        assert!(matches!(decode("-_8="), Err(SealError::MalformedToken { .. })));
        assert!(matches!(decode("+/8"), Err(SealError::MalformedToken { .. })));
        assert!(matches!(decode("fdk!"), Err(SealError::MalformedToken { .. })));
    }

    #[test]
    fn test_iv_from_foreign_token_decodes_to_block() {
        assert_eq!(decode("lxsszOvWyix-6nMuIu1LuA").unwrap().len(), 16);
    }

    #[test]
    fn test_alphabet_validators() {
        assert!(is_base64url("S8yjbJgU7Xgn-zjsen1TiQ"));
        assert!(!is_base64url(""));
        assert!(!is_base64url("gsdg!"));
        assert!(!is_base64url("abc="));

        assert!(is_hex_salt("b27a06366ace6bb1"));
        assert!(!is_hex_salt("B27A"));
        assert!(!is_hex_salt("xyz"));
        assert!(!is_hex_salt(""));
    }

    #[test]
    fn test_hex_salt_is_lowercase() {
        assert_eq!(hex_salt([0xAB, 0x01]), "ab01");
    }
}
