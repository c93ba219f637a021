pub mod fixtures;

use fixtures::{
    PASSWORD, SEALED_FROM_GO, SEALED_FROM_NODE, SEALED_INVALID_B64, SEALED_INVALID_IV,
    SEALED_INVALID_JSON, reference_options,
};
use ironseal::prelude::*;
use ironseal::{SealedToken, unseal_at};

#[test]
fn unseals_token_from_node() {
    let message: String = unseal(SEALED_FROM_NODE, PASSWORD, &reference_options()).unwrap();
    assert_eq!(message, "Hello World!");
}

#[test]
fn unseals_token_from_go() {
    let message: String = unseal(SEALED_FROM_GO, PASSWORD, &reference_options()).unwrap();
    assert_eq!(message, "Hello World!");
}

#[test]
fn foreign_tokens_have_no_expiration() {
    let far_future = u64::MAX / 2;
    let message: String =
        unseal_at(SEALED_FROM_GO, PASSWORD, &reference_options(), far_future).unwrap();
    assert_eq!(message, "Hello World!");
}

#[test]
fn reserializing_a_foreign_token_is_lossless() {
    let parsed = SealedToken::parse(SEALED_FROM_NODE).unwrap();
    assert_eq!(parsed.to_string(), SEALED_FROM_NODE);
}

#[test]
fn authentic_token_with_invalid_json() {
    let err = unseal::<String>(SEALED_INVALID_JSON, PASSWORD, &reference_options()).unwrap_err();
    assert!(matches!(err, SealError::Deserialization { .. }), "got {err:?}");
}

#[test]
fn invalid_base64_ciphertext_is_malformed() {
    let err = unseal::<String>(SEALED_INVALID_B64, PASSWORD, &reference_options()).unwrap_err();
    assert!(matches!(err, SealError::MalformedToken { .. }), "got {err:?}");
}

#[test]
fn invalid_base64_iv_is_malformed() {
    let err = unseal::<String>(SEALED_INVALID_IV, PASSWORD, &reference_options()).unwrap_err();
    assert!(matches!(err, SealError::MalformedToken { .. }), "got {err:?}");
}

#[test]
fn wrong_iteration_count_fails_integrity() {
    let err = unseal::<String>(SEALED_FROM_NODE, PASSWORD, &SealOptions::default()).unwrap_err();
    assert!(matches!(err, SealError::IntegrityCheckFailed {}));
}
