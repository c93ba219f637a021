use ironseal::prelude::*;
use serde::{Deserialize, Serialize};

/// Shared secret of the reference vectors.
pub const PASSWORD: &str = "passwordpasswordpasswordpasswordpasswordpasswordpasswordpassword";
/// A second secret that passes the default length check.
pub const ALTERNATIVE_PASSWORD: &str =
    "alternativealternativealternativealternativealternativealternativealternative";

/// Produced by hapi `iron` on Node.js.
pub const SEALED_FROM_NODE: &str = "Fe26.2**6a0a8428b61b9e81c6a6e2556771a9c6a95bf4a68f028c08100e53a5187f8d04*lxsszOvWyix-6nMuIu1LuA*8RcBvCQJWJZAROQMFHydnQ**e74b0b23724cb4b9f98e740fbb1d7bf8c6fabaf2bfa256e4ad639651c43c3338*m8PCQ8EmX4QKLTqL0WYPycKTdE5-encTlU45QbNcz40";
/// Produced by `iron-crypto` in Go.
pub const SEALED_FROM_GO: &str = "Fe26.2**5c8074c7968402902cb644d2c552a416ae73d0b29af8215b7c98ecbe1c86af31*S8yjbJgU7Xgn-zjsen1TiQ*edmvCzfh3K5AAULEerrLvw**304664241a9d67c92c8589f49aeb0aa90af672c8e144ccdef4b04a4473fa1d08*xwzfk-UCjZXVNRqenqJXCuxxcXabRkaTp1WwI8nLrLc";
/// Authentic token whose plaintext is `Hello World!` without JSON quotes.
pub const SEALED_INVALID_JSON: &str = "Fe26.2**cd1f3fc21662f8e50a8b55c6df349d4966d2184782c7250eb71f61b2d8a490d7*daqwINv4U_jDow1nquETpg*c0f4pPDgbGLaRLuPBVrRVA**0eb59f59358b399f503f9a6e256b98939be96681158e49af6efdf33b13832d9b*kxgs8FVxhWv9V_DO1UTyR9FuyBQKH3fbDabWyN1__Fw";
/// Ciphertext field outside the base64url alphabet.
pub const SEALED_INVALID_B64: &str = "Fe26.2**e1da5623ed521084d1967f01297576c77ae55c632ff5d4f81c26d52378902ef0*e3epKHK1DKRFeDatD1hXrQ*fdk!**f69b2b339ee498be05acb591ab4ec635ab9bc3d3d9b17eefd7a518ac696f7d7a*M3a8CK5E4UzRXpyBWccRkH7noIyunoP3Veg9gUQl108";
/// IV field outside the base64url alphabet.
pub const SEALED_INVALID_IV: &str = "Fe26.2**1cee2defcadcb298f2f19904c76bf55f2f4d7be6c8bf04ca70f60181a782767f*gsdg!*jDaXvJ9sI-RcaGpMhmvUIw**ff301b16779215e7803206b0119763cdd7a4415993b5605cef36e5321dd2d889*lRUixLfGW3u-4d8jUQozbHN4Ij-IMPilwr3llwah6cc";

/// Fixed clock for expiration tests.
pub const NOW: u64 = 1_700_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: u64,
    pub name: String,
    pub roles: Vec<String>,
}

#[must_use]
pub fn session() -> Session {
    Session { user_id: 42, name: "Ada".to_owned(), roles: vec!["admin".to_owned()] }
}

/// Options the reference vectors were sealed with.
#[must_use]
pub fn reference_options() -> SealOptions {
    SealOptions::default().iterations(2)
}
