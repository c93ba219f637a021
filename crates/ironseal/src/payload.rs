//! Plaintext framing.
//!
//! The encrypted plaintext is the JSON document, optionally followed by a NUL byte and the
//! expiration time as exactly 20 zero-padded ASCII digits (Unix milliseconds). JSON text never
//! contains a raw NUL, so the first NUL always starts the marker.

use serde::Serialize;
use std::io;
use zeroize::Zeroizing;

use crate::error::{SealError, SealErrorExt};

const MARKER: u8 = 0x00;
const EXPIRATION_DIGITS: usize = 20;
const INITIAL_CAPACITY: usize = 256;

/// Growable byte buffer that wipes every allocation it leaves behind.
///
/// Growth moves the contents into a fresh allocation and zeroizes the old one, so no stale copy
/// of the plaintext is ever handed back to the allocator.
struct WipingBuffer(Zeroizing<Vec<u8>>);

impl WipingBuffer {
    fn with_capacity(capacity: usize) -> Self {
        Self(Zeroizing::new(Vec::with_capacity(capacity)))
    }

    fn extend(&mut self, bytes: &[u8]) {
        let needed = self.0.len() + bytes.len();
        if needed > self.0.capacity() {
            let mut grown =
                Zeroizing::new(Vec::with_capacity(needed.max(self.0.capacity().saturating_mul(2))));
            grown.extend_from_slice(&self.0);
            self.0 = grown;
        }
        self.0.extend_from_slice(bytes);
    }

    fn push_expiration(&mut self, expiration: Option<u64>) {
        if let Some(expiration) = expiration {
            self.extend(&[MARKER]);
            self.extend(format!("{expiration:020}").as_bytes());
        }
    }
}

impl io::Write for WipingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.extend(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const fn marker_len(expiration: Option<u64>) -> usize {
    if expiration.is_some() { 1 + EXPIRATION_DIGITS } else { 0 }
}

/// Serializes `value` as JSON and appends the expiration marker when `expiration` is set.
///
/// # Errors
/// * [`SealError::Serialization`] If `value` cannot be encoded as JSON.
pub fn serialize<T>(value: &T, expiration: Option<u64>) -> Result<Zeroizing<Vec<u8>>, SealError>
where
    T: Serialize + ?Sized,
{
    let mut buffer = WipingBuffer::with_capacity(INITIAL_CAPACITY);
    serde_json::to_writer(&mut buffer, value).context("Encoding payload as JSON")?;
    buffer.push_expiration(expiration);
    Ok(buffer.0)
}

/// Copies `json` into a wiped buffer sized for the marker and appends it when `expiration` is
/// set.
#[must_use]
pub fn frame(json: &[u8], expiration: Option<u64>) -> Zeroizing<Vec<u8>> {
    let mut buffer = WipingBuffer::with_capacity(json.len() + marker_len(expiration));
    buffer.extend(json);
    buffer.push_expiration(expiration);
    buffer.0
}

/// Splits a decrypted plaintext into the JSON bytes and the optional expiration.
///
/// # Errors
/// * [`SealError::Deserialization`] If a marker is present but is not exactly 20 digits that
///   fit in a `u64`.
pub fn split(plaintext: &[u8]) -> Result<(&[u8], Option<u64>), SealError> {
    let Some(position) = plaintext.iter().position(|&b| b == MARKER) else {
        return Ok((plaintext, None));
    };

    let (json, marker) = plaintext.split_at(position);
    let digits = &marker[1..];

    if digits.len() != EXPIRATION_DIGITS || !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid_marker());
    }

    let expiration = std::str::from_utf8(digits)
        .ok()
        .and_then(|text| text.parse::<u64>().ok())
        .ok_or_else(invalid_marker)?;

    Ok((json, Some(expiration)))
}

fn invalid_marker() -> SealError {
    SealError::Deserialization { message: "Invalid expiration marker".into(), context: None }
}
