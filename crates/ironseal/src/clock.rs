//! Wall clock and expiration arithmetic, all in Unix milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SealError;
use crate::options::SealOptions;

/// Current Unix time in milliseconds.
///
/// # Errors
/// * [`SealError::Internal`] If the system clock is before the epoch or beyond `u64` range.
pub fn now_ms() -> Result<u64, SealError> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|e| {
        SealError::Internal { message: e.to_string().into(), context: Some("System clock".into()) }
    })?;
    u64::try_from(elapsed.as_millis()).map_err(|_| "System clock out of range".into())
}

/// `now_ms` corrected by `localtime_offset_msec`.
pub(crate) fn local_now(now_ms: u64, options: &SealOptions) -> Result<u64, SealError> {
    now_ms.checked_add_signed(options.localtime_offset_msec).ok_or_else(|| {
        SealError::InvalidOptions {
            message: "localtime_offset_msec moves the clock out of range".into(),
            context: None,
        }
    })
}

/// Absolute expiration for a token sealed at `now_ms`.
pub(crate) fn expiration(now_ms: u64, options: &SealOptions) -> Result<u64, SealError> {
    local_now(now_ms, options)?.checked_add(options.ttl).ok_or_else(|| SealError::InvalidOptions {
        message: "ttl moves the expiration out of range".into(),
        context: None,
    })
}

/// Fails once the local clock passes `expiration` by more than the allowed skew.
pub(crate) fn check_expiration(
    expiration: u64,
    now_ms: u64,
    options: &SealOptions,
) -> Result<(), SealError> {
    let now = local_now(now_ms, options)?;
    let deadline = expiration.saturating_add(options.timestamp_skew_sec.saturating_mul(1000));

    if now > deadline {
        return Err(SealError::TokenExpired {
            message: format!("Expired at {expiration}, now {now}").into(),
            context: None,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    #[test]
    fn test_now_is_after_2023() {
        assert!(now_ms().unwrap() > NOW);
    }

    #[test]
    fn test_expiration_includes_offset() {
        let options = SealOptions::default().ttl(1000).localtime_offset_msec(-500);
        assert_eq!(expiration(NOW, &options).unwrap(), NOW + 500);
    }

    #[test]
    fn test_deadline_is_inclusive_of_skew() {
        let options = SealOptions::default().timestamp_skew_sec(2);

        assert!(check_expiration(NOW, NOW + 2000, &options).is_ok());
        assert!(matches!(
            check_expiration(NOW, NOW + 2001, &options),
            Err(SealError::TokenExpired { .. })
        ));
    }

    #[test]
    fn test_offset_out_of_range() {
        let options = SealOptions::default().localtime_offset_msec(-1);
        assert!(matches!(local_now(0, &options), Err(SealError::InvalidOptions { .. })));

        let options = SealOptions::default().ttl(u64::MAX);
        assert!(matches!(expiration(NOW, &options), Err(SealError::InvalidOptions { .. })));
    }
}
