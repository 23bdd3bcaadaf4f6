//! Overflow-safe arithmetic for configured lifetimes
//!
//! Lifetimes come from the environment, so out-of-range values saturate
//! instead of panicking inside chrono.

use chrono::{DateTime, Duration, Utc};

/// `secs` as a duration, saturating at the representable bounds
pub fn seconds(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or(if secs < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

/// `start + ttl`, saturating at the representable instants
pub fn expiry_after(start: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    start.checked_add_signed(ttl).unwrap_or(if ttl < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
