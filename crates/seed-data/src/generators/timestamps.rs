//! Randomized creation timestamps.

use rand::Rng;
use time::{Duration, OffsetDateTime};

/// Returns `now - uniform[0, window]`, at millisecond resolution.
///
/// A zero or negative window yields `now`.
pub fn backdate(now: OffsetDateTime, window: Duration, rng: &mut impl Rng) -> OffsetDateTime {
    let max_ms = window.whole_milliseconds().clamp(0, i64::MAX as i128) as i64;
    if max_ms == 0 {
        return now;
    }
    now - Duration::milliseconds(rng.gen_range(0..=max_ms))
}

/// Draws `count` independent timestamps with [`backdate`].
pub fn backdate_batch(
    count: usize,
    now: OffsetDateTime,
    window: Duration,
    rng: &mut impl Rng,
) -> Vec<OffsetDateTime> {
    (0..count).map(|_| backdate(now, window, rng)).collect()
}
