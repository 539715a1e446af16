//! Exponential backoff delay computation.

use std::time::Duration;

/// Computes the capped exponential delay before the next retry.
///
/// Implements `min(initial * 2^attempt, max)`: with the default
/// configuration the delays run 1s, 2s, 4s... capped at 10s. The shift
/// saturates instead of overflowing, so very large attempt counts simply
/// return the cap.
///
/// # Arguments
/// * `attempt` - Number of failed attempts so far (0-based)
/// * `initial` - Base delay before the first retry
/// * `max` - Upper bound on any computed delay
#[must_use]
pub fn delay_for_attempt(attempt: u32, initial: Duration, max: Duration) -> Duration {
    let initial_ms = initial.as_millis().min(u128::from(u64::MAX)) as u64;
    let max_ms = max.as_millis().min(u128::from(u64::MAX)) as u64;

    let multiplier = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    let delay_ms = initial_ms.saturating_mul(multiplier).min(max_ms);

    Duration::from_millis(delay_ms)
}
