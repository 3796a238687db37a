//! Time source and timestamp rendering.

use chrono::{DateTime, Utc};

/// Source of the current UTC instant.
///
/// Handlers read time through this trait so tests can pin the clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.NNNNNNNNNZ`.
///
/// The nine fractional digits are the nanoseconds since the Unix epoch modulo
/// one second. They come from the same instant as the seconds, so the two
/// parts never disagree.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    format!(
        "{}.{:09}Z",
        instant.format("%Y-%m-%dT%H:%M:%S"),
        epoch_nanos_mod_second(instant)
    )
}

fn epoch_nanos_mod_second(instant: DateTime<Utc>) -> u32 {
    // Leap seconds are represented as nanos >= 1e9; fold them back.
    instant.timestamp_subsec_nanos() % 1_000_000_000
}
