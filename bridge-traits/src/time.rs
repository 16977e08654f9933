//! Time source abstraction and calendar-window helpers.
//!
//! The clock is injectable so window computations are deterministic under
//! test. Calendar boundaries (day, month) use the host-local calendar, which
//! is what the underlying reporting subsystem scopes to.

use chrono::{DateTime, Datelike, Local, NaiveTime, TimeZone, Utc};

/// Seconds in a fixed trailing seven-day window.
pub const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Time source trait.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Current Unix timestamp in seconds.
    fn unix_timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Clock backed by actual system time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// First instant of the local calendar day containing `now`.
///
/// Midnight can be skipped by a DST transition; the earliest valid instant
/// of the day is used in that case.
pub fn local_day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let local = now.with_timezone(&Local);
    local
        .with_time(NaiveTime::MIN)
        .earliest()
        .unwrap_or(local)
        .with_timezone(&Utc)
}

/// First instant of the local calendar month containing `now`.
pub fn local_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let local = now.with_timezone(&Local);
    let first_day = local
        .date_naive()
        .with_day(1)
        .unwrap_or_else(|| local.date_naive());
    Local
        .from_local_datetime(&first_day.and_time(NaiveTime::MIN))
        .earliest()
        .unwrap_or(local)
        .with_timezone(&Utc)
}
