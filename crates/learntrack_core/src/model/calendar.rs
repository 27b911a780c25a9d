//! Calendar-day policy for "one assessment per day".
//!
//! # Invariants
//! - Day comparison ignores time-of-day.
//! - The timezone used for truncation is always explicit; there is no
//!   implicit "local time".

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

/// Timezone used to truncate an instant to its calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayPolicy {
    /// Calendar date in UTC.
    #[default]
    Utc,
    /// Calendar date at a fixed offset east of UTC.
    FixedOffset(FixedOffset),
}

impl DayPolicy {
    /// Builds a fixed-offset policy from minutes east of UTC.
    ///
    /// Returns `None` when the offset is outside +/-24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        if minutes == 0 {
            return Some(Self::Utc);
        }
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::FixedOffset)
    }

    pub fn offset_minutes(&self) -> i32 {
        match self {
            Self::Utc => 0,
            Self::FixedOffset(offset) => offset.local_minus_utc() / 60,
        }
    }

    /// Calendar date of `instant` under this policy.
    pub fn calendar_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Utc => instant.date_naive(),
            Self::FixedOffset(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// Start of `day` under this policy, as a UTC instant.
    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        let midnight = day.and_time(chrono::NaiveTime::MIN);
        match self {
            Self::Utc => Utc.from_utc_datetime(&midnight),
            Self::FixedOffset(offset) => (midnight - *offset).and_utc(),
        }
    }
}

/// Whether two instants fall on the same calendar date under `policy`.
pub fn same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>, policy: DayPolicy) -> bool {
    policy.calendar_day(a) == policy.calendar_day(b)
}
