//! Local calendar-day boundaries.
//!
//! "Today" is never stored; it is derived at read time from the current
//! instant and the user's UTC offset. Local midnight is the boundary.

use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

use super::{Timestamp, ValidationError};

/// Largest UTC offset in use anywhere (UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Splits the timeline into local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset: FixedOffset,
}

impl DayBoundary {
    /// Day boundary at UTC midnight.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Day boundary for a fixed offset east of UTC, in minutes.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the offset exceeds ±14 hours
    pub fn from_offset_minutes(offset_minutes: i32) -> Result<Self, ValidationError> {
        let out_of_range = || {
            ValidationError::out_of_range(
                "utc_offset_minutes",
                -MAX_OFFSET_MINUTES,
                MAX_OFFSET_MINUTES,
                offset_minutes,
            )
        };
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&offset_minutes) {
            return Err(out_of_range());
        }
        let offset = FixedOffset::east_opt(offset_minutes * 60).ok_or_else(out_of_range)?;
        Ok(Self { offset })
    }

    /// Returns the configured offset in minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Local calendar date containing `ts`.
    pub fn local_date(&self, ts: &Timestamp) -> NaiveDate {
        ts.as_datetime().with_timezone(&self.offset).date_naive()
    }

    /// Local midnight at the start of the day containing `ts`.
    pub fn start_of_day(&self, ts: &Timestamp) -> Timestamp {
        let local_time = ts.as_datetime().with_timezone(&self.offset).time();
        let since_midnight = local_time - NaiveTime::MIN;
        Timestamp::from_datetime(*ts.as_datetime() - since_midnight)
    }

    /// Local midnight at the start of the following day.
    pub fn end_of_day(&self, ts: &Timestamp) -> Timestamp {
        self.start_of_day(ts).add_days(1)
    }

    /// Whether `ts` falls within the local day containing `reference`.
    pub fn is_same_day(&self, ts: &Timestamp, reference: &Timestamp) -> bool {
        self.local_date(ts) == self.local_date(reference)
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}
