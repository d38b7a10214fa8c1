//! Calendar-day helpers for the completion guard.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike, Utc};

/// The study day an instant belongs to.
///
/// The instant is converted to the user's local time; if the local hour is
/// before `daily_reset_hour`, it still counts towards the previous day.
pub fn study_day(at: DateTime<Utc>, offset: FixedOffset, daily_reset_hour: u32) -> NaiveDate {
    let local = at.with_timezone(&offset);

    if local.hour() < daily_reset_hour {
        (local - Duration::days(1)).date_naive()
    } else {
        local.date_naive()
    }
}

/// Whether two instants fall on the same study day.
pub fn same_study_day(
    a: DateTime<Utc>,
    b: DateTime<Utc>,
    offset: FixedOffset,
    daily_reset_hour: u32,
) -> bool {
    study_day(a, offset, daily_reset_hour) == study_day(b, offset, daily_reset_hour)
}
