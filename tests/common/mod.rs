use chrono::{NaiveDate, NaiveDateTime};
use day_ledger::session::{DaySession, FixedClock};

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 28).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).unwrap()
}

/// Session pinned to 2025-09-28 09:00.
pub fn fixed_session() -> DaySession<FixedClock> {
    DaySession::with_clock(FixedClock(at(9, 0)))
}
