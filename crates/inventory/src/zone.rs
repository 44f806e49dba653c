//! The fixed reporting zone used for calendar-day boundaries.

use core::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

use rollstock_core::{DomainError, DomainResult};

use crate::window::TimeWindow;

/// Fixed UTC offset in which calendar days are reckoned.
///
/// Passed explicitly into the statistics pass; nothing here reads the
/// environment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ReportingZone {
    offset: FixedOffset,
}

impl ReportingZone {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn from_offset_seconds(seconds: i32) -> DomainResult<Self> {
        FixedOffset::east_opt(seconds)
            .map(Self::new)
            .ok_or_else(|| DomainError::invalid_input(format!("utc offset out of range: {seconds}s")))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `t` in this zone.
    pub fn local_date(&self, t: DateTime<Utc>) -> NaiveDate {
        t.with_timezone(&self.offset).date_naive()
    }

    pub fn to_local(&self, t: DateTime<Utc>) -> DateTime<FixedOffset> {
        t.with_timezone(&self.offset)
    }

    /// Interpret a wall-clock time in this zone.
    pub fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let shift = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        local
            .checked_sub_signed(shift)
            .map(|naive| naive.and_utc())
            .unwrap_or(if shift > Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    /// First through last nanosecond of `day` in this zone.
    pub fn day_window(&self, day: NaiveDate) -> TimeWindow {
        let start = self.from_local(day.and_time(NaiveTime::MIN));
        let end = day
            .succ_opt()
            .map(|next| self.from_local(next.and_time(NaiveTime::MIN)) - Duration::nanoseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        TimeWindow::spanning(start, end)
    }

    /// Number of calendar days `window` touches in this zone (at least 1).
    pub fn calendar_days(&self, window: &TimeWindow) -> i64 {
        let first = self.local_date(window.start());
        let last = self.local_date(window.end());
        last.signed_duration_since(first).num_days() + 1
    }
}

impl Default for ReportingZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl core::fmt::Display for ReportingZone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.offset, f)
    }
}

/// Parses `Z`, `UTC`, `+03:00`, `-0530` or `+3`.
impl FromStr for ReportingZone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        let invalid = || DomainError::invalid_input(format!("invalid utc offset: '{s}'"));

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };

        if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
            return Err(invalid());
        }

        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => rest.split_at(2),
            None => (rest, "0"),
        };

        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(invalid());
        }

        Self::from_offset_seconds(sign * (hours * 3600 + minutes * 60))
    }
}
