//! Calendar-day boundaries in an explicit reference timezone.
//!
//! Every "midnight" and "end of day" the engine computes goes through a
//! [`DayBoundary`] policy instead of the host's local time, so results are the
//! same on every machine. `Utc` and every `chrono_tz::Tz` implement it.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Longest DST gap we search across when local midnight does not exist.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Maps instants to calendar days and back.
pub trait DayBoundary {
    /// The calendar date `ts` falls on.
    fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate;

    /// The first instant of `date`.
    fn midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// `00:00:00.000` of the day containing `ts`.
    fn start_of_day(&self, ts: DateTime<Utc>) -> Result<DateTime<Utc>> {
        self.midnight(self.date_of(ts))
    }

    /// `00:00:00.000` of the day after the one containing `ts`.
    fn start_of_next_day(&self, ts: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let date = self.date_of(ts);
        let next = date
            .succ_opt()
            .ok_or_else(|| SlotError::OutOfRange(format!("no day after {}", date)))?;
        self.midnight(next)
    }

    /// `23:59:59.999` of the day containing `ts`: one millisecond before the
    /// next midnight.
    fn end_of_day(&self, ts: DateTime<Utc>) -> Result<DateTime<Utc>> {
        Ok(self.start_of_next_day(ts)? - Duration::milliseconds(1))
    }
}

impl DayBoundary for Utc {
    fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.date_naive()
    }

    fn midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl DayBoundary for Tz {
    fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(self).date_naive()
    }

    fn midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        let local = date.and_time(NaiveTime::MIN);
        match self.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            // Midnight falls in a spring-forward gap; the day starts at the
            // first local minute that exists.
            LocalResult::None => (1..=MAX_GAP_MINUTES)
                .find_map(|minutes| {
                    self.from_local_datetime(&(local + Duration::minutes(minutes)))
                        .earliest()
                })
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| {
                    SlotError::OutOfRange(format!("no local midnight for {} in {}", date, self))
                }),
        }
    }
}

/// Parse an IANA timezone name ("UTC", "Europe/Berlin", ...).
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}
