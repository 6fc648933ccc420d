//! The reporting week: Monday 00:00 up to the following Monday 00:00.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("midnight of {0} does not exist in the local time zone")]
    NoLocalMidnight(NaiveDate),
}

/// Half-open interval `[start, end)` in the zone the report runs under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportWindow<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> ReportWindow<Tz> {
    /// Week containing `now`, starting on Monday.
    pub fn current_week(now: &DateTime<Tz>) -> Result<Self, WindowError> {
        let zone = now.timezone();
        let today = now.date_naive();
        let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
        let next_monday = monday + Days::new(7);
        Ok(Self {
            start: local_midnight(&zone, monday)?,
            end: local_midnight(&zone, next_monday)?,
        })
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    pub fn contains<Other: TimeZone>(&self, instant: &DateTime<Other>) -> bool {
        let millis = instant.timestamp_millis();
        self.start_millis() <= millis && millis < self.end_millis()
    }

    /// Calendar date of `instant` as seen from the window's zone.
    pub fn local_date<Other: TimeZone>(&self, instant: &DateTime<Other>) -> NaiveDate {
        instant.with_timezone(&self.start.timezone()).date_naive()
    }
}

// Midnight can fall into a DST gap in a few zones; take the earliest valid mapping.
fn local_midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> Result<DateTime<Tz>, WindowError> {
    date.and_hms_opt(0, 0, 0)
        .and_then(|naive| zone.from_local_datetime(&naive).earliest())
        .ok_or(WindowError::NoLocalMidnight(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn wednesday_maps_to_surrounding_mondays() {
        // 2024-05-15 is a Wednesday.
        let window = ReportWindow::current_week(&at(2024, 5, 15, 14, 30)).unwrap();
        assert_eq!(window.start, at(2024, 5, 13, 0, 0));
        assert_eq!(window.end, at(2024, 5, 20, 0, 0));
        assert_eq!(window.end.clone() - window.start.clone(), Duration::days(7));
    }

    #[test]
    fn monday_midnight_starts_its_own_week() {
        let window = ReportWindow::current_week(&at(2024, 5, 13, 0, 0)).unwrap();
        assert_eq!(window.start, at(2024, 5, 13, 0, 0));
    }

    #[test]
    fn sunday_belongs_to_the_week_before() {
        let window = ReportWindow::current_week(&at(2024, 5, 19, 23, 59)).unwrap();
        assert_eq!(window.start, at(2024, 5, 13, 0, 0));
        assert_eq!(window.end, at(2024, 5, 20, 0, 0));
    }

    #[test]
    fn week_spanning_new_year() {
        // 2025-01-01 is a Wednesday.
        let window = ReportWindow::current_week(&at(2025, 1, 1, 9, 0)).unwrap();
        assert_eq!(window.start, at(2024, 12, 30, 0, 0));
        assert_eq!(window.end, at(2025, 1, 6, 0, 0));
    }

    #[test]
    fn start_is_local_midnight_not_utc() {
        let zone = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = zone.with_ymd_and_hms(2024, 5, 15, 1, 0, 0).unwrap();
        let window = ReportWindow::current_week(&now).unwrap();
        assert_eq!(window.start, zone.with_ymd_and_hms(2024, 5, 13, 0, 0, 0).unwrap());
        assert_eq!(window.start_millis(), at(2024, 5, 12, 21, 0).timestamp_millis());
    }

    #[test]
    fn contains_is_half_open() {
        let window = ReportWindow::current_week(&at(2024, 5, 15, 12, 0)).unwrap();
        assert!(window.contains(&at(2024, 5, 13, 0, 0)));
        assert!(window.contains(&at(2024, 5, 19, 23, 59)));
        assert!(!window.contains(&at(2024, 5, 20, 0, 0)));
        assert!(!window.contains(&at(2024, 5, 12, 23, 59)));
    }

    #[test]
    fn local_date_uses_window_zone() {
        let zone = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = zone.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let window = ReportWindow::current_week(&now).unwrap();
        // 02:00 UTC on the 16th is still the 15th five hours west.
        assert_eq!(
            window.local_date(&at(2024, 5, 16, 2, 0)),
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
        );
    }
}
