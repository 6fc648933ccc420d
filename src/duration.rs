//! Calendar-aware breakdown of second counts into `Xw Xd Xh Xm Xs`.
//!
//! A [`WorkCalendar`] fixes how long a "day" and a "week" are. The same pure
//! function is used with the configured working calendar and with
//! [`WorkCalendar::NATURAL`], whose 100-hour days keep weekly totals in hours.
//!
//! Negative inputs use sign-magnitude: the absolute value is broken down and
//! the result carries a leading `-`, so every component stays non-negative.

use std::fmt;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;

/// Divisors for days and weeks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkCalendar {
    seconds_per_day: i64,
    days_per_week: i64,
}

impl WorkCalendar {
    /// 100 hours per day, 7 days per week.
    pub const NATURAL: WorkCalendar = WorkCalendar {
        seconds_per_day: 100 * SECONDS_PER_HOUR,
        days_per_week: 7,
    };

    /// Builds a calendar from hours per day (fractions allowed) and days per week.
    ///
    /// The day length is rounded to whole seconds. Returns `None` when a day
    /// rounds to under one second, when there are no days in a week, or when
    /// a week in seconds does not fit in an `i64`.
    pub fn new(hours_per_day: f64, days_per_week: u32) -> Option<Self> {
        let seconds_per_day = (hours_per_day * SECONDS_PER_HOUR as f64).round();
        if !seconds_per_day.is_finite() || seconds_per_day < 1.0 || seconds_per_day >= i64::MAX as f64 {
            return None;
        }
        let calendar = Self {
            seconds_per_day: seconds_per_day as i64,
            days_per_week: i64::from(days_per_week),
        };
        if calendar.days_per_week < 1 {
            return None;
        }
        calendar
            .seconds_per_day
            .checked_mul(calendar.days_per_week)
            .map(|_| calendar)
    }

    pub fn seconds_per_day(&self) -> i64 {
        self.seconds_per_day
    }

    pub fn days_per_week(&self) -> i64 {
        self.days_per_week
    }

    pub fn seconds_per_week(&self) -> i64 {
        self.seconds_per_day * self.days_per_week
    }

    /// Splits `seconds` into weeks, days, hours, minutes and seconds.
    pub fn breakdown(&self, seconds: i64) -> Breakdown {
        let negative = seconds < 0;
        let mut rest = seconds.unsigned_abs();

        let week = self.seconds_per_week() as u64;
        let day = self.seconds_per_day as u64;
        let hour = SECONDS_PER_HOUR as u64;
        let minute = SECONDS_PER_MINUTE as u64;

        let weeks = rest / week;
        rest -= weeks * week;
        let days = rest / day;
        rest -= days * day;
        let hours = rest / hour;
        rest -= hours * hour;
        let minutes = rest / minute;
        rest -= minutes * minute;

        Breakdown {
            negative,
            weeks,
            days,
            hours,
            minutes,
            seconds: rest,
        }
    }
}

/// Result of [`WorkCalendar::breakdown`]; displays as `0w 5d 0h 0m 0s`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakdown {
    pub negative: bool,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    /// Reassembles the signed second count under `calendar`.
    pub fn total_seconds(&self, calendar: &WorkCalendar) -> i64 {
        let magnitude = self.weeks as i64 * calendar.seconds_per_week()
            + self.days as i64 * calendar.seconds_per_day()
            + self.hours as i64 * SECONDS_PER_HOUR
            + self.minutes as i64 * SECONDS_PER_MINUTE
            + self.seconds as i64;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(
            f,
            "{}w {}d {}h {}m {}s",
            self.weeks, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

pub fn format_duration(seconds: i64, calendar: &WorkCalendar) -> String {
    calendar.breakdown(seconds).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORK: WorkCalendar = WorkCalendar {
        seconds_per_day: 8 * SECONDS_PER_HOUR,
        days_per_week: 5,
    };

    #[test]
    fn forty_hours_roll_over_into_a_week() {
        let calendar = WorkCalendar::new(8.0, 5).unwrap();
        assert_eq!(format_duration(115_200, &calendar), "0w 4d 0h 0m 0s");
        assert_eq!(format_duration(144_000, &calendar), "1w 0d 0h 0m 0s");
    }

    #[test]
    fn natural_calendar_keeps_hours() {
        assert_eq!(format_duration(3661, &WorkCalendar::NATURAL), "0w 0d 1h 1m 1s");
    }

    #[test]
    fn negative_input_is_sign_magnitude() {
        let breakdown = WorkCalendar::NATURAL.breakdown(-3600);
        assert!(breakdown.negative);
        assert_eq!(breakdown.hours, 1);
        assert_eq!(breakdown.to_string(), "-0w 0d 1h 0m 0s");
    }

    #[test]
    fn zero_is_all_zero() {
        assert_eq!(format_duration(0, &WORK), "0w 0d 0h 0m 0s");
    }

    #[test]
    fn carries_into_weeks_with_working_calendar() {
        // 1 week + 2 days + 3h 4m 5s under 8h/5d
        let seconds = 144_000 + 2 * 28_800 + 3 * 3600 + 4 * 60 + 5;
        assert_eq!(format_duration(seconds, &WORK), "1w 2d 3h 4m 5s");
    }

    #[test]
    fn fractional_day_length_is_rounded_to_seconds() {
        let calendar = WorkCalendar::new(7.5, 5).unwrap();
        assert_eq!(calendar.seconds_per_day(), 27_000);
        assert_eq!(format_duration(27_000 + 90, &calendar), "0w 1d 0h 1m 30s");
    }

    #[test]
    fn sub_second_day_is_rejected() {
        assert!(WorkCalendar::new(0.0, 5).is_none());
        assert!(WorkCalendar::new(0.0001, 5).is_none());
        assert!(WorkCalendar::new(f64::NAN, 5).is_none());
        let one_second = WorkCalendar::new(1.0 / 3600.0, 5).unwrap();
        assert_eq!(one_second.seconds_per_day(), 1);
    }

    #[test]
    fn zero_days_per_week_is_rejected() {
        assert!(WorkCalendar::new(8.0, 0).is_none());
    }

    #[test]
    fn week_overflowing_i64_is_rejected() {
        assert!(WorkCalendar::new(1e15, 5).is_none());
        assert!(WorkCalendar::new(1e20, 1).is_none());
        let widest = WorkCalendar::new(1e15, 2).unwrap();
        assert_eq!(widest.seconds_per_week(), 7_200_000_000_000_000_000);
    }

    #[test]
    fn breakdown_round_trips() {
        let calendars = [WORK, WorkCalendar::NATURAL, WorkCalendar::new(7.5, 4).unwrap()];
        let samples = [
            0_i64, 1, 59, 60, 3599, 3600, 3661, 28_799, 28_800, 143_999, 144_000, 360_000,
            2_519_999, 2_520_000, 9_876_543, i64::from(u32::MAX),
        ];
        for calendar in calendars {
            for seconds in samples {
                let breakdown = calendar.breakdown(seconds);
                assert_eq!(breakdown.total_seconds(&calendar), seconds, "{seconds}s");
                assert!(breakdown.minutes < 60 && breakdown.seconds < 60);
                assert!((breakdown.days as i64) < calendar.days_per_week());

                let mirrored = calendar.breakdown(-seconds);
                assert_eq!(mirrored.total_seconds(&calendar), -seconds);
            }
        }
    }

    #[test]
    fn extreme_negative_does_not_overflow() {
        let breakdown = WorkCalendar::NATURAL.breakdown(i64::MIN);
        assert!(breakdown.negative);
        assert!(breakdown.weeks > 0);
    }
}
