//! Date and time record exchanged with the clock registers

use core::fmt;
use core::ops::RangeInclusive;

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Config, Datelike, Error, HourMode, Hours, NaiveDate, NaiveDateTime, Timelike};

/// Calendar timestamp in the layout of the DS1307 clock registers.
///
/// Fields are plain values and are never checked on assignment, so a record
/// read from an uninitialized device can still be held and inspected. Use
/// [`validate`](DateTime::validate) or the conversions to chrono types to
/// reject impossible values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    /// Seconds 0 - 59
    pub seconds: u8,
    /// Minutes 0 - 59
    pub minutes: u8,
    /// Hours 0 - 23 (24h mode), 1 - 12 (12h mode)
    pub hours: u8,
    /// Set in 12h mode when the time is after noon, ignored in 24h mode
    pub is_pm: bool,
    /// Day of the week 1 - 7, 1 = Monday
    pub day_of_week: u8,
    /// Day of the month 1 - 31
    pub days: u8,
    /// Month 1 - 12
    pub months: u8,
    /// Two-digit year 0 - 99, counted from the configured century
    pub year: u8,
}

/// Field of a [`DateTime`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Seconds,
    Minutes,
    Hours,
    IsPm,
    DayOfWeek,
    Days,
    Months,
    Year,
}

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Field; 8] = [
        Field::Seconds,
        Field::Minutes,
        Field::Hours,
        Field::IsPm,
        Field::DayOfWeek,
        Field::Days,
        Field::Months,
        Field::Year,
    ];

    /// Inclusive domain of the field in the given hour mode.
    pub fn range(self, mode: HourMode) -> RangeInclusive<u8> {
        match self {
            Field::Seconds | Field::Minutes => 0..=59,
            Field::Hours => match mode {
                HourMode::H24 => 0..=23,
                HourMode::H12 => 1..=12,
            },
            Field::IsPm => 0..=1,
            Field::DayOfWeek => 1..=7,
            Field::Days => 1..=31,
            Field::Months => 1..=12,
            Field::Year => 0..=99,
        }
    }

    fn check(self, value: u8, mode: HourMode) -> Result<u8, Error> {
        if self.range(mode).contains(&value) {
            Ok(value)
        } else {
            debug!("rejecting {} = {} ({:?} mode)", self, value, mode);
            Err(Error::OutOfRange { field: self, value })
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Seconds => "seconds",
            Field::Minutes => "minutes",
            Field::Hours => "hours",
            Field::IsPm => "is_pm",
            Field::DayOfWeek => "day_of_week",
            Field::Days => "days",
            Field::Months => "months",
            Field::Year => "year",
        })
    }
}

/// Helpers on the tagged hour value.
pub trait HoursExt: Sized {
    /// Hour mode this value is expressed in.
    fn mode(&self) -> HourMode;

    /// Hour of the day 0 - 23.
    fn to_24h(&self) -> Result<u8, Error>;

    /// Express an hour of the day 0 - 23 in the given mode.
    fn from_24h(hour: u8, mode: HourMode) -> Result<Self, Error>;
}

impl HoursExt for Hours {
    fn mode(&self) -> HourMode {
        match self {
            Hours::H24(_) => HourMode::H24,
            Hours::AM(_) | Hours::PM(_) => HourMode::H12,
        }
    }

    fn to_24h(&self) -> Result<u8, Error> {
        match *self {
            Hours::H24(h) => Field::Hours.check(h, HourMode::H24),
            Hours::AM(h) => Field::Hours.check(h, HourMode::H12).map(|h| h % 12),
            Hours::PM(h) => Field::Hours.check(h, HourMode::H12).map(|h| h % 12 + 12),
        }
    }

    fn from_24h(hour: u8, mode: HourMode) -> Result<Self, Error> {
        let hour = Field::Hours.check(hour, HourMode::H24)?;
        Ok(match mode {
            HourMode::H24 => Hours::H24(hour),
            HourMode::H12 => match hour {
                0 => Hours::AM(12),
                1..=11 => Hours::AM(hour),
                12 => Hours::PM(12),
                _ => Hours::PM(hour - 12),
            },
        })
    }
}

impl DateTime {
    /// Create a record, checking every field against its domain.
    ///
    /// The hour mode is taken from `hours`. Calendar consistency (day of
    /// month, day of week) is left to [`validate`](DateTime::validate).
    pub fn new(
        seconds: u8,
        minutes: u8,
        hours: Hours,
        day_of_week: u8,
        days: u8,
        months: u8,
        year: u8,
    ) -> Result<Self, Error> {
        let mode = hours.mode();
        let mut dt = DateTime {
            seconds: Field::Seconds.check(seconds, mode)?,
            minutes: Field::Minutes.check(minutes, mode)?,
            ..DateTime::default()
        };
        dt.set_hours(hours)?;
        dt.day_of_week = Field::DayOfWeek.check(day_of_week, mode)?;
        dt.days = Field::Days.check(days, mode)?;
        dt.months = Field::Months.check(months, mode)?;
        dt.year = Field::Year.check(year, mode)?;
        Ok(dt)
    }

    /// Raw value of a field (`is_pm` reads as 0 or 1).
    pub fn field(&self, field: Field) -> u8 {
        match field {
            Field::Seconds => self.seconds,
            Field::Minutes => self.minutes,
            Field::Hours => self.hours,
            Field::IsPm => self.is_pm as u8,
            Field::DayOfWeek => self.day_of_week,
            Field::Days => self.days,
            Field::Months => self.months,
            Field::Year => self.year,
        }
    }

    /// Store a raw value in a field without checking it.
    ///
    /// Any non-zero value sets `is_pm`.
    pub fn set_field(&mut self, field: Field, value: u8) {
        match field {
            Field::Seconds => self.seconds = value,
            Field::Minutes => self.minutes = value,
            Field::Hours => self.hours = value,
            Field::IsPm => self.is_pm = value != 0,
            Field::DayOfWeek => self.day_of_week = value,
            Field::Days => self.days = value,
            Field::Months => self.months = value,
            Field::Year => self.year = value,
        }
    }

    /// Read `hours` and `is_pm` as a tagged hour in the given mode.
    pub fn hours_in(&self, mode: HourMode) -> Result<Hours, Error> {
        self.check_pm_flag(mode);
        let hours = Field::Hours.check(self.hours, mode)?;
        Ok(match mode {
            HourMode::H24 => Hours::H24(hours),
            HourMode::H12 if self.is_pm => Hours::PM(hours),
            HourMode::H12 => Hours::AM(hours),
        })
    }

    /// Store a tagged hour, updating `hours` and `is_pm` together.
    pub fn set_hours(&mut self, hours: Hours) -> Result<(), Error> {
        hours.to_24h()?;
        let (value, is_pm) = match hours {
            Hours::H24(h) | Hours::AM(h) => (h, false),
            Hours::PM(h) => (h, true),
        };
        self.hours = value;
        self.is_pm = is_pm;
        Ok(())
    }

    /// Four-digit year given the first year of the century.
    pub fn full_year(&self, century: u16) -> u16 {
        century.saturating_add(u16::from(self.year))
    }

    /// Check every field and the consistency of the calendar date.
    pub fn validate(&self, config: &Config) -> Result<(), Error> {
        self.calendar_date(config).map(|_| ())
    }

    /// Convert to a chrono date and time.
    pub fn to_naive(&self, config: &Config) -> Result<NaiveDateTime, Error> {
        let date = self.calendar_date(config)?;
        let hour = self.hours_in(config.hour_mode)?.to_24h()?;
        date.and_hms_opt(
            u32::from(hour),
            u32::from(self.minutes),
            u32::from(self.seconds),
        )
        .ok_or(Error::InvalidDate)
    }

    /// Build a record from a chrono date and time.
    ///
    /// Fails when the year is outside the configured century.
    pub fn from_naive(datetime: &NaiveDateTime, config: &Config) -> Result<Self, Error> {
        let year = datetime.year();
        if year < i32::from(config.century) || year > i32::from(config.last_year()) {
            debug!(
                "year {} outside {}..={}",
                year,
                config.century,
                config.last_year()
            );
            return Err(Error::YearOutOfRange(year));
        }

        let mut dt = DateTime {
            seconds: datetime.second() as u8,
            minutes: datetime.minute() as u8,
            day_of_week: datetime.weekday().number_from_monday() as u8,
            days: datetime.day() as u8,
            months: datetime.month() as u8,
            year: (year - i32::from(config.century)) as u8,
            ..DateTime::default()
        };
        dt.set_hours(Hours::from_24h(datetime.hour() as u8, config.hour_mode)?)?;
        Ok(dt)
    }

    fn calendar_date(&self, config: &Config) -> Result<NaiveDate, Error> {
        let mode = config.hour_mode;
        for field in Field::ALL {
            field.check(self.field(field), mode)?;
        }
        self.check_pm_flag(mode);

        let date = NaiveDate::from_ymd_opt(
            i32::from(self.full_year(config.century)),
            u32::from(self.months),
            u32::from(self.days),
        )
        .ok_or_else(|| {
            debug!(
                "no day {} in month {} of {}",
                self.days,
                self.months,
                self.full_year(config.century)
            );
            Error::InvalidDate
        })?;

        let expected = date.weekday().number_from_monday() as u8;
        if expected != self.day_of_week {
            debug!("day of week {} but date falls on {}", self.day_of_week, expected);
            return Err(Error::WeekdayMismatch {
                expected,
                found: self.day_of_week,
            });
        }
        Ok(date)
    }

    fn check_pm_flag(&self, mode: HourMode) {
        if mode == HourMode::H24 && self.is_pm {
            warn!("is_pm set in 24h mode, ignoring");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pi_day() -> DateTime {
        // Thursday 2024-03-14 15:30:09
        DateTime {
            seconds: 9,
            minutes: 30,
            hours: 15,
            is_pm: false,
            day_of_week: 4,
            days: 14,
            months: 3,
            year: 24,
        }
    }

    #[test]
    fn fields_are_independent() {
        for target in Field::ALL {
            let mut dt = pi_day();
            dt.set_field(target, 1);
            for other in Field::ALL {
                if other != target {
                    assert_eq!(dt.field(other), pi_day().field(other), "{} changed", other);
                }
            }
            assert_eq!(dt.field(target), 1);
        }
    }

    #[test]
    fn out_of_range_values_are_representable() {
        let dt = DateTime {
            seconds: 99,
            minutes: 255,
            hours: 42,
            is_pm: true,
            day_of_week: 0,
            days: 0,
            months: 13,
            year: 200,
        };
        assert_eq!(dt.seconds, 99);
        assert_eq!(dt.minutes, 255);
        assert_eq!(dt.year, 200);
        assert_eq!(
            dt.validate(&Config::default()),
            Err(Error::OutOfRange {
                field: Field::Seconds,
                value: 99
            })
        );
    }

    #[test]
    fn validate_reports_first_offender() {
        let mut dt = pi_day();
        dt.months = 0;
        dt.year = 100;
        assert_eq!(
            dt.validate(&Config::default()),
            Err(Error::OutOfRange {
                field: Field::Months,
                value: 0
            })
        );
    }

    #[test]
    fn validate_checks_calendar() {
        assert_eq!(pi_day().validate(&Config::default()), Ok(()));

        let mut dt = pi_day();
        dt.months = 2;
        dt.days = 30;
        assert_eq!(dt.validate(&Config::default()), Err(Error::InvalidDate));

        let mut dt = pi_day();
        dt.day_of_week = 1;
        assert_eq!(
            dt.validate(&Config::default()),
            Err(Error::WeekdayMismatch {
                expected: 4,
                found: 1
            })
        );
    }

    #[test]
    fn leap_day_depends_on_century() {
        // 2000-02-29 was a Tuesday, 1900 was not a leap year
        let dt = DateTime {
            seconds: 0,
            minutes: 0,
            hours: 0,
            is_pm: false,
            day_of_week: 2,
            days: 29,
            months: 2,
            year: 0,
        };
        assert_eq!(dt.validate(&Config::default()), Ok(()));
        assert_eq!(
            dt.validate(&Config::new().with_century(1900)),
            Err(Error::InvalidDate)
        );
    }

    #[test]
    fn hours_depend_on_mode() {
        let mut dt = pi_day();
        assert_eq!(dt.hours_in(HourMode::H24), Ok(Hours::H24(15)));
        assert_eq!(
            dt.hours_in(HourMode::H12),
            Err(Error::OutOfRange {
                field: Field::Hours,
                value: 15
            })
        );

        dt.hours = 3;
        dt.is_pm = true;
        assert_eq!(dt.hours_in(HourMode::H12), Ok(Hours::PM(3)));
        assert_eq!(dt.hours_in(HourMode::H24), Ok(Hours::H24(3)));

        dt.hours = 0;
        assert!(dt.hours_in(HourMode::H12).is_err());
    }

    #[test]
    fn set_hours_updates_pm_flag() {
        let mut dt = pi_day();
        dt.set_hours(Hours::PM(11)).unwrap();
        assert_eq!((dt.hours, dt.is_pm), (11, true));
        dt.set_hours(Hours::AM(12)).unwrap();
        assert_eq!((dt.hours, dt.is_pm), (12, false));
        dt.set_hours(Hours::PM(5)).unwrap();
        dt.set_hours(Hours::H24(23)).unwrap();
        assert_eq!((dt.hours, dt.is_pm), (23, false));
    }

    #[test]
    fn set_hours_rejects_invalid_and_keeps_record() {
        let mut dt = pi_day();
        assert!(dt.set_hours(Hours::H24(24)).is_err());
        assert!(dt.set_hours(Hours::AM(0)).is_err());
        assert!(dt.set_hours(Hours::PM(13)).is_err());
        assert_eq!(dt, pi_day());
    }

    #[test]
    fn twelve_hour_conversions() {
        assert_eq!(Hours::AM(12).to_24h(), Ok(0));
        assert_eq!(Hours::AM(1).to_24h(), Ok(1));
        assert_eq!(Hours::PM(12).to_24h(), Ok(12));
        assert_eq!(Hours::PM(11).to_24h(), Ok(23));
        assert_eq!(Hours::H24(7).to_24h(), Ok(7));

        for hour in 0..24 {
            let h12 = Hours::from_24h(hour, HourMode::H12).unwrap();
            assert_eq!(h12.mode(), HourMode::H12);
            assert_eq!(h12.to_24h(), Ok(hour));
        }
        assert_eq!(Hours::from_24h(0, HourMode::H12), Ok(Hours::AM(12)));
        assert_eq!(Hours::from_24h(13, HourMode::H12), Ok(Hours::PM(1)));
        assert_eq!(Hours::from_24h(13, HourMode::H24), Ok(Hours::H24(13)));
        assert!(Hours::from_24h(24, HourMode::H24).is_err());
    }

    #[test]
    fn new_checks_ranges() {
        let dt = DateTime::new(9, 30, Hours::PM(3), 4, 14, 3, 24).unwrap();
        assert_eq!((dt.hours, dt.is_pm), (3, true));
        assert_eq!(dt.validate(&Config::new().with_hour_mode(HourMode::H12)), Ok(()));

        assert_eq!(
            DateTime::new(60, 0, Hours::H24(0), 1, 1, 1, 0),
            Err(Error::OutOfRange {
                field: Field::Seconds,
                value: 60
            })
        );
        assert_eq!(
            DateTime::new(0, 0, Hours::H24(0), 8, 1, 1, 0),
            Err(Error::OutOfRange {
                field: Field::DayOfWeek,
                value: 8
            })
        );
        assert!(DateTime::new(0, 0, Hours::H24(0), 1, 32, 1, 0).is_err());
        assert!(DateTime::new(0, 0, Hours::H24(0), 1, 1, 1, 100).is_err());
    }

    #[test]
    fn chrono_round_trip() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 9)
            .unwrap();

        let config = Config::default();
        let dt = DateTime::from_naive(&naive, &config).unwrap();
        assert_eq!(dt, pi_day());
        assert_eq!(dt.to_naive(&config), Ok(naive));

        let config = Config::new().with_hour_mode(HourMode::H12);
        let dt = DateTime::from_naive(&naive, &config).unwrap();
        assert_eq!((dt.hours, dt.is_pm), (3, true));
        assert_eq!(dt.to_naive(&config), Ok(naive));
    }

    #[test]
    fn midnight_in_twelve_hour_mode() {
        let naive = NaiveDate::from_ymd_opt(2016, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let config = Config::new().with_hour_mode(HourMode::H12);
        let dt = DateTime::from_naive(&naive, &config).unwrap();
        assert_eq!((dt.hours, dt.is_pm), (12, false));
        assert_eq!(dt.day_of_week, 5);
        assert_eq!(dt.year, 16);
        assert_eq!(dt.to_naive(&config), Ok(naive));
    }

    #[test]
    fn from_naive_rejects_other_centuries() {
        let naive = NaiveDate::from_ymd_opt(2100, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            DateTime::from_naive(&naive, &Config::default()),
            Err(Error::YearOutOfRange(2100))
        );

        let dt = DateTime::from_naive(&naive, &Config::new().with_century(2100)).unwrap();
        assert_eq!(dt.year, 0);
        assert_eq!(dt.full_year(2100), 2100);
    }

    #[test]
    fn field_display_names() {
        extern crate std;
        use std::string::ToString;

        assert_eq!(Field::DayOfWeek.to_string(), "day_of_week");
        assert_eq!(Field::IsPm.to_string(), "is_pm");
    }
}
