//! Interface definition of the DS1307 real-time clock (RTC).
//!
//! This crate declares what a driver needs to talk to the chip: the I²C
//! address, the register map, the date/time record exchanged with the clock
//! registers and the modes of the square-wave output pin. It performs no bus
//! transactions.
//!
//! ```
//! use ds1307::{DateTime, Hours, SquareWaveMode, DEVICE_ADDRESS};
//!
//! assert_eq!(DEVICE_ADDRESS, 0x68);
//!
//! let dt = DateTime::new(30, 15, Hours::PM(3), 2, 15, 3, 16).unwrap();
//! assert!(dt.is_pm);
//! assert_eq!(dt.full_year(2000), 2016);
//! assert_eq!(SquareWaveMode::Hz4096.frequency_hz(), Some(4096));
//! ```

#![deny(unsafe_code)]
#![no_std]

use core::fmt;

use embedded_hal::i2c::SevenBitAddress;

pub use rtcc::{Datelike, Hours, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

mod config;
mod datetime;
pub mod nvram;
mod square_wave;

pub use crate::config::{Config, HourMode};
pub use crate::datetime::{DateTime, Field, HoursExt};
pub use crate::square_wave::SquareWaveMode;

/// 7-bit I²C address of the DS1307.
pub const DEVICE_ADDRESS: SevenBitAddress = 0x68;

/// Offset of the control register.
pub const CONTROL_REGISTER: u8 = 0x07;

/// Offset of the first byte of battery-backed NVRAM.
pub const NVRAM_BASE: u8 = 0x08;

/// Length of the NVRAM region in bytes.
pub const NVRAM_SIZE: u8 = 56;

/// Register offsets of the DS1307.
pub struct Register;

impl Register {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const DAY_OF_WEEK: u8 = 0x03;
    pub const DAY_OF_MONTH: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    pub const CONTROL: u8 = CONTROL_REGISTER;
    pub const NVRAM_START: u8 = NVRAM_BASE;
    /// Last NVRAM byte (inclusive).
    pub const NVRAM_END: u8 = NVRAM_BASE + NVRAM_SIZE - 1;
    /// Number of consecutive clock registers starting at `SECONDS`.
    pub const DATETIME_LEN: usize = (Self::YEAR - Self::SECONDS + 1) as usize;
}

/// All possible errors in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A date/time field is outside its domain.
    OutOfRange {
        /// Offending field
        field: Field,
        /// Value found in the field
        value: u8,
    },
    /// Day of month does not exist in the given month and year.
    InvalidDate,
    /// `day_of_week` disagrees with the calendar date.
    WeekdayMismatch {
        /// Weekday computed from the date (1 = Monday)
        expected: u8,
        /// Weekday stored in the record
        found: u8,
    },
    /// Year cannot be expressed as two digits in the configured century.
    YearOutOfRange(i32),
    /// Byte is not a square-wave mode discriminant.
    InvalidSquareWaveMode(u8),
    /// Access does not fit in the NVRAM region.
    NvramOutOfBounds {
        /// Offset from `NVRAM_BASE`
        offset: u8,
        /// Requested length
        len: u8,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::OutOfRange { field, value } => {
                write!(f, "{} out of range: {}", field, value)
            }
            Error::InvalidDate => f.write_str("day does not exist in month"),
            Error::WeekdayMismatch { expected, found } => {
                write!(f, "day of week is {}, date falls on {}", found, expected)
            }
            Error::YearOutOfRange(year) => write!(f, "year {} outside century", year),
            Error::InvalidSquareWaveMode(v) => write!(f, "invalid square-wave mode {}", v),
            Error::NvramOutOfBounds { offset, len } => {
                write!(f, "nvram access of {} bytes at offset {} out of bounds", len, offset)
            }
        }
    }
}
