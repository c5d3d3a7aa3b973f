#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hour mode of the clock registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HourMode {
    /// 0 - 23 (default)
    #[default]
    H24,
    /// 1 - 12 with AM/PM
    H12,
}

/// How a raw [`DateTime`](crate::DateTime) record is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub hour_mode: HourMode,
    /// First year of the century the two-digit `year` field counts from.
    pub century: u16,
}

impl Config {
    pub const DEFAULT_CENTURY: u16 = 2000;

    pub const fn new() -> Self {
        Config {
            hour_mode: HourMode::H24,
            century: Self::DEFAULT_CENTURY,
        }
    }

    pub const fn with_hour_mode(mut self, hour_mode: HourMode) -> Self {
        self.hour_mode = hour_mode;
        self
    }

    pub const fn with_century(mut self, century: u16) -> Self {
        self.century = century;
        self
    }

    /// Last year representable with this configuration.
    pub const fn last_year(&self) -> u16 {
        self.century.saturating_add(99)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
