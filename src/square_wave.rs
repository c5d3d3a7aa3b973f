use core::fmt;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// Square-wave output pin (SQW) mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SquareWaveMode {
    /// 1 Hz
    Hz1 = 0,
    /// 4.096 kHz
    Hz4096 = 1,
    /// 8.192 kHz
    Hz8192 = 2,
    /// 32.768 kHz
    Hz32768 = 3,
    /// No oscillation, pin held LOW or HIGH
    Dc = 4,
}

impl SquareWaveMode {
    pub const ALL: [SquareWaveMode; 5] = [
        SquareWaveMode::Hz1,
        SquareWaveMode::Hz4096,
        SquareWaveMode::Hz8192,
        SquareWaveMode::Hz32768,
        SquareWaveMode::Dc,
    ];

    /// Output frequency, `None` for a constant level.
    pub const fn frequency_hz(self) -> Option<u32> {
        match self {
            SquareWaveMode::Hz1 => Some(1),
            SquareWaveMode::Hz4096 => Some(4_096),
            SquareWaveMode::Hz8192 => Some(8_192),
            SquareWaveMode::Hz32768 => Some(32_768),
            SquareWaveMode::Dc => None,
        }
    }

    pub const fn is_oscillating(self) -> bool {
        !matches!(self, SquareWaveMode::Dc)
    }
}

impl From<SquareWaveMode> for u8 {
    fn from(mode: SquareWaveMode) -> Self {
        mode as u8
    }
}

impl TryFrom<u8> for SquareWaveMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SquareWaveMode::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| {
                debug!("no square-wave mode {}", value);
                Error::InvalidSquareWaveMode(value)
            })
    }
}

impl fmt::Display for SquareWaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frequency_hz() {
            Some(hz) => write!(f, "{} Hz", hz),
            None => f.write_str("DC"),
        }
    }
}
