//! Address map of the 56 bytes of battery-backed RAM

use core::ops::Range;

use log::debug;

use crate::{Error, Register, NVRAM_BASE, NVRAM_SIZE};

/// Register holding the NVRAM byte at `offset`.
pub fn register(offset: u8) -> Result<u8, Error> {
    span(offset, 1).map(|registers| registers.start)
}

/// Registers covered by `len` bytes starting at `offset`.
///
/// An empty span is accepted at any offset up to `NVRAM_SIZE`.
pub fn span(offset: u8, len: u8) -> Result<Range<u8>, Error> {
    match offset.checked_add(len) {
        Some(end) if end <= NVRAM_SIZE => Ok(NVRAM_BASE + offset..NVRAM_BASE + end),
        _ => {
            debug!("nvram span {}+{} exceeds {} bytes", offset, len, NVRAM_SIZE);
            Err(Error::NvramOutOfBounds { offset, len })
        }
    }
}

/// Whether `register` lies in the NVRAM region.
pub fn contains(register: u8) -> bool {
    (Register::NVRAM_START..=Register::NVRAM_END).contains(&register)
}
