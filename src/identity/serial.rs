//! 32-bit board serial numbers.

use std::fmt;

/// Board serial number, rendered as `0x` followed by 8 lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SerialNumber(u32);

impl SerialNumber {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Serial `offset` positions after this one, `None` past `0xffffffff`
    pub fn checked_add(self, offset: u64) -> Option<Self> {
        u64::from(self.0)
            .checked_add(offset)
            .and_then(|value| u32::try_from(value).ok())
            .map(Self)
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
