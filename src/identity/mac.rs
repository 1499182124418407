//! 48-bit hardware (MAC) address handling.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static MAC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{12})$",
    )
    .unwrap()
});

/// Largest value a 48-bit hardware address can hold
pub const MAC_MAX: u64 = (1 << 48) - 1;

/// Errors that can occur while parsing a MAC address
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MacParseError {
    #[error("Invalid MAC address format: '{text}'")]
    InvalidFormat { text: String },

    #[error("MAC address value {value:#x} exceeds 48 bits")]
    OutOfRange { value: u64 },
}

/// Hardware address stored as its 48-bit integer value
///
/// Displays as six lowercase colon-separated octets, e.g. `aa:bb:cc:00:00:04`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddress(u64);

impl MacAddress {
    pub fn new(value: u64) -> Result<Self, MacParseError> {
        if value > MAC_MAX {
            return Err(MacParseError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn octets(self) -> [u8; 6] {
        let bytes = self.0.to_be_bytes();
        [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7]]
    }

    /// Group bit of the first octet is set
    pub fn is_multicast(self) -> bool {
        self.octets()[0] & 0x01 != 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Address `offset` positions after this one, `None` past `ff:ff:ff:ff:ff:ff`
    pub fn checked_add(self, offset: u64) -> Option<Self> {
        self.0
            .checked_add(offset)
            .filter(|value| *value <= MAC_MAX)
            .map(Self)
    }
}

impl FromStr for MacAddress {
    type Err = MacParseError;

    /// Accepts `aa:bb:cc:dd:ee:ff`, `AA-BB-CC-DD-EE-FF` and `aabbccddeeff`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !MAC_PATTERN.is_match(s) {
            return Err(MacParseError::InvalidFormat { text: s.to_string() });
        }

        let digits: String = s.chars().filter(|c| c.is_ascii_hexdigit()).collect();
        let value = u64::from_str_radix(&digits, 16)
            .map_err(|_| MacParseError::InvalidFormat { text: s.to_string() })?;
        Self::new(value)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}
