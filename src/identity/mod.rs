//! Board identity types.
//!
//! Every generated board carries a serial number and the first address of its
//! MAC block. Both are kept as integers for arithmetic and only rendered to
//! text when a record is written.

pub mod mac;
pub mod serial;

// Re-export commonly used types
pub use mac::{MacAddress, MacParseError, MAC_MAX};
pub use serial::SerialNumber;
