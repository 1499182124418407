//! Shared utilities: numeric parsing of loosely typed YAML scalars.

pub mod numeric;

pub use numeric::{parse_unsigned, scalar_to_u64, to_hex_string};
