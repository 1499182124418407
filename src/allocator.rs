//! Sequential board identity allocation.
//!
//! The template carries the identity of the first board of the run. The
//! allocator reads those seeds exactly once, checks that the whole run fits in
//! the serial and MAC address spaces, and then hands out one
//! [`UnitIdentity`] per board:
//!
//! - serial of board `i` = start serial + `i`
//! - MAC of board `i` = start MAC + `i` * MACs per board
//!
//! Nothing wraps around. A run that would leave either space fails before the
//! first record is produced. Every allocated MAC must also be a non-zero
//! unicast address, which is all the EEPROM programmer will flash.

use crate::identity::{MacAddress, MacParseError, SerialNumber, MAC_MAX};
use crate::template::{
    EepromTemplate, TemplateError, MAC_ADDRESS_FIELD, NUMBER_MAC_FIELD, SERIAL_NUMBER_FIELD,
};
use crate::utils::numeric::{scalar_to_u64, to_hex_string};
use log::{debug, warn};

/// I2C addresses the EEPROM programmer knows how to talk to
pub const KNOWN_EEPROM_ADDRESSES: [&str; 2] = ["0x50", "0x56"];

/// Errors that stop a batch before any record is generated
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Template has no 'address' field")]
    MissingAddress,

    #[error("Invalid value for '{name}': {reason}")]
    InvalidField { name: String, reason: String },

    #[error("Batch size must be at least 1")]
    EmptyBatch,

    #[error("Serial number space exhausted: {count} boards starting at {start} exceed 0xffffffff")]
    SerialSpaceExhausted { start: SerialNumber, count: u64 },

    #[error("MAC address space exhausted: {count} boards of {per_unit} addresses starting at {start} exceed ff:ff:ff:ff:ff:ff")]
    MacSpaceExhausted { start: MacAddress, per_unit: u16, count: u64 },

    #[error("MAC block {start} to {end} is not unicast: it reaches multicast or zero addresses")]
    NonUnicastMacBlock { start: MacAddress, end: MacAddress },
}

impl AllocationError {
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        AllocationError::InvalidField {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Seed values captured from the template before any record is copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seeds {
    pub start_serial: SerialNumber,
    pub start_mac: MacAddress,
    pub macs_per_unit: u16,
    /// Location address normalized to lowercase `0x` hex
    pub eeprom_address: String,
}

impl Seeds {
    /// Extract and validate all seed values from a loaded template
    pub fn from_template(template: &EepromTemplate) -> Result<Self, AllocationError> {
        let serial_value = &template.field(SERIAL_NUMBER_FIELD)?.value;
        let mac_value = &template.field(MAC_ADDRESS_FIELD)?.value;
        let per_unit_value = &template.field(NUMBER_MAC_FIELD)?.value;

        let serial = scalar_to_u64(serial_value)
            .map_err(|e| AllocationError::invalid(SERIAL_NUMBER_FIELD, e))?;
        let start_serial = u32::try_from(serial)
            .map(SerialNumber::new)
            .map_err(|_| AllocationError::invalid(SERIAL_NUMBER_FIELD, format!("{:#x} does not fit in 32 bits", serial)))?;

        let mac_text = mac_value
            .as_str()
            .ok_or_else(|| AllocationError::invalid(MAC_ADDRESS_FIELD, "expected a string"))?;
        let start_mac: MacAddress = mac_text
            .parse()
            .map_err(|e: MacParseError| AllocationError::invalid(MAC_ADDRESS_FIELD, e.to_string()))?;
        if start_mac.is_zero() {
            return Err(AllocationError::invalid(MAC_ADDRESS_FIELD, "00:00:00:00:00:00 is not a valid address"));
        }
        if start_mac.is_multicast() {
            return Err(AllocationError::invalid(MAC_ADDRESS_FIELD, format!("{} is a multicast address", start_mac)));
        }

        // Stored as a 2-byte field in the EEPROM
        let per_unit = scalar_to_u64(per_unit_value)
            .map_err(|e| AllocationError::invalid(NUMBER_MAC_FIELD, e))?;
        let macs_per_unit = u16::try_from(per_unit)
            .map_err(|_| AllocationError::invalid(NUMBER_MAC_FIELD, format!("{} does not fit in 16 bits", per_unit)))?;
        if macs_per_unit == 0 {
            return Err(AllocationError::invalid(NUMBER_MAC_FIELD, "must be at least 1"));
        }

        // Captured here because the YAML round trip turns 0x50 into 80
        let address_value = template.address.as_ref().ok_or(AllocationError::MissingAddress)?;
        let eeprom_address = scalar_to_u64(address_value)
            .map(to_hex_string)
            .map_err(|e| AllocationError::invalid("address", e))?;
        if !is_known_eeprom_address(&eeprom_address) {
            warn!(
                "EEPROM address {} is not one of {:?}; the programmer will not be able to flash it",
                eeprom_address, KNOWN_EEPROM_ADDRESSES
            );
        }

        let seeds = Seeds {
            start_serial,
            start_mac,
            macs_per_unit,
            eeprom_address,
        };
        debug!("Extracted template seeds: {:?}", seeds);
        Ok(seeds)
    }
}

/// Whether a normalized location address is one the programmer supports
pub fn is_known_eeprom_address(address: &str) -> bool {
    KNOWN_EEPROM_ADDRESSES.contains(&address)
}

/// Identity allocated to a single board of the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitIdentity {
    pub index: u64,
    pub serial: SerialNumber,
    /// First MAC address of the board's block
    pub mac: MacAddress,
}

/// Validated allocation plan for a batch of boards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    seeds: Seeds,
    count: u64,
}

impl BatchPlan {
    /// Check that `count` boards fit in both address spaces with unicast MACs
    pub fn new(seeds: Seeds, count: u64) -> Result<Self, AllocationError> {
        if count == 0 {
            return Err(AllocationError::EmptyBatch);
        }

        let last = count - 1;
        if seeds.start_serial.checked_add(last).is_none() {
            return Err(AllocationError::SerialSpaceExhausted {
                start: seeds.start_serial,
                count,
            });
        }

        let per_unit = u64::from(seeds.macs_per_unit);
        let last_mac = last
            .checked_mul(per_unit)
            .and_then(|offset| seeds.start_mac.checked_add(offset));
        // The final board needs its whole block, not only its first address
        let block_end = last_mac
            .and_then(|mac| mac.checked_add(per_unit.saturating_sub(1)))
            .ok_or(AllocationError::MacSpaceExhausted {
                start: seeds.start_mac,
                per_unit: seeds.macs_per_unit,
                count,
            })?;

        // Addresses only grow, so the block stays unicast while the first octet does
        let start = seeds.start_mac;
        if start.is_zero() || start.is_multicast() || block_end.octets()[0] != start.octets()[0] {
            return Err(AllocationError::NonUnicastMacBlock { start, end: block_end });
        }

        debug!(
            "Planned {} boards, MAC usage up to {:#x} of {:#x}",
            count,
            block_end.value(),
            MAC_MAX
        );
        Ok(Self { seeds, count })
    }

    pub fn seeds(&self) -> &Seeds {
        &self.seeds
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Identity of board `index`, `None` outside the batch
    pub fn unit(&self, index: u64) -> Option<UnitIdentity> {
        if index >= self.count {
            return None;
        }

        let serial = self.seeds.start_serial.checked_add(index)?;
        let mac = self.seeds.start_mac.checked_add(index * u64::from(self.seeds.macs_per_unit))?;
        Some(UnitIdentity { index, serial, mac })
    }

    /// Identities of every board, in index order
    pub fn units(&self) -> impl Iterator<Item = UnitIdentity> + '_ {
        (0..self.count).filter_map(move |index| self.unit(index))
    }
}
