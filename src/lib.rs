//! # eeprom-batchgen - Batch generator for per-board EEPROM configurations
//!
//! This library turns a single EEPROM YAML template into one configuration
//! record per board of a production run. Every board gets a sequential serial
//! number and a block of sequential MAC addresses derived from the seed values
//! stored in the template itself.
//!
//! ## Architecture
//!
//! - `template`: Typed view of the EEPROM YAML document
//! - `template_loader`: Loading templates from disk
//! - `identity`: Serial number and MAC address types
//! - `allocator`: Seed extraction and per-board identity allocation
//! - `batch`: Record generation and output file writing
//! - `utils`: Numeric helpers for loosely typed YAML scalars
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use eeprom_batchgen::{batch, template_loader};
//! use std::path::Path;
//!
//! let template = template_loader::load_template(Path::new("board.yaml"))?;
//! let options = batch::BatchOptions::new(100, "out");
//! let summary = batch::write_batch(&template, &options)?;
//! println!("wrote {} files", summary.count);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Template Format
//!
//! ```yaml
//! address: 0x50
//! eeprom:
//!   - name: serial-number
//!     value: 0x00000010
//!   - name: mac-address
//!     value: AA:BB:CC:00:00:00
//!   - name: number-mac
//!     value: 4
//! ```
//!
//! ## Error Handling
//!
//! Domain failures are typed `thiserror` enums; operations that touch the
//! filesystem return `color_eyre::Result` with path context attached.

pub mod allocator;
pub mod batch;
pub mod identity;
pub mod template;
pub mod template_loader;
pub mod utils;
