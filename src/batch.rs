//! Batch record generation and output.
//!
//! Each board of the run gets its own copy of the template with the allocated
//! serial number, MAC address and the captured location address written in.
//! Records are written one at a time; a failure stops the run and leaves the
//! files already written on disk.

use crate::allocator::{BatchPlan, Seeds, UnitIdentity};
use crate::identity::SerialNumber;
use crate::template::{EepromTemplate, TemplateError, MAC_ADDRESS_FIELD, SERIAL_NUMBER_FIELD};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use serde_yaml::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Number of boards to generate
    pub count: u64,
    /// Directory the generated files are written to
    pub output_dir: PathBuf,
    /// Print `index: serial` for every generated board
    pub list: bool,
}

impl BatchOptions {
    pub fn new(count: u64, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            count,
            output_dir: output_dir.into(),
            list: false,
        }
    }

    pub fn with_listing(mut self, list: bool) -> Self {
        self.list = list;
        self
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub count: u64,
    pub output_dir: PathBuf,
    pub first_serial: SerialNumber,
    pub last_serial: SerialNumber,
    pub files: Vec<PathBuf>,
}

/// Output file name for a board, e.g. `gen-board-3-0x00000013.yml`
pub fn output_file_name(index: u64, serial: SerialNumber) -> String {
    format!("gen-board-{}-{}.yml", index, serial)
}

/// Build the record of a single board from the template
pub fn generate_record(
    template: &EepromTemplate,
    seeds: &Seeds,
    unit: &UnitIdentity,
) -> Result<EepromTemplate, TemplateError> {
    let mut record = template.clone();
    record.set_field_value(SERIAL_NUMBER_FIELD, unit.serial.to_string())?;
    record.set_field_value(MAC_ADDRESS_FIELD, unit.mac.to_string())?;
    record.address = Some(Value::String(seeds.eeprom_address.clone()));
    Ok(record)
}

/// Generate the whole batch, listing boards on stdout when requested
pub fn write_batch(template: &EepromTemplate, options: &BatchOptions) -> Result<BatchSummary> {
    let stdout = io::stdout();
    let mut listing = stdout.lock();
    write_batch_to(template, options, &mut listing)
}

/// Generate the whole batch, sending the board listing to `listing`
pub fn write_batch_to<W: Write>(
    template: &EepromTemplate,
    options: &BatchOptions,
    listing: &mut W,
) -> Result<BatchSummary> {
    let seeds = Seeds::from_template(template).wrap_err("Failed to read seed values from template")?;
    let plan = BatchPlan::new(seeds, options.count)?;

    info!(
        "Generating {} boards starting at serial {} / MAC {} ({} MACs per board)",
        plan.count(),
        plan.seeds().start_serial,
        plan.seeds().start_mac,
        plan.seeds().macs_per_unit
    );

    fs::create_dir_all(&options.output_dir).wrap_err_with(|| {
        format!("Failed to create output directory '{}'", options.output_dir.display())
    })?;

    let mut files = Vec::new();
    let mut last_serial = plan.seeds().start_serial;
    for unit in plan.units() {
        let path = write_unit(template, plan.seeds(), &unit, &options.output_dir)?;
        debug!("Board {}: serial {} MAC {} -> {:?}", unit.index, unit.serial, unit.mac, path);

        if options.list {
            writeln!(listing, "{}: {}", unit.index, unit.serial).wrap_err("Failed to write board listing")?;
        }

        last_serial = unit.serial;
        files.push(path);
    }

    info!("Wrote {} board files to {:?}", files.len(), options.output_dir);

    Ok(BatchSummary {
        count: plan.count(),
        output_dir: options.output_dir.clone(),
        first_serial: plan.seeds().start_serial,
        last_serial,
        files,
    })
}

fn write_unit(
    template: &EepromTemplate,
    seeds: &Seeds,
    unit: &UnitIdentity,
    output_dir: &Path,
) -> Result<PathBuf> {
    let record = generate_record(template, seeds, unit)?;
    let yaml = record
        .to_yaml()
        .wrap_err_with(|| format!("Failed to serialize record for board {}", unit.index))?;

    let path = output_dir.join(output_file_name(unit.index, unit.serial));
    fs::write(&path, yaml).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    Ok(path)
}
