use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use eeprom_batchgen::batch::{self, BatchOptions};
use eeprom_batchgen::template_loader;

/// Generate per-board EEPROM YAML files from a single template
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of boards to generate
    #[arg(short = 'n', long = "num", value_parser = clap::value_parser!(u64).range(1..))]
    num: u64,

    /// Path to the EEPROM template YAML file
    #[arg(short, long)]
    file: PathBuf,

    /// Print "index: serial" for every generated board
    #[arg(short, long)]
    list: bool,

    /// Directory for the generated files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr so the board listing on stdout stays clean
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Template file: {:?}", args.file);
    info!("Output directory: {:?}", args.output_dir);

    let template = template_loader::load_template(&args.file)?;

    let options = BatchOptions::new(args.num, args.output_dir).with_listing(args.list);
    let summary = batch::write_batch(&template, &options)?;

    info!(
        "Generated {} boards, serials {} to {}",
        summary.count, summary.first_serial, summary.last_serial
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&["eeprom-batchgen", "-n", "100", "-f", "board.yaml"]);

        assert_eq!(args.num, 100);
        assert_eq!(args.file, PathBuf::from("board.yaml"));
        assert!(!args.list);
        assert_eq!(args.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_long_options() {
        let args = Args::parse_from(&[
            "eeprom-batchgen",
            "--num", "2",
            "--file", "board.yaml",
            "--list",
            "--output-dir", "out",
        ]);

        assert_eq!(args.num, 2);
        assert!(args.list);
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_required_arguments() {
        assert!(Args::try_parse_from(&["eeprom-batchgen", "-f", "board.yaml"]).is_err());
        assert!(Args::try_parse_from(&["eeprom-batchgen", "-n", "2"]).is_err());
    }

    #[test]
    fn test_rejects_zero_and_garbage_count() {
        assert!(Args::try_parse_from(&["eeprom-batchgen", "-n", "0", "-f", "board.yaml"]).is_err());
        assert!(Args::try_parse_from(&["eeprom-batchgen", "-n", "ten", "-f", "board.yaml"]).is_err());
    }
}
