//! `dataconvert` CLI: convert a file between JSON, CSV, XML and YAML.
//!
//! ## Usage
//!
//! ```sh
//! # JSON to CSV on stdout
//! dataconvert data.json --to csv
//!
//! # CSV to JSON file
//! dataconvert data.csv --to json --output out.json
//!
//! # XML to YAML
//! dataconvert data.xml --to yaml
//!
//! # JSON to XML with a custom root element
//! dataconvert data.json --to xml --root config
//!
//! # YAML to indented JSON
//! dataconvert data.yaml --to json --pretty
//! ```
//!
//! The input format comes from the file extension (`.json`, `.csv`, `.xml`,
//! `.yaml`, `.yml`). Progress is logged to stderr; set `RUST_LOG` or pass
//! `--verbose` to change the level.

use anyhow::{bail, Context, Result};
use clap::Parser;
use dataconvert_core::{ConvertOptions, Format};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dataconvert",
    version,
    about = "Convert data between JSON, CSV, XML and YAML",
    after_help = "Supported formats: json, csv, xml, yaml\n\
                  JSON and XML output is compact unless --pretty is given."
)]
struct Cli {
    /// Input file; its extension selects the input format
    input: PathBuf,

    /// Output format (json, csv, xml, yaml)
    #[arg(long, value_parser = parse_format)]
    to: Format,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Root element name for XML
    #[arg(long, default_value = "root")]
    root: String,

    /// Indent JSON and XML output and add an XML declaration (output is
    /// compact by default)
    #[arg(long)]
    pretty: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.input.exists() {
        bail!("File not found: {}", cli.input.display());
    }
    let source = detect_input_format(&cli.input)?;

    info!("Reading {} from {}", label(source), cli.input.display());
    let content = dataconvert_core::read_file(&cli.input)
        .with_context(|| format!("Failed to read file: {}", cli.input.display()))?;

    info!("Converting {} → {}", label(source), label(cli.to));
    let options = ConvertOptions::default()
        .with_root_name(cli.root)
        .with_pretty(cli.pretty);
    let result = dataconvert_core::convert_with(source, cli.to, &content, &options)
        .with_context(|| format!("Failed to convert {} to {}", label(source), label(cli.to)))?;

    write_output(cli.output.as_deref(), &result)?;
    Ok(())
}

/// Route log events to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn parse_format(tag: &str) -> std::result::Result<Format, String> {
    tag.parse::<Format>().map_err(|e| e.to_string())
}

fn detect_input_format(path: &Path) -> Result<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match Format::from_extension(&ext) {
        Ok(format) => Ok(format),
        Err(_) => bail!(
            "Unsupported input format: '{}'. Supported: {}",
            ext,
            Format::supported()
        ),
    }
}

fn label(format: Format) -> String {
    format.as_str().to_uppercase()
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            dataconvert_core::write_file(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            info!("Saved to {}", path.display());
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
