//! pds4view: read PDS4 2D image arrays and orient them for display.
//!
//! A PDS4 product pairs an XML label with a raw binary data file. The label
//! says where the array starts, how it is shaped and encoded, and (through
//! the display dictionary) which way is up. This crate turns a label path
//! into a typed array in display orientation.
//!
//! # Modules
//!
//! - [`label`]: label parsing and namespace-qualified queries
//! - [`registry`]: PDS4 data types and their binary encodings
//! - [`descriptor`]: array descriptor extraction and validation
//! - [`reader`]: raw array decoding
//! - [`display`]: display settings and orientation
//! - [`product`]: the end-to-end [`read_image`] pipeline
//! - [`inspect`]: human- and machine-readable summaries
//! - [`export`]: `.npy` and PNG output
//! - [`error`]: error types for pds4view operations
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pds4view::{read_image, ReadOptions};
//!
//! let image = read_image(Path::new("jaha_0_5_0349_s_0491.xml"), &ReadOptions::default())?;
//! let (rows, columns) = image.oriented.dimensions();
//! println!("{rows} x {columns}, origin at lower left");
//! # Ok::<(), pds4view::Pds4Error>(())
//! ```

pub mod array;
pub mod descriptor;
pub mod display;
pub mod error;
pub mod export;
pub mod inspect;
pub mod label;
pub mod product;
pub mod reader;
pub mod registry;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

pub use array::ArrayData;
pub use descriptor::ArrayDescriptor;
pub use display::{DisplaySettings, OrientedArray};
pub use error::Pds4Error;
pub use export::ColorMap;
pub use product::{read_image, Pds4Image, ReadOptions};
pub use reader::RawArray;

const LABEL_EXTENSION: &str = "xml";

/// The pds4view CLI application.
#[derive(Parser)]
#[command(name = "pds4view")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Summarise one label, or every label under a directory.
    Inspect(InspectArgs),
    /// Write an image in display orientation to .npy or .png.
    Export(ExportArgs),
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// PDS4 label (.xml) or a directory to search for labels.
    input: PathBuf,

    /// local_identifier of the array to read.
    #[arg(long, env = "PDS4VIEW_ARRAY")]
    array: Option<String>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// PDS4 label (.xml).
    label: PathBuf,

    /// Output file; the extension (.npy or .png) selects the format.
    #[arg(short, long)]
    out: PathBuf,

    /// local_identifier of the array to read.
    #[arg(long, env = "PDS4VIEW_ARRAY")]
    array: Option<String>,

    /// Grey ramp for PNG output.
    #[arg(long, value_enum, default_value_t = ColorMap::Gray)]
    cmap: ColorMap,

    /// Export the array in storage order instead of display order (.npy only).
    #[arg(long)]
    raw: bool,
}

/// Run the pds4view CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Pds4Error> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Export(args)) => run_export(args),
        None => {
            println!("pds4view {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Read PDS4 2D images and orient them for display.");
            println!();
            println!("Run 'pds4view --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), Pds4Error> {
    let json = match args.output.as_str() {
        "text" => false,
        "json" => true,
        other => {
            return Err(Pds4Error::UnsupportedFormat(format!(
                "'{}' (supported outputs: text, json)",
                other
            )));
        }
    };

    let labels = collect_labels(&args.input)?;
    let opts = ReadOptions {
        array_identifier: args.array,
    };

    let mut reports = Vec::with_capacity(labels.len());
    let mut failed = 0;
    for label in &labels {
        match read_image(label, &opts) {
            Ok(image) => reports.push(inspect::inspect_image(&image)),
            Err(err) => {
                failed += 1;
                eprintln!("Error: {}: {}", label.display(), err);
            }
        }
    }

    if json {
        let rendered = if args.input.is_dir() {
            serde_json::to_string_pretty(&reports)
        } else {
            match reports.first() {
                Some(report) => serde_json::to_string_pretty(report),
                None => serde_json::to_string_pretty(&reports),
            }
        };
        println!("{}", rendered.map_err(Pds4Error::ReportSerialize)?);
    } else {
        for report in &reports {
            print!("{}", report);
        }
    }

    if failed > 0 {
        Err(Pds4Error::BatchFailed {
            failed,
            total: labels.len(),
        })
    } else {
        Ok(())
    }
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), Pds4Error> {
    let format = export::ExportFormat::from_path(&args.out)?;
    let opts = ReadOptions {
        array_identifier: args.array,
    };
    let image = read_image(&args.label, &opts)?;

    match (format, args.raw) {
        (export::ExportFormat::Npy, false) => export::write_npy(&image.oriented.data, &args.out)?,
        (export::ExportFormat::Npy, true) => export::write_npy(&image.raw.data, &args.out)?,
        (export::ExportFormat::Png, false) => export::write_png(&image.oriented, &args.out, args.cmap)?,
        (export::ExportFormat::Png, true) => {
            return Err(Pds4Error::UnsupportedFormat(
                "--raw is only supported for .npy output".to_string(),
            ));
        }
    }

    println!(
        "Exported '{}' to {}",
        image.descriptor.local_identifier,
        args.out.display()
    );
    Ok(())
}

/// A label path as given, or every `.xml` file under a directory, sorted.
fn collect_labels(input: &Path) -> Result<Vec<PathBuf>, Pds4Error> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut labels = Vec::new();
    for entry in WalkDir::new(input).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            Pds4Error::Io(err.into_io_error().unwrap_or_else(|| {
                std::io::Error::other(format!("failed while traversing {}", input.display()))
            }))
        })?;
        if entry.file_type().is_file() && has_label_extension(entry.path()) {
            labels.push(entry.into_path());
        }
    }

    log::debug!("found {} label(s) under {}", labels.len(), input.display());
    Ok(labels)
}

fn has_label_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(LABEL_EXTENSION))
        .unwrap_or(false)
}
