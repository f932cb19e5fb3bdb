use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetdoc::pipeline::{
    detect_key_column_in_file, excel_to_json, json_to_excel, ConvertOptions, StdErrObserver,
};

/// Convert spreadsheets into key-indexed JSON document records and back
#[derive(Parser)]
#[command(name = "sheetdoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (debug logging and per-conversion reports)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet to a key-indexed JSON document
    #[command(name = "x2j")]
    ExcelToJson {
        /// Input spreadsheet (.xlsx)
        excel: PathBuf,
        /// Output JSON file path
        json: PathBuf,
    },

    /// Convert a key-indexed JSON document to a spreadsheet
    #[command(name = "j2x")]
    JsonToExcel {
        /// Input JSON document (top-level object)
        json: PathBuf,
        /// Output spreadsheet (.xlsx)
        excel: PathBuf,
    },

    /// Detect and print a spreadsheet's key column
    #[command(name = "detect")]
    Detect {
        /// Input spreadsheet (.xlsx)
        excel: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let mut options = ConvertOptions::default();
    if cli.verbose {
        options.observer = Some(Arc::new(StdErrObserver));
    }
    log::debug!("using {options:?}");

    match cli.command {
        Commands::ExcelToJson { excel, json } => {
            excel_to_json(&excel, &json, &options).with_context(|| {
                format!("failed to convert {} to {}", excel.display(), json.display())
            })?;
            log::info!("wrote {}", json.display());
            if !cli.quiet {
                println!("Wrote {}", json.display());
            }
        }
        Commands::JsonToExcel { json, excel } => {
            json_to_excel(&json, &excel, &options).with_context(|| {
                format!("failed to convert {} to {}", json.display(), excel.display())
            })?;
            log::info!("wrote {}", excel.display());
            if !cli.quiet {
                println!("Wrote {}", excel.display());
            }
        }
        Commands::Detect { excel } => {
            // Both detection outcomes are ordinary results; only read failures exit non-zero.
            let detected = detect_key_column_in_file(&excel, &options)
                .with_context(|| format!("failed to read {}", excel.display()))?;
            match detected {
                Some(name) => println!("Detected key column: {name}"),
                None => println!("Detected key column: (none)"),
            }
        }
    }

    Ok(())
}

/// Map the verbosity flags onto an `env_logger` filter; `RUST_LOG` still wins.
fn setup_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
