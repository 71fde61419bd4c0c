//! jagcsv CLI - Command-line tool for jagged CSV files
//!
//! This binary provides command-line interfaces for:
//! - check: validate that a file decodes, reporting the first grammar error
//! - normalize: decode and re-encode with minimal quoting and CRLF records
//! - ls: row and field-count statistics
//! - cat: stream one column (or one cell)

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use jagcsv_codec::DecodeOpts;
use jagcsv_format::{Limits, Table};
use jagcsv_io::{
    append_table_to_path, read_table_from_path, summarize, write_table, write_table_to_path,
    TableSummary,
};
use serde::Deserialize;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jagcsv")]
#[command(about = "Jagged CSV inspection and normalization tool")]
#[command(version)]
struct Cli {
    /// TOML file with a [limits] table overriding decode limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG is used otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate that a CSV file decodes
    Check {
        /// Input file (.csv)
        input: PathBuf,
    },
    /// Decode and re-encode a CSV file in canonical form
    ///
    /// Examples:
    ///   jagcsv normalize in.csv -o out.csv
    ///   jagcsv normalize in.csv -o log.csv --append --drop-empty-rows
    Normalize {
        /// Input file (.csv)
        input: PathBuf,
        /// Output file; standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Remove rows whose fields are all empty
        #[arg(long)]
        drop_empty_rows: bool,
        /// Append to the output file instead of truncating it
        #[arg(long, requires = "output")]
        append: bool,
        /// Show progress spinner while normalizing
        #[arg(long)]
        progress: bool,
    },
    /// Show row and field-count statistics
    Ls {
        /// Input file (.csv)
        input: PathBuf,
        /// Output format (table, json)
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },
    /// Print the values of one column, one per line
    ///
    /// Examples:
    ///   jagcsv cat data.csv --field 2
    ///   jagcsv cat data.csv --field 0 --row 10 --strict
    Cat {
        /// Input file (.csv)
        input: PathBuf,
        /// Zero-based field index
        #[arg(long)]
        field: usize,
        /// Zero-based row index; every row when omitted
        #[arg(long)]
        row: Option<usize>,
        /// Fail on missing rows or fields instead of printing empty lines
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LsFormat {
    Table,
    Json,
}

/// Contents of the `--config` file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    limits: Limits,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_deref())?;
    let opts = DecodeOpts {
        limits: config.limits,
    };

    match cli.command {
        Commands::Check { input } => handle_check(&input, &opts),
        Commands::Normalize {
            input,
            output,
            drop_empty_rows,
            append,
            progress,
        } => handle_normalize(
            &input,
            output.as_deref(),
            drop_empty_rows,
            append,
            progress,
            &opts,
        ),
        Commands::Ls { input, format } => handle_ls(&input, format, &opts),
        Commands::Cat {
            input,
            field,
            row,
            strict,
        } => handle_cat(&input, field, row, strict, &opts),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read config {}: {}", path.display(), err))?;
    let config: Config = toml::from_str(&text)
        .map_err(|err| format!("invalid config {}: {}", path.display(), err))?;
    debug!(path = %path.display(), limits = ?config.limits, "loaded config");
    Ok(config)
}

fn read_input(input: &Path, opts: &DecodeOpts) -> Result<Table, Box<dyn Error>> {
    read_table_from_path(input, opts).map_err(|err| format!("{}: {}", input.display(), err).into())
}

fn handle_check(input: &Path, opts: &DecodeOpts) -> Result<(), Box<dyn Error>> {
    let table = read_input(input, opts)?;
    println!("{}: ok ({} rows)", input.display(), table.len());
    Ok(())
}

fn handle_normalize(
    input: &Path,
    output: Option<&Path>,
    drop_empty_rows: bool,
    append: bool,
    show_progress: bool,
    opts: &DecodeOpts,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let mut progress_bar = if show_progress {
        Some(create_spinner("Normalizing records")?)
    } else {
        None
    };

    let mut table = read_input(input, opts)?;
    let dropped = if drop_empty_rows {
        table.remove_empty_rows()
    } else {
        0
    };

    let written = match output {
        Some(path) if append => append_table_to_path(&table, path)?,
        Some(path) => write_table_to_path(&table, path)?,
        None => write_table(&table, std::io::stdout().lock())?,
    };

    let elapsed = start.elapsed();
    if let Some(pb) = progress_bar.take() {
        pb.finish_with_message(format!(
            "Normalized {} records in {:.2?}",
            table.len(),
            elapsed
        ));
    }
    info!(rows = table.len(), dropped, bytes = written, "normalized");

    if let Some(path) = output {
        let mut stderr = std::io::stderr().lock();
        writeln!(
            &mut stderr,
            "Normalized to {} (rows: {}, empty rows dropped: {}, bytes written: {}, elapsed: {:.2?})",
            path.display(),
            table.len(),
            dropped,
            written,
            elapsed
        )?;
    }
    Ok(())
}

fn handle_ls(input: &Path, format: LsFormat, opts: &DecodeOpts) -> Result<(), Box<dyn Error>> {
    let table = read_input(input, opts)?;
    let summary = summarize(&table);

    let mut stdout = std::io::stdout().lock();
    match format {
        LsFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &summary)?;
            writeln!(&mut stdout)?;
        }
        LsFormat::Table => write_summary_table(&mut stdout, &summary)?,
    }
    Ok(())
}

fn write_summary_table<W: Write>(out: &mut W, summary: &TableSummary) -> std::io::Result<()> {
    writeln!(out, "rows:          {}", summary.rows)?;
    writeln!(out, "blank rows:    {}", summary.blank_rows)?;
    writeln!(out, "fields:        {}", summary.fields)?;
    writeln!(out, "widest row:    {}", summary.max_fields)?;
    writeln!(out, "narrowest row: {}", summary.min_fields)?;
    writeln!(
        out,
        "rectangular:   {}",
        if summary.rectangular { "yes" } else { "no" }
    )?;
    if !summary.field_count_histogram.is_empty() {
        writeln!(out, "field counts:")?;
        for (fields, rows) in &summary.field_count_histogram {
            writeln!(out, "  {:>6} fields: {} rows", fields, rows)?;
        }
    }
    Ok(())
}

fn handle_cat(
    input: &Path,
    field: usize,
    row: Option<usize>,
    strict: bool,
    opts: &DecodeOpts,
) -> Result<(), Box<dyn Error>> {
    let table = read_input(input, opts)?;
    let rows = match row {
        Some(idx) => idx..idx.saturating_add(1),
        None => 0..table.len(),
    };

    let mut stdout = std::io::stdout().lock();
    for idx in rows {
        let value = if strict {
            table
                .get_field(idx, field)
                .map_err(|err| format!("row {}: {}", idx, err))?
        } else {
            table.get_or_empty(idx, field)
        };
        writeln!(&mut stdout, "{}", value)?;
    }
    Ok(())
}

fn create_spinner(message: &str) -> Result<ProgressBar, Box<dyn Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
