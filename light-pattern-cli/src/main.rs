//! Light Pattern Compiler CLI Application
//!
//! This is the command-line interface for the light pattern compiler.
//! It uses the light-pattern-compiler library and adds:
//! - Pattern file and config file handling
//! - Channel overrides from the command line
//! - Schedule rendering (TXT/JSON) to a file or stdout

use anyhow::{Context, Result};
use clap::Parser;
use light_pattern_compiler::{ChannelSpec, Compiler, PatternTable};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};

/// Light Pattern Compiler - Generate controller code from a light pattern
#[derive(Parser, Debug)]
#[command(name = "light-pattern-cli")]
#[command(about = "Generate controller code from a light pattern", long_about = None)]
#[command(version)]
struct Args {
    /// CSV file containing the light pattern
    #[arg(value_name = "PATTERN_FILE")]
    pattern: PathBuf,

    /// Generated file containing controller code (default: stdout)
    #[arg(value_name = "CODE_FILE")]
    code: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Channel in table row order: LABEL or LABEL:ON_FUNCTION:OFF_FUNCTION
    /// (can be repeated; replaces the configured channels)
    #[arg(long = "channel", value_name = "CHANNEL", value_parser = config::parse_channel_arg)]
    channels: Vec<ChannelSpec>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pair mismatched rows and durations positionally instead of failing
    #[arg(long)]
    lenient: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Light Pattern Compiler CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using compiler library v{}", light_pattern_compiler::VERSION);

    let app_config = resolve_config(&args)?;
    log::debug!("Effective configuration: {:?}", app_config);

    let table = PatternTable::from_path(&args.pattern)
        .with_context(|| format!("Failed to read pattern file: {:?}", args.pattern))?;

    let schedule = Compiler::new(app_config.compiler)
        .compile(&table)
        .with_context(|| format!("Failed to compile pattern file: {:?}", args.pattern))?;

    let format = app_config.output.format;
    match &args.code {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create code file: {:?}", path))?;
            let mut writer = BufWriter::new(file);
            report::write_schedule(&schedule, format, &mut writer)
                .with_context(|| format!("Failed to write code file: {:?}", path))?;
            writer.flush()?;
            log::info!("Wrote {} schedule entries to {:?}", schedule.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            report::write_schedule(&schedule, format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// Merge the config file (if any) with command line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if !args.channels.is_empty() {
        app_config.compiler.channels = args.channels.clone();
    }
    if args.lenient {
        app_config.compiler.strict = false;
    }
    if let Some(format) = args.format {
        app_config.output.format = format;
    }

    Ok(app_config)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
