//! Executable for building and dumping FRU blobs.

use clap::{Parser, Subcommand};
use log::{LevelFilter, Log, Metadata, Record, debug, error, info, trace};
use std::{
    error::Error,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Parser, Debug)]
#[command(version, about = "Generate and inspect binary IPMI FRU data files")]
struct Args {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode an INI description into a FRU blob
    Build {
        input_path: PathBuf,
        output_path: PathBuf,
        /// Overwrite the output file if it exists
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Decode a FRU blob and print it as INI
    Dump { input_path: PathBuf },
}

/// Writes `[LEVEL] message` lines to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            _ = writeln!(io::stderr(), "[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        _ = io::stderr().flush()
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> ExitCode {
    let args = Args::parse();

    _ = log::set_logger(&LOGGER);
    log::set_max_level(match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });

    let result = match args.command {
        Command::Build {
            input_path,
            output_path,
            force,
        } => build(&input_path, &output_path, force),
        Command::Dump { input_path } => dump(&input_path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn build(input_path: &Path, output_path: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    if !input_path.exists() {
        return Err(format!("Missing INI file {}", input_path.display()).into());
    }
    if output_path.exists() && !force {
        return Err(format!("BIN file {} exists", output_path.display()).into());
    }

    let record = fru::config::load(input_path)?;
    let blob = fru::encode(&record)?;
    let header = fru::parser::parse_header(&blob)?;
    debug!("offset table: {:?}", header);
    fs::write(output_path, &blob)?;
    info!("wrote {} bytes to {}", blob.len(), output_path.display());
    Ok(())
}

fn dump(input_path: &Path) -> Result<(), Box<dyn Error>> {
    let blob = fs::read(input_path)?;
    let header = fru::parser::parse_header(&blob)?;
    trace!("header: {:?}", header);
    if header.multirecord != 0 {
        debug!(
            "multirecord area at unit {} is not decoded",
            header.multirecord
        );
    }

    let record = fru::load(None, Some(blob.as_slice()))?;
    debug!(
        "decoded {}-byte blob (internal: {}, chassis: {}, board: {}, product: {})",
        blob.len(),
        record.internal.is_some(),
        record.chassis.is_some(),
        record.board.is_some(),
        record.product.is_some()
    );
    let mut out = io::stdout();
    out.write_all(fru::config::render(&record).as_bytes())?;
    Ok(())
}
