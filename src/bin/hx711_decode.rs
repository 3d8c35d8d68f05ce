//! Convert HX711 readings logs (.cbor) to CSV files alongside them.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use hx711_readings::convert_all;

#[derive(Parser)]
#[command(name = "hx711-decode")]
#[command(about = "Convert HX711 readings logs to CSV")]
#[command(after_help = "OUTPUT:\n  \
    Each FILE ending in .cbor is written to the same path with a .csv suffix.\n  \
    Other files are skipped. The first file that fails to decode stops the\n  \
    whole batch with a non-zero exit status.\n\n\
CSV COLUMNS:\n  \
    Time (us), Value, Tare (1 if the scale was zeroed at that sample)")]
struct Args {
    /// Readings log files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print sample count, duration and tare count for each file
    #[arg(short, long)]
    summary: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = convert_all(&args.files, |output, decoded| {
        if args.summary {
            println!(
                "{}: {} readings over {:.3}s, {} tare, {} extra entries",
                output.display(),
                decoded.readings.len(),
                decoded.duration_us() as f64 / 1e6,
                decoded.tare_count(),
                decoded.extra.len()
            );
        }
    });

    match result {
        Ok(converted) => log::debug!("converted {converted} of {} files", args.files.len()),
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                log::debug!("caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
