//! Generate synthetic HX711 readings logs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use hx711_readings::{CborValue, Encoder, TARE_FLAG};
use rand::Rng;

/// HX711 conversions are 24-bit two's complement
const HX711_MIN: i64 = -(1 << 23);
const HX711_MAX: i64 = (1 << 23) - 1;

/// Largest load step accepted, twice the HX711 span
const LOAD_LIMIT: i64 = 1 << 24;

#[derive(Parser)]
#[command(name = "hx711-gen")]
#[command(about = "Generate a synthetic HX711 readings log")]
#[command(after_help = "TRACE SHAPE:\n  \
    The scale starts empty at --offset, is tared on the first sample, and\n  \
    carries --load extra counts through the middle third of the capture.\n  \
    Each sample gets up to ±--noise counts of jitter.")]
struct Args {
    /// Output file path (.cbor)
    output: PathBuf,

    /// Number of samples to generate (default: 10 minutes at 88.5Hz)
    #[arg(short, long, default_value = "53100")]
    samples: usize,

    /// Sample rate in Hz
    #[arg(long, default_value = "88.5")]
    rate_hz: f64,

    /// Raw reading of the empty scale
    #[arg(
        long,
        default_value = "-8400",
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i64).range(HX711_MIN..=HX711_MAX)
    )]
    offset: i64,

    /// Raw counts added by the load
    #[arg(
        long,
        default_value = "51000",
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i64).range(-LOAD_LIMIT..=LOAD_LIMIT)
    )]
    load: i64,

    /// Maximum jitter per sample in counts
    #[arg(
        long,
        default_value = "12",
        value_parser = clap::value_parser!(i64).range(0..=HX711_MAX)
    )]
    noise: i64,

    /// Tare again every N samples (0 = only at the start)
    #[arg(long, default_value = "0")]
    tare_every: usize,

    /// Device name stored alongside the readings
    #[arg(long)]
    device: Option<String>,
}

/// Generate (time_us, value, tare) triples based on args
fn generate_samples(args: &Args) -> Vec<(u64, i64, bool)> {
    let mut rng = rand::rng();
    let period_us = (1e6 / args.rate_hz).round().max(1.0) as u64;
    let (load_start, load_end) = (args.samples / 3, args.samples * 2 / 3);

    let mut time_us = 0u64;
    let mut samples = Vec::with_capacity(args.samples);

    for i in 0..args.samples {
        // Conversion timing wanders by a few microseconds
        let step = period_us.saturating_add_signed(rng.random_range(-3..=3));
        time_us = time_us.saturating_add(step);

        let load = if (load_start..load_end).contains(&i) { args.load } else { 0 };
        let jitter = if args.noise > 0 {
            rng.random_range(-args.noise..=args.noise)
        } else {
            0
        };
        let value = (args.offset + load + jitter).clamp(HX711_MIN, HX711_MAX);

        let tare = i == 0 || (args.tare_every > 0 && i % args.tare_every == 0);
        samples.push((time_us, value, tare));
    }

    samples
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if !(args.rate_hz > 0.0) {
        eprintln!("Error: --rate-hz must be positive, got {}", args.rate_hz);
        std::process::exit(1);
    }

    let mut enc = Encoder::new();
    if let Some(device) = &args.device {
        enc.insert_extra("device", CborValue::Text(device.clone()));
    }

    for (i, (time_us, value, tare)) in generate_samples(&args).into_iter().enumerate() {
        let flags = if tare { vec![TARE_FLAG] } else { Vec::new() };
        if let Err(e) = enc.append_with_flags(time_us, value, flags) {
            eprintln!(
                "Warning: Failed to append sample {i} (time={time_us}us, value={value}): {e}"
            );
        }
    }

    let result = File::create(&args.output).and_then(|file| {
        let mut out = BufWriter::new(file);
        enc.write_to(&mut out)?;
        out.flush()
    });
    if let Err(e) = result {
        eprintln!("Error: {}: {e}", args.output.display());
        std::process::exit(1);
    }

    log::info!("Generated {} samples", enc.count());
    println!(
        "Output: {} ({} tokens)",
        args.output.display(),
        enc.tokens().len()
    );
}
