use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use time::macros::format_description;
use time::{Date, UtcOffset};
use venue_lag::loader::{input_path_for, load_path};
use venue_lag::parser::{FractionMode, ParseOptions};
use venue_lag::synth::{generate, label_feed, write_csv, FeedMode, SynthConfig};
use venue_lag::telemetry;

#[derive(Debug, Parser)]
#[command(about = "Generate a labelled two-exchange trade feed with a known lag")]
struct Args {
    /// Trading date, YYYY-MM-DD
    #[arg(value_parser = parse_date)]
    date: Date,

    /// Number of trades, one per millisecond from 09:30:00
    #[arg(long, default_value_t = 10_000)]
    trades: usize,

    /// Lag added to exchange B prints, in microseconds
    #[arg(long, default_value_t = 5)]
    lag_us: i64,

    /// Standard deviation of the Gaussian noise on exchange B, in microseconds
    #[arg(long, default_value_t = 0.1)]
    noise_std: f64,

    /// Probability a trade prints on exchange A (split mode)
    #[arg(long, default_value_t = 0.6)]
    share_a: f64,

    #[arg(long, value_enum, default_value_t = FeedMode::Split)]
    mode: FeedMode,

    /// Output folder
    #[arg(long, env = "VENUE_LAG_DATA_DIR", default_value = "test_data")]
    folder: PathBuf,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Label an unlabelled Time,Ticker,Price,Size feed instead of synthesising one;
    /// keeps DATE's trades and marks half of them as exchange B
    #[arg(long, env = "VENUE_LAG_RAW")]
    from: Option<PathBuf>,
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    telemetry::init();
    let cfg = SynthConfig {
        date: args.date,
        trades: args.trades,
        lag_us: args.lag_us,
        noise_std_us: args.noise_std,
        share_a: args.share_a,
        mode: args.mode,
        ..SynthConfig::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let feed = match &args.from {
        Some(raw) => {
            let opts = ParseOptions {
                offset: UtcOffset::UTC,
                fraction: FractionMode::Scaled,
            };
            let loaded = load_path(raw, &opts)?;
            label_feed(loaded.trades, &cfg, UtcOffset::UTC, &mut rng)
        }
        None => generate(&cfg, UtcOffset::UTC, &mut rng),
    };

    fs::create_dir_all(&args.folder).with_context(|| format!("create {:?}", args.folder))?;
    let label = date_label(args.date)?;
    let out = input_path_for(&args.folder, &label);
    let file = File::create(&out).with_context(|| format!("create {:?}", out))?;
    let mut w = BufWriter::new(file);
    write_csv(&mut w, &feed, UtcOffset::UTC)?;
    w.flush()?;
    if args.from.is_some() {
        println!("Labeled data for {} saved to {}", label, out.display());
    } else {
        println!(
            "Generated test data for {} with a lag of {} microseconds in {}",
            label,
            args.lag_us,
            out.display()
        );
    }
    Ok(())
}

fn date_label(date: Date) -> Result<String> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}
