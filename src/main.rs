use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use time::UtcOffset;
use tracing::debug;
use venue_lag::estimator::Matcher;
use venue_lag::loader::input_path_for;
use venue_lag::parser::{FractionMode, ParseOptions};
use venue_lag::pipeline::{run, RunConfig};
use venue_lag::telemetry;

#[derive(Debug, Parser)]
#[command(version, about = "Estimate how far exchange B lags exchange A in a labelled trade feed")]
struct Args {
    /// Run label, usually the trading date (e.g., 2017-04-18)
    label: String,

    /// Directory holding labeled_trade_data_<LABEL>.csv
    #[arg(long, env = "VENUE_LAG_DATA_DIR", default_value = "test_data")]
    data_dir: PathBuf,

    /// Input file path; defaults to DATA_DIR/labeled_trade_data_<LABEL>.csv
    #[arg(long, env = "VENUE_LAG_INPUT")]
    input: Option<PathBuf>,

    /// How digits after the seconds' '.' are read (literal = raw microseconds)
    #[arg(long, env = "VENUE_LAG_FRACTION", value_enum, default_value_t = FractionMode::Literal)]
    fraction: FractionMode,

    /// Nearest-match strategy
    #[arg(long, env = "VENUE_LAG_MATCHER", value_enum, default_value_t = Matcher::BruteForce)]
    matcher: Matcher,

    /// Fail instead of reporting 0 when one exchange has no trades
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Read timestamps as UTC instead of local time
    #[arg(long, default_value_t = false)]
    utc: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // usage errors exit 1, --help/--version exit 0
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Local offset lookup must happen while the process is single-threaded
    let local = UtcOffset::current_local_offset();
    telemetry::init();
    let offset = match (args.utc, local) {
        (true, _) => UtcOffset::UTC,
        (false, Ok(offset)) => offset,
        (false, Err(e)) => {
            debug!("local offset unavailable ({e}), using UTC");
            UtcOffset::UTC
        }
    };

    let input = args.input.clone().unwrap_or_else(|| input_path_for(&args.data_dir, &args.label));
    let cfg = RunConfig {
        label: args.label,
        input,
        parse: ParseOptions { offset, fraction: args.fraction },
        matcher: args.matcher,
        strict: args.strict,
    };
    let stdout = std::io::stdout();
    run(&cfg, &mut stdout.lock())?;
    Ok(())
}
