//! Labelled feeds with a known venue-B lag.
//!
//! [`generate`] builds trades one millisecond apart from 09:30:00 on the
//! chosen day. [`label_feed`] instead takes a real unlabelled feed, keeps the
//! chosen day and marks half of it as venue B. Either way venue-B prints are
//! shifted by `lag_us` plus Gaussian noise rounded to whole microseconds, and
//! files are written in the format the loader reads.
use crate::parser::format_timestamp;
use crate::record::{TradeObservation, VENUE_A};
use anyhow::Result;
use clap::ValueEnum;
use rand::seq::index;
use rand::Rng;
use std::f64::consts::PI;
use std::io::Write;
use time::macros::date;
use time::{Date, Duration, PrimitiveDateTime, UtcOffset};

pub const HEADER: &str = "Time,Ticker,Price,Size,Exchange";
const VENUE_B: &str = "B";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FeedMode {
    /// Each trade is printed on exactly one venue.
    #[default]
    Split,
    /// Each trade is printed on venue A and again, shifted, on venue B.
    Mirror,
}

#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub date: Date,
    pub trades: usize,
    pub lag_us: i64,
    pub noise_std_us: f64,
    /// Probability that a trade lands on venue A in `Split` mode.
    pub share_a: f64,
    pub mode: FeedMode,
    pub symbol: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            date: date!(2017-04-18),
            trades: 10_000,
            lag_us: 5,
            noise_std_us: 0.1,
            share_a: 0.6,
            mode: FeedMode::Split,
            symbol: "XYZ".to_string(),
        }
    }
}

/// Build the feed in slot order, timestamps at wall-clock `offset`.
pub fn generate<R: Rng>(
    cfg: &SynthConfig,
    offset: UtcOffset,
    rng: &mut R,
) -> Vec<TradeObservation> {
    let open = PrimitiveDateTime::new(cfg.date, time::macros::time!(09:30)).assume_offset(offset);
    let mut out = Vec::with_capacity(match cfg.mode {
        FeedMode::Split => cfg.trades,
        FeedMode::Mirror => cfg.trades * 2,
    });
    for i in 0..cfg.trades {
        let ts = open + Duration::milliseconds(i as i64);
        let trade = TradeObservation {
            timestamp: ts,
            symbol: cfg.symbol.clone(),
            price: rng.random_range(100.0..200.0),
            size: rng.random_range(1.0..100.0),
            source: VENUE_A.to_string(),
        };
        let on_a = match cfg.mode {
            FeedMode::Split => rng.random::<f64>() < cfg.share_a,
            FeedMode::Mirror => {
                out.push(trade.clone());
                false
            }
        };
        if on_a {
            out.push(trade);
        } else {
            out.push(TradeObservation {
                timestamp: ts + Duration::microseconds(venue_b_shift(cfg, rng)),
                source: VENUE_B.to_string(),
                ..trade
            });
        }
    }
    out
}

/// Label a raw feed: keep trades on `cfg.date` (wall clock at `offset`), pick
/// exactly half of them at random for venue B and shift those. Input order is
/// kept; `trades`, `share_a` and `mode` are not used here.
pub fn label_feed<R: Rng>(
    raw: Vec<TradeObservation>,
    cfg: &SynthConfig,
    offset: UtcOffset,
    rng: &mut R,
) -> Vec<TradeObservation> {
    let day: Vec<TradeObservation> = raw
        .into_iter()
        .filter(|t| t.timestamp.to_offset(offset).date() == cfg.date)
        .collect();
    let mut on_b = vec![false; day.len()];
    for i in index::sample(rng, day.len(), day.len() / 2).iter() {
        on_b[i] = true;
    }
    day.into_iter()
        .zip(on_b)
        .map(|(t, b)| {
            if b {
                TradeObservation {
                    timestamp: t.timestamp + Duration::microseconds(venue_b_shift(cfg, rng)),
                    source: VENUE_B.to_string(),
                    ..t
                }
            } else {
                TradeObservation { source: VENUE_A.to_string(), ..t }
            }
        })
        .collect()
}

fn venue_b_shift<R: Rng>(cfg: &SynthConfig, rng: &mut R) -> i64 {
    cfg.lag_us + (gaussian(rng) * cfg.noise_std_us).round() as i64
}

/// Write a header plus one line per trade.
pub fn write_csv<W: Write>(
    out: &mut W,
    trades: &[TradeObservation],
    offset: UtcOffset,
) -> Result<()> {
    writeln!(out, "{HEADER}")?;
    for t in trades {
        writeln!(
            out,
            "{},{},{},{},{}",
            format_timestamp(t.timestamp, offset)?,
            t.symbol,
            t.price,
            t.size,
            t.source
        )?;
    }
    Ok(())
}

// Box-Muller, standard normal.
fn gaussian<R: Rng>(rng: &mut R) -> f64 {
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
