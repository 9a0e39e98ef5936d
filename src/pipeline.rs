//! One estimation run: load, partition, estimate, report.
use crate::error::LagError;
use crate::estimator::{estimate_lag, LagEstimate, Matcher};
use crate::loader::load_path;
use crate::parser::ParseOptions;
use crate::partition::partition;
use crate::report::{loaded_line, Summary};
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Label printed in the summary, usually the trading date.
    pub label: String,
    pub input: PathBuf,
    pub parse: ParseOptions,
    pub matcher: Matcher,
    /// Treat an empty venue group as fatal instead of reporting a lag of 0.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub rejected: usize,
    pub venue_a: usize,
    pub venue_b: usize,
    /// `None` when one venue had no trades and the run was not strict.
    pub estimate: Option<LagEstimate>,
}

impl RunSummary {
    /// The reported lag; 0 when nothing could be matched.
    pub fn lag_us(&self) -> i64 {
        self.estimate.map_or(0, |e| e.mean_us)
    }
}

/// Run the whole pipeline, writing report lines to `out`.
pub fn run<W: Write>(cfg: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let loaded = load_path(&cfg.input, &cfg.parse)?;
    writeln!(out, "{}", loaded_line(loaded.trades.len(), &cfg.input))?;
    if !loaded.rejected.is_empty() || loaded.sentinels > 0 {
        info!(
            rejected = loaded.rejected.len(),
            sentinels = loaded.sentinels,
            "skipped invalid records"
        );
    }
    if loaded.trades.is_empty() {
        return Err(LagError::EmptyDataset { path: cfg.input.clone() }.into());
    }
    let total = loaded.trades.len();
    let groups = partition(loaded.trades);
    let estimate = match estimate_lag(&groups.venue_a, &groups.venue_b, cfg.matcher) {
        Ok(est) => Some(est),
        Err(e @ LagError::InsufficientData { .. }) if !cfg.strict => {
            error!("{e}");
            None
        }
        Err(e) => return Err(e.into()),
    };
    let summary = RunSummary {
        loaded: total,
        rejected: loaded.rejected.len(),
        venue_a: groups.venue_a.len(),
        venue_b: groups.venue_b.len(),
        estimate,
    };
    let lines = Summary {
        label: &cfg.label,
        venue_a: summary.venue_a,
        venue_b: summary.venue_b,
        lag_us: summary.lag_us(),
    };
    writeln!(out, "{lines}")?;
    Ok(summary)
}
