//! Reads a combined trade feed into memory.
//!
//! The first line is a header and is dropped without looking at it. Blank
//! lines are skipped. Lines that fail to parse are logged and kept aside in
//! [`LoadOutcome::rejected`]. Parsed lines whose price and size are both
//! zero are sentinel-invalid records and are dropped as well.
use crate::error::{LagError, RecordParseError};
use crate::parser::{parse_line, ParseOptions};
use crate::record::TradeObservation;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A line the parser refused, with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub line_no: usize,
    pub error: RecordParseError,
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Valid observations in input order.
    pub trades: Vec<TradeObservation>,
    pub rejected: Vec<RejectedLine>,
    /// Lines that parsed but carried zero price and zero size.
    pub sentinels: usize,
}

/// Conventional feed location for a run label.
pub fn input_path_for(data_dir: &Path, label: &str) -> PathBuf {
    data_dir.join(format!("labeled_trade_data_{label}.csv"))
}

/// Open and load a feed file.
pub fn load_path(path: &Path, opts: &ParseOptions) -> Result<LoadOutcome, LagError> {
    let file = File::open(path).map_err(|source| LagError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(BufReader::new(file), opts).map_err(|source| LagError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Load from any buffered reader. Only I/O failures are errors; bad lines are not.
pub fn load_reader<R: BufRead>(reader: R, opts: &ParseOptions) -> std::io::Result<LoadOutcome> {
    let mut out = LoadOutcome::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            continue; // header
        }
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        match parse_line(line, opts) {
            Ok(trade) if trade.is_sentinel() => {
                debug!(line_no, "dropping zero price/size record");
                out.sentinels += 1;
            }
            Ok(trade) => out.trades.push(trade),
            Err(error) => {
                warn!(line_no, %error, "error parsing line: {line}");
                out.rejected.push(RejectedLine { line_no, error });
            }
        }
    }
    Ok(out)
}
