//! Nearest-in-time matching between the two venues and the mean signed lag.
//!
//! For every venue-A trade the closest venue-B trade by absolute time
//! distance is picked; on equal distance the one earlier in venue-B order
//! wins. The signed difference `t(b) - t(a)` is summed and divided by the
//! number of venue-A trades with truncation toward zero.
use crate::error::LagError;
use crate::record::TradeObservation;
use clap::ValueEnum;

/// Strategy for finding the nearest venue-B trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Matcher {
    /// Linear scan of venue B for every venue-A trade, O(|A| x |B|).
    #[default]
    BruteForce,
    /// Sort venue B once and binary search. Same picks as `BruteForce`.
    Indexed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LagEstimate {
    /// Mean signed lag in microseconds; positive means venue B prints later.
    pub mean_us: i64,
    pub total_us: i128,
    pub matched: usize,
}

/// Index of the candidate closest in time to `target`, first one on ties.
pub fn nearest_match(target: &TradeObservation, candidates: &[TradeObservation]) -> Option<usize> {
    let t = target.unix_micros();
    let mut best: Option<(usize, i128)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let d = (c.unix_micros() - t).abs();
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Estimate how much later, on average, venue B prints than venue A.
pub fn estimate_lag(
    venue_a: &[TradeObservation],
    venue_b: &[TradeObservation],
    matcher: Matcher,
) -> Result<LagEstimate, LagError> {
    if venue_a.is_empty() || venue_b.is_empty() {
        return Err(LagError::InsufficientData { venue_a: venue_a.len(), venue_b: venue_b.len() });
    }
    let index = match matcher {
        Matcher::BruteForce => None,
        Matcher::Indexed => Some(TimeIndex::new(venue_b)),
    };
    let mut total: i128 = 0;
    for a in venue_a {
        let nearest = match &index {
            Some(ix) => ix.nearest(a.unix_micros()),
            None => nearest_match(a, venue_b),
        };
        if let Some(j) = nearest {
            total += venue_b[j].unix_micros() - a.unix_micros();
        }
    }
    let matched = venue_a.len();
    let mean = total / matched as i128; // truncates toward zero
    let mean_us = i64::try_from(mean).unwrap_or(if mean < 0 { i64::MIN } else { i64::MAX });
    Ok(LagEstimate { mean_us, total_us: total, matched })
}

/// Venue-B timestamps sorted stably, with their original positions.
struct TimeIndex {
    micros: Vec<i128>,
    order: Vec<usize>,
}

impl TimeIndex {
    fn new(trades: &[TradeObservation]) -> Self {
        let mut order: Vec<usize> = (0..trades.len()).collect();
        order.sort_by_key(|&i| trades[i].unix_micros());
        let micros = order.iter().map(|&i| trades[i].unix_micros()).collect();
        Self { micros, order }
    }

    /// Original position of the nearest trade to `t`.
    ///
    /// Within a run of equal timestamps the stable sort keeps original order,
    /// so the first slot of a run is its earliest trade. The closest run below
    /// and the closest run at or above `t` are compared on (distance, position),
    /// which is exactly what the linear scan's strict `<` picks.
    fn nearest(&self, t: i128) -> Option<usize> {
        let p = self.micros.partition_point(|&x| x < t);
        let upper = self.micros.get(p).map(|&v| (v - t, self.order[p]));
        let lower = p.checked_sub(1).map(|k| {
            let v = self.micros[k];
            let first = self.micros.partition_point(|&x| x < v);
            (t - v, self.order[first])
        });
        match (lower, upper) {
            (Some(l), Some(u)) => Some(l.min(u).1),
            (Some(l), None) => Some(l.1),
            (None, Some(u)) => Some(u.1),
            (None, None) => None,
        }
    }
}
