use crate::record::TradeObservation;

/// Loaded trades split by venue, each side in input order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Partition {
    pub venue_a: Vec<TradeObservation>,
    /// Every label other than exactly `"A"`, including unknown ones.
    pub venue_b: Vec<TradeObservation>,
}

/// Split trades into venue A and the catch-all venue B.
pub fn partition(trades: Vec<TradeObservation>) -> Partition {
    let (venue_a, venue_b): (Vec<_>, Vec<_>) =
        trades.into_iter().partition(TradeObservation::is_venue_a);
    Partition { venue_a, venue_b }
}
