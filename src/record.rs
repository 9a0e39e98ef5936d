use time::OffsetDateTime;

/// Venue label that selects group A. Every other label is group B.
pub const VENUE_A: &str = "A";

/// One trade print as read from the combined feed.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeObservation {
    pub timestamp: OffsetDateTime, // microsecond resolution
    pub symbol: String,
    pub price: f64,
    pub size: f64,
    pub source: String, // venue label
}

impl TradeObservation {
    /// Price and size both exactly zero mark a record as invalid.
    pub fn is_sentinel(&self) -> bool {
        self.price == 0.0 && self.size == 0.0
    }

    pub fn is_venue_a(&self) -> bool {
        self.source == VENUE_A
    }

    /// Microseconds since the Unix epoch.
    pub fn unix_micros(&self) -> i128 {
        self.timestamp.unix_timestamp_nanos() / 1_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn obs(price: f64, size: f64, source: &str) -> TradeObservation {
        TradeObservation {
            timestamp: datetime!(2024-01-01 00:00:00.000123 UTC),
            symbol: "XYZ".into(),
            price,
            size,
            source: source.into(),
        }
    }

    #[test]
    fn sentinel_needs_both_zero() {
        assert!(obs(0.0, 0.0, "A").is_sentinel());
        assert!(!obs(0.0, 1.0, "A").is_sentinel());
        assert!(!obs(1.0, 0.0, "A").is_sentinel());
    }

    #[test]
    fn only_exact_a_is_venue_a() {
        assert!(obs(1.0, 1.0, "A").is_venue_a());
        assert!(!obs(1.0, 1.0, "a").is_venue_a());
        assert!(!obs(1.0, 1.0, "A ").is_venue_a());
        assert!(!obs(1.0, 1.0, "").is_venue_a());
    }

    #[test]
    fn unix_micros_keeps_fraction() {
        assert_eq!(obs(1.0, 1.0, "A").unix_micros(), 1_704_067_200_000_123);
    }
}
