//! Human-readable output lines.
use std::fmt;
use std::path::Path;

/// `Read N trades from PATH`
pub fn loaded_line(count: usize, path: &Path) -> String {
    format!("Read {} trades from {}", count, path.display())
}

/// Per-venue counts and the lag estimate for one run label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub label: &'a str,
    pub venue_a: usize,
    pub venue_b: usize,
    pub lag_us: i64,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trades from Exchange A: {}", self.venue_a)?;
        writeln!(f, "Trades from Exchange B: {}", self.venue_b)?;
        write!(
            f,
            "Estimation - B Exchange is {} microseconds slower than A Exchange on {}",
            self.lag_us, self.label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lines() {
        let s = Summary { label: "2017-04-18", venue_a: 6, venue_b: 4, lag_us: -12 };
        assert_eq!(
            s.to_string(),
            "Trades from Exchange A: 6\n\
             Trades from Exchange B: 4\n\
             Estimation - B Exchange is -12 microseconds slower than A Exchange on 2017-04-18"
        );
    }

    #[test]
    fn loaded() {
        assert_eq!(loaded_line(3, Path::new("d/f.csv")), "Read 3 trades from d/f.csv");
    }
}
