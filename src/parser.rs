//! CSV line parser for the combined trade feed.
//!
//! A line carries five comma-separated fields: `timestamp,symbol,price,size,source`.
//! Timestamps are local wall-clock text `YYYY-MM-DD HH:MM:SS[.ffffff]`; the
//! caller supplies the UTC offset that text is relative to.
//!
//! The fractional-second suffix has two readings, see [`FractionMode`]. The
//! historical tool read the digits after the `.` as a raw microsecond count,
//! so `.5` meant 5 us. That reading is the default so estimates stay
//! comparable with old outputs.
use crate::error::RecordParseError;
use crate::record::TradeObservation;
use clap::ValueEnum;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const BASE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const FULL_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// How the digits after the seconds' `.` are turned into microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FractionMode {
    /// Digits are an integer microsecond count, whatever their number (`.5` = 5 us).
    #[default]
    Literal,
    /// Digits are a decimal fraction of a second, cut or padded to 6 places (`.5` = 500000 us).
    Scaled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Offset of the wall-clock text from UTC.
    pub offset: UtcOffset,
    pub fraction: FractionMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            offset: UtcOffset::UTC,
            fraction: FractionMode::Literal,
        }
    }
}

/// Parse one data line into a [`TradeObservation`].
///
/// Fields past the fifth are ignored. A missing source field gives an empty
/// label, which the partitioner files under venue B.
pub fn parse_line(line: &str, opts: &ParseOptions) -> Result<TradeObservation, RecordParseError> {
    let mut fields = line.split(',');
    let ts_field = fields.next().ok_or(RecordParseError::MissingField("timestamp"))?;
    let timestamp = parse_timestamp(ts_field, opts)?;
    let symbol = fields.next().ok_or(RecordParseError::MissingField("symbol"))?;
    let price = parse_number("price", fields.next())?;
    let size = parse_number("size", fields.next())?;
    let source = fields.next().unwrap_or_default();
    Ok(TradeObservation {
        timestamp,
        symbol: symbol.to_string(),
        price,
        size,
        source: source.to_string(),
    })
}

/// Parse `YYYY-MM-DD HH:MM:SS[.ffffff]` at the configured offset.
pub fn parse_timestamp(
    text: &str,
    opts: &ParseOptions,
) -> Result<OffsetDateTime, RecordParseError> {
    let (base, fraction) = match text.split_once('.') {
        Some((base, fraction)) => (base, Some(fraction)),
        None => (text, None),
    };
    let wall =
        PrimitiveDateTime::parse(base, BASE_FORMAT).map_err(|e| RecordParseError::Timestamp {
            value: text.to_string(),
            reason: e.to_string(),
        })?;
    let micros = match fraction {
        Some(f) => fraction_micros(f, opts.fraction)?,
        None => 0,
    };
    wall.assume_offset(opts.offset)
        .checked_add(Duration::microseconds(micros))
        .ok_or_else(|| RecordParseError::Fraction(text.to_string()))
}

/// Render a timestamp the way the feed writes it, always with six fractional digits.
pub fn format_timestamp(
    ts: OffsetDateTime,
    offset: UtcOffset,
) -> Result<String, time::error::Format> {
    ts.to_offset(offset).format(FULL_FORMAT)
}

fn fraction_micros(fraction: &str, mode: FractionMode) -> Result<i64, RecordParseError> {
    let invalid = || RecordParseError::Fraction(fraction.to_string());
    match mode {
        FractionMode::Literal => {
            // integer prefix: leading whitespace, optional sign, then digits
            let rest = fraction.trim_start();
            let (negative, rest) = match rest.as_bytes().first() {
                Some(b'-') => (true, &rest[1..]),
                Some(b'+') => (false, &rest[1..]),
                _ => (false, rest),
            };
            let micros = leading_digits(rest).parse::<i64>().map_err(|_| invalid())?;
            Ok(if negative { -micros } else { micros })
        }
        FractionMode::Scaled => {
            let digits = leading_digits(fraction);
            if digits.is_empty() {
                return Err(invalid());
            }
            let mut six: String = digits.chars().take(6).collect();
            while six.len() < 6 {
                six.push('0');
            }
            six.parse::<i64>().map_err(|_| invalid())
        }
    }
}

fn leading_digits(text: &str) -> &str {
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    &text[..end]
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<f64, RecordParseError> {
    let value = value.ok_or(RecordParseError::MissingField(field))?;
    value.trim().parse::<f64>().map_err(|_| RecordParseError::Number {
        field,
        value: value.to_string(),
    })
}
