//! Date helpers: parse statement dates and derive month/quarter bucket keys.

use chrono::{Datelike, NaiveDate};

/// Parse a `YYYY-MM-DD` date. Anything else is `None`.
///
/// The year must be exactly four digits and month/day one or two digits;
/// chrono alone would also take signed or five-digit years.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some()
        || !all_digits(year, 4..=4)
        || !all_digits(month, 1..=2)
        || !all_digits(day, 1..=2)
    {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn all_digits(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Calendar month key, e.g. "2024-01"
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Fiscal quarter key, e.g. "2024-Q1"
pub fn quarter_key(date: NaiveDate) -> String {
    let quarter = (date.month() - 1) / 3 + 1;
    format!("{}-Q{}", date.year(), quarter)
}

/// Time granularity used for bucketed summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Month,
    Quarter,
}

impl Bucket {
    /// Bucket key for a raw date string, `None` if the date does not parse
    pub fn key_for(&self, raw: &str) -> Option<String> {
        let date = parse_date(raw)?;
        Some(match self {
            Bucket::Month => month_key(date),
            Bucket::Quarter => quarter_key(date),
        })
    }
}
