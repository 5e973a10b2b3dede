//! Display-date parsing for chronological ordering.
//!
//! Content stores dates the way they are shown on the site ("March 15, 2024",
//! "May 15 - August 30, 2023"). Only ordering needs a real date.

use chrono::{DateTime, NaiveDate};

/// Parse a display date into a calendar date.
///
/// Ranges resolve to their start; a start without a year borrows the year
/// from the end of the range. Month-only dates resolve to the first day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    parse_single(raw).or_else(|| parse_range_start(raw))
}

fn parse_single(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in ["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // "December 2024"; a bare "April 15" must not read 15 as the year.
    let has_year = s
        .rsplit(' ')
        .next()
        .is_some_and(|token| token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()));
    if !has_year {
        return None;
    }
    let with_day = format!("1 {s}");
    for fmt in ["%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, fmt) {
            return Some(date);
        }
    }

    None
}

fn parse_range_start(s: &str) -> Option<NaiveDate> {
    let (start, end) = s.split_once('-')?;
    let start = start.trim();

    parse_single(start).or_else(|| {
        let year = end
            .split(|c: char| !c.is_ascii_digit())
            .rfind(|token| token.len() == 4)?;
        parse_single(&format!("{start}, {year}"))
            .or_else(|| parse_single(&format!("{start} {year}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_iso_and_rfc3339() {
        assert_eq!(parse_date("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date("2024-03-15T10:00:00Z"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_long_form() {
        assert_eq!(parse_date("March 15, 2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date("March 5, 2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("Mar 5, 2024"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_month_only() {
        assert_eq!(parse_date("December 2024"), Some(ymd(2024, 12, 1)));
    }

    #[test]
    fn test_ranges_use_start() {
        assert_eq!(
            parse_date("May 15 - August 30, 2023"),
            Some(ymd(2023, 5, 15))
        );
        assert_eq!(parse_date("April 15-16, 2023"), Some(ymd(2023, 4, 15)));
        assert_eq!(
            parse_date("September 15 - December 10, 2023"),
            Some(ymd(2023, 9, 15))
        );
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("Ongoing"), None);
        assert_eq!(parse_date("Full Day"), None);
    }
}
