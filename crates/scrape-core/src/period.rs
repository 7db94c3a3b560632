//! Period label interpretation.
//!
//! Period labels pass through extraction untouched. This module maps the
//! label formats seen on fiscal period tables onto a period-end date for
//! consumers that want a typed date column.

use chrono::NaiveDate;

/// Parses a period label into the date the period ends.
///
/// Recognised formats:
///
/// - `2024-09-30`
/// - `Sep 30, 2024`
/// - `Sep '24` (first day of the month)
/// - fiscal quarters `Q1 2024` .. `Q4 2024` and halves `H1 2024`, `H2 2024`
///
/// Returns `None` for anything else, including `Current`/`TTM` style labels.
#[must_use]
pub fn parse_period_end(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(label, "%b %d, %Y"))
        .ok()
        .or_else(|| parse_month_year(label))
        .or_else(|| parse_fiscal(label))
}

/// `Sep '24` style labels.
fn parse_month_year(label: &str) -> Option<NaiveDate> {
    let (month, year) = label.split_once(" '")?;
    if year.len() != 2 {
        return None;
    }
    let yy: i32 = year.parse().ok()?;
    let year = if yy >= 69 { 1900 + yy } else { 2000 + yy };
    NaiveDate::parse_from_str(&format!("1 {month} {year}"), "%d %b %Y").ok()
}

/// `Q3 2024` / `H1 2024` style labels, anywhere in the label.
fn parse_fiscal(label: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = label.split_whitespace().collect();
    tokens.windows(2).find_map(|pair| {
        let mut chars = pair[0].chars();
        let (kind, n) = (chars.next()?, chars.next()?.to_digit(10)?);
        if chars.next().is_some() || pair[1].len() != 4 {
            return None;
        }
        let year: i32 = pair[1].parse().ok()?;
        fiscal_period_end(kind, n, year)
    })
}

/// Fiscal years end in June: Q1 closes in September of the prior calendar year.
fn fiscal_period_end(kind: char, n: u32, year: i32) -> Option<NaiveDate> {
    let (year, month, day) = match (kind, n) {
        ('Q', 1) => (year - 1, 9, 30),
        ('Q', 2) => (year - 1, 12, 31),
        ('Q', 3) => (year, 3, 31),
        ('Q', 4) => (year, 6, 30),
        ('H', 1) => (year, 6, 30),
        ('H', 2) => (year, 12, 31),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_and_long_dates() {
        assert_eq!(parse_period_end("2024-06-30"), date(2024, 6, 30));
        assert_eq!(parse_period_end("Sep 30, 2024"), date(2024, 9, 30));
        assert_eq!(parse_period_end(" Jan 2, 2006 "), date(2006, 1, 2));
    }

    #[test]
    fn test_month_year() {
        assert_eq!(parse_period_end("Sep '24"), date(2024, 9, 1));
        assert_eq!(parse_period_end("Dec '99"), date(1999, 12, 1));
    }

    #[test]
    fn test_fiscal_quarters() {
        assert_eq!(parse_period_end("Q1 2024"), date(2023, 9, 30));
        assert_eq!(parse_period_end("Q2 2024"), date(2023, 12, 31));
        assert_eq!(parse_period_end("Q3 2024"), date(2024, 3, 31));
        assert_eq!(parse_period_end("Q4 2024"), date(2024, 6, 30));
        assert_eq!(parse_period_end("FY Q4 2024"), date(2024, 6, 30));
    }

    #[test]
    fn test_fiscal_halves() {
        assert_eq!(parse_period_end("H1 2024"), date(2024, 6, 30));
        assert_eq!(parse_period_end("H2 2024"), date(2024, 12, 31));
    }

    #[test]
    fn test_unrecognised() {
        assert_eq!(parse_period_end(""), None);
        assert_eq!(parse_period_end("Current"), None);
        assert_eq!(parse_period_end("TTM"), None);
        assert_eq!(parse_period_end("Q5 2024"), None);
        assert_eq!(parse_period_end("Q3'24"), None);
    }
}
