//! DataFrame export of period records.

use chrono::Datelike;
use indexmap::IndexSet;
use polars::prelude::*;

use scrape_core::{PeriodRecord, Result, ScrapeError, parse_period_end};

/// Name of the typed period-end column.
pub const PERIOD_END_COLUMN: &str = "period_end";

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts period records into a DataFrame with one row per period.
///
/// Columns, in order:
///
/// - the key label column holding each period label (string)
/// - `period_end` (date, null where the label is not a recognised date)
/// - one string column per metric, in first-seen order, null where a period
///   lacks the metric
///
/// The `period_end` column is omitted when a metric already uses that name.
///
/// # Example
///
/// ```rust
/// use scrape::{PeriodRecord, records_to_frame};
///
/// let mut record = PeriodRecord::new("Period Ending", "Sep 30, 2024");
/// record.insert("Revenue", "100");
///
/// let df = records_to_frame(&[record]).unwrap();
/// assert_eq!(df.shape(), (1, 3));
/// ```
pub fn records_to_frame(records: &[PeriodRecord]) -> Result<DataFrame> {
    let Some(first) = records.first() else {
        return Ok(DataFrame::empty());
    };
    let key_label = first.key_label().unwrap_or_default();

    let metrics: IndexSet<&str> = records
        .iter()
        .flat_map(|r| r.metrics().map(|(metric, _)| metric))
        .filter(|metric| *metric != key_label)
        .collect();

    let labels: Vec<Option<&str>> = records.iter().map(PeriodRecord::period_label).collect();
    let mut columns = vec![Column::new(key_label.into(), labels)];

    if key_label != PERIOD_END_COLUMN && !metrics.contains(PERIOD_END_COLUMN) {
        let days: Vec<Option<i32>> = records
            .iter()
            .map(|r| {
                r.period_label()
                    .and_then(parse_period_end)
                    .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            })
            .collect();
        let period_end = Column::new(PERIOD_END_COLUMN.into(), days)
            .cast(&DataType::Date)
            .map_err(|e| ScrapeError::Frame(e.to_string()))?;
        columns.push(period_end);
    }

    for metric in &metrics {
        let values: Vec<Option<&str>> = records.iter().map(|r| r.get(metric)).collect();
        columns.push(Column::new((*metric).into(), values));
    }

    DataFrame::new(columns).map_err(|e| ScrapeError::Frame(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, values: &[(&str, &str)]) -> PeriodRecord {
        let mut record = PeriodRecord::new("Period Ending", label);
        for (metric, value) in values {
            record.insert(*metric, *value);
        }
        record
    }

    #[test]
    fn test_empty_records() {
        let df = records_to_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }

    #[test]
    fn test_columns_and_dates() {
        let records = vec![
            record("Sep 30, 2024", &[("Revenue", "100"), ("Costs", "40")]),
            record("Jun 30, 2024", &[("Revenue", "95"), ("Costs", "38")]),
        ];
        let df = records_to_frame(&records).unwrap();

        assert_eq!(df.shape(), (2, 4));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Period Ending", "period_end", "Revenue", "Costs"]);
        assert_eq!(df.column("period_end").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("period_end").unwrap().null_count(), 0);
    }

    #[test]
    fn test_missing_metrics_are_null() {
        let records = vec![
            record("Current", &[("Revenue", "120")]),
            record("Q3 2024", &[("Revenue", "100"), ("Costs", "40")]),
        ];
        let df = records_to_frame(&records).unwrap();

        assert_eq!(df.column("Costs").unwrap().null_count(), 1);
        assert_eq!(df.column("period_end").unwrap().null_count(), 1);
    }

    #[test]
    fn test_period_end_metric_suppresses_date_column() {
        let records = vec![record("FY 2024", &[("period_end", "Jun 30, 2024")])];
        let df = records_to_frame(&records).unwrap();
        assert_eq!(df.shape(), (1, 2));
    }
}
