//! Header classification.

use scrape_core::{LabelRow, Result, ScrapeError, TableSchema};
use scraper::ElementRef;

use crate::document::{Row, cell_text};

/// What the header rows of a fiscal period table say about its columns.
///
/// Derived once per extraction and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderSpec {
    key_label: String,
    has_current_column: bool,
    period_labels: Vec<String>,
}

impl HeaderSpec {
    /// Classifies the header rows of a table.
    ///
    /// The current-period flag always comes from the first header row. Labels
    /// come from the row selected by the schema's [`LabelRow`].
    pub(crate) fn classify(rows: &[Row<'_>], schema: &TableSchema) -> Result<Self> {
        let first = match rows.first() {
            Some(row) if !row.is_empty() => row,
            _ => return Err(ScrapeError::structural("No table header found")),
        };

        let has_current_column = first
            .get(1)
            .is_some_and(|cell| schema.is_current_marker(&cell_text(*cell)));

        let second = rows.get(1).filter(|row| !row.is_empty());
        let label_row = match (schema.label_row, second) {
            (LabelRow::First, _) | (LabelRow::Auto, None) => first,
            (LabelRow::Second | LabelRow::Auto, Some(row)) => row,
            (LabelRow::Second, None) => {
                return Err(ScrapeError::structural("No period label header row found"));
            }
        };

        let key_label = label_row.first().map(|c| cell_text(*c)).unwrap_or_default();
        let period_labels = data_cells(label_row, schema, has_current_column)
            .iter()
            .map(|c| cell_text(*c))
            .collect();

        Ok(Self {
            key_label,
            has_current_column,
            period_labels,
        })
    }

    /// Label of the row-key column (e.g. "Fiscal Quarter").
    #[must_use]
    pub fn key_label(&self) -> &str {
        &self.key_label
    }

    /// Whether the table carries a current-period column after the key column.
    #[must_use]
    pub const fn has_current_column(&self) -> bool {
        self.has_current_column
    }

    /// Period labels, left to right, one per data column.
    #[must_use]
    pub fn period_labels(&self) -> &[String] {
        &self.period_labels
    }

    /// Number of data columns the header reports.
    #[must_use]
    pub fn data_columns(&self) -> usize {
        self.period_labels.len()
    }

    /// Copy limited to the first `effective_columns` period labels.
    #[must_use]
    pub(crate) fn truncated(mut self, effective_columns: usize) -> Self {
        self.period_labels.truncate(effective_columns);
        self
    }
}

/// The cells of `row` that carry period data: everything between the key
/// (and current-period) cells and the trailing non-data cell.
pub(crate) fn data_cells<'r, 'a>(
    row: &'r [ElementRef<'a>],
    schema: &TableSchema,
    has_current_column: bool,
) -> &'r [ElementRef<'a>] {
    let start = schema.leading_cells(has_current_column);
    let end = row.len().saturating_sub(schema.trailing_cells());
    row.get(start..end).unwrap_or_default()
}
