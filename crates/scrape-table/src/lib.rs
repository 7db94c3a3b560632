#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scrape/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Fiscal period table extraction.
//!
//! This crate turns the main data table of a scraped financial page into one
//! [`PeriodRecord`] per reporting period. It tolerates the irregularities of
//! scraped pages:
//!
//! - ragged body rows that omit trailing periods
//! - an optional "current period" column after the key column
//! - a trailing promotional column that carries no data
//! - period-ending labels in a second header row, possibly inside hidden markup
//!
//! # Example
//!
//! ```
//! use scrape_core::PageExtractor;
//! use scrape_table::FinancialTableExtractor;
//!
//! let html = r#"
//!     <table id="main-table">
//!       <thead><tr><th>Metric</th><th>Q3'24</th><th>Q2'24</th><th>Upgrade</th></tr></thead>
//!       <tbody>
//!         <tr><td><div>Revenue</div></td><td>100</td><td>95</td><td>→</td></tr>
//!       </tbody>
//!     </table>
//! "#;
//!
//! let records = FinancialTableExtractor::new().extract(html).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].get("Revenue"), Some("100"));
//! ```

use scrape_core::{
    ExtractionOutcome, PageExtractor, PageType, PeriodRecord, Result, ScrapeError, TableSchema,
};
use tracing::debug;

mod columns;
mod document;
mod header;
mod rows;

pub use header::HeaderSpec;

use document::{TableDocument, TableRows};

/// Extractor for quarterly/annual fiscal period tables.
///
/// One configurable algorithm covers every known table variant; the
/// [`TableSchema`] selects the header and column conventions.
#[derive(Debug, Clone, Default)]
pub struct FinancialTableExtractor {
    schema: TableSchema,
}

impl FinancialTableExtractor {
    /// Creates an extractor using the default schema.
    ///
    /// # Example
    /// ```
    /// use scrape_table::FinancialTableExtractor;
    ///
    /// let extractor = FinancialTableExtractor::new();
    /// assert_eq!(extractor.schema().table_id, "main-table");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor for a custom table layout.
    #[must_use]
    pub const fn with_schema(schema: TableSchema) -> Self {
        Self { schema }
    }

    /// Returns the schema this extractor applies.
    #[must_use]
    pub const fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Classifies the table header and reconciles it against the body rows.
    ///
    /// The returned spec's period labels are already trimmed to the effective
    /// column count.
    pub fn header(&self, html: &str) -> Result<HeaderSpec> {
        let doc = TableDocument::parse(html, &self.schema)?;
        self.reconciled_header(&doc.table_rows())
    }

    fn reconciled_header(&self, rows: &TableRows<'_>) -> Result<HeaderSpec> {
        let spec = HeaderSpec::classify(&rows.header, &self.schema)?;

        if rows.body.is_empty() {
            return Err(ScrapeError::structural("No table body found"));
        }

        let effective = columns::effective_column_count(
            spec.data_columns(),
            rows.body.iter().map(Vec::len),
            &self.schema,
            spec.has_current_column(),
        );
        Ok(spec.truncated(effective))
    }

    fn extract_records(&self, html: &str) -> Result<Vec<PeriodRecord>> {
        let doc = TableDocument::parse(html, &self.schema)?;
        let table = doc.table_rows();
        let spec = self.reconciled_header(&table)?;

        debug!(
            key_label = %spec.key_label(),
            has_current_column = spec.has_current_column(),
            effective_columns = spec.data_columns(),
            rows = table.body.len(),
            "Classified financial table"
        );

        let mut records: Vec<PeriodRecord> = spec
            .period_labels()
            .iter()
            .map(|label| PeriodRecord::new(spec.key_label(), label.as_str()))
            .collect();

        for (index, row) in table.body.iter().enumerate() {
            rows::map_row(
                &doc,
                index,
                row,
                &self.schema,
                spec.has_current_column(),
                &mut records,
            )?;
        }

        Ok(records)
    }
}

impl PageExtractor for FinancialTableExtractor {
    fn name(&self) -> &str {
        "financial-table"
    }

    fn page_type(&self) -> PageType {
        PageType::FinancialTable
    }

    fn extract(&self, html: &str) -> ExtractionOutcome {
        debug!(extractor = self.name(), bytes = html.len(), "Extracting page");
        self.extract_records(html)
    }
}
