//! Mapping body rows onto period records.

use scrape_core::{PeriodRecord, Result, ScrapeError, TableSchema};
use scraper::ElementRef;

use crate::document::{TableDocument, cell_text};
use crate::header::data_cells;

/// Writes one body row into the period records.
///
/// The row's metric name becomes the key; the `i`-th retained data cell is
/// written into `records[i]`. Exactly `records.len()` leading data cells are
/// used and any extra cells are ignored.
pub(crate) fn map_row(
    doc: &TableDocument,
    index: usize,
    row: &[ElementRef<'_>],
    schema: &TableSchema,
    has_current_column: bool,
    records: &mut [PeriodRecord],
) -> Result<()> {
    let metric = row.first().map(|cell| doc.row_key(*cell)).unwrap_or_default();

    let cells = data_cells(row, schema, has_current_column);
    if cells.len() < records.len() {
        return Err(ScrapeError::structural(format!(
            "Row {} ({metric:?}) has {} data columns, expected {}",
            index + 1,
            cells.len(),
            records.len()
        )));
    }

    for (record, cell) in records.iter_mut().zip(cells) {
        record.insert(metric.clone(), cell_text(*cell));
    }
    Ok(())
}
