//! Column reconciliation across header and body rows.

use scrape_core::TableSchema;

/// Number of data columns every row of the table actually reports.
///
/// Each body row's count is its raw cell count less the key cell, the
/// current-period cell (when flagged) and the trailing non-data cell. The
/// result is the minimum of those counts and the header's count, so periods
/// missing from any row are dropped rather than fabricated.
pub(crate) fn effective_column_count(
    header_columns: usize,
    row_cell_counts: impl IntoIterator<Item = usize>,
    schema: &TableSchema,
    has_current_column: bool,
) -> usize {
    let non_data = schema.leading_cells(has_current_column) + schema.trailing_cells();
    row_cell_counts
        .into_iter()
        .map(|cells| cells.saturating_sub(non_data))
        .fold(header_columns, usize::min)
}
