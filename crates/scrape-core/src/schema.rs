//! Table layout descriptor.
//!
//! A [`TableSchema`] tells the table extractor where the main data table
//! lives and which header/column conventions the page follows.

use serde::{Deserialize, Serialize};

/// Default id attribute of the main data table.
pub const DEFAULT_TABLE_ID: &str = "main-table";

/// Default text that flags a current-period column.
pub const DEFAULT_CURRENT_MARKER: &str = "CURRENT";

/// Which header row carries the period labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelRow {
    /// Second header row when present, else the first.
    #[default]
    Auto,
    /// Always the first header row.
    First,
    /// Always the second header row. Its absence is a structural error.
    Second,
}

/// Layout descriptor for a fiscal period table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Id attribute of the main data table.
    pub table_id: String,
    /// Header row that carries the period labels.
    pub label_row: LabelRow,
    /// Whether every row ends with a non-data column.
    pub trailing_column: bool,
    /// Case-insensitive text of the second cell of the first header row that
    /// marks a current-period column.
    pub current_marker: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            table_id: DEFAULT_TABLE_ID.to_string(),
            label_row: LabelRow::Auto,
            trailing_column: true,
            current_marker: DEFAULT_CURRENT_MARKER.to_string(),
        }
    }
}

impl TableSchema {
    /// Creates the default schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table id.
    #[must_use]
    pub fn with_table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = table_id.into();
        self
    }

    /// Sets the label row.
    #[must_use]
    pub const fn with_label_row(mut self, label_row: LabelRow) -> Self {
        self.label_row = label_row;
        self
    }

    /// Sets whether rows end with a non-data column.
    #[must_use]
    pub const fn with_trailing_column(mut self, trailing_column: bool) -> Self {
        self.trailing_column = trailing_column;
        self
    }

    /// Sets the current-period marker text.
    #[must_use]
    pub fn with_current_marker(mut self, marker: impl Into<String>) -> Self {
        self.current_marker = marker.into();
        self
    }

    /// Returns true if `text` marks a current-period column.
    #[must_use]
    pub fn is_current_marker(&self, text: &str) -> bool {
        text.trim().eq_ignore_ascii_case(&self.current_marker)
    }

    /// Number of leading non-data cells in every row.
    #[must_use]
    pub const fn leading_cells(&self, has_current_column: bool) -> usize {
        1 + has_current_column as usize
    }

    /// Number of trailing non-data cells in every row.
    #[must_use]
    pub const fn trailing_cells(&self) -> usize {
        self.trailing_column as usize
    }
}
