//! Structural queries over a parsed page.

use scrape_core::{Result, ScrapeError, TableSchema};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Cells of one table row, in document order.
pub(crate) type Row<'a> = Vec<ElementRef<'a>>;

/// Parsed page plus the selectors needed to walk its main data table.
///
/// Owned for the duration of one extraction call.
pub(crate) struct TableDocument {
    html: Html,
    table_id: String,
    table: Selector,
    div: Selector,
    anchor: Selector,
}

impl std::fmt::Debug for TableDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableDocument")
            .field("table_id", &self.table_id)
            .finish_non_exhaustive()
    }
}

/// Header and body rows of the main table.
#[derive(Debug, Default)]
pub(crate) struct TableRows<'a> {
    pub(crate) header: Vec<Row<'a>>,
    pub(crate) body: Vec<Row<'a>>,
}

impl TableDocument {
    /// Parses `html` for the table named by `schema`.
    pub(crate) fn parse(html: &str, schema: &TableSchema) -> Result<Self> {
        Ok(Self {
            html: Html::parse_document(html),
            table_id: schema.table_id.clone(),
            table: selector("table")?,
            div: selector("div")?,
            anchor: selector("a")?,
        })
    }

    /// Rows of the first table whose `id` equals the schema's table id.
    ///
    /// The id is compared as a plain string, so ids that are not valid CSS
    /// identifiers still match. Empty if no such table exists.
    pub(crate) fn table_rows(&self) -> TableRows<'_> {
        let mut tables = self
            .html
            .select(&self.table)
            .filter(|el| el.value().id() == Some(self.table_id.as_str()));

        let Some(table) = tables.next() else {
            return TableRows::default();
        };
        let duplicates = tables.count();
        if duplicates > 0 {
            debug!(
                table_id = %self.table_id,
                duplicates,
                "Multiple tables share the id, using the first"
            );
        }

        TableRows {
            header: section_rows(table, "thead"),
            body: section_rows(table, "tbody"),
        }
    }

    /// Metric name held in a row's first cell.
    ///
    /// Prefers text nested in a `div`, then text nested in a link. Empty if
    /// neither is present.
    pub(crate) fn row_key(&self, cell: ElementRef<'_>) -> String {
        cell.select(&self.div)
            .find_map(first_text)
            .or_else(|| cell.select(&self.anchor).find_map(first_text))
            .unwrap_or_default()
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::internal(format!("invalid selector `{css}`: {e:?}")))
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// `tr` children of the table's direct `section` children (`thead`/`tbody`).
fn section_rows<'a>(table: ElementRef<'a>, section: &str) -> Vec<Row<'a>> {
    child_elements(table)
        .filter(|el| el.value().name() == section)
        .flat_map(child_elements)
        .filter(|el| el.value().name() == "tr")
        .map(row_cells)
        .collect()
}

/// Direct `th`/`td` children of a row.
fn row_cells(row: ElementRef<'_>) -> Row<'_> {
    child_elements(row)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .collect()
}

/// First non-blank text fragment under `el`, trimmed.
pub(crate) fn first_text(el: ElementRef<'_>) -> Option<String> {
    el.text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// Text value of a cell: its first text fragment, or empty.
pub(crate) fn cell_text(el: ElementRef<'_>) -> String {
    first_text(el).unwrap_or_default()
}
