//! Extractor registry keyed by page type.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use scrape_core::{PageExtractor, PageType, Result, ScrapeError, TableSchema};
use scrape_table::FinancialTableExtractor;

/// Registry mapping each [`PageType`] to the extractor that handles it.
///
/// Registering a second extractor for the same page type replaces the first.
///
/// # Example
///
/// ```rust
/// use scrape::{ExtractorRegistry, PageType};
///
/// let registry = ExtractorRegistry::with_defaults();
/// assert!(registry.get(PageType::FinancialTable).is_some());
/// assert!(registry.resolve("unknown").is_err());
/// ```
#[derive(Default, Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<PageType, Arc<dyn PageExtractor>>,
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.page_types()
                    .into_iter()
                    .filter_map(|t| self.extractors.get(&t).map(|e| (t, e.name().to_string()))),
            )
            .finish()
    }
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in extractor.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new().with_financial_table();
        #[cfg(feature = "statements")]
        let registry = registry.with_statements();
        registry
    }

    /// Register an extractor under its own page type.
    pub fn register(&mut self, extractor: Arc<dyn PageExtractor>) {
        debug!(
            extractor = extractor.name(),
            page_type = %extractor.page_type(),
            "Registering extractor"
        );
        self.extractors.insert(extractor.page_type(), extractor);
    }

    /// Returns the extractor for a page type.
    #[must_use]
    pub fn get(&self, page_type: PageType) -> Option<Arc<dyn PageExtractor>> {
        self.extractors.get(&page_type).cloned()
    }

    /// Registered page types, in declaration order.
    #[must_use]
    pub fn page_types(&self) -> Vec<PageType> {
        PageType::ALL
            .into_iter()
            .filter(|t| self.extractors.contains_key(t))
            .collect()
    }

    /// Looks up the extractor for a wire page-type name.
    ///
    /// Unknown names and known but unregistered page types both yield
    /// [`ScrapeError::UnsupportedPageType`].
    pub fn resolve(&self, page_type: &str) -> Result<Arc<dyn PageExtractor>> {
        PageType::parse(page_type)
            .and_then(|t| self.get(t))
            .ok_or_else(|| ScrapeError::UnsupportedPageType(page_type.to_string()))
    }

    // Builder methods for easy setup with specific extractors

    /// Add an extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: Arc<dyn PageExtractor>) -> Self {
        self.register(extractor);
        self
    }

    /// Add the fiscal period table extractor with the default schema.
    #[must_use]
    pub fn with_financial_table(self) -> Self {
        self.with_financial_table_schema(TableSchema::default())
    }

    /// Add the fiscal period table extractor with a custom schema.
    #[must_use]
    pub fn with_financial_table_schema(self, schema: TableSchema) -> Self {
        self.with_extractor(Arc::new(FinancialTableExtractor::with_schema(schema)))
    }

    /// Add the balance sheet and cash flow placeholder extractors.
    #[cfg(feature = "statements")]
    #[must_use]
    pub fn with_statements(self) -> Self {
        self.with_extractor(Arc::new(scrape_statements::BalanceSheetExtractor::new()))
            .with_extractor(Arc::new(scrape_statements::CashFlowExtractor::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = ExtractorRegistry::new();
        assert!(registry.page_types().is_empty());
        assert_eq!(
            registry.resolve("financial_table").unwrap_err(),
            ScrapeError::UnsupportedPageType("financial_table".to_string())
        );
    }

    #[test]
    fn test_defaults() {
        let registry = ExtractorRegistry::with_defaults();
        let extractor = registry.resolve("financial_table").unwrap();
        assert_eq!(extractor.page_type(), PageType::FinancialTable);

        let legacy = registry.resolve("finanical_table").unwrap();
        assert_eq!(legacy.name(), "financial-table");

        #[cfg(feature = "statements")]
        assert_eq!(registry.page_types(), PageType::ALL.to_vec());
    }

    #[test]
    fn test_unknown_page_type() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(matches!(
            registry.resolve("income_statement"),
            Err(ScrapeError::UnsupportedPageType(_))
        ));
    }

    #[test]
    fn test_register_replaces() {
        let html = r#"<table id="financials">
              <thead><tr><th>Metric</th><th>FY 2024</th><th>Upgrade</th></tr></thead>
              <tbody><tr><td><div>Revenue</div></td><td>400</td><td>→</td></tr></tbody>
            </table>"#;

        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.resolve("financial_table").unwrap().extract(html).is_err());

        let schema = TableSchema::default().with_table_id("financials");
        let registry = registry.with_financial_table_schema(schema);
        let records = registry.resolve("financial_table").unwrap().extract(html).unwrap();
        assert_eq!(records[0].get("Revenue"), Some("400"));
    }

    #[test]
    fn test_debug_lists_extractors() {
        let registry = ExtractorRegistry::new().with_financial_table();
        let debug = format!("{registry:?}");
        assert!(debug.contains("financial-table"));
    }
}
