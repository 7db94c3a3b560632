#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scrape/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Balance sheet and cash flow extractors (stub).
//!
//! This crate provides placeholder implementations for statement pages that
//! do not yet have a parser. Registering them keeps the page types
//! resolvable while reporting a distinct "not supported" outcome.
//!
//! # Example
//!
//! ```
//! use scrape_core::{PageExtractor, ScrapeError};
//! use scrape_statements::BalanceSheetExtractor;
//!
//! let extractor = BalanceSheetExtractor::new();
//! // Currently all pages return a NotSupported error
//! assert!(matches!(extractor.extract("<html></html>"), Err(ScrapeError::NotSupported(_))));
//! ```

use scrape_core::{ExtractionOutcome, PageExtractor, PageType, ScrapeError};

/// Balance sheet page extractor.
///
/// This is a stub implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct BalanceSheetExtractor;

impl BalanceSheetExtractor {
    /// Creates a new balance sheet extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PageExtractor for BalanceSheetExtractor {
    fn name(&self) -> &str {
        "balance-sheet"
    }

    fn page_type(&self) -> PageType {
        PageType::BalanceSheet
    }

    fn extract(&self, _html: &str) -> ExtractionOutcome {
        Err(ScrapeError::NotSupported(
            "balance sheet extraction not yet implemented".to_string(),
        ))
    }
}

/// Cash flow page extractor.
///
/// This is a stub implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct CashFlowExtractor;

impl CashFlowExtractor {
    /// Creates a new cash flow extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PageExtractor for CashFlowExtractor {
    fn name(&self) -> &str {
        "cash-flow"
    }

    fn page_type(&self) -> PageType {
        PageType::CashFlow
    }

    fn extract(&self, _html: &str) -> ExtractionOutcome {
        Err(ScrapeError::NotSupported(
            "cash flow extraction not yet implemented".to_string(),
        ))
    }
}
