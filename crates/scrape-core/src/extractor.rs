//! Extractor trait for turning page HTML into period records.
//!
//! This module defines [`PageExtractor`], the single capability every page
//! handler implements. The registry in the `scrape` crate keys extractors by
//! their [`PageType`].

use std::fmt::Debug;

use crate::{page::PageType, types::ExtractionOutcome};

/// Extracts structured records from the HTML of one page type.
///
/// Extraction is synchronous and CPU-bound: implementations perform no I/O,
/// hold no shared mutable state, and may be called concurrently from any
/// number of threads.
pub trait PageExtractor: Send + Sync + Debug {
    /// Returns the name of this extractor (e.g., "financial-table").
    fn name(&self) -> &str;

    /// Returns the page type this extractor handles.
    fn page_type(&self) -> PageType;

    /// Extracts per-period records from raw HTML.
    fn extract(&self, html: &str) -> ExtractionOutcome;
}
