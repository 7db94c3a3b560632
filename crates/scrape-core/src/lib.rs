#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scrape/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for financial table scraping.
//!
//! This crate provides the foundational abstractions shared by every extractor:
//!
//! - [`PageExtractor`](extractor::PageExtractor) - Capability implemented per page type
//! - [`PageType`](page::PageType) - Enumerated page-type tag
//! - [`PeriodRecord`](types::PeriodRecord) - Metrics for one reporting period
//! - [`TableSchema`](schema::TableSchema) - Layout descriptor for fiscal period tables
//! - [`ScrapeRequest`](types::ScrapeRequest) / [`ScrapeResponse`](types::ScrapeResponse) - Wire framing

/// Error types for scraping operations.
pub mod error;
/// Extractor trait.
pub mod extractor;
/// Page type definitions.
pub mod page;
/// Period label interpretation.
pub mod period;
/// Table layout descriptor.
pub mod schema;
/// Core data types (PeriodRecord, StatusCode, request/response).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, ScrapeError};
pub use extractor::PageExtractor;
pub use page::PageType;
pub use period::parse_period_end;
pub use schema::{LabelRow, TableSchema};
pub use types::{
    ErrorPayload, ExtractionOutcome, PeriodRecord, ScrapeRequest, ScrapeResponse, StatusCode,
};
