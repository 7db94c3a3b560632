#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scrape/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Unified interface for financial table scraping.
//!
//! This crate re-exports core types and extractor implementations, and
//! provides an [`ExtractorRegistry`] keyed by page type plus a
//! [`ScrapeService`] that turns requests into wire responses.
//!
//! # Features
//!
//! - `statements` - Balance sheet and cash flow placeholder extractors
//! - `frame` - polars DataFrame export of period records
//!
//! # Example
//!
//! ```rust
//! use scrape::{ExtractorRegistry, ScrapeRequest, ScrapeService, StatusCode};
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
//! let service = ScrapeService::new(ExtractorRegistry::with_defaults());
//! let response = service.process(&ScrapeRequest::new("financial_table", html));
//!
//! assert_eq!(response.status, StatusCode::Ok);
//! let records = response.records().unwrap();
//! assert_eq!(records[1].get("Revenue"), Some("95"));
//! ```

// Core types and traits
pub use scrape_core::*;

// Extractors
#[cfg(feature = "statements")]
pub use scrape_statements::{BalanceSheetExtractor, CashFlowExtractor};
pub use scrape_table::{FinancialTableExtractor, HeaderSpec};

mod registry;
pub use registry::ExtractorRegistry;

mod service;
pub use service::{DEFAULT_MAX_WORKERS, DiagnosticMode, ScrapeService, ServiceConfig};

#[cfg(feature = "frame")]
mod frame;
#[cfg(feature = "frame")]
pub use frame::{PERIOD_END_COLUMN, records_to_frame};
