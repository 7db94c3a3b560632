//! Core data types for scraped financial tables.
//!
//! This module defines the fundamental data structures:
//!
//! - [`PeriodRecord`] - One reporting period's metrics, keyed by metric name
//! - [`ExtractionOutcome`] - Result of a single extraction call
//! - [`StatusCode`] - Wire status of a response
//! - [`ScrapeRequest`] / [`ScrapeResponse`] - Request and response framing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

/// Metrics reported for a single period.
///
/// The first entry is always the key label mapped to the period label (for
/// example `"Period Ending" => "Sep 30, 2024"`). Metric entries follow in the
/// order rows were read from the table. Serialises as a flat JSON object with
/// that same key order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodRecord {
    fields: IndexMap<String, String>,
}

impl PeriodRecord {
    /// Creates a record seeded with the key label entry.
    #[must_use]
    pub fn new(key_label: impl Into<String>, period_label: impl Into<String>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(key_label.into(), period_label.into());
        Self { fields }
    }

    /// Sets a metric value. An existing entry keeps its position.
    pub fn insert(&mut self, metric: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(metric.into(), value.into());
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns the key label (the name of the row-key column).
    #[must_use]
    pub fn key_label(&self) -> Option<&str> {
        self.fields.get_index(0).map(|(k, _)| k.as_str())
    }

    /// Returns the period label this record was seeded with.
    #[must_use]
    pub fn period_label(&self) -> Option<&str> {
        self.fields.get_index(0).map(|(_, v)| v.as_str())
    }

    /// Iterates over metric entries, skipping the key label entry.
    pub fn metrics(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().skip(1)
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of entries, including the key label entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Outcome of one extraction call.
///
/// `Ok` carries the per-period records in header order. A
/// [`ScrapeError::Structural`] reports a table shape violation and a
/// [`ScrapeError::Internal`] an unexpected fault. No partial records are
/// ever returned alongside an error.
pub type ExtractionOutcome = Result<Vec<PeriodRecord>>;

/// Status of a [`ScrapeResponse`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    /// Extraction succeeded.
    #[default]
    Ok,
    /// The page did not match the expected table shape.
    ErrorParser,
    /// An unexpected fault occurred.
    ErrorInternal,
    /// The page type has no working extractor.
    ErrorUnsupported,
}

impl StatusCode {
    /// Returns the wire name of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ErrorParser => "ERROR_PARSER",
            Self::ErrorInternal => "ERROR_INTERNAL",
            Self::ErrorUnsupported => "ERROR_UNSUPPORTED",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to extract data from one page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Wire name of the page type (e.g. `"financial_table"`).
    pub page_type: String,
    /// Raw HTML of the page.
    pub html_text: String,
}

impl ScrapeRequest {
    /// Creates a new request.
    pub fn new(page_type: impl Into<String>, html_text: impl Into<String>) -> Self {
        Self {
            page_type: page_type.into(),
            html_text: html_text.into(),
        }
    }
}

/// Error payload carried in `json_data` for failed requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Diagnostic message.
    pub message: String,
}

/// Response to a [`ScrapeRequest`].
///
/// `json_data` holds a JSON array of records when `status` is
/// [`StatusCode::Ok`], and a JSON object `{"message": ...}` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    /// Outcome status.
    pub status: StatusCode,
    /// JSON-encoded payload.
    pub json_data: String,
}

impl ScrapeResponse {
    /// Encodes an extraction outcome.
    #[must_use]
    pub fn from_outcome(outcome: &ExtractionOutcome) -> Self {
        let encoded = match outcome {
            Ok(records) => serde_json::to_string(records).map(|json| (StatusCode::Ok, json)),
            Err(e) => Self::encode_error(e),
        };

        match encoded {
            Ok((status, json_data)) => Self { status, json_data },
            Err(e) => Self {
                status: StatusCode::ErrorInternal,
                json_data: serde_json::json!({ "message": format!("failed to encode response: {e}") })
                    .to_string(),
            },
        }
    }

    fn encode_error(error: &ScrapeError) -> serde_json::Result<(StatusCode, String)> {
        let payload = ErrorPayload {
            message: error.to_string(),
        };
        serde_json::to_string(&payload).map(|json| (error.status(), json))
    }

    /// Returns true if the response carries records.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::Ok
    }

    /// Decodes the records of a successful response.
    pub fn records(&self) -> Result<Vec<PeriodRecord>> {
        if !self.is_ok() {
            return Err(ScrapeError::Serialization(format!(
                "response status is {}",
                self.status
            )));
        }
        Ok(serde_json::from_str(&self.json_data)?)
    }

    /// Decodes the message of a failed response.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<ErrorPayload>(&self.json_data)
            .ok()
            .map(|p| p.message)
    }
}
