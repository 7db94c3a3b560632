//! Request/response service over the extractor registry.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::{StreamExt, stream};
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use scrape_core::{ExtractionOutcome, ScrapeError, ScrapeRequest, ScrapeResponse};

use crate::registry::ExtractorRegistry;

/// Default number of pages processed concurrently by [`ScrapeService::process_batch`].
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Message returned in place of internal fault details in redacted mode.
const REDACTED_INTERNAL_MESSAGE: &str = "Internal error while parsing page";

/// How much detail internal errors expose to callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DiagnosticMode {
    /// Internal errors carry the full fault description and backtrace.
    #[default]
    Verbose,
    /// Internal errors carry a generic message; details are only logged.
    Redacted,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Detail level of internal error messages.
    pub diagnostic_mode: DiagnosticMode,
    /// Maximum number of pages processed concurrently in a batch.
    pub max_workers: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            diagnostic_mode: DiagnosticMode::Verbose,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl ServiceConfig {
    /// Set the diagnostic mode.
    #[must_use]
    pub const fn with_diagnostic_mode(mut self, mode: DiagnosticMode) -> Self {
        self.diagnostic_mode = mode;
        self
    }

    /// Set the batch concurrency. Values below one are treated as one.
    #[must_use]
    pub const fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }
}

/// Dispatches scrape requests to registered extractors.
///
/// Each call is independent: the service holds no per-request state and may
/// be shared across threads behind an [`Arc`].
///
/// # Example
///
/// ```rust
/// use scrape::{ExtractorRegistry, ScrapeRequest, ScrapeService, StatusCode};
///
/// let service = ScrapeService::new(ExtractorRegistry::with_defaults());
/// let response = service.process(&ScrapeRequest::new("financial_table", "<html></html>"));
/// assert_eq!(response.status, StatusCode::ErrorParser);
/// ```
#[derive(Debug, Clone)]
pub struct ScrapeService {
    registry: ExtractorRegistry,
    config: ServiceConfig,
}

impl ScrapeService {
    /// Create a service with the default configuration.
    #[must_use]
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self::with_config(registry, ServiceConfig::default())
    }

    /// Create a service with a custom configuration.
    #[must_use]
    pub const fn with_config(registry: ExtractorRegistry, config: ServiceConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the extractor registry.
    #[must_use]
    pub const fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Extract records from `html` with the extractor for `page_type`.
    ///
    /// A panic inside the extractor is reported as [`ScrapeError::Internal`].
    pub fn extract(&self, page_type: &str, html: &str) -> ExtractionOutcome {
        let extractor = self.registry.resolve(page_type)?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(html)))
            .unwrap_or_else(|payload| Err(panic_error(extractor.name(), payload.as_ref())));

        outcome.map_err(|e| self.redact(e))
    }

    /// Process one request into its wire response.
    pub fn process(&self, request: &ScrapeRequest) -> ScrapeResponse {
        debug!(
            page_type = %request.page_type,
            bytes = request.html_text.len(),
            "Processing page"
        );

        let outcome = self.extract(&request.page_type, &request.html_text);
        match &outcome {
            Ok(records) => info!(
                page_type = %request.page_type,
                records = records.len(),
                "Processed page"
            ),
            Err(e) => warn!(
                page_type = %request.page_type,
                status = %e.status(),
                error = %e,
                "Failed to process page"
            ),
        }

        ScrapeResponse::from_outcome(&outcome)
    }

    /// Process many requests on the blocking thread pool.
    ///
    /// At most [`ServiceConfig::max_workers`] requests run at once. Responses
    /// are returned in request order.
    pub async fn process_batch(
        self: Arc<Self>,
        requests: Vec<ScrapeRequest>,
    ) -> Vec<ScrapeResponse> {
        let workers = self.config.max_workers.max(1);
        debug!(requests = requests.len(), workers, "Processing batch");

        stream::iter(requests)
            .map(|request| {
                let service = Arc::clone(&self);
                async move {
                    let worker = Arc::clone(&service);
                    tokio::task::spawn_blocking(move || worker.process(&request))
                        .await
                        .unwrap_or_else(|e| service.worker_failure(&e))
                }
            })
            .buffered(workers)
            .collect()
            .await
    }

    /// Response for a batch worker that died before producing one.
    fn worker_failure(&self, error: &JoinError) -> ScrapeResponse {
        warn!(error = %error, "Worker task failed");
        let error = self.redact(ScrapeError::internal(format!("worker task failed: {error}")));
        ScrapeResponse::from_outcome(&Err(error))
    }

    fn redact(&self, error: ScrapeError) -> ScrapeError {
        match (self.config.diagnostic_mode, error) {
            (DiagnosticMode::Redacted, ScrapeError::Internal(details)) => {
                warn!(details = %details, "Redacting internal error");
                ScrapeError::internal(REDACTED_INTERNAL_MESSAGE)
            }
            (_, error) => error,
        }
    }
}

fn panic_error(extractor: &str, payload: &(dyn Any + Send)) -> ScrapeError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());

    ScrapeError::internal(format!(
        "extractor `{extractor}` panicked: {message}\n{}",
        Backtrace::force_capture()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrape_core::{PageExtractor, PageType, StatusCode};

    const TABLE: &str = r#"
        <table id="main-table">
          <thead><tr><th>Metric</th><th>Q3'24</th><th>Q2'24</th><th>Upgrade</th></tr></thead>
          <tbody>
            <tr><td><div>Revenue</div></td><td>100</td><td>95</td><td>→</td></tr>
            <tr><td><div>Costs</div></td><td>40</td><td>38</td><td>→</td></tr>
          </tbody>
        </table>
    "#;

    #[derive(Debug)]
    struct PanickingExtractor;

    impl PageExtractor for PanickingExtractor {
        fn name(&self) -> &str {
            "panicking"
        }

        fn page_type(&self) -> PageType {
            PageType::CashFlow
        }

        fn extract(&self, _html: &str) -> ExtractionOutcome {
            let cells: Vec<&str> = Vec::new();
            Ok(vec![scrape_core::PeriodRecord::new("Metric", cells[3])])
        }
    }

    fn panicking_service(mode: DiagnosticMode) -> ScrapeService {
        let registry = ExtractorRegistry::new().with_extractor(Arc::new(PanickingExtractor));
        ScrapeService::with_config(
            registry,
            ServiceConfig::default().with_diagnostic_mode(mode),
        )
    }

    #[test]
    fn test_process_success() {
        let service = ScrapeService::new(ExtractorRegistry::with_defaults());
        let response = service.process(&ScrapeRequest::new("financial_table", TABLE));

        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(
            response.json_data,
            r#"[{"Metric":"Q3'24","Revenue":"100","Costs":"40"},{"Metric":"Q2'24","Revenue":"95","Costs":"38"}]"#
        );
    }

    #[test]
    fn test_process_structural_error() {
        let service = ScrapeService::new(ExtractorRegistry::with_defaults());
        let response = service.process(&ScrapeRequest::new("financial_table", "<p>nothing</p>"));

        assert_eq!(response.status, StatusCode::ErrorParser);
        assert_eq!(response.message().as_deref(), Some("No table header found"));
    }

    #[test]
    fn test_unknown_page_type() {
        let service = ScrapeService::new(ExtractorRegistry::with_defaults());
        let response = service.process(&ScrapeRequest::new("income_statement", TABLE));

        assert_eq!(response.status, StatusCode::ErrorUnsupported);
        assert_eq!(
            response.message().as_deref(),
            Some("Unknown page type: income_statement")
        );
    }

    #[cfg(feature = "statements")]
    #[test]
    fn test_placeholder_page_type() {
        let service = ScrapeService::new(ExtractorRegistry::with_defaults());
        let response = service.process(&ScrapeRequest::new("balance_sheet", TABLE));
        assert_eq!(response.status, StatusCode::ErrorUnsupported);
    }

    #[test]
    fn test_panic_becomes_internal_error() {
        let service = panicking_service(DiagnosticMode::Verbose);
        let err = service.extract("cash_flow", TABLE).unwrap_err();

        match err {
            ScrapeError::Internal(message) => {
                assert!(message.contains("extractor `panicking` panicked"));
                assert!(message.contains("index out of bounds"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_redacted_mode_hides_details() {
        let service = panicking_service(DiagnosticMode::Redacted);
        let response = service.process(&ScrapeRequest::new("cash_flow", TABLE));

        assert_eq!(response.status, StatusCode::ErrorInternal);
        assert_eq!(
            response.message().as_deref(),
            Some(REDACTED_INTERNAL_MESSAGE)
        );
    }

    #[test]
    fn test_redacted_mode_keeps_structural_errors() {
        let service = ScrapeService::with_config(
            ExtractorRegistry::with_defaults(),
            ServiceConfig::default().with_diagnostic_mode(DiagnosticMode::Redacted),
        );
        let err = service.extract("financial_table", "").unwrap_err();
        assert_eq!(err, ScrapeError::structural("No table header found"));
    }

    #[tokio::test]
    async fn test_process_batch_preserves_order() {
        let service = Arc::new(ScrapeService::with_config(
            ExtractorRegistry::with_defaults(),
            ServiceConfig::default().with_max_workers(2),
        ));
        let requests = vec![
            ScrapeRequest::new("financial_table", TABLE),
            ScrapeRequest::new("financial_table", "<html></html>"),
            ScrapeRequest::new("unknown", TABLE),
            ScrapeRequest::new("finanical_table", TABLE),
        ];

        let responses = service.process_batch(requests).await;
        let statuses: Vec<_> = responses.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                StatusCode::Ok,
                StatusCode::ErrorParser,
                StatusCode::ErrorUnsupported,
                StatusCode::Ok,
            ]
        );
    }

    #[tokio::test]
    async fn test_worker_failure_respects_diagnostic_mode() {
        let join_error = tokio::task::spawn_blocking(|| -> u8 { panic!("secret page detail") })
            .await
            .unwrap_err();

        let verbose = ScrapeService::new(ExtractorRegistry::new()).worker_failure(&join_error);
        assert_eq!(verbose.status, StatusCode::ErrorInternal);
        assert!(verbose.json_data.contains("worker task failed"));

        let redacted = panicking_service(DiagnosticMode::Redacted).worker_failure(&join_error);
        assert_eq!(redacted.status, StatusCode::ErrorInternal);
        assert_eq!(
            redacted.message().as_deref(),
            Some(REDACTED_INTERNAL_MESSAGE)
        );
        assert!(!redacted.json_data.contains("secret"));
    }

    #[tokio::test]
    async fn test_process_batch_zero_workers() {
        let service = Arc::new(ScrapeService::with_config(
            ExtractorRegistry::with_defaults(),
            ServiceConfig::default().with_max_workers(0),
        ));
        let responses = service
            .process_batch(vec![ScrapeRequest::new("financial_table", TABLE)])
            .await;
        assert_eq!(responses.len(), 1);
        assert!(responses[0].is_ok());
    }
}
