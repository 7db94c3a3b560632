//! Command-line front end for financial table scraping.
//!
//! Reads HTML files, runs them through [`ScrapeService`], and prints one JSON
//! object per file to stdout. Logs go to stderr and are filtered by `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use scrape::{
    DEFAULT_MAX_WORKERS, DiagnosticMode, ExtractorRegistry, ScrapeRequest, ScrapeResponse,
    ScrapeService, ServiceConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scrape")]
#[command(about = "Extract per-period records from scraped financial tables")]
#[command(version)]
struct Cli {
    /// Page type of every input file
    #[arg(short, long, default_value = "financial_table")]
    page_type: String,

    /// Maximum number of files processed concurrently
    #[arg(short, long, default_value_t = DEFAULT_MAX_WORKERS)]
    workers: usize,

    /// Replace internal fault details with a generic message
    #[arg(long)]
    redact: bool,

    /// Pretty-print output
    #[arg(long)]
    pretty: bool,

    /// HTML files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn service_config(&self) -> ServiceConfig {
        let mode = if self.redact {
            DiagnosticMode::Redacted
        } else {
            DiagnosticMode::Verbose
        };
        ServiceConfig::default()
            .with_diagnostic_mode(mode)
            .with_max_workers(self.workers)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let cli = Cli::parse();

    let mut requests = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        requests.push(ScrapeRequest::new(cli.page_type.as_str(), html));
    }

    let service = Arc::new(ScrapeService::with_config(
        ExtractorRegistry::with_defaults(),
        cli.service_config(),
    ));
    let responses = service.process_batch(requests).await;

    let mut failed = 0usize;
    for (path, response) in cli.files.iter().zip(&responses) {
        if !response.is_ok() {
            failed += 1;
        }
        println!("{}", render(path, response, cli.pretty)?);
    }

    tracing::info!(files = responses.len(), failed, "Done");
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// One output object: the file, its status and the decoded payload.
fn render(path: &std::path::Path, response: &ScrapeResponse, pretty: bool) -> Result<String> {
    let data: serde_json::Value = serde_json::from_str(&response.json_data)
        .context("Response payload is not valid JSON")?;
    let line = serde_json::json!({
        "file": path.display().to_string(),
        "status": response.status,
        "json_data": data,
    });

    Ok(if pretty {
        serde_json::to_string_pretty(&line)?
    } else {
        line.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrape::StatusCode;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["scrape", "a.html", "b.html"]).unwrap();
        assert_eq!(cli.page_type, "financial_table");
        assert_eq!(cli.workers, DEFAULT_MAX_WORKERS);
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.service_config().diagnostic_mode, DiagnosticMode::Verbose);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "scrape",
            "--page-type",
            "cash_flow",
            "--workers",
            "3",
            "--redact",
            "page.html",
        ])
        .unwrap();
        let config = cli.service_config();
        assert_eq!(config.max_workers, 3);
        assert_eq!(config.diagnostic_mode, DiagnosticMode::Redacted);
    }

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["scrape"]).is_err());
    }

    #[test]
    fn test_render() {
        let response = ScrapeResponse {
            status: StatusCode::ErrorParser,
            json_data: r#"{"message":"No table body found"}"#.to_string(),
        };
        let line = render(std::path::Path::new("AAPL/income.html"), &response, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["file"], "AAPL/income.html");
        assert_eq!(value["status"], "ERROR_PARSER");
        assert_eq!(value["json_data"]["message"], "No table body found");
        assert!(!line.contains('\n'));
    }
}
