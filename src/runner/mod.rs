//! Bulk run orchestration
//!
//! This module contains the pipeline that ties everything together:
//! - Loading settings and the URL list
//! - Building the API client
//! - Building one record per URL, strictly in input order
//! - Validating the batch and exporting it
//!
//! A failure for one URL is logged and that URL is skipped. Schema and
//! export failures abort the whole run.

mod input;

pub use input::{parse_url_list, read_urls_from_file};

use crate::client::SpyfuClient;
use crate::config::{compute_settings_hash, load_settings};
use crate::output::{export_records, validate_records, OutputFormat};
use crate::record::{ProcessType, Record, RecordBuilders, RecordContext};
use crate::url::normalize_domain;
use crate::BulkError;
use std::path::PathBuf;

/// Parameters of one bulk run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// File with one URL per line
    pub input_file: PathBuf,

    /// Target country code, if any
    pub country: Option<String>,

    /// Kind of data to fetch for every URL
    pub process_type: ProcessType,

    pub output_format: OutputFormat,

    pub output_path: PathBuf,

    /// Settings file; defaults are used when absent
    pub settings_path: Option<PathBuf>,
}

/// A URL that could not be turned into a record
#[derive(Debug, Clone)]
pub struct UrlFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of a bulk run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Identifier shared by every record of the run
    pub run_id: String,

    /// Records built, in input order
    pub records: Vec<Record>,

    /// URLs that were skipped
    pub failures: Vec<UrlFailure>,
}

/// Creates the identifier shared by all records of one run
pub fn new_run_id() -> String {
    format!("spyfu-bulk-urls-{}", chrono::Utc::now().timestamp())
}

/// Builds one record per URL
///
/// URLs are handled one at a time in input order. Errors are logged and
/// the URL is recorded as a failure; processing continues.
pub async fn process_urls(
    client: &SpyfuClient,
    urls: &[String],
    country: Option<&str>,
    process_type: ProcessType,
    run_id: &str,
) -> RunReport {
    let builders = RecordBuilders::new(client);
    let mut records = Vec::with_capacity(urls.len());
    let mut failures = Vec::new();

    for url in urls {
        let domain = normalize_domain(url);
        tracing::info!("Processing {} ({}) for {}", url, domain, process_type);

        let ctx = RecordContext {
            origin: url,
            domain: &domain,
            country,
            run_id,
        };

        match builders.build(process_type, &ctx).await {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::error!("Failed to process {}: {}", url, e);
                failures.push(UrlFailure {
                    url: url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    RunReport {
        run_id: run_id.to_string(),
        records,
        failures,
    }
}

/// Runs a complete bulk job
///
/// 1. Load settings (never fatal)
/// 2. Read the URL list (fatal if missing or empty)
/// 3. Build a record per URL
/// 4. Validate the batch (fatal on any violation)
/// 5. Export (fatal on IO errors)
///
/// When no record could be built, nothing is validated or written.
pub async fn run_bulk(options: &RunOptions) -> Result<RunReport, BulkError> {
    tracing::info!("Starting SpyFu bulk run");
    tracing::info!(
        "Params: input_file={} country={:?} process_type={} output_format={} output_path={}",
        options.input_file.display(),
        options.country,
        options.process_type,
        options.output_format,
        options.output_path.display()
    );

    let settings = load_settings(options.settings_path.as_deref());
    if let Some(path) = options.settings_path.as_deref().filter(|p| p.exists()) {
        match compute_settings_hash(path) {
            Ok(hash) => tracing::info!("Settings loaded from {} (hash: {})", path.display(), hash),
            Err(e) => tracing::warn!("Could not fingerprint settings {}: {}", path.display(), e),
        }
    }

    let urls = read_urls_from_file(&options.input_file)?;
    tracing::info!("Loaded {} URLs", urls.len());

    let client = SpyfuClient::from_settings(&settings);
    if client.is_sample_mode() {
        tracing::info!("Running in sample data mode");
    }

    let run_id = new_run_id();
    let report = process_urls(
        &client,
        &urls,
        options.country.as_deref(),
        options.process_type,
        &run_id,
    )
    .await;

    if !report.failures.is_empty() {
        tracing::warn!(
            "{} of {} URLs failed and were skipped",
            report.failures.len(),
            urls.len()
        );
    }

    if report.records.is_empty() {
        tracing::warn!("No records generated for this run.");
        return Ok(report);
    }

    validate_records(&report.records)?;
    export_records(&report.records, &options.output_path, options.output_format)?;

    tracing::info!(
        "Run complete. Exported {} records to {}",
        report.records.len(),
        options.output_path.display()
    );
    Ok(report)
}
