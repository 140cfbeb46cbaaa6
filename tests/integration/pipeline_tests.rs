//! End-to-end tests for the bulk pipeline

use serde_json::Value;
use spyfu_bulk::output::OutputFormat;
use spyfu_bulk::record::ProcessType;
use spyfu_bulk::runner::{run_bulk, RunOptions};
use spyfu_bulk::{BulkError, ConfigError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a file inside the temp dir and returns its path
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

fn create_options(
    input_file: PathBuf,
    process_type: ProcessType,
    output_format: OutputFormat,
    output_path: PathBuf,
    settings_path: Option<PathBuf>,
) -> RunOptions {
    RunOptions {
        input_file,
        country: Some("US".to_string()),
        process_type,
        output_format,
        output_path,
        settings_path,
    }
}

fn read_json_array(path: &Path) -> Vec<Value> {
    let content = std::fs::read_to_string(path).expect("Output file missing");
    serde_json::from_str::<Value>(&content)
        .expect("Output is not JSON")
        .as_array()
        .expect("Output is not an array")
        .clone()
}

#[tokio::test]
async fn test_domain_stats_sample_run_to_json() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "urls.txt",
        "# sample input\nhttps://www.example.com/path\n\nshop.example.org\n",
    );
    let output = dir.path().join("out/results.json");

    let options = create_options(
        input,
        ProcessType::DomainStats,
        OutputFormat::Json,
        output.clone(),
        None,
    );
    let report = run_bulk(&options).await.expect("Run failed");
    assert_eq!(report.records.len(), 2);
    assert!(report.failures.is_empty());

    let records = read_json_array(&output);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["domain"], "example.com");
    assert_eq!(records[1]["domain"], "shop.example.org");

    for record in &records {
        assert_eq!(record["process_type"], "domain_stats");
        assert_eq!(record["run_id"], Value::String(report.run_id.clone()));
        let stats = record["domain_stats"].as_object().unwrap();
        assert!(!stats.is_empty());
        assert!(stats["estimated_monthly_clicks"].as_f64().unwrap() > 0.0);
    }
}

#[tokio::test]
async fn test_keywords_sample_run_to_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "urls.txt", "example.com\nexample.net\nexample.io\n");
    let output = dir.path().join("results.csv");

    let options = create_options(
        input,
        ProcessType::MostValuableKeywords,
        OutputFormat::Csv,
        output.clone(),
        None,
    );
    run_bulk(&options).await.expect("Run failed");

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let mut sorted = header.clone();
    sorted.sort();
    assert_eq!(header, sorted);

    let successful_idx = header
        .iter()
        .position(|h| h == "most_successful_keywords")
        .unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    for row in &rows {
        let successful: Value = serde_json::from_str(&row[successful_idx]).unwrap();
        assert_eq!(successful.as_array().unwrap().len(), 3);
    }
}

#[tokio::test]
async fn test_missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    let options = create_options(
        dir.path().join("missing.txt"),
        ProcessType::TopAds,
        OutputFormat::Json,
        output.clone(),
        None,
    );
    let err = run_bulk(&options).await.unwrap_err();

    assert!(matches!(err, BulkError::Config(ConfigError::InputNotFound(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_input_without_urls_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "urls.txt", "# only comments\n\n");

    let options = create_options(
        input,
        ProcessType::TopAds,
        OutputFormat::Json,
        dir.path().join("out.json"),
        None,
    );
    let err = run_bulk(&options).await.unwrap_err();

    assert!(matches!(err, BulkError::Config(ConfigError::EmptyInput(_))));
}

#[tokio::test]
async fn test_unparseable_settings_fall_back_to_sample_defaults() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "urls.txt", "example.com\n");
    let settings = write_file(&dir, "settings.json", "{ this is not json");
    let output = dir.path().join("out.json");

    let options = create_options(
        input,
        ProcessType::TopCompetitors,
        OutputFormat::Json,
        output.clone(),
        Some(settings),
    );
    run_bulk(&options).await.expect("Bad settings must not be fatal");

    let records = read_json_array(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["top_competitors"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_live_run_skips_failing_urls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ads/top"))
        .and(query_param("domain", "good.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"headline": "Good ads", "position": 1}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ads/top"))
        .and(query_param("domain", "bad.com"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "urls.txt", "https://bad.com\nhttps://www.good.com\n");
    let settings = write_file(
        &dir,
        "settings.toml",
        &format!(
            "spyfu_base_url = \"{}\"\nspyfu_api_key = \"test-key\"\nuse_sample_data = false\nrequests_per_minute = 6000\ntimeout_seconds = 5\n",
            mock_server.uri()
        ),
    );
    let output = dir.path().join("out.json");

    let options = create_options(
        input,
        ProcessType::TopAds,
        OutputFormat::Json,
        output.clone(),
        Some(settings),
    );
    let report = run_bulk(&options).await.expect("Run failed");

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, "https://bad.com");
    assert!(report.failures[0].error.contains("500"));

    let records = read_json_array(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["domain"], "good.com");
    assert_eq!(records[0]["top_ads"][0]["headline"], "Good ads");
}

#[tokio::test]
async fn test_all_urls_failing_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "urls.txt", "a.com\nb.com\n");
    let settings = write_file(
        &dir,
        "settings.json",
        &format!(
            r#"{{"spyfu_base_url": "{}", "spyfu_api_key": "k", "use_sample_data": false, "requests_per_minute": 6000}}"#,
            mock_server.uri()
        ),
    );
    let output = dir.path().join("out.json");

    let options = create_options(
        input,
        ProcessType::DomainStats,
        OutputFormat::Json,
        output.clone(),
        Some(settings),
    );
    let report = run_bulk(&options).await.expect("Per-URL failures are not fatal");

    assert!(report.records.is_empty());
    assert_eq!(report.failures.len(), 2);
    assert!(!output.exists());
}
