use crate::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Process types that can be requested for a bulk run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessType {
    TopCompetitors,
    MostValuableKeywords,
    NewlyRankedKeywords,
    TopAds,
    DomainStats,
}

impl ProcessType {
    /// Every selectable process type
    pub const ALL: [ProcessType; 5] = [
        Self::TopCompetitors,
        Self::MostValuableKeywords,
        Self::NewlyRankedKeywords,
        Self::TopAds,
        Self::DomainStats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopCompetitors => "top_competitors",
            Self::MostValuableKeywords => "most_valuable_keywords",
            Self::NewlyRankedKeywords => "newly_ranked_keywords",
            Self::TopAds => "top_ads",
            Self::DomainStats => "domain_stats",
        }
    }

    /// Comma-separated, sorted list of accepted names
    pub fn supported() -> String {
        let mut names: Vec<_> = Self::ALL.iter().map(|p| p.as_str()).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownProcessType {
                given: s.to_string(),
                supported: Self::supported(),
            })
    }
}

/// Value of a record's `process_type` field
///
/// Includes the derived `most_successful_keywords` kind, which is never
/// requested directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    TopCompetitors,
    MostValuableKeywords,
    MostSuccessfulKeywords,
    NewlyRankedKeywords,
    TopAds,
    DomainStats,
}

impl From<ProcessType> for RecordKind {
    fn from(process_type: ProcessType) -> Self {
        match process_type {
            ProcessType::TopCompetitors => Self::TopCompetitors,
            ProcessType::MostValuableKeywords => Self::MostValuableKeywords,
            ProcessType::NewlyRankedKeywords => Self::NewlyRankedKeywords,
            ProcessType::TopAds => Self::TopAds,
            ProcessType::DomainStats => Self::DomainStats,
        }
    }
}

/// Identifies the input a record is built for
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    /// Original input URL
    pub origin: &'a str,

    /// Normalized domain
    pub domain: &'a str,

    /// Optional country code
    pub country: Option<&'a str>,

    /// Batch run identifier
    pub run_id: &'a str,
}

/// Category results carried by a record
///
/// Fields not relevant to the process type stay empty.
#[derive(Debug, Clone, Default)]
pub struct RecordPayload {
    pub top_competitors: Vec<Value>,
    pub most_valuable_keywords: Vec<Value>,
    pub most_successful_keywords: Vec<Value>,
    pub newly_ranked_keywords: Vec<Value>,
    pub top_ads: Vec<Value>,
    pub domain_stats: Map<String, Value>,
}

/// Normalized output record, one per (URL, process type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub origin: String,
    pub domain: String,
    pub country: Option<String>,
    pub process_type: RecordKind,
    pub top_competitors: Vec<Value>,
    pub most_valuable_keywords: Vec<Value>,
    pub most_successful_keywords: Vec<Value>,
    pub newly_ranked_keywords: Vec<Value>,
    pub top_ads: Vec<Value>,
    pub domain_stats: Map<String, Value>,

    /// Milliseconds since the Unix epoch, captured at build time
    pub timestamp: i64,
    pub run_id: String,
    pub notes: Option<String>,
}

impl Record {
    /// Assembles a record, stamping it with the current time
    pub fn build(ctx: &RecordContext<'_>, kind: RecordKind, payload: RecordPayload) -> Self {
        Self {
            origin: ctx.origin.to_string(),
            domain: ctx.domain.to_string(),
            country: ctx.country.map(str::to_string),
            process_type: kind,
            top_competitors: payload.top_competitors,
            most_valuable_keywords: payload.most_valuable_keywords,
            most_successful_keywords: payload.most_successful_keywords,
            newly_ranked_keywords: payload.newly_ranked_keywords,
            top_ads: payload.top_ads,
            domain_stats: payload.domain_stats,
            timestamp: chrono::Utc::now().timestamp_millis(),
            run_id: ctx.run_id.to_string(),
            notes: None,
        }
    }
}
