//! Record builders
//!
//! One builder per process kind. Each wraps a single API client call and
//! hands the result to [`Record::build`], leaving the other category
//! fields empty.

use crate::client::SpyfuClient;
use crate::record::{ProcessType, Record, RecordContext, RecordKind, RecordPayload};
use crate::ApiResult;
use serde_json::Value;

/// Number of keywords kept in the "most successful" list
pub const SUCCESSFUL_KEYWORDS_LIMIT: usize = 3;

/// Builds `top_competitors` records
pub struct CompetitorsBuilder<'a> {
    client: &'a SpyfuClient,
}

impl<'a> CompetitorsBuilder<'a> {
    pub fn new(client: &'a SpyfuClient) -> Self {
        Self { client }
    }

    pub async fn process(&self, ctx: &RecordContext<'_>) -> ApiResult<Record> {
        tracing::debug!("Fetching top competitors for {}", ctx.domain);
        let competitors = self
            .client
            .get_top_competitors(ctx.domain, ctx.country)
            .await?;

        Ok(Record::build(
            ctx,
            RecordKind::TopCompetitors,
            RecordPayload {
                top_competitors: competitors,
                ..RecordPayload::default()
            },
        ))
    }
}

/// Builds keyword records (most valuable and newly ranked)
pub struct KeywordsBuilder<'a> {
    client: &'a SpyfuClient,
}

impl<'a> KeywordsBuilder<'a> {
    pub fn new(client: &'a SpyfuClient) -> Self {
        Self { client }
    }

    /// Builds a `most_valuable_keywords` record
    ///
    /// Also fills `most_successful_keywords` with the top entries by
    /// estimated value.
    pub async fn process_most_valuable(&self, ctx: &RecordContext<'_>) -> ApiResult<Record> {
        tracing::debug!("Fetching most valuable keywords for {}", ctx.domain);
        let valuable = self
            .client
            .get_most_valuable_keywords(ctx.domain, ctx.country)
            .await?;
        let successful = derive_successful_keywords(&valuable);

        Ok(Record::build(
            ctx,
            RecordKind::MostValuableKeywords,
            RecordPayload {
                most_valuable_keywords: valuable,
                most_successful_keywords: successful,
                ..RecordPayload::default()
            },
        ))
    }

    pub async fn process_newly_ranked(&self, ctx: &RecordContext<'_>) -> ApiResult<Record> {
        tracing::debug!("Fetching newly ranked keywords for {}", ctx.domain);
        let newly_ranked = self
            .client
            .get_newly_ranked_keywords(ctx.domain, ctx.country)
            .await?;

        Ok(Record::build(
            ctx,
            RecordKind::NewlyRankedKeywords,
            RecordPayload {
                newly_ranked_keywords: newly_ranked,
                ..RecordPayload::default()
            },
        ))
    }
}

/// Builds `top_ads` records
pub struct AdsBuilder<'a> {
    client: &'a SpyfuClient,
}

impl<'a> AdsBuilder<'a> {
    pub fn new(client: &'a SpyfuClient) -> Self {
        Self { client }
    }

    pub async fn process(&self, ctx: &RecordContext<'_>) -> ApiResult<Record> {
        tracing::debug!("Fetching top ads for {}", ctx.domain);
        let ads = self.client.get_top_ads(ctx.domain, ctx.country).await?;

        Ok(Record::build(
            ctx,
            RecordKind::TopAds,
            RecordPayload {
                top_ads: ads,
                ..RecordPayload::default()
            },
        ))
    }
}

/// Builds `domain_stats` records
pub struct DomainStatsBuilder<'a> {
    client: &'a SpyfuClient,
}

impl<'a> DomainStatsBuilder<'a> {
    pub fn new(client: &'a SpyfuClient) -> Self {
        Self { client }
    }

    pub async fn process(&self, ctx: &RecordContext<'_>) -> ApiResult<Record> {
        tracing::debug!("Fetching domain stats for {}", ctx.domain);
        let stats = self.client.get_domain_stats(ctx.domain, ctx.country).await?;

        Ok(Record::build(
            ctx,
            RecordKind::DomainStats,
            RecordPayload {
                domain_stats: stats,
                ..RecordPayload::default()
            },
        ))
    }
}

/// The fixed set of builders, one per process kind, sharing one client
pub struct RecordBuilders<'a> {
    competitors: CompetitorsBuilder<'a>,
    keywords: KeywordsBuilder<'a>,
    ads: AdsBuilder<'a>,
    domain_stats: DomainStatsBuilder<'a>,
}

impl<'a> RecordBuilders<'a> {
    pub fn new(client: &'a SpyfuClient) -> Self {
        Self {
            competitors: CompetitorsBuilder::new(client),
            keywords: KeywordsBuilder::new(client),
            ads: AdsBuilder::new(client),
            domain_stats: DomainStatsBuilder::new(client),
        }
    }

    /// Builds a record with the builder registered for `process_type`
    pub async fn build(
        &self,
        process_type: ProcessType,
        ctx: &RecordContext<'_>,
    ) -> ApiResult<Record> {
        match process_type {
            ProcessType::TopCompetitors => self.competitors.process(ctx).await,
            ProcessType::MostValuableKeywords => self.keywords.process_most_valuable(ctx).await,
            ProcessType::NewlyRankedKeywords => self.keywords.process_newly_ranked(ctx).await,
            ProcessType::TopAds => self.ads.process(ctx).await,
            ProcessType::DomainStats => self.domain_stats.process(ctx).await,
        }
    }
}

/// Picks the top keywords by `estimated_value`, highest first
///
/// Missing or non-numeric values count as 0. Ties keep their original
/// relative order.
pub fn derive_successful_keywords(valuable: &[Value]) -> Vec<Value> {
    let estimated_value = |keyword: &Value| {
        keyword
            .get("estimated_value")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    };

    let mut sorted = valuable.to_vec();
    sorted.sort_by(|a, b| estimated_value(b).total_cmp(&estimated_value(a)));
    sorted.truncate(SUCCESSFUL_KEYWORDS_LIMIT);
    sorted
}
