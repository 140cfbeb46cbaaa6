use std::fmt;

/// The fixed set of SpyFu endpoints used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TopCompetitors,
    MostValuableKeywords,
    NewlyRankedKeywords,
    TopAds,
    DomainStats,
}

impl Endpoint {
    /// Path of the endpoint relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Self::TopCompetitors => "competitors/top",
            Self::MostValuableKeywords => "keywords/most-valuable",
            Self::NewlyRankedKeywords => "keywords/newly-ranked",
            Self::TopAds => "ads/top",
            Self::DomainStats => "domain/stats",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
