use anyhow::Result;
use async_trait::async_trait;

use crate::types::{CaseRecord, LandmarkCase, StatuteRecord};

/// A case-law search source, ranked by relevance.
///
/// Transport failures surface as `Err`; the fetch orchestrator recovers them
/// per task, so implementations should not retry internally.
#[async_trait]
pub trait CaseSearch: Send + Sync {
    async fn search_cases(&self, query: &str, max_results: usize) -> Result<Vec<CaseRecord>>;
}

/// A legislative search source.
#[async_trait]
pub trait StatuteSearch: Send + Sync {
    async fn search_statutes(&self, query: &str, max_results: usize) -> Result<Vec<StatuteRecord>>;
}

/// In-memory landmark-case lookup by topic keyword. No network.
pub trait LandmarkLookup: Send + Sync {
    /// Entries whose topic keyword appears in `text` (case-insensitive).
    fn topic_lookup(&self, text: &str, max_results: usize) -> Vec<LandmarkCase>;
}
