use anyhow::Result;
use async_trait::async_trait;
use juris_core::source::StatuteSearch;
use juris_core::types::StatuteRecord;
use serde_json::Value;
use tracing::{info, warn};

const BASE: &str = "https://api.congress.gov/v3";

/// Client for the Library of Congress Congress.gov REST API.
pub struct CongressClient {
    http: reqwest::Client,
    api_key: String,
}

impl CongressClient {
    pub fn new(api_key: &str, timeout_s: u64) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("juris/0.1 (legal research agent)")
                .timeout(std::time::Duration::from_secs(timeout_s))
                .build()
                .unwrap_or_default(),
            api_key: api_key.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Keyword search over federal legislation, relevance-sorted.
    pub async fn search_bills(&self, query: &str, max_results: usize) -> Result<Vec<StatuteRecord>> {
        if self.api_key.is_empty() {
            warn!("congress.gov api key not configured");
            return Ok(Vec::new());
        }

        let url = format!(
            "{BASE}/bill?api_key={}&query={}&limit={}&format=json&sort=relevance",
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            max_results.min(250),
        );

        let data: Value = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let results: Vec<StatuteRecord> = data["bills"]
            .as_array()
            .map(|bills| {
                bills
                    .iter()
                    .take(max_results)
                    .filter_map(parse_bill)
                    .collect()
            })
            .unwrap_or_default();

        info!(count = results.len(), query, "congress.gov search");
        Ok(results)
    }
}

#[async_trait]
impl StatuteSearch for CongressClient {
    async fn search_statutes(&self, query: &str, max_results: usize) -> Result<Vec<StatuteRecord>> {
        self.search_bills(query, max_results).await
    }
}

/// Normalize one bill search hit into a `StatuteRecord`.
pub fn parse_bill(bill: &Value) -> Option<StatuteRecord> {
    let title = bill["title"].as_str().unwrap_or_default().to_string();
    if title.is_empty() {
        return None;
    }

    let bill_type = bill["type"].as_str().unwrap_or_default();
    let raw_number = bill["number"].as_str().map(str::to_string).or_else(|| {
        // Some endpoints return the number as an integer.
        bill["number"].as_i64().map(|n| n.to_string())
    });
    let number = match raw_number {
        Some(n) if !bill_type.is_empty() => format!("{bill_type} {n}"),
        Some(n) => n,
        None => String::new(),
    };

    let congress = match &bill["congress"] {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    };

    Some(StatuteRecord {
        source: "congress_gov".into(),
        title,
        number,
        congress,
        introduced_date: bill["introducedDate"].as_str().unwrap_or_default().into(),
        latest_action: bill["latestAction"]["text"].as_str().unwrap_or_default().into(),
        policy_area: bill["policyArea"]["name"].as_str().unwrap_or_default().into(),
        url: bill["url"].as_str().unwrap_or_default().into(),
    })
}
