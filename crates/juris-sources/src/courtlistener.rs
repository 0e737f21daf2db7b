use anyhow::Result;
use async_trait::async_trait;
use juris_core::source::CaseSearch;
use juris_core::types::CaseRecord;
use serde_json::Value;
use tracing::info;

const BASE: &str = "https://www.courtlistener.com/api/rest/v4";

// Federal courts for constitutional-law research.
const FEDERAL_COURTS: &str =
    "scotus ca1 ca2 ca3 ca4 ca5 ca6 ca7 ca8 ca9 ca10 ca11 cadc cafc";

/// Client for the Free Law Project's CourtListener REST API.
pub struct CourtListenerClient {
    http: reqwest::Client,
    api_token: String,
}

impl CourtListenerClient {
    pub fn new(api_token: &str, timeout_s: u64) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("juris/0.1 (legal research agent)")
                .timeout(std::time::Duration::from_secs(timeout_s))
                .build()
                .unwrap_or_default(),
            api_token: api_token.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty()
    }

    /// Search court opinions, relevance-ranked, restricted to federal courts.
    pub async fn search_opinions(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CaseRecord>> {
        let url = format!(
            "{BASE}/search/?q={}&type=o&order_by={}&court={}&format=json",
            urlencoding::encode(query),
            urlencoding::encode("score desc"),
            urlencoding::encode(FEDERAL_COURTS),
        );

        let mut req = self.http.get(&url);
        if !self.api_token.is_empty() {
            req = req.header("Authorization", format!("Token {}", self.api_token));
        }

        let data: Value = req.send().await?.error_for_status()?.json().await?;

        let results: Vec<CaseRecord> = data["results"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .take(max_results)
                    .filter_map(parse_search_result)
                    .collect()
            })
            .unwrap_or_default();

        info!(count = results.len(), query, "courtlistener search");
        Ok(results)
    }
}

#[async_trait]
impl CaseSearch for CourtListenerClient {
    async fn search_cases(&self, query: &str, max_results: usize) -> Result<Vec<CaseRecord>> {
        self.search_opinions(query, max_results).await
    }
}

/// Normalize one search hit. The v4 search API mixes camelCase and
/// snake_case field names depending on result type, so both are tried.
pub fn parse_search_result(item: &Value) -> Option<CaseRecord> {
    let case_name = str_field(item, &["caseName", "case_name"]);
    if case_name.is_empty() {
        return None;
    }
    Some(CaseRecord {
        source: "courtlistener".into(),
        case_name,
        citation: extract_citation(item),
        court: str_field(item, &["court", "court_id"]),
        date_filed: str_field(item, &["dateFiled", "date_filed"]),
        snippet: str_field(item, &["snippet"]),
        absolute_url: str_field(item, &["absolute_url"]),
        is_landmark: false,
    })
}

fn str_field(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| item[*k].as_str())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Best citation string available on a search hit. The citation field is a
/// list for clustered opinions and a plain string for some older records;
/// failing both, fall back to vendor cite fields, then a name/court/year
/// composite.
fn extract_citation(item: &Value) -> String {
    match &item["citation"] {
        Value::Array(cites) => {
            if let Some(first) = cites.iter().filter_map(|c| c.as_str()).next() {
                return first.to_string();
            }
        },
        Value::String(s) if !s.is_empty() => return s.clone(),
        _ => {},
    }

    for field in ["lexisCite", "neutralCite"] {
        let val = str_field(item, &[field]);
        if !val.is_empty() {
            return val;
        }
    }

    let name = str_field(item, &["caseName", "case_name"]);
    if !name.is_empty() {
        let court = str_field(item, &["court_citation_string"]);
        let date = str_field(item, &["dateFiled", "date_filed"]);
        let year: String = date.chars().take(4).collect();
        if !court.is_empty() {
            return format!("{name} ({court} {year})");
        }
        return name;
    }

    "Citation unavailable".into()
}
