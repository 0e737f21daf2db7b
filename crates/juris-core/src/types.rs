use serde::{Deserialize, Serialize};

// ── Source Records ───────────────────────────────────────────────────────

/// A normalized case-law result returned by any search source.
///
/// Records have no stable identity across sources; equality of two records
/// is decided by the name matcher, never by field comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Which source produced this record ("courtlistener", "scotus_landmark").
    pub source: String,
    pub case_name: String,
    pub citation: String,
    pub court: String,
    pub date_filed: String,
    /// Search-result excerpt; may contain HTML from the source.
    pub snippet: String,
    /// Path on the source site (e.g. "/opinion/107252/roe-v-wade/").
    pub absolute_url: String,
    #[serde(default)]
    pub is_landmark: bool,
}

/// A normalized bill / statute result from the legislative source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatuteRecord {
    pub source: String,
    pub title: String,
    /// Bill number (e.g. "1319").
    pub number: String,
    pub congress: String,
    pub introduced_date: String,
    pub latest_action: String,
    pub policy_area: String,
    pub url: String,
}

/// One entry of the built-in SCOTUS landmark table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkCase {
    pub case_name: String,
    pub citation: String,
    /// One-line description of why the case matters.
    pub topic: String,
}

// ── Pipeline Values ──────────────────────────────────────────────────────

/// What the identification step asks the fetcher to look up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchTargets {
    pub cases: Vec<String>,
    pub statutes: Vec<String>,
    pub search_queries: Vec<String>,
}

impl ResearchTargets {
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty() && self.statutes.is_empty()
    }
}

/// The reconciled output of a fetch call, handed to the synthesizer.
///
/// `identified_statutes` carries the requested statute names verbatim so the
/// synthesizer can tell "found in a database" apart from "identified but not
/// found" and never fabricate a sourced citation for the latter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchedData {
    pub cases: Vec<CaseRecord>,
    pub statutes: Vec<StatuteRecord>,
    pub identified_statutes: Vec<String>,
}

impl FetchedData {
    /// Requested statute names with no retained record, by case-insensitive
    /// title containment in either direction. Empty retained titles never
    /// count as a match.
    pub fn missing_statutes(&self) -> Vec<String> {
        let found: Vec<String> = self
            .statutes
            .iter()
            .map(|s| s.title.to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self.identified_statutes
            .iter()
            .filter(|name| {
                let name = name.to_lowercase();
                !found.iter().any(|t| t.contains(&name) || name.contains(t))
            })
            .cloned()
            .collect()
    }
}

/// Sections of the synthesized answer, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisReport {
    pub tldr: String,
    pub key_cases: String,
    pub statutes: String,
    pub answer: String,
    pub gaps: String,
}
