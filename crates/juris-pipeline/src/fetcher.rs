use std::collections::HashSet;
use std::sync::Arc;

use juris_core::matching::{self, NameMatcher};
use juris_core::source::{CaseSearch, LandmarkLookup, StatuteSearch};
use juris_core::types::{CaseRecord, FetchedData, StatuteRecord};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Results requested per specific case name.
const CASE_RESULTS: usize = 3;
/// Results requested per statute name; only the first is kept.
const STATUTE_RESULTS: usize = 3;
/// Results kept per free-text search query.
const SEARCH_RESULTS: usize = 5;
/// Landmark entries considered per requested case name.
const LANDMARK_RESULTS: usize = 3;

/// Fetch step: concurrently pulls real data for the cases and statutes the
/// identifier named, then reconciles the raw results into one clean set.
///
/// Each call is a stateless transaction: fan out one task per requested
/// name/query over a bounded worker pool, join everything, reconcile
/// single-threaded. A failing task contributes nothing and never disturbs
/// its siblings; there is no retry at this layer.
pub struct CaseFetcher {
    case_source: Arc<dyn CaseSearch>,
    statute_source: Arc<dyn StatuteSearch>,
    landmarks: Arc<dyn LandmarkLookup>,
    matcher: NameMatcher,
    max_concurrent: usize,
}

/// Output of one fetch task, keyed by kind at fan-in.
enum TaskOutput {
    Case(Option<CaseRecord>),
    Search(Vec<CaseRecord>),
    Statute(Option<StatuteRecord>),
}

impl CaseFetcher {
    pub fn new(
        case_source: Arc<dyn CaseSearch>,
        statute_source: Arc<dyn StatuteSearch>,
        landmarks: Arc<dyn LandmarkLookup>,
    ) -> Self {
        Self {
            case_source,
            statute_source,
            landmarks,
            matcher: NameMatcher::default(),
            max_concurrent: 5,
        }
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    pub fn with_matcher(mut self, matcher: NameMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Fetch and reconcile. Empty input lists are valid and produce an empty
    /// result, never an error.
    ///
    /// Accumulator order is task completion order; callers must not assume
    /// the requested order survives. `identified_statutes` carries the
    /// requested statute names through for gap detection downstream.
    pub async fn fetch(
        &self,
        case_names: &[String],
        statute_names: &[String],
        search_queries: &[String],
    ) -> FetchedData {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks: JoinSet<TaskOutput> = JoinSet::new();

        for name in case_names {
            let source = Arc::clone(&self.case_source);
            let sem = Arc::clone(&semaphore);
            let matcher = self.matcher;
            let name = name.clone();
            tasks.spawn(async move {
                let _permit = sem.acquire_owned().await.ok();
                TaskOutput::Case(fetch_case(source.as_ref(), matcher, &name).await)
            });
        }

        for name in statute_names {
            let source = Arc::clone(&self.statute_source);
            let sem = Arc::clone(&semaphore);
            let name = name.clone();
            tasks.spawn(async move {
                let _permit = sem.acquire_owned().await.ok();
                TaskOutput::Statute(fetch_statute(source.as_ref(), &name).await)
            });
        }

        for query in search_queries {
            let source = Arc::clone(&self.case_source);
            let sem = Arc::clone(&semaphore);
            let query = query.clone();
            tasks.spawn(async move {
                let _permit = sem.acquire_owned().await.ok();
                TaskOutput::Search(run_search(source.as_ref(), &query).await)
            });
        }

        // Fan-in: accumulators fill in completion order.
        let mut cases = Vec::new();
        let mut statutes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(TaskOutput::Case(Some(record))) => cases.push(record),
                Ok(TaskOutput::Search(records)) => cases.extend(records),
                Ok(TaskOutput::Statute(Some(record))) => statutes.push(record),
                Ok(TaskOutput::Case(None)) | Ok(TaskOutput::Statute(None)) => {},
                Err(e) => warn!("fetch task join error: {e}"),
            }
        }

        let mut cases = dedup_cases(cases);
        self.merge_landmarks(case_names, &mut cases);

        FetchedData {
            cases,
            statutes,
            identified_statutes: statute_names.to_vec(),
        }
    }

    /// Backfill well-known cases the search sources missed. An entry is
    /// appended only when the matcher confirms it against the requested name
    /// and no already-retained case matches it.
    fn merge_landmarks(&self, case_names: &[String], cases: &mut Vec<CaseRecord>) {
        for name in case_names {
            let hits = self
                .landmarks
                .topic_lookup(&name.to_lowercase(), LANDMARK_RESULTS);
            let Some(hit) = hits.iter().find(|l| self.matcher.matches(name, &l.case_name))
            else {
                continue;
            };
            if cases
                .iter()
                .any(|c| self.matcher.matches(&c.case_name, &hit.case_name))
            {
                continue;
            }
            debug!(case = %hit.case_name, "landmark backfill");
            cases.push(CaseRecord {
                source: "scotus_landmark".into(),
                case_name: hit.case_name.clone(),
                citation: hit.citation.clone(),
                snippet: hit.topic.clone(),
                is_landmark: true,
                ..Default::default()
            });
        }
    }
}

/// One case task: quoted (precise) search first, loose fallback only when the
/// quoted query returns nothing, then best-match selection over whichever
/// result set was used.
async fn fetch_case(
    source: &dyn CaseSearch,
    matcher: NameMatcher,
    name: &str,
) -> Option<CaseRecord> {
    let quoted = format!("\"{name}\"");
    let results = match source.search_cases(&quoted, CASE_RESULTS).await {
        Ok(r) => r,
        Err(e) => {
            warn!("case search failed for '{name}': {e}");
            Vec::new()
        },
    };
    if let Some(best) = matcher.best_match(name, &results) {
        return Some(best);
    }

    let results = match source.search_cases(name, CASE_RESULTS).await {
        Ok(r) => r,
        Err(e) => {
            warn!("loose case search failed for '{name}': {e}");
            return None;
        },
    };
    matcher.best_match(name, &results)
}

/// One statute task. Statutory-citation punctuation confuses the bill
/// search, so it is stripped before querying; only the top hit is kept.
async fn fetch_statute(source: &dyn StatuteSearch, name: &str) -> Option<StatuteRecord> {
    let term = name.replace('§', " ").replace("U.S.C.", " ");
    let term = term.split_whitespace().collect::<Vec<_>>().join(" ");
    let results = match source.search_statutes(&term, STATUTE_RESULTS).await {
        Ok(r) => r,
        Err(e) => {
            warn!("statute search failed for '{name}': {e}");
            return None;
        },
    };
    results.into_iter().next()
}

/// One exploratory search task: keep everything, no best-match filtering.
async fn run_search(source: &dyn CaseSearch, query: &str) -> Vec<CaseRecord> {
    match source.search_cases(query, SEARCH_RESULTS).await {
        Ok(r) => r,
        Err(e) => {
            warn!("search failed for '{query}': {e}");
            Vec::new()
        },
    }
}

/// Drop records whose dedup key was already seen, preserving first-seen
/// order. Idempotent.
pub fn dedup_cases(cases: Vec<CaseRecord>) -> Vec<CaseRecord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for case in cases {
        let key = matching::dedup_key(&case.case_name);
        if !key.is_empty() && seen.insert(key) {
            unique.push(case);
        }
    }
    unique
}
