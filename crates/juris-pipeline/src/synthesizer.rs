use std::sync::Arc;

use juris_core::types::{CaseRecord, FetchedData, StatuteRecord, SynthesisReport};
use regex::Regex;
use tracing::error;

use crate::gemini::GeminiClient;

/// Synthesis step: turns the reconciled records into a five-section answer.
///
/// The prompt is built only from fetched data; statutes that were identified
/// but not found are listed separately so the model labels anything it says
/// about them as its own interpretation instead of a sourced citation.
pub struct Synthesizer {
    gemini: Arc<GeminiClient>,
}

impl Synthesizer {
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }

    pub async fn synthesize(&self, question: &str, fetched: &FetchedData) -> SynthesisReport {
        let cases_text = format_cases(&fetched.cases);
        let statutes_text = format_statutes(&fetched.statutes);
        let missing_text = fetched
            .missing_statutes()
            .iter()
            .map(|name| format!("- {name}"))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = build_prompt(question, &cases_text, &statutes_text, &missing_text);

        match self.gemini.ask(&prompt, 0.0, 8192).await {
            Ok(response) => parse_sections(&response),
            Err(e) => {
                error!("synthesis error: {e}");
                SynthesisReport {
                    tldr: format!("Error generating synthesis: {e}"),
                    key_cases: cases_text,
                    ..Default::default()
                }
            },
        }
    }
}

fn build_prompt(question: &str, cases: &str, statutes: &str, missing: &str) -> String {
    let cases = if cases.is_empty() {
        "No cases were found in the databases."
    } else {
        cases
    };
    let statutes = if statutes.is_empty() {
        "No relevant statutes found in database."
    } else {
        statutes
    };
    let missing = if missing.is_empty() { "None." } else { missing };

    format!(
        "You are a legal research expert. I searched legal databases and found the case \
         law and statutes below. Use this data to answer the user's question.\n\
         \n\
         CRITICAL RULES:\n\
         - ONLY cite cases from the data below. Never invent or hallucinate cases.\n\
         - List ALL cases from the data below — they were already filtered for relevance. Do not skip any.\n\
         - For statutes: If real statute data was retrieved below, cite it normally. If statutes \
         were identified as relevant but NOT found in the database, you may explain them from your \
         own knowledge BUT you MUST clearly label those as \"⚠️ Model Interpretation — not sourced \
         from database.\"\n\
         - Be direct. No filler. Answer like a sharp legal expert.\n\
         - Include CourtListener links where available.\n\
         \n\
         USER'S QUESTION:\n\
         {question}\n\
         \n\
         CASE LAW FOUND:\n\
         {cases}\n\
         \n\
         STATUTES FOUND IN DATABASE:\n\
         {statutes}\n\
         \n\
         STATUTES IDENTIFIED BUT NOT FOUND IN DATABASE:\n\
         {missing}\n\
         \n\
         Now produce EXACTLY these five sections. Use these EXACT headers:\n\
         \n\
         ## TLDR\n\
         2-3 sentences that directly answer the question. Be specific about what the law says. No hedging.\n\
         \n\
         ## KEY CASES\n\
         List ALL cases from the retrieved data (do not skip any). For each:\n\
         \n\
         **Case Name**, Citation (Year)\n\
         - HOLDING: What the court decided in one sentence.\n\
         - KEY FACTS: The facts that mattered, 1-2 sentences.\n\
         - WHY IT MATTERS: Why this case matters for the user's question.\n\
         - LINK: [CourtListener link if available from the data]\n\
         \n\
         ## RELEVANT STATUTES\n\
         For statutes found in the database, summarize them with proper citations. For statutes \
         identified as relevant but NOT found in database, explain them and prefix each with: \
         ⚠️ Model Interpretation — not sourced from database\n\
         \n\
         ## ANSWER\n\
         2-4 paragraphs connecting the cases and statutes to answer the question. Explain how the \
         legal standard works in practice. Give concrete examples of what would and wouldn't meet \
         the standard. If courts disagree, explain the split.\n\
         \n\
         ## GAPS\n\
         2-3 bullet points on what's missing from this analysis and what additional research would help."
    )
}

/// Render fetched cases as numbered plain-text entries for the prompt.
pub fn format_cases(cases: &[CaseRecord]) -> String {
    let mut entries = Vec::new();
    for (i, case) in cases.iter().enumerate() {
        let name = if case.case_name.is_empty() {
            "Unknown"
        } else {
            &case.case_name
        };
        let citation = if case.citation.is_empty() {
            "No citation"
        } else {
            &case.citation
        };
        let mut entry = format!("Case {}: {name}\n  Citation: {citation}", i + 1);
        if !case.court.is_empty() {
            entry.push_str(&format!("\n  Court: {}", case.court));
        }
        if !case.date_filed.is_empty() {
            entry.push_str(&format!("\n  Date: {}", case.date_filed));
        }
        if case.is_landmark {
            entry.push_str("\n  [LANDMARK CASE]");
        }
        if !case.absolute_url.is_empty() {
            entry.push_str(&format!(
                "\n  CourtListener URL: https://www.courtlistener.com{}",
                case.absolute_url
            ));
        }
        let snippet = clean_snippet(&case.snippet);
        if !snippet.is_empty() {
            entry.push_str(&format!("\n  Excerpt/Topic: {snippet}"));
        }
        entry.push('\n');
        entries.push(entry);
    }
    entries.join("\n")
}

pub fn format_statutes(statutes: &[StatuteRecord]) -> String {
    let mut entries = Vec::new();
    for (i, s) in statutes.iter().enumerate() {
        let title = if s.title.is_empty() { "Unknown" } else { &s.title };
        let mut entry = format!("Statute {}: {title}", i + 1);
        if !s.number.is_empty() {
            entry.push_str(&format!(" ({})", s.number));
        }
        if !s.policy_area.is_empty() {
            entry.push_str(&format!("\n  Policy Area: {}", s.policy_area));
        }
        entries.push(entry);
    }
    entries.join("\n")
}

/// Search snippets carry highlighting markup; strip tags, unescape
/// ampersands, cap the length.
fn clean_snippet(snippet: &str) -> String {
    let Ok(re) = Regex::new(r"<[^>]+>") else {
        return snippet.to_string();
    };
    re.replace_all(snippet, "")
        .replace("&amp;", "&")
        .chars()
        .take(800)
        .collect()
}

/// Split the model's reply on the five known headers. Header lines may carry
/// any number of leading `#`. Unrecognized leading prose is dropped; if no
/// header is found at all, the whole reply becomes the answer section.
pub fn parse_sections(text: &str) -> SynthesisReport {
    const MARKERS: [&str; 5] = ["TLDR", "KEY CASES", "RELEVANT STATUTES", "ANSWER", "GAPS"];

    let mut sections: [Vec<&str>; 5] = Default::default();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        let stripped = line.trim().trim_start_matches('#').trim();
        let upper = stripped.to_uppercase();
        if let Some(idx) = MARKERS.iter().position(|m| upper.starts_with(m)) {
            current = Some(idx);
            continue;
        }
        if let Some(idx) = current {
            sections[idx].push(line);
        }
    }

    let join = |idx: usize| sections[idx].join("\n").trim().to_string();
    let mut report = SynthesisReport {
        tldr: join(0),
        key_cases: join(1),
        statutes: join(2),
        answer: join(3),
        gaps: join(4),
    };

    if report.tldr.is_empty()
        && report.key_cases.is_empty()
        && report.statutes.is_empty()
        && report.answer.is_empty()
        && report.gaps.is_empty()
    {
        report.answer = text.trim().to_string();
    }
    report
}
