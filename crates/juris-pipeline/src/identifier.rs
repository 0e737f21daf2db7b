use std::sync::Arc;

use juris_core::types::ResearchTargets;
use regex::Regex;
use serde_json::Value;
use tracing::{error, warn};

use crate::gemini::GeminiClient;

/// Identification step: asks the LLM which specific cases, statutes, and
/// search queries matter for the user's question, before any database is
/// touched.
pub struct Identifier {
    gemini: Arc<GeminiClient>,
}

impl Identifier {
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }

    /// Never fails: an unreachable LLM degrades to plain search queries
    /// derived from the question itself.
    pub async fn identify(&self, question: &str) -> ResearchTargets {
        let prompt = build_prompt(question);
        match self.gemini.ask(&prompt, 0.0, 2048).await {
            Ok(response) => parse_response(&response),
            Err(e) => {
                error!("identifier error: {e}");
                fallback_targets(question)
            },
        }
    }
}

fn build_prompt(question: &str) -> String {
    format!(
        "You are a legal research expert. A user has a legal question and I need to \
         search legal databases to find relevant cases and statutes.\n\
         \n\
         For this question, tell me:\n\
         1. The specific court cases (by name) that are most important and relevant\n\
         2. Any specific federal statutes that apply\n\
         3. Good search queries I should use to find additional relevant cases in a legal database\n\
         \n\
         USER'S QUESTION:\n\
         {question}\n\
         \n\
         Respond in EXACTLY this JSON format and nothing else — no markdown, no backticks, no explanation:\n\
         {{\n\
             \"cases\": [\"Case Name v. Other Party\", \"Another Case v. State\"],\n\
             \"statutes\": [\"42 U.S.C. § 1983\", \"Title VII of the Civil Rights Act\"],\n\
             \"search_queries\": [\"qualified immunity excessive force\", \"clearly established right\"]\n\
         }}\n\
         \n\
         List 5-10 of the most important cases. List any relevant statutes (empty list \
         if none apply). List 2-3 search queries."
    )
}

/// Parse the LLM's JSON reply, stripping markdown code fences first and
/// falling back to plain-text case-name extraction when it isn't JSON.
pub fn parse_response(text: &str) -> ResearchTargets {
    let text = strip_code_fences(text);
    match serde_json::from_str::<Value>(&text) {
        Ok(data) => ResearchTargets {
            cases: str_list(&data["cases"]),
            statutes: str_list(&data["statutes"]),
            search_queries: str_list(&data["search_queries"]),
        },
        Err(_) => {
            let head: String = text.chars().take(200).collect();
            warn!("could not parse identifier json: {head}");
            extract_from_text(&text)
        },
    }
}

fn strip_code_fences(text: &str) -> String {
    let mut t = text.trim();
    if let Some(rest) = t.strip_prefix("```json") {
        t = rest;
    } else if let Some(rest) = t.strip_prefix("```") {
        t = rest;
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest;
    }
    t.trim().to_string()
}

fn str_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Fallback: pull "Something v. Something" patterns out of prose.
pub fn extract_from_text(text: &str) -> ResearchTargets {
    let mut cases: Vec<String> = Vec::new();
    if let Ok(re) = Regex::new(r"[A-Z][A-Za-z\s.',]+\s+v\.\s+[A-Z][A-Za-z\s.',]+") {
        for m in re.find_iter(text) {
            let name = m
                .as_str()
                .trim()
                .trim_end_matches(|c: char| c == ',' || c == '.')
                .to_string();
            if name.len() > 5 && !cases.contains(&name) {
                cases.push(name);
            }
        }
    }
    cases.truncate(10);
    ResearchTargets {
        cases,
        ..Default::default()
    }
}

/// Last resort when the LLM is unreachable: a single search query built from
/// the question's content words.
pub fn fallback_targets(question: &str) -> ResearchTargets {
    const STOP: &[&str] = &[
        "what", "how", "is", "the", "in", "for", "has", "been", "are", "does", "do", "can", "a",
        "an", "of", "to", "and", "or",
    ];
    let terms: Vec<String> = question
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| "?.,!".contains(c)).to_string())
        .filter(|w| w.len() > 3 && !STOP.contains(&w.as_str()))
        .take(5)
        .collect();

    ResearchTargets {
        search_queries: vec![terms.join(" ")],
        ..Default::default()
    }
}
