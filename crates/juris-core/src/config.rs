use std::collections::HashMap;

use anyhow::Result;

/// Full application configuration.
/// Sensitive fields (API keys, tokens) come from env/.env only.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub courtlistener_token: String,
    pub congress_api_key: String,

    // Fetch tuning
    pub max_concurrent_fetches: usize,
    pub source_timeout_s: u64,
    pub gemini_timeout_s: u64,

    // Output
    pub output_dir: String,
}

fn parse_dotenv() -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return map;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
    map
}

fn get(key: &str, dotenv: &HashMap<String, String>) -> Option<String> {
    std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
}

fn get_str(key: &str, dotenv: &HashMap<String, String>, default: &str) -> String {
    get(key, dotenv).unwrap_or_else(|| default.to_string())
}

fn get_usize(key: &str, dotenv: &HashMap<String, String>, default: usize) -> usize {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_u64(key: &str, dotenv: &HashMap<String, String>, default: u64) -> u64 {
    get(key, dotenv)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let dotenv = parse_dotenv();

        Ok(Config {
            gemini_api_key: get_str("GEMINI_API_KEY", &dotenv, ""),
            gemini_model: get_str("GEMINI_MODEL", &dotenv, "gemini-2.5-pro"),
            courtlistener_token: get_str("COURTLISTENER_API_TOKEN", &dotenv, ""),
            congress_api_key: get_str("CONGRESS_API_KEY", &dotenv, ""),
            max_concurrent_fetches: get_usize("MAX_CONCURRENT_FETCHES", &dotenv, 5).max(1),
            source_timeout_s: get_u64("SOURCE_TIMEOUT_S", &dotenv, 30),
            gemini_timeout_s: get_u64("GEMINI_TIMEOUT_S", &dotenv, 90),
            output_dir: get_str("OUTPUT_DIR", &dotenv, "output"),
        })
    }
}
