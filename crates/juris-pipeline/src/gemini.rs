use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

const API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model retried on any primary-model failure (HTTP error, blocked content,
/// empty candidates).
const FALLBACK_MODEL: &str = "gemini-2.0-flash";

/// Shared client for the Gemini generateContent API, used by both the
/// identifier and the synthesizer.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout_s: u64) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_s))
                .build()
                .unwrap_or_default(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Send a prompt, get text back. Falls back to `FALLBACK_MODEL` once if
    /// the primary model fails.
    pub async fn ask(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String> {
        match self
            .ask_model(&self.model, prompt, temperature, max_tokens)
            .await
        {
            Ok(text) => Ok(text),
            Err(e) if self.model != FALLBACK_MODEL => {
                warn!(model = %self.model, "gemini failed, retrying with {FALLBACK_MODEL}: {e}");
                self.ask_model(FALLBACK_MODEL, prompt, temperature, max_tokens)
                    .await
            },
            Err(e) => Err(e),
        }
    }

    async fn ask_model(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let url = format!("{API_URL}/{model}:generateContent?key={}", self.api_key);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: max_tokens,
            },
        };

        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let text: String = text.chars().take(500).collect();
            warn!(%status, "gemini api error: {text}");
            return Err(anyhow!("gemini api error: http {status}"));
        }

        let data: Value = resp.json().await?;
        if let Some(err) = data.get("error") {
            let message = err["message"].as_str().unwrap_or("unknown");
            return Err(anyhow!("gemini error: {message}"));
        }

        extract_text(&data)
    }
}

/// Pull the answer text out of a generateContent response.
///
/// Thinking models return thought parts ahead of the answer; those are
/// skipped unless every part is a thought.
pub fn extract_text(data: &Value) -> Result<String> {
    let parts = data["candidates"][0]["content"]["parts"]
        .as_array()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| anyhow!("empty response from gemini: no parts"))?;

    let mut texts: Vec<&str> = parts
        .iter()
        .filter(|p| !p["thought"].as_bool().unwrap_or(false))
        .filter_map(|p| p["text"].as_str())
        .collect();
    if texts.is_empty() {
        texts = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    }

    let result = texts.join("\n").trim().to_string();
    if result.is_empty() {
        return Err(anyhow!("empty text in gemini response"));
    }
    Ok(result)
}
