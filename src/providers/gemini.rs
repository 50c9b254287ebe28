use async_trait::async_trait;
use serde_json::{json, Value};

use super::CompletionProvider;
use crate::error::AppError;

const PROVIDER: &str = "gemini";
const BASE_URL: &str = "https://generativelanguage.googleapis.com";

fn gemini_err(e: impl std::fmt::Display) -> AppError {
    AppError::UpstreamUnavailable {
        provider: PROVIDER,
        message: e.to_string(),
    }
}

fn malformed(message: impl Into<String>) -> AppError {
    AppError::MalformedResponse {
        provider: PROVIDER,
        message: message.into(),
    }
}

/// HTTP client for the Gemini `generateContent` API in structured-output
/// mode. Generation parameters are fixed for the whole workflow.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("failed to build reqwest client");
        Self {
            http,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<Value, AppError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 1024,
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let resp = self
            .http
            .post(format!(
                "{}/v1beta/models/{model}:generateContent",
                self.base_url
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(gemini_err)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(gemini_err(format!(
                "generateContent error ({status}): {text}"
            )));
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| malformed(e.to_string()))?;

        // The JSON payload lives in the first candidate's first text part.
        let text = value
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("response has no candidate text"))?;

        serde_json::from_str(text)
            .map_err(|e| malformed(format!("candidate text is not valid JSON: {e}")))
    }
}
