use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::SearchProvider;
use crate::error::AppError;
use crate::types::{MarketAnalysis, SearchDepth};

const PROVIDER: &str = "linkup";
const BASE_URL: &str = "https://api.linkup.so/v1";

/// Historical window every search is pinned to, so repeated analyses of the
/// same idea see the same slice of the web.
fn search_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2016, 1, 1).expect("valid window start"),
        NaiveDate::from_ymd_opt(2025, 6, 21).expect("valid window end"),
    )
}

fn linkup_err(e: impl std::fmt::Display) -> AppError {
    AppError::UpstreamUnavailable {
        provider: PROVIDER,
        message: e.to_string(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody<'a> {
    query: &'a str,
    depth: &'static str,
    output_type: &'static str,
    /// The schema travels as a JSON string, not a nested object.
    structured_output_schema: String,
    include_images: bool,
    from_date: NaiveDate,
    to_date: NaiveDate,
}

/// HTTP client for the Linkup structured search API.
pub struct LinkupClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LinkupClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
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
impl SearchProvider for LinkupClient {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
        schema: Value,
    ) -> Result<MarketAnalysis, AppError> {
        let (from_date, to_date) = search_window();
        let body = SearchBody {
            query,
            depth: depth.as_str(),
            output_type: "structured",
            structured_output_schema: schema.to_string(),
            include_images: false,
            from_date,
            to_date,
        };

        let resp = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(linkup_err)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(linkup_err(format!("search API error ({status}): {text}")));
        }

        let value: Value = resp.json().await.map_err(|e| AppError::MalformedResponse {
            provider: PROVIDER,
            message: e.to_string(),
        })?;
        match value {
            Value::Object(map) => Ok(MarketAnalysis(map)),
            other => Err(AppError::MalformedResponse {
                provider: PROVIDER,
                message: format!("expected a JSON object, got {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_window_is_fixed() {
        let (from, to) = search_window();
        assert_eq!(from.to_string(), "2016-01-01");
        assert_eq!(to.to_string(), "2025-06-21");
    }

    #[test]
    fn body_serializes_schema_as_string() {
        let (from_date, to_date) = search_window();
        let body = SearchBody {
            query: "how valid is my idea",
            depth: SearchDepth::Standard.as_str(),
            output_type: "structured",
            structured_output_schema: serde_json::json!({"type": "object"}).to_string(),
            include_images: false,
            from_date,
            to_date,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["depth"], "standard");
        assert_eq!(value["outputType"], "structured");
        assert_eq!(value["includeImages"], false);
        assert_eq!(value["fromDate"], "2016-01-01");
        assert_eq!(value["toDate"], "2025-06-21");
        assert!(value["structuredOutputSchema"].is_string());
    }
}
