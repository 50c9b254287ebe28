use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use super::SearchProvider;
use crate::error::AppError;
use crate::types::{MarketAnalysis, SearchDepth};

/// Fixture-backed stand-in for the search provider, enabled with
/// `USE_LINKUP_MOCK=true`. The fixture is re-read on every request so it
/// can be edited without restarting the server.
pub struct FixtureSearchProvider {
    path: PathBuf,
}

impl FixtureSearchProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SearchProvider for FixtureSearchProvider {
    async fn search(
        &self,
        _query: &str,
        _depth: SearchDepth,
        _schema: Value,
    ) -> Result<MarketAnalysis, AppError> {
        tracing::info!(path = %self.path.display(), "Serving search fixture (USE_LINKUP_MOCK=true)");
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(MarketAnalysis(map)),
            _ => Err(AppError::MalformedResponse {
                provider: "fixture",
                message: format!("{} is not a JSON object", self.path.display()),
            }),
        }
    }
}
