//! Provider seams for the two external collaborators: the structured web
//! search provider and the AI completion provider. The orchestrator only
//! sees these traits, so tests run against fakes and mock mode swaps the
//! search side for a fixture reader.

pub mod gemini;
pub mod linkup;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;
use crate::types::{MarketAnalysis, SearchDepth};

/// Structured web search: one query constrained by a structured-output
/// schema, returning a market analysis object.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
        schema: Value,
    ) -> Result<MarketAnalysis, AppError>;
}

/// AI text completion constrained by a response schema. The provider's
/// text reply is JSON-parsed before it is returned.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<Value, AppError>;
}
