//! The idea-validation workflow: one structured web search, three
//! completion calls derived from its result, one merged payload.
//!
//! Within a request the search strictly precedes the completion calls
//! (their prompts interpolate the analysis), but the three completion
//! calls only read the analysis and write disjoint fields of the final
//! result, so they are issued concurrently and joined before the merge.
//! No caching, no retry, no request deduplication: two identical ideas
//! submitted twice run the full external-call sequence twice.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::prompt;
use crate::providers::{CompletionProvider, SearchProvider};
use crate::schema;
use crate::types::{
    ChatRequest, FounderProfile, GeneratedArtifacts, MarketAnalysis, MvpFeature, SearchDepth,
};

const PITCH_MODEL: &str = "gemini-1.5-flash";
const REVENUE_MODEL: &str = "gemini-1.5-flash";
const MVP_MODEL: &str = "gemini-1.5-flash-8b";

/// Drives the external-call sequence for one idea submission. Holds no
/// per-request state; providers are injected so tests and mock mode can
/// substitute them.
pub struct Orchestrator {
    search: Arc<dyn SearchProvider>,
    completion: Arc<dyn CompletionProvider>,
    /// In mock mode a failure of the artifact-generation step degrades to
    /// returning the fixture analysis unmodified instead of failing the
    /// request. Live mode never degrades.
    mock_mode: bool,
}

impl Orchestrator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        completion: Arc<dyn CompletionProvider>,
        mock_mode: bool,
    ) -> Self {
        Self {
            search,
            completion,
            mock_mode,
        }
    }

    /// Run the full workflow: search -> three completions -> merge.
    pub async fn validate_idea(&self, req: &ChatRequest) -> Result<Value, AppError> {
        req.validate()?;

        let profile = req.active_profile();
        let depth = SearchDepth::from_model(req.model.as_deref());
        let analysis_schema = schema::market_analysis_schema(req.personalized);
        let query = prompt::market_search_prompt(&req.message, profile);

        tracing::debug!(depth = depth.as_str(), personalized = req.personalized, "running market search");
        let analysis = self.search.search(&query, depth, analysis_schema).await?;

        match self.generate_artifacts(&req.message, &analysis, profile).await {
            Ok(artifacts) => merge(analysis, &artifacts),
            Err(err) if self.mock_mode => {
                tracing::warn!(
                    kind = err.kind(),
                    "artifact generation failed in mock mode, returning fixture unmodified: {err}"
                );
                Ok(Value::Object(analysis.into_map()))
            }
            Err(err) => Err(err),
        }
    }

    /// The three artifact calls, joined before the merge. A failure of any
    /// one fails the whole step.
    async fn generate_artifacts(
        &self,
        idea_text: &str,
        analysis: &MarketAnalysis,
        profile: Option<&FounderProfile>,
    ) -> Result<GeneratedArtifacts, AppError> {
        let pitch_prompt = prompt::pitch_prompt(idea_text, analysis, profile);
        let revenue_prompt = prompt::revenue_models_prompt(idea_text, analysis, profile);
        let mvp_prompt = prompt::mvp_features_prompt(idea_text, analysis, profile);

        let (pitch, revenue, mvp) = tokio::try_join!(
            self.completion
                .generate(PITCH_MODEL, &pitch_prompt, schema::pitch_schema()),
            self.completion
                .generate(REVENUE_MODEL, &revenue_prompt, schema::revenue_models_schema()),
            self.completion
                .generate(MVP_MODEL, &mvp_prompt, schema::mvp_schema()),
        )?;

        let pitch: PitchReply = parse_reply("pitch", pitch)?;
        let revenue: RevenueReply = parse_reply("revenue models", revenue)?;
        let mvp: MvpReply = parse_reply("MVP plan", mvp)?;

        Ok(GeneratedArtifacts {
            pitch: pitch.pitch,
            revenue_models: revenue.revenue_models,
            mvp_design: mvp.mvp_design,
            mvp_features: mvp.mvp_features,
        })
    }
}

#[derive(Deserialize)]
struct PitchReply {
    pitch: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RevenueReply {
    revenue_models: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MvpReply {
    mvp_design: String,
    mvp_features: Vec<MvpFeature>,
}

fn parse_reply<T: DeserializeOwned>(what: &str, value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::MalformedResponse {
        provider: "gemini",
        message: format!("{what} reply: {e}"),
    })
}

/// Shallow merge of the analysis with the generated fields. Generated
/// artifacts overwrite same-named keys in the analysis.
fn merge(analysis: MarketAnalysis, artifacts: &GeneratedArtifacts) -> Result<Value, AppError> {
    let mut map = analysis.into_map();
    if let Value::Object(fields) = serde_json::to_value(artifacts)? {
        for (key, value) in fields {
            map.insert(key, value);
        }
    }
    Ok(Value::Object(map))
}
