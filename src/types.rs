use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Idea text limits, enforced before any provider call.
pub const MAX_IDEA_CHARS: usize = 3500;
pub const MAX_IDEA_WORDS: usize = 500;

// ============================================================================
// Request
// ============================================================================

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Free-form description of the startup idea.
    pub message: String,
    /// Search tier selected in the UI. `"Quick Search"` maps to a standard
    /// depth search; anything else (or absent) maps to deep.
    #[serde(default)]
    pub model: Option<String>,
    /// Whether the founder profile should shape the analysis.
    #[serde(default)]
    pub personalized: bool,
    #[serde(default)]
    pub user_profile: Option<FounderProfile>,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let text = self.message.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("message is required".into()));
        }
        if text.chars().count() > MAX_IDEA_CHARS {
            return Err(AppError::InvalidInput(format!(
                "idea text exceeds {MAX_IDEA_CHARS} characters"
            )));
        }
        if text.split_whitespace().count() > MAX_IDEA_WORDS {
            return Err(AppError::InvalidInput(format!(
                "idea text exceeds {MAX_IDEA_WORDS} words"
            )));
        }
        Ok(())
    }

    /// Profile to feed into prompt construction. Only honored when the
    /// request asked for a personalized analysis.
    pub fn active_profile(&self) -> Option<&FounderProfile> {
        if self.personalized {
            self.user_profile.as_ref()
        } else {
            None
        }
    }
}

/// Search depth requested from the search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDepth {
    Standard,
    Deep,
}

impl SearchDepth {
    pub fn from_model(model: Option<&str>) -> Self {
        match model {
            Some("Quick Search") => SearchDepth::Standard,
            _ => SearchDepth::Deep,
        }
    }

    /// Wire value expected by the search provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Standard => "standard",
            SearchDepth::Deep => "deep",
        }
    }
}

// ============================================================================
// Founder profile
// ============================================================================

/// Optional founder background. Every field is optional; prompt templates
/// substitute "Not specified"/"N/A" for anything missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FounderProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<Location>,
    pub background: Option<String>,
    pub technical_skills: Option<String>,
    pub previous_experience: Option<String>,
    pub startup_name: Option<String>,
    pub startup_description: Option<String>,
    pub industry: Option<String>,
    pub customer_type: Option<String>,
    pub stage: Option<String>,
    pub team_size: Option<String>,
    pub tech_stack: Option<String>,
    pub funding: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Location {
    /// Comma-joined non-empty parts, e.g. "Austin, TX, USA".
    /// None when every part is missing or blank.
    pub fn display(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

// ============================================================================
// Market analysis
// ============================================================================

/// Structured result from the search provider, held exactly as returned.
///
/// The workflow treats the provider response as pre-validated against the
/// structured-output schema it was given; beyond JSON parsing no shape
/// checking happens here. Typed accessors exist only for the fields the
/// follow-up prompts interpolate, each with a documented fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MarketAnalysis(pub Map<String, Value>);

impl MarketAnalysis {
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.get(key)?;
        }
        Some(current)
    }

    /// Render the value at `path` for prompt interpolation. Strings pass
    /// through, numbers are formatted, everything else (missing, null,
    /// arrays, objects) yields `fallback`.
    pub fn display_at(&self, path: &[&str], fallback: &str) -> String {
        match self.get_path(path) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Comma-joined target audience group names, if any.
    pub fn audience_groups(&self) -> Option<String> {
        let audiences = self.get_path(&["targetAudience"])?.as_array()?;
        let groups: Vec<&str> = audiences
            .iter()
            .filter_map(|a| a.get("group").and_then(Value::as_str))
            .filter(|g| !g.trim().is_empty())
            .collect();
        if groups.is_empty() {
            None
        } else {
            Some(groups.join(", "))
        }
    }
}

// ============================================================================
// Generated artifacts
// ============================================================================

/// Priority/effort levels used in MVP feature planning and competitor
/// popularity rankings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MvpFeature {
    pub feature: String,
    pub priority: Level,
    pub effort: Level,
}

/// Fields produced by the three completion calls, derived strictly from the
/// market analysis plus the idea text. Never persisted on their own; they
/// only exist merged into the combined result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifacts {
    pub pitch: String,
    pub revenue_models: Vec<String>,
    pub mvp_design: String,
    pub mvp_features: Vec<MvpFeature>,
}
