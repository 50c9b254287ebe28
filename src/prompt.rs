//! Prompt construction for the search and completion providers.
//!
//! Pure string templating: no I/O, no randomness. Same inputs always
//! produce the same prompt, and every interpolation site has a fallback
//! ("N/A" / "Not specified") so a sparse profile or analysis never leaks
//! a missing-value marker into provider input.

use crate::types::{FounderProfile, MarketAnalysis};

const NOT_SPECIFIED: &str = "Not specified";
const NA: &str = "N/A";

/// Which downstream call a prompt is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    MarketSearch,
    Pitch,
    RevenueModels,
    MvpFeatures,
}

/// Build the prompt for `kind`. `analysis` is required for the three
/// artifact prompts and ignored for the market search; a missing analysis
/// degrades to fallback text rather than failing.
pub fn build_prompt(
    kind: PromptKind,
    idea_text: &str,
    analysis: Option<&MarketAnalysis>,
    profile: Option<&FounderProfile>,
) -> String {
    let fallback = MarketAnalysis::default();
    let analysis = analysis.unwrap_or(&fallback);
    match kind {
        PromptKind::MarketSearch => market_search_prompt(idea_text, profile),
        PromptKind::Pitch => pitch_prompt(idea_text, analysis, profile),
        PromptKind::RevenueModels => revenue_models_prompt(idea_text, analysis, profile),
        PromptKind::MvpFeatures => mvp_features_prompt(idea_text, analysis, profile),
    }
}

fn field<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Query sent to the search provider. When a profile is supplied the
/// personal/startup background block is appended verbatim; otherwise the
/// prompt carries the idea text alone.
pub fn market_search_prompt(idea_text: &str, profile: Option<&FounderProfile>) -> String {
    let mut context = String::new();
    if let Some(p) = profile {
        let name = match (field(&p.first_name, NA), field(&p.last_name, "")) {
            (first, "") => first.to_string(),
            (first, last) => format!("{first} {last}"),
        };
        let location = p
            .location
            .as_ref()
            .and_then(|l| l.display())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        context = format!(
            "\n\nHere is my personal and startup background. Use this information to find results for maximum relevance and specificity.\n\n\
             - Name: {name}\n\
             - Location: {location}\n\
             - Background/Field of Study: {background}\n\
             - Technical Skills: {technical_skills}\n\
             - Previous Startup Experience: {previous_experience}\n\
             - Startup Name: {startup_name}\n\
             - Description: {startup_description}\n\
             - Target Industry: {industry}\n\
             - Target Customer: {customer_type}\n\
             - Current Stage: {stage}\n\
             - Team Size: {team_size}\n\
             - Tech Stack/AI Models: {tech_stack}\n\
             - Funding Raised: {funding}\n\n\
             Please place heavy emphasis and consider this rich context when finding results for analyzing my startup idea. \
             Consider local market conditions, my demonstrated skills, competitive landscape within my idea's industry, \
             and the feasibility of my idea given their current stage and team size. \
             Avoid having redundant information across multiple description fields.",
            background = field(&p.background, NA),
            technical_skills = field(&p.technical_skills, NA),
            previous_experience = field(&p.previous_experience, NA),
            startup_name = field(&p.startup_name, NA),
            startup_description = field(&p.startup_description, NA),
            industry = field(&p.industry, NA),
            customer_type = field(&p.customer_type, NA),
            stage = field(&p.stage, NA),
            team_size = field(&p.team_size, NA),
            tech_stack = field(&p.tech_stack, NA),
            funding = field(&p.funding, NA),
        );
    }

    format!(
        "Based on important market factors, how valid is my startup idea? \
         Here's my startup idea: {idea_text}{context}"
    )
}

/// Founder-context block shared by the artifact prompts. Empty when no
/// profile was supplied, so the block disappears from the prompt entirely.
fn founder_context(profile: Option<&FounderProfile>, fields: &[(&str, fn(&FounderProfile) -> &Option<String>)]) -> String {
    let Some(p) = profile else {
        return String::new();
    };
    let mut block = String::from("\n\nFounder Context:");
    for (label, getter) in fields {
        block.push_str(&format!("\n- {label}: {}", field(getter(p), NOT_SPECIFIED)));
    }
    block
}

/// Prompt for the investor pitch completion call.
pub fn pitch_prompt(
    idea_text: &str,
    analysis: &MarketAnalysis,
    profile: Option<&FounderProfile>,
) -> String {
    let context = founder_context(
        profile,
        &[
            ("Background", |p| &p.background),
            ("Technical Skills", |p| &p.technical_skills),
            ("Previous Experience", |p| &p.previous_experience),
            ("Industry", |p| &p.industry),
            ("Stage", |p| &p.stage),
        ],
    );

    format!(
        "Based on the following startup idea and market analysis, create a compelling five-sentence pitch that follows these guidelines:\n\n\
         1. Hook: Start with a compelling statement that grabs attention\n\
         2. Value: Clearly state the core value proposition\n\
         3. Evidence: Support with market data and validation\n\
         4. Differentiator: Explain how it stands out from competitors\n\
         5. Call to Action: End with a clear next step or invitation\n\n\
         Startup Idea: {idea_text}\n\n\
         Market Analysis Context:\n\
         - Market Demand Score: {score}/10\n\
         - Market Summary: {summary}\n\
         - Primary Pain Point: {pain_point}\n\
         - Market Readiness: {readiness}{context}\n\n\
         Create a professional, investor-ready pitch that incorporates the market insights and founder context.",
        score = analysis.display_at(&["score"], NA),
        summary = analysis.display_at(&["summary"], NA),
        pain_point = analysis.display_at(&["marketDemand", "painPoints", "primaryPainPoint"], NA),
        readiness = analysis.display_at(&["marketDemand", "timingTrends", "marketReadiness"], NA),
    )
}

/// Prompt for the revenue-model suggestions completion call.
pub fn revenue_models_prompt(
    idea_text: &str,
    analysis: &MarketAnalysis,
    profile: Option<&FounderProfile>,
) -> String {
    let context = founder_context(
        profile,
        &[
            ("Industry", |p| &p.industry),
            ("Stage", |p| &p.stage),
            ("Team Size", |p| &p.team_size),
            ("Funding", |p| &p.funding),
        ],
    );

    format!(
        "Based on the following startup idea and market analysis, suggest 3-5 potential revenue models that would be viable for this business.\n\n\
         Startup Idea: {idea_text}\n\n\
         Market Analysis:\n\
         - Target Audience: {audience}\n\
         - Market Demand Score: {score}/10\n\
         - Industry Context: {trends}{context}\n\n\
         Provide specific, actionable revenue model suggestions that align with the market opportunity and business model. \
         Each suggestion should be a concise description of how the startup could generate revenue.",
        audience = analysis
            .audience_groups()
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        score = analysis.display_at(&["score"], NA),
        trends = analysis.display_at(&["marketDemand", "timingTrends", "emergingTrends"], NA),
    )
}

/// Prompt for the MVP design and feature-planning completion call.
pub fn mvp_features_prompt(
    idea_text: &str,
    analysis: &MarketAnalysis,
    profile: Option<&FounderProfile>,
) -> String {
    let context = founder_context(
        profile,
        &[
            ("Technical Skills", |p| &p.technical_skills),
            ("Tech Stack", |p| &p.tech_stack),
            ("Team Size", |p| &p.team_size),
            ("Stage", |p| &p.stage),
        ],
    );

    format!(
        "Based on the following startup idea and market analysis, design an MVP (Minimum Viable Product) with specific features.\n\n\
         Startup Idea: {idea_text}\n\n\
         Market Analysis:\n\
         - Primary Pain Point: {pain_point}\n\
         - Target Audience: {audience}\n\
         - Market Demand Score: {score}/10{context}\n\n\
         Provide a specific, actionable suggestion for the MVP's overall design and approach, along with 5-8 specific features \
         with their priority (High/Medium/Low) and implementation effort (High/Medium/Low). \
         Focus on features that directly address the identified pain points and can be validated with the target audience.",
        pain_point = analysis.display_at(&["marketDemand", "painPoints", "primaryPainPoint"], NA),
        audience = analysis
            .audience_groups()
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        score = analysis.display_at(&["score"], NA),
    )
}
