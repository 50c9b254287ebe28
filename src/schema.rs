//! Structured-output schemas for the search and completion providers.
//!
//! Schemas are static data, not computed. The market-analysis schema exists
//! in two variants selected solely by the `personalized` flag; the
//! personalized one is composed from the base plus an extension block
//! (founder-fit fields, wider competitor range) so the two cannot drift.
//!
//! The Gemini schemas use the uppercase OpenAPI type names its
//! `responseSchema` field expects; the search schemas are plain JSON Schema.

use serde_json::{json, Value};

/// Schema given to the search provider. `personalized` must match whether a
/// founder profile was supplied with the request; the `personalizedstatus`
/// default baked into each variant is what keeps the flag in the eventual
/// merged result honest.
pub fn market_analysis_schema(personalized: bool) -> Value {
    let mut schema = base_market_schema();
    if personalized {
        apply_personalized_extension(&mut schema);
    }
    schema
}

fn base_market_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "A short, descriptive title for the startup idea." },
            "overview": { "type": "string", "description": "A concise, one-paragraph summary of the entire analysis, covering the idea's potential, market, and key challenges." },
            "score": { "type": "number", "description": "An extremely strict and realistic score from 1-10 for the idea's market demand and feasibility." },
            "feasibilityscore": { "type": "number", "description": "An extremely strict and realistic score from 1-10 for the idea's market competitiveness. With 10 being most competitive." },
            "summary": { "type": "string", "description": "A multi-source supported summary of the market demand." },
            "details": { "type": "string", "description": "An extremely detailed analysis of the market demand." },
            "marketDemand": {
                "type": "object",
                "properties": {
                    "painPoints": {
                        "type": "object",
                        "properties": {
                            "primaryPainPoint": { "type": "string", "description": "The most critical pain point the startup is solving. Based on research." },
                            "urgency": { "type": "string", "description": "How urgent is this problem for the target audience." },
                            "evidence": { "type": "string", "description": "Evidence supporting the existence and urgency of the pain point." }
                        },
                        "required": ["primaryPainPoint", "urgency", "evidence"]
                    },
                    "timingTrends": {
                        "type": "object",
                        "properties": {
                            "marketReadiness": { "type": "string", "description": "Is the market ready for this solution?" },
                            "emergingTrends": { "type": "string", "description": "What emerging trends support this idea?" },
                            "timingAssessment": { "type": "string", "description": "Overall assessment of the market timing." }
                        },
                        "required": ["marketReadiness", "emergingTrends", "timingAssessment"]
                    }
                },
                "required": ["painPoints", "timingTrends"]
            },
            "competitors": {
                "type": "array",
                "description": "A list of ten competitors that are similar to the user's startup idea in any aspect. Rank them by popularity, market share, and other relevant metrics.",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Name of the competitor." },
                        "description": { "type": "string", "description": "Description of the competitor's business." },
                        "popularity": { "type": "string", "enum": ["High", "Medium", "Low"], "description": "Popularity of the competitor." },
                        "locations": { "type": "string", "description": "Geographic locations where the competitor operates." },
                        "pricing": { "type": "string", "description": "The competitor's pricing model." },
                        "pros": { "type": "array", "items": { "type": "string" }, "description": "Strengths of the competitor." },
                        "weaknesses": { "type": "array", "items": { "type": "string" }, "description": "Weaknesses of the competitor." },
                        "competitiveness": { "type": "number", "description": "How competitive the competitor is in their market. With 10 being most competitive." }
                    },
                    "required": ["name", "description", "popularity", "locations", "pricing", "pros", "weaknesses"]
                }
            },
            "targetAudience": {
                "type": "array",
                "description": "A list of five target audience groups that the startup is targeting. For each group, provide a list of online communities/destinations that are specifically relevant to the target audience.",
                "items": {
                    "type": "object",
                    "properties": {
                        "group": { "type": "string", "description": "A specific target audience group." },
                        "onlineDestinations": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string", "description": "Name of the online community/destination." },
                                    "type": { "type": "string", "enum": ["Reddit", "Discord", "Forum", "Facebook Group", "Other"], "description": "Type of the online community." },
                                    "url": { "type": "string", "description": "URL to the online community." },
                                    "description": { "type": "string", "description": "Description of why this is a good place to find the target audience." }
                                },
                                "required": ["name", "type", "url", "description"]
                            }
                        }
                    },
                    "required": ["group", "onlineDestinations"]
                }
            },
            "personalizedstatus": { "type": "boolean", "default": false, "description": "Whether or not founder fit/user profile was given." }
        },
        "required": ["title", "overview", "score", "summary", "details", "marketDemand", "competitors", "targetAudience", "personalizedstatus"]
    })
}

/// Founder-fit fields and the personalized competitor range, layered over
/// the base schema.
fn apply_personalized_extension(schema: &mut Value) {
    let props = schema
        .get_mut("properties")
        .and_then(Value::as_object_mut)
        .expect("base schema has properties");

    props.insert(
        "title".into(),
        json!({ "type": "string", "description": "A short, catchy, descriptive title for the startup idea." }),
    );
    props.insert(
        "founderfit".into(),
        json!({
            "type": "string",
            "description": "Give direct feedback to the user about their fit for the business or product idea. Use second person ('you') instead of third person ('the founder'). Be concise, specific, and constructive. Do not use phrases like 'based on your profile' or refer to yourself as an AI."
        }),
    );
    props.insert(
        "founderfitscore".into(),
        json!({
            "type": "number",
            "description": "Assign a realistic and evidence-based score from 1 to 10 for the user's fit to the proposed business or product. A score of 10 should reflect deep domain expertise, execution history, or clear alignment with the business area. A score of 5 represents a partial or surface-level fit. Lower scores should be used where the user lacks relevant experience or there is little evidence of alignment. Do not assume optimism or give benefit of the doubt - score strictly based on demonstrated fit."
        }),
    );
    props.insert(
        "positivefounderfit".into(),
        json!({
            "type": "array",
            "description": "Three skills, experiences, or attributes the founder possesses that are advantageous in their market/business - based off of their profile attributes.",
            "items": {
                "type": "object",
                "properties": {
                    "skill": { "type": "string", "description": "The skill, experience, or attribute the founder possesses that is advantageous in their market/business." },
                    "description": { "type": "string", "description": "A short description of the skill, experience, or attribute and its relevance to the users business/market." }
                }
            }
        }),
    );
    props.insert(
        "negativefounderfit".into(),
        json!({
            "type": "array",
            "description": "Three skills, experiences, or attributes the founder lacks that are necessary in their market/business - but are absent from their profile details.",
            "items": {
                "type": "object",
                "properties": {
                    "skill": { "type": "string", "description": "The skill, experience, or attribute the founder lacks that is necessary in their market/business." },
                    "description": { "type": "string", "description": "A short description of the skill, experience, or attribute and its relevance to the users business/market." }
                }
            }
        }),
    );

    // Personalized analyses may surface niche competitors, so the count is
    // a range instead of a fixed ten.
    if let Some(desc) = props
        .get_mut("competitors")
        .and_then(|c| c.get_mut("description"))
    {
        *desc = json!("A list of five to twenty reasonable competitors that are similar to the user's startup idea. They can be specific and niche. Rank them by popularity, market share, and other relevant metrics.");
    }

    props.insert(
        "personalizedstatus".into(),
        json!({ "type": "boolean", "default": true, "description": "Whether or not founder fit/user profile was given." }),
    );
}

/// Gemini response schema for the pitch call.
pub fn pitch_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "pitch": {
                "type": "STRING",
                "description": "A compelling five-sentence pitch that follows these guidelines: 1. Hook: Start with a compelling statement that grabs attention 2. Value: Clearly state the core value proposition 3. Evidence: Support with market data and validation 4. Differentiator: Explain how it stands out from competitors 5. Call to Action: End with a clear next step or invitation"
            }
        },
        "propertyOrdering": ["pitch"]
    })
}

/// Gemini response schema for the revenue-models call.
pub fn revenue_models_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "revenueModels": {
                "type": "ARRAY",
                "items": {
                    "type": "STRING",
                    "description": "A concise description of how the startup could generate revenue"
                },
                "description": "3-5 potential revenue models that would be viable for this business"
            }
        },
        "propertyOrdering": ["revenueModels"]
    })
}

/// Gemini response schema for the MVP design and features call.
pub fn mvp_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "mvpDesign": {
                "type": "STRING",
                "description": "A specific, actionable suggestion for the MVP's overall design and approach"
            },
            "mvpFeatures": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "feature": { "type": "STRING", "description": "A specific feature for the MVP" },
                        "priority": { "type": "STRING", "description": "Priority of the feature (High, Medium, or Low)" },
                        "effort": { "type": "STRING", "description": "Estimated effort to implement the feature (High, Medium, or Low)" }
                    },
                    "propertyOrdering": ["feature", "priority", "effort"]
                },
                "description": "5-10 specific features with priority and effort levels based on a realistic timeline of the MVP"
            }
        },
        "propertyOrdering": ["mvpDesign", "mvpFeatures"]
    })
}
