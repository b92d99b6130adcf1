//! Schema handlers
//!
//! Describe the callable operations and the agent itself so a coordinating
//! agent can discover what this service does.

use axum::{extract::State, Json};
use schemars::{schema_for, JsonSchema};
use serde::Serialize;

use crate::config::FeatureFlags;
use crate::domain::entities::{Report, UserProfile};
use crate::handlers::users::{ActivityAutoRequest, ActivityRequest, UserIdentifier};
use crate::AppState;

pub const AGENT_NAME: &str = "nagatha-mastodon-submind";
pub const AGENT_VERSION: &str = "0.1.0";

/// A callable operation with JSON-Schema parameters
#[derive(Debug, Serialize)]
pub struct FunctionDef {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub agent_name: &'static str,
    pub version: &'static str,
    pub capabilities: Vec<&'static str>,
    pub description: &'static str,
    /// Model used for evaluation and optional enrichment
    pub model: String,
    pub features: Features,
}

/// Which optional model paths are switched on
#[derive(Debug, Serialize)]
pub struct Features {
    pub llm_activity: bool,
    pub llm_triage: bool,
}

impl From<FeatureFlags> for Features {
    fn from(flags: FeatureFlags) -> Self {
        Self {
            llm_activity: flags.llm_activity,
            llm_triage: flags.llm_triage,
        }
    }
}

fn function<T: JsonSchema>(name: &'static str, description: &'static str) -> FunctionDef {
    FunctionDef {
        name,
        description,
        parameters: schema_for!(T).to_value(),
    }
}

/// Operations that take a JSON body
pub fn function_defs() -> Vec<FunctionDef> {
    vec![
        function::<UserProfile>("evaluate_user", "Evaluate user profile"),
        function::<UserIdentifier>(
            "evaluate_user_auto",
            "Evaluate user profile (auto-fetch from Mastodon)",
        ),
        function::<ActivityRequest>("user_activity_summary", "Summarize user activity"),
        function::<ActivityAutoRequest>(
            "user_activity_summary_auto",
            "Summarize user activity (auto-fetch from Mastodon)",
        ),
        function::<Report>("submit_report", "Submit a user/content report for triage"),
    ]
}

/// GET /schema/functions
pub async fn functions() -> Json<Vec<FunctionDef>> {
    Json(function_defs())
}

/// GET /schema/capabilities
pub async fn capabilities(State(state): State<AppState>) -> Json<Capabilities> {
    Json(Capabilities {
        agent_name: AGENT_NAME,
        version: AGENT_VERSION,
        capabilities: vec![
            "Evaluate Mastodon users for moderation",
            "Analyze user activity for engagement and behavioral patterns",
            "Ingest and triage abuse reports using LLM classification",
        ],
        description: "This is a sub-agent in the Nagatha AI system. It autonomously moderates \
                      the Stranger Social Mastodon server and can be invoked by higher-level \
                      agents via structured REST APIs or OpenAI-compatible function calling.",
        model: state.config.openai_model.clone(),
        features: state.config.flags.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_parameters_are_object_schemas() {
        for def in function_defs() {
            assert_eq!(def.parameters["type"], "object", "{}", def.name);
            assert!(def.parameters["properties"].is_object(), "{}", def.name);
        }
    }

    #[test]
    fn report_schema_requires_reason() {
        let defs = function_defs();
        let report = defs.iter().find(|d| d.name == "submit_report").unwrap();
        let required = report.parameters["required"].as_array().unwrap();
        assert!(required.iter().any(|r| r == "reason"));
        assert!(required.iter().any(|r| r == "username"));
    }
}
