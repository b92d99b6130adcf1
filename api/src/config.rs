use std::env;
use std::time::Duration;

/// Feature switches for the optional language-model paths
///
/// Passed explicitly to the services that consult them so both states can be
/// exercised without touching the process environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Enrich activity summaries with a model-derived category label
    pub llm_activity: bool,
    /// Try model-based report triage before the rule-based fallback
    pub llm_triage: bool,
}

#[derive(Clone)]
pub struct Config {
    pub environment: String,
    /// Identifier reported by the health endpoint
    pub instance_id: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_base: String,
    /// Upper bound for a single chat-completion call
    pub llm_timeout: Duration,
    pub mastodon_access_token: String,
    pub mastodon_api_base: String,
    pub mastodon_timeout: Duration,
    pub flags: FeatureFlags,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            instance_id: env::var("INSTANCE_ID")
                .unwrap_or_else(|_| uuid::Uuid::new_v4().to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            llm_timeout: Duration::from_secs(secs_var("LLM_TIMEOUT_SECS", 30)),
            mastodon_access_token: env::var("MASTODON_ACCESS_TOKEN").unwrap_or_default(),
            mastodon_api_base: env::var("MASTODON_API_BASE")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "https://stranger.social".to_string()),
            mastodon_timeout: Duration::from_secs(secs_var("MASTODON_TIMEOUT_SECS", 10)),
            flags: FeatureFlags {
                llm_activity: flag_var("USE_LLM_ACTIVITY"),
                llm_triage: flag_var("USE_LLM_TRIAGE"),
            },
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

fn flag_var(name: &str) -> bool {
    env::var(name).map(|v| parse_flag(&v)).unwrap_or(false)
}

fn secs_var(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

/// Only a case-insensitive "true" enables a flag
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
