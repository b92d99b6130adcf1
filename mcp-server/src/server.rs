//! Moderation MCP server implementation
//!
//! Each tool calls the moderation API and renders the JSON result as
//! readable text for the calling model.

use crate::client::{
    ActivitySummary, AgentCapabilities, Evaluation, PostRecord, ProfileRecord, ReportReason,
    ReportRecord, SubmindClient, TriageResult,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParams, RawResource, ReadResourceRequestParams, ReadResourceResult,
        Resource, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Longest post excerpt shown by `get_user_posts`
const EXCERPT_CHARS: usize = 200;

const SERVER_INFO_URI: &str = "file://server-info";
const CAPABILITIES_URI: &str = "file://capabilities";

/// Moderation MCP Server
#[derive(Clone)]
pub struct SubmindServer {
    client: SubmindClient,
    tool_router: ToolRouter<Self>,
}

impl SubmindServer {
    pub fn from_env() -> Result<Self> {
        let client = SubmindClient::from_env()?;
        Ok(Self::new(client))
    }

    pub fn new(client: SubmindClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// --- Tool Parameter Types ---

fn default_limit() -> u32 {
    5
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EvaluateProfileParams {
    /// Mastodon username (with or without @domain)
    pub username: String,
    /// Profile bio/description
    pub bio: String,
    /// Number of followers
    pub followers_count: u64,
    /// Number of accounts followed
    pub following_count: u64,
    /// Total number of posts
    pub posts_count: u64,
    /// Account creation time (defaults to now)
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UsernameParams {
    /// Mastodon username (with or without @domain)
    pub username: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PostParams {
    pub content: String,
    /// RFC 3339 timestamp
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: u64,
    #[serde(default)]
    pub reblogs: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ActivityParams {
    /// Mastodon username
    pub username: String,
    /// Recent posts to analyze
    pub recent_posts: Vec<PostParams>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LimitedUsernameParams {
    /// Mastodon username (with or without @domain)
    pub username: String,
    /// Number of recent posts (default: 5)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TriageParams {
    /// Username of the reporter
    pub reporter: String,
    /// Username being reported
    pub username: String,
    /// Reason for the report
    pub reason: ReportReason,
    /// Additional comment about the report
    #[serde(default)]
    pub comment: Option<String>,
    /// Excerpt of the problematic content
    #[serde(default)]
    pub post_excerpt: Option<String>,
}

fn strip_at(username: &str) -> &str {
    username.strip_prefix('@').unwrap_or(username)
}

impl From<EvaluateProfileParams> for ProfileRecord {
    fn from(p: EvaluateProfileParams) -> Self {
        ProfileRecord {
            username: p.username,
            bio: p.bio,
            follower_count: p.followers_count,
            following_count: p.following_count,
            statuses_count: p.posts_count,
            created_at: p.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl From<PostParams> for PostRecord {
    fn from(p: PostParams) -> Self {
        PostRecord {
            content: p.content,
            created_at: p.created_at,
            favorites: p.favorites,
            reblogs: p.reblogs,
        }
    }
}

impl From<TriageParams> for ReportRecord {
    fn from(p: TriageParams) -> Self {
        ReportRecord {
            reporter: p.reporter,
            username: p.username,
            reason: p.reason,
            comment: p.comment,
            post_excerpt: p.post_excerpt,
            created_at: Utc::now(),
        }
    }
}

// --- Text Rendering ---

fn format_evaluation(heading: &str, result: &Evaluation) -> String {
    format!(
        "{}:\nRisk Score: {}\nRecommendation: {}\nSummary: {}",
        heading, result.risk_score, result.recommendation, result.summary
    )
}

fn format_activity(heading: &str, result: &ActivitySummary) -> String {
    format!(
        "{}:\nPost Count: {}\nAverage Engagement: {} favorites, {} reblogs\nPosting Frequency: {}\nCategory: {}\nSummary: {}",
        heading,
        result.post_count,
        result.avg_engagement.favorites,
        result.avg_engagement.reblogs,
        result.posting_frequency,
        result.category.as_deref().unwrap_or("Not categorized"),
        result.summary
    )
}

fn format_triage(result: &TriageResult) -> String {
    format!(
        "Report Triage Results:\nTriage Level: {}\nRecommended Action: {}\nSummary: {}",
        result.triage_level, result.action, result.summary
    )
}

fn format_profile(username: &str, profile: &ProfileRecord) -> String {
    format!(
        "Profile for @{}:\nBio: {}\nFollowers: {}\nFollowing: {}\nPosts: {}\nCreated: {}",
        username,
        profile.bio,
        profile.follower_count,
        profile.following_count,
        profile.statuses_count,
        profile.created_at.to_rfc3339()
    )
}

fn format_posts(username: &str, posts: &[PostRecord]) -> String {
    let mut text = format!(
        "Recent posts for @{} (showing {} posts):\n\n",
        username,
        posts.len()
    );
    for (i, post) in posts.iter().enumerate() {
        let excerpt: String = post.content.chars().take(EXCERPT_CHARS).collect();
        let ellipsis = if post.content.chars().count() > EXCERPT_CHARS {
            "..."
        } else {
            ""
        };
        text.push_str(&format!(
            "{}. {}{}\n   Posted: {}\n   Engagement: {} favorites, {} reblogs\n\n",
            i + 1,
            excerpt,
            ellipsis,
            post.created_at.to_rfc3339(),
            post.favorites,
            post.reblogs
        ));
    }
    text
}

fn lookup_error(username: &str, e: &anyhow::Error) -> String {
    format!(
        "Error fetching data for @{}: {}\n\nPlease ensure:\n- MASTODON_ACCESS_TOKEN is set\n- MASTODON_API_BASE is set to your instance URL\n- The username exists on that instance",
        username, e
    )
}

#[tool_router]
impl SubmindServer {
    // === Evaluation ===

    #[tool(
        description = "Evaluate a Mastodon user's profile for moderation risk and engagement potential"
    )]
    async fn evaluate_user_profile(
        &self,
        params: Parameters<EvaluateProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let profile = ProfileRecord::from(params.0);
        match self.client.evaluate(&profile).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(
                format_evaluation("User Evaluation Results", &result),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(description = "Auto-fetch and evaluate a Mastodon user's profile from their username")]
    async fn evaluate_user_auto(
        &self,
        params: Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let username = strip_at(&params.0.username);
        match self.client.evaluate_auto(username).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(
                format_evaluation(&format!("User Evaluation Results for @{}", username), &result),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(lookup_error(
                username, &e,
            ))])),
        }
    }

    // === Activity ===

    #[tool(description = "Analyze a user's recent posting activity and engagement patterns")]
    async fn analyze_user_activity(
        &self,
        params: Parameters<ActivityParams>,
    ) -> Result<CallToolResult, McpError> {
        let ActivityParams {
            username,
            recent_posts,
        } = params.0;
        let posts: Vec<PostRecord> = recent_posts.into_iter().map(PostRecord::from).collect();
        match self.client.analyze_activity(&username, &posts).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(
                format_activity("User Activity Analysis", &result),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(description = "Auto-fetch and analyze a Mastodon user's recent activity")]
    async fn analyze_user_activity_auto(
        &self,
        params: Parameters<LimitedUsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let username = strip_at(&params.0.username);
        match self
            .client
            .analyze_activity_auto(username, params.0.limit)
            .await
        {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(
                format_activity(&format!("User Activity Analysis for @{}", username), &result),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(lookup_error(
                username, &e,
            ))])),
        }
    }

    // === Reports ===

    #[tool(description = "Triage a user report for moderation action")]
    async fn triage_user_report(
        &self,
        params: Parameters<TriageParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = ReportRecord::from(params.0);
        match self.client.triage(&report).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(format_triage(
                &result,
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    // === Data Retrieval ===

    #[tool(description = "Fetch a Mastodon user's profile information")]
    async fn get_user_profile(
        &self,
        params: Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let username = strip_at(&params.0.username);
        match self.client.profile(username).await {
            Ok(profile) => Ok(CallToolResult::success(vec![Content::text(
                format_profile(username, &profile),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(lookup_error(
                username, &e,
            ))])),
        }
    }

    #[tool(description = "Fetch a Mastodon user's recent posts")]
    async fn get_user_posts(
        &self,
        params: Parameters<LimitedUsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let username = strip_at(&params.0.username);
        match self.client.posts(username, params.0.limit).await {
            Ok(posts) => Ok(CallToolResult::success(vec![Content::text(format_posts(
                username, &posts,
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(lookup_error(
                username, &e,
            ))])),
        }
    }
}

// --- Resources ---

fn resource(uri: &str, name: &str, description: &str, mime_type: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.to_string());
    raw.mime_type = Some(mime_type.to_string());
    raw.no_annotation()
}

fn resource_list() -> Vec<Resource> {
    vec![
        resource(
            SERVER_INFO_URI,
            "Server Information",
            "Information about the Nagatha Mastodon moderation server",
            "text/plain",
        ),
        resource(
            CAPABILITIES_URI,
            "Server Capabilities",
            "Available moderation and analysis capabilities",
            "application/json",
        ),
    ]
}

/// Render a resource body from the API's live capabilities
fn render_resource(uri: &str, caps: &AgentCapabilities) -> Result<ResourceContents, McpError> {
    match uri.trim_end_matches('/') {
        SERVER_INFO_URI => Ok(ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some("text/plain".to_string()),
            text: format!(
                "Nagatha Mastodon Moderation Server ({} {})\n\n\
                 This MCP server provides tools for Mastodon content moderation including:\n\
                 - User profile evaluation and risk assessment\n\
                 - Activity pattern analysis\n\
                 - Report triage and moderation recommendations\n\
                 - Profile and post data retrieval\n\n\
                 Configuration:\n\
                 - OpenAI Model: {}\n\
                 - LLM Activity Analysis: {}\n\
                 - LLM Report Triage: {}\n",
                caps.agent_name,
                caps.version,
                caps.model,
                caps.features.llm_activity,
                caps.features.llm_triage,
            ),
            meta: None,
        }),
        CAPABILITIES_URI => {
            let body = serde_json::json!({
                "user_evaluation": {
                    "description": "Evaluate user profiles for moderation risk",
                    "supports_auto_fetch": true,
                    "uses_llm": true,
                },
                "activity_analysis": {
                    "description": "Analyze user posting patterns and engagement",
                    "supports_auto_fetch": true,
                    "uses_llm": caps.features.llm_activity,
                },
                "report_triage": {
                    "description": "Triage user reports for moderation action",
                    "uses_llm": caps.features.llm_triage,
                },
                "data_retrieval": {
                    "description": "Fetch user profiles and posts from Mastodon",
                    "mastodon_api": true,
                },
            });
            let text = serde_json::to_string_pretty(&body)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some("application/json".to_string()),
                text,
                meta: None,
            })
        }
        other => Err(McpError::resource_not_found(
            format!("Unknown resource: {}", other),
            None,
        )),
    }
}

#[tool_handler]
impl ServerHandler for SubmindServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "nagatha-mastodon".into(),
                title: Some("Mastodon Moderation MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Mastodon moderation sub-agent

TOOLS:
- 'evaluate_user_profile' - Risk-score a profile you supply
- 'evaluate_user_auto' - Fetch a profile from the instance and risk-score it
- 'analyze_user_activity' - Summarize engagement for posts you supply
- 'analyze_user_activity_auto' - Fetch recent posts and summarize them
- 'triage_user_report' - Triage a report (abuse, spam, harassment, impersonation, other)
- 'get_user_profile' / 'get_user_posts' - Raw account data

Usernames may be given as user, @user or @user@domain.

RESOURCES:
- 'file://server-info' - Model and feature switches in effect
- 'file://capabilities' - Capability groups as JSON"#
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resource_list()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri.trim_end_matches('/');
        if !resource_list().iter().any(|r| r.raw.uri == uri) {
            return Err(McpError::resource_not_found(
                format!("Unknown resource: {}", request.uri),
                None,
            ));
        }
        let caps = self
            .client
            .capabilities()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(ReadResourceResult {
            contents: vec![render_resource(&request.uri, &caps)?],
        })
    }
}
