//! Mastodon API client implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::{AdminReport, InstanceInfo, Post, UserProfile};
use crate::domain::ports::MastodonClient;
use crate::domain::username::{account_query, local_domain};
use crate::error::MastodonError;

/// Implementation of the Mastodon API client
///
/// Holds only the base URL and credentials, so one instance is shared by
/// all requests.
pub struct MastodonClientImpl {
    http: Client,
    base_url: String,
    access_token: String,
    domain: String,
}

impl MastodonClientImpl {
    pub fn new(
        base_url: String,
        access_token: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let domain = local_domain(&base_url);

        Ok(Self {
            http,
            base_url,
            access_token,
            domain,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET an endpoint that needs the access token
    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, MastodonError> {
        if self.access_token.is_empty() {
            return Err(MastodonError::NotConfigured);
        }

        let response = self
            .http
            .get(self.api_url(path))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        self.handle_response(path, response).await
    }

    /// GET a public endpoint, sending the token only when one is configured
    async fn get_public<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
    ) -> Result<T, MastodonError> {
        let mut request = self.http.get(self.api_url(path));
        if !self.access_token.is_empty() {
            request = request.bearer_auth(&self.access_token);
        }

        let response = request.send().await?;
        self.handle_response(path, response).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, MastodonError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| MastodonError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(MastodonError::Unauthorized)
        } else if status.as_u16() == 404 {
            Err(MastodonError::NotFound(path.to_string()))
        } else if status.as_u16() == 429 {
            Err(MastodonError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(MastodonError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Resolve a username to the single matching account on this server
    async fn lookup_account(&self, username: &str) -> Result<AccountResponse, MastodonError> {
        let query = account_query(username, &self.domain);
        let accounts: Vec<AccountResponse> = self
            .get(&format!(
                "/api/v1/accounts/search?q={}&limit=1",
                encode(&query)
            ))
            .await?;

        accounts
            .into_iter()
            .next()
            .ok_or_else(|| MastodonError::NotFound(username.to_string()))
    }
}

/// Response types from the Mastodon API
#[derive(Deserialize)]
struct AccountResponse {
    id: String,
    acct: String,
    #[serde(default)]
    note: String,
    #[serde(default)]
    followers_count: u64,
    #[serde(default)]
    following_count: u64,
    #[serde(default)]
    statuses_count: u64,
    created_at: DateTime<Utc>,
}

impl From<AccountResponse> for UserProfile {
    fn from(r: AccountResponse) -> Self {
        UserProfile {
            username: r.acct,
            bio: r.note,
            follower_count: r.followers_count,
            following_count: r.following_count,
            statuses_count: r.statuses_count,
            created_at: r.created_at,
        }
    }
}

#[derive(Deserialize)]
struct StatusResponse {
    #[serde(default)]
    content: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    favourites_count: u64,
    #[serde(default)]
    reblogs_count: u64,
}

impl From<StatusResponse> for Post {
    fn from(r: StatusResponse) -> Self {
        Post {
            content: r.content,
            created_at: r.created_at,
            favorites: r.favourites_count,
            reblogs: r.reblogs_count,
        }
    }
}

#[async_trait]
impl MastodonClient for MastodonClientImpl {
    async fn fetch_profile(&self, username: &str) -> Result<UserProfile, MastodonError> {
        let account = self.lookup_account(username).await?;
        Ok(account.into())
    }

    async fn fetch_recent_posts(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Post>, MastodonError> {
        let account = self.lookup_account(username).await?;
        let statuses: Vec<StatusResponse> = self
            .get(&format!(
                "/api/v1/accounts/{}/statuses?limit={}",
                encode(&account.id),
                limit
            ))
            .await?;

        Ok(statuses.into_iter().map(Post::from).collect())
    }

    async fn instance_peers(&self) -> Result<Vec<String>, MastodonError> {
        self.get_public("/api/v1/instance/peers").await
    }

    async fn admin_instances(&self) -> Result<Vec<InstanceInfo>, MastodonError> {
        self.get("/api/v1/admin/instances").await
    }

    async fn admin_reports(&self) -> Result<Vec<AdminReport>, MastodonError> {
        self.get("/api/v1/admin/reports").await
    }

    async fn admin_measures(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<serde_json::Value, MastodonError> {
        let start_at = start_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let end_at = end_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.get(&format!(
            "/api/v1/admin/measures?start_at={}&end_at={}",
            encode(&start_at),
            encode(&end_at)
        ))
        .await
    }
}
