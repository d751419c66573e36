use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::issue_types::{GithubIssue, GithubIssueComment};
use crate::repository_url::{parse_repository_url, RepoRef, RepositoryUrlError};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const OPEN_ISSUE_STATE: &str = "open";

const ERROR_BODY_MAX_CHARS: usize = 800;

#[derive(Debug, Error)]
pub enum GithubApiError {
    #[error(transparent)]
    RepositoryUrl(#[from] RepositoryUrlError),
    #[error("invalid github authorization header")]
    InvalidToken,
    #[error("failed to create github api client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("github api {operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("github api {operation} failed with status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("failed to decode github {operation}: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
/// Issue operations the task processor needs from the hosting API.
pub trait IssueTracker: Send + Sync {
    async fn list_assigned_issues(
        &self,
        assignee: &str,
        state: &str,
    ) -> Result<Vec<GithubIssue>, GithubApiError>;

    async fn list_comments(
        &self,
        issue_number: u64,
    ) -> Result<Vec<GithubIssueComment>, GithubApiError>;

    async fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubIssueComment, GithubApiError>;
}

#[derive(Debug, Clone)]
pub struct GithubApiConfig {
    pub api_base: String,
    pub token: String,
    pub repository_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Clone)]
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
}

impl GithubApiClient {
    pub fn new(config: GithubApiConfig) -> Result<Self, GithubApiError> {
        let repo = parse_repository_url(&config.repository_url)?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("jinny-issue-responder"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", config.token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .map_err(|_| GithubApiError::InvalidToken)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .map_err(GithubApiError::Client)?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_base, self.repo.owner, self.repo.name
        )
    }

    fn comments_url(&self, issue_number: u64) -> String {
        format!("{}/{issue_number}/comments", self.issues_url())
    }

    async fn request_json<T>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GithubApiError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|source| GithubApiError::Transport { operation, source })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubApiError::Status {
                operation,
                status: status.as_u16(),
                body: truncate_for_error(&body, ERROR_BODY_MAX_CHARS),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|source| GithubApiError::Decode { operation, source })
    }
}

#[async_trait]
impl IssueTracker for GithubApiClient {
    async fn list_assigned_issues(
        &self,
        assignee: &str,
        state: &str,
    ) -> Result<Vec<GithubIssue>, GithubApiError> {
        let request = self
            .http
            .get(self.issues_url())
            .query(&[("state", state), ("assignee", assignee)]);
        self.request_json("list assigned issues", request).await
    }

    async fn list_comments(
        &self,
        issue_number: u64,
    ) -> Result<Vec<GithubIssueComment>, GithubApiError> {
        let request = self.http.get(self.comments_url(issue_number));
        self.request_json("list issue comments", request).await
    }

    async fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubIssueComment, GithubApiError> {
        let request = self
            .http
            .post(self.comments_url(issue_number))
            .json(&json!({ "body": body }));
        self.request_json("create issue comment", request).await
    }
}

fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
