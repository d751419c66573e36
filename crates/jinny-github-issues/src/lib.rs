//! GitHub issue tracker client for the Jinny issue responder.
//!
//! Parses the configured repository URL once, then lists assigned issues,
//! lists issue comments, and posts replies through the GitHub REST API.

pub mod github_api_client;
pub mod issue_types;
pub mod repository_url;

pub use github_api_client::{
    GithubApiClient, GithubApiConfig, GithubApiError, IssueTracker, DEFAULT_GITHUB_API_BASE,
    OPEN_ISSUE_STATE,
};
pub use issue_types::{GithubIssue, GithubIssueComment, GithubUser};
pub use repository_url::{parse_repository_url, RepoRef, RepositoryUrlError};
