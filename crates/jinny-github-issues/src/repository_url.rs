use thiserror::Error;

const GITHUB_URL_PREFIX: &str = "https://github.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid repository url '{url}': expected https://github.com/<owner>/<repo>")]
pub struct RepositoryUrlError {
    pub url: String,
}

/// Parses `https://github.com/<owner>/<repo>[.git]` into its owner and repository name.
pub fn parse_repository_url(raw: &str) -> Result<RepoRef, RepositoryUrlError> {
    let invalid = || RepositoryUrlError {
        url: raw.to_string(),
    };
    let path = raw
        .trim()
        .strip_prefix(GITHUB_URL_PREFIX)
        .ok_or_else(invalid)?
        .trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let (owner, name) = path.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }
    Ok(RepoRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
