use anyhow::{Context, Result, anyhow};
use arena_core::{SemVer, grammar};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::resolver::ReleaseLookup;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// An `owner/name` repository on a hosting service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Extract `owner/name` from a URL whose path has exactly two segments.
    /// A trailing `.git` on the name is dropped.
    pub fn from_url(url: &Url) -> Option<Self> {
        let parts: Vec<&str> = url.path().split('/').filter(|p| !p.is_empty()).collect();
        let [owner, name] = parts.as_slice() else {
            return None;
        };
        Some(Self {
            owner: (*owner).to_string(),
            name: strip_git_suffix(name).to_string(),
        })
    }
}

fn strip_git_suffix(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match name.get(split..) {
        Some(suffix) if split > 0 && suffix.eq_ignore_ascii_case(".git") => &name[..split],
        _ => name,
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub API response for a release
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Client for querying the GitHub releases API
#[derive(Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                // the GitHub API rejects requests without a user-agent
                .user_agent(concat!("arena/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the tag name of the latest release
    pub async fn latest_release_tag(&self, repository: &Repository) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url, repository.owner, repository.name
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch latest release of '{repository}'"))?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(anyhow!("No release found for '{repository}'"));
            }
            return Err(anyhow!(
                "GitHub API request failed with status: {}",
                response.status()
            ));
        }

        let release: Release = response
            .json()
            .await
            .with_context(|| format!("Failed to parse release response for '{repository}'"))?;

        Ok(release.tag_name)
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, Duration::from_secs(2))
    }
}

impl ReleaseLookup for GithubClient {
    async fn latest_release(&self, repository: &Repository) -> Option<SemVer> {
        let tag = match self.latest_release_tag(repository).await {
            Ok(tag) => tag,
            Err(e) => {
                warn!(%repository, "release lookup failed: {e:#}");
                return None;
            }
        };
        // tags like `1.2.3-beta` still yield their leading version
        let version = grammar::version().run(&tag).result;
        debug!(%repository, tag, ?version, "latest release");
        version
    }
}
