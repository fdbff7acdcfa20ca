// GitHub API module.
// Provides the client, wire types, and the source seam used by the memo layer.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use types::*;

use async_trait::async_trait;

use crate::error::{OctoError, Result};

/// A source of GitHub data, one level above the raw HTTP transport.
///
/// The memo layer talks to this trait rather than to [`GitHubClient`]
/// directly, so lookups can be exercised against canned sources in tests.
#[async_trait]
pub trait GitHubSource: Send {
    /// Fetch one page of a user's public keys.
    async fn list_keys_page(&mut self, user: &str, page: u32, per_page: u32) -> Result<KeysPage>;

    /// Fetch the latest release of a repository.
    async fn latest_release(&mut self, owner: &str, repo: &str) -> Result<Release>;
}

/// Builds a fresh API source for each cache miss.
///
/// Mirrors the host configuration object handing out an HTTP transport on
/// demand; construction can fail when no usable transport is available.
pub trait ClientFactory: Send + Sync {
    type Client: GitHubSource;

    fn client(&self) -> Result<Self::Client>;
}

/// Factory for token-authenticated clients against a fixed API base URL.
pub struct TokenFactory {
    token: String,
    api_url: Option<String>,
}

impl TokenFactory {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: None,
        }
    }

    /// Read the token from the GITHUB_TOKEN environment variable.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| OctoError::MissingToken)?;
        Ok(Self::new(token))
    }

    /// Use a GitHub Enterprise API base URL instead of github.com.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }
}

impl ClientFactory for TokenFactory {
    type Client = GitHubClient;

    fn client(&self) -> Result<GitHubClient> {
        let client = GitHubClient::new(&self.token)?;
        Ok(match &self.api_url {
            Some(url) => client.with_api_url(url),
            None => client,
        })
    }
}
