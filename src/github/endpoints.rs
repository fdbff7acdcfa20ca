// Typed GitHub API calls.
// Key listings follow Link-header pagination; release lookups are single calls.

use async_trait::async_trait;

use crate::error::Result;

use super::GitHubSource;
use super::client::{GitHubClient, next_page};
use super::types::{KeysPage, PublicKey, Release};

impl GitHubClient {
    /// Fetch one page of a user's public keys.
    pub async fn list_keys(&mut self, user: &str, page: u32, per_page: u32) -> Result<KeysPage> {
        let query = [
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        let response = self.get(&format!("/users/{}/keys", user), &query).await?;
        let next_page = next_page(response.headers());
        let keys: Vec<PublicKey> = response.json().await?;
        Ok(KeysPage { keys, next_page })
    }

    /// Fetch the latest published release of a repository.
    pub async fn get_latest_release(&mut self, owner: &str, repo: &str) -> Result<Release> {
        let response = self
            .get(&format!("/repos/{}/{}/releases/latest", owner, repo), &[])
            .await?;
        let release: Release = response.json().await?;
        Ok(release)
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn list_keys_page(&mut self, user: &str, page: u32, per_page: u32) -> Result<KeysPage> {
        self.list_keys(user, page, per_page).await
    }

    async fn latest_release(&mut self, owner: &str, repo: &str) -> Result<Release> {
        self.get_latest_release(owner, repo).await
    }
}
