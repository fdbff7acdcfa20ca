// Template-function lookups backed by per-process caches.
// Memoizes GitHub key and release queries across template evaluations.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{OctoError, Result};
use crate::github::{ClientFactory, GitHubSource, PublicKey, Release};

/// Page size for key listings.
const KEYS_PER_PAGE: u32 = 100;

/// Lookup caches, lazily populated and never invalidated.
#[derive(Default)]
struct Caches {
    keys: HashMap<String, Vec<PublicKey>>,
    latest_release: HashMap<String, HashMap<String, Release>>,
}

/// Memoized GitHub lookups for template functions.
///
/// One instance lives on the host's configuration object for the duration
/// of the process. A single lock guards both caches and is held across
/// network I/O, so concurrent callers never duplicate a fetch for the same
/// key; the cost is that a slow fetch stalls unrelated lookups.
pub struct GitHubData<F> {
    factory: F,
    caches: Mutex<Caches>,
    max_key_pages: Option<u32>,
}

impl<F: ClientFactory> GitHubData<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            caches: Mutex::new(Caches::default()),
            max_key_pages: None,
        }
    }

    /// Bound the number of pages a single key listing may fetch.
    /// Unbounded by default, following the API's own paging.
    pub fn with_max_key_pages(mut self, pages: u32) -> Self {
        self.max_key_pages = Some(pages);
        self
    }

    /// Look up a user's public keys, fetching them on first use.
    ///
    /// Pagination is drained completely before the result is cached, so a
    /// cache hit is always a full listing. Nothing is cached on failure;
    /// the next call retries from scratch.
    pub async fn user_keys(&self, user: &str) -> Result<Vec<PublicKey>> {
        let mut caches = self.caches.lock().await;

        if let Some(keys) = caches.keys.get(user) {
            debug!(user, "github keys cache hit");
            return Ok(keys.clone());
        }

        let mut client = self.factory.client()?;

        let mut all_keys = Vec::new();
        let mut page = 1;
        let mut fetched_pages = 0;
        loop {
            if let Some(limit) = self.max_key_pages {
                if fetched_pages >= limit {
                    warn!(user, limit, "github key listing exceeded page limit");
                    return Err(OctoError::TooManyPages {
                        user: user.to_string(),
                        pages: limit,
                    });
                }
            }

            debug!(user, page, "fetching github keys");
            let keys_page = match client.list_keys_page(user, page, KEYS_PER_PAGE).await {
                Ok(keys_page) => keys_page,
                Err(err) => {
                    warn!(user, page, %err, "github key fetch failed");
                    return Err(err);
                }
            };
            all_keys.extend(keys_page.keys);
            fetched_pages += 1;

            match keys_page.next_page {
                Some(next) => page = next,
                None => break,
            }
        }

        caches.keys.insert(user.to_string(), all_keys.clone());
        Ok(all_keys)
    }

    /// Look up the latest release for a "user/repo" identifier, fetching
    /// it on first use. Nothing is cached on failure.
    pub async fn latest_release(&self, user_repo: &str) -> Result<Release> {
        let mut caches = self.caches.lock().await;

        let (user, repo) = parse_user_repo(user_repo)?;

        if let Some(release) = caches
            .latest_release
            .get(user)
            .and_then(|repos| repos.get(repo))
        {
            debug!(user, repo, "github release cache hit");
            return Ok(release.clone());
        }

        let mut client = self.factory.client()?;

        debug!(user, repo, "fetching github latest release");
        let release = match client.latest_release(user, repo).await {
            Ok(release) => release,
            Err(err) => {
                warn!(user, repo, %err, "github latest release fetch failed");
                return Err(err);
            }
        };

        caches
            .latest_release
            .entry(user.to_string())
            .or_default()
            .insert(repo.to_string(), release.clone());

        Ok(release)
    }
}

/// Split a "user/repo" identifier at the first slash.
pub fn parse_user_repo(user_repo: &str) -> Result<(&str, &str)> {
    user_repo
        .split_once('/')
        .ok_or_else(|| OctoError::UserRepo(user_repo.to_string()))
}
