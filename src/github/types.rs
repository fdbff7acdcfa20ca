// GitHub API response types.
// Defines structs for deserializing GitHub REST API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A public SSH key attached to a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    pub id: u64,
    /// Key material in authorized_keys format.
    pub key: String,
    pub title: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub read_only: bool,
}

/// A tagged release of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    pub content_type: Option<String>,
    pub size: u64,
    #[serde(default)]
    pub download_count: u64,
    pub browser_download_url: String,
}

/// One page of a user's keys plus the cursor for the following page.
/// `next_page` is `None` on the final page.
#[derive(Debug, Clone, PartialEq)]
pub struct KeysPage {
    pub keys: Vec<PublicKey>,
    pub next_page: Option<u32>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_public_key() {
        let json = r#"{
            "id": 2,
            "key": "ssh-rsa AAA...",
            "title": "laptop",
            "created_at": "2020-06-11T21:31:57Z",
            "verified": true,
            "read_only": false
        }"#;

        let key: PublicKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.id, 2);
        assert_eq!(key.key, "ssh-rsa AAA...");
        assert_eq!(key.title.as_deref(), Some("laptop"));
        assert!(key.verified);
    }

    #[test]
    fn test_deserialize_public_key_minimal() {
        // Unauthenticated key listings omit most metadata fields.
        let json = r#"{"id": 7, "key": "ssh-ed25519 AAA..."}"#;

        let key: PublicKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.id, 7);
        assert!(key.title.is_none());
        assert!(key.created_at.is_none());
        assert!(!key.verified);
    }

    #[test]
    fn test_deserialize_release() {
        let json = r#"{
            "id": 1,
            "tag_name": "v1.0.0",
            "name": "v1.0.0",
            "draft": false,
            "prerelease": false,
            "created_at": "2013-02-27T19:35:32Z",
            "published_at": "2013-02-27T19:35:32Z",
            "html_url": "https://github.com/octocat/Hello-World/releases/v1.0.0",
            "assets": [{
                "id": 1,
                "name": "example.zip",
                "content_type": "application/zip",
                "size": 1024,
                "download_count": 42,
                "browser_download_url": "https://github.com/octocat/Hello-World/releases/download/v1.0.0/example.zip"
            }]
        }"#;

        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v1.0.0");
        assert!(!release.prerelease);
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].name, "example.zip");
        assert_eq!(release.assets[0].download_count, 42);
    }
}
