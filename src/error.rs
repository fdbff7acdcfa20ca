// Error types for octomemo lookups.
// Covers client construction, identifier parsing, and GitHub API failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OctoError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("Missing GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}: not a user/repo")]
    UserRepo(String),

    #[error("Key listing for {user} exceeded {pages} pages")]
    TooManyPages { user: String, pages: u32 },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, OctoError>;
