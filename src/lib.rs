// Memoized GitHub API lookups for dotfile manager template functions.
// Serves a user's public keys and a repository's latest release, cached
// per process so repeated template evaluations share one fetch.

pub mod error;
pub mod github;
pub mod template;

pub use error::{OctoError, Result};
pub use github::{ClientFactory, GitHubClient, GitHubSource, TokenFactory};
pub use template::{GitHubData, parse_user_repo};
