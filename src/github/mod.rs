//! GitHub data sources and the leaderboard loader.

pub mod client;
pub mod error;
pub mod loader;

use crate::models::{CommitEntry, ContributorProfile, PullRequest, RepoMetadata};

pub use client::GitHubClient;
pub use error::FetchError;
pub use loader::{load_activity, load_leaderboard};

/// The repository endpoints the leaderboard is built from.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// Stars and forks.
    async fn repo_metadata(&self) -> Result<RepoMetadata, FetchError>;

    /// Contributor profiles (first page only).
    async fn contributors(&self) -> Result<Vec<ContributorProfile>, FetchError>;

    /// One page (1-based) of pull requests in any state.
    async fn pull_request_page(&self, page: u32) -> Result<Vec<PullRequest>, FetchError>;

    /// Total number of commits on the default branch.
    async fn commit_count(&self) -> Result<u64, FetchError>;

    /// The most recent `count` commits.
    async fn recent_commits(&self, count: usize) -> Result<Vec<CommitEntry>, FetchError>;
}
