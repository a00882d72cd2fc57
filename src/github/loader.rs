//! Loads a leaderboard snapshot from a [`DataSource`].
//!
//! Repository metadata, contributors and the commit count are fetched
//! concurrently and joined all-or-nothing. Pull requests are then paged
//! sequentially. A failed commit count degrades to a placeholder instead of
//! failing the load.

use super::error::{FetchError, LoadError};
use super::DataSource;
use crate::analysis::build_leaderboard;
use crate::config::Config;
use crate::models::{ActivityItem, CommitCount, Leaderboard, PullRequest};
use futures::future::try_join3;
use tracing::{debug, info, warn};

/// Fetch everything and build the ranked snapshot.
pub async fn load_leaderboard<S: DataSource>(
    source: &S,
    config: &Config,
) -> Result<Leaderboard, LoadError> {
    let commits = async {
        let count = match source.commit_count().await {
            Ok(total) => CommitCount::Exact(total),
            Err(e) => {
                warn!("Failed to fetch total commits: {}", e);
                CommitCount::Placeholder
            }
        };
        Ok::<_, FetchError>(count)
    };

    let (repo, profiles, commits) =
        try_join3(source.repo_metadata(), source.contributors(), commits).await?;
    info!("Fetched {} contributor profiles", profiles.len());

    let pulls = fetch_all_pulls(source, config.fetch.max_pr_pages).await;
    info!("Fetched {} pull requests", pulls.len());

    Ok(build_leaderboard(
        &repo,
        &profiles,
        &pulls,
        commits,
        &config.repository.owner,
        &config.scoring,
    ))
}

/// Walk pull-request pages 1..=max_pages, one at a time.
///
/// Stops at the first empty page or failed request and keeps what was
/// gathered so far.
pub async fn fetch_all_pulls<S: DataSource>(source: &S, max_pages: u32) -> Vec<PullRequest> {
    let mut pulls = Vec::new();

    for page in 1..=max_pages {
        match source.pull_request_page(page).await {
            Ok(batch) if batch.is_empty() => {
                debug!("Pull request page {} is empty, stopping", page);
                break;
            }
            Ok(batch) => {
                debug!("Pull request page {}: {} entries", page, batch.len());
                pulls.extend(batch);
            }
            Err(e) => {
                warn!("Stopped paging pull requests at page {}: {}", page, e);
                break;
            }
        }
    }

    pulls
}

/// Fetch the recent-activity feed. Failures are logged and yield `None`.
pub async fn load_activity<S: DataSource>(source: &S, count: usize) -> Option<Vec<ActivityItem>> {
    match source.recent_commits(count).await {
        Ok(commits) => Some(
            commits
                .into_iter()
                .filter_map(ActivityItem::from_commit)
                .collect(),
        ),
        Err(e) => {
            warn!("Failed to fetch recent activity: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CommitAuthor, CommitDetail, CommitEntry, ContributorProfile, Label, PullRequestUser,
        RepoMetadata,
    };
    use chrono::{TimeZone, Utc};
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// In-memory source that records which pull-request pages were requested.
    struct StubSource {
        contributors_fail: bool,
        commits_fail: bool,
        activity_fail: bool,
        pages: Vec<Result<Vec<PullRequest>, StatusCode>>,
        requested_pages: Mutex<Vec<u32>>,
    }

    impl StubSource {
        fn new(pages: Vec<Result<Vec<PullRequest>, StatusCode>>) -> Self {
            Self {
                contributors_fail: false,
                commits_fail: false,
                activity_fail: false,
                pages,
                requested_pages: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested_pages.lock().unwrap().clone()
        }
    }

    impl DataSource for StubSource {
        async fn repo_metadata(&self) -> Result<RepoMetadata, FetchError> {
            Ok(RepoMetadata {
                stargazers_count: 9,
                forks_count: 4,
            })
        }

        async fn contributors(&self) -> Result<Vec<ContributorProfile>, FetchError> {
            if self.contributors_fail {
                return Err(FetchError::status("contributors", StatusCode::FORBIDDEN));
            }
            Ok(["sayeeg-11", "alice", "bob"]
                .iter()
                .enumerate()
                .map(|(i, login)| ContributorProfile {
                    login: login.to_string(),
                    id: i as u64,
                    avatar_url: String::new(),
                    html_url: String::new(),
                    contributions: 1,
                })
                .collect())
        }

        async fn pull_request_page(&self, page: u32) -> Result<Vec<PullRequest>, FetchError> {
            self.requested_pages.lock().unwrap().push(page);
            match self.pages.get(page as usize - 1) {
                Some(Ok(batch)) => Ok(batch.clone()),
                Some(Err(status)) => Err(FetchError::status("pulls", *status)),
                None => Ok(Vec::new()),
            }
        }

        async fn commit_count(&self) -> Result<u64, FetchError> {
            if self.commits_fail {
                return Err(FetchError::status("commits", StatusCode::FORBIDDEN));
            }
            Ok(250)
        }

        async fn recent_commits(&self, count: usize) -> Result<Vec<CommitEntry>, FetchError> {
            if self.activity_fail {
                return Err(FetchError::status("commits", StatusCode::BAD_GATEWAY));
            }
            let entry = CommitEntry {
                commit: CommitDetail {
                    message: "Add footer".to_string(),
                    author: Some(CommitAuthor {
                        name: "Alice".to_string(),
                        date: Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
                    }),
                },
            };
            let anonymous = CommitEntry {
                commit: CommitDetail {
                    message: "Imported".to_string(),
                    author: None,
                },
            };
            Ok(vec![entry, anonymous].into_iter().take(count).collect())
        }
    }

    fn merged(login: &str, label: &str) -> PullRequest {
        PullRequest {
            user: Some(PullRequestUser {
                login: login.to_string(),
            }),
            merged_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            labels: vec![Label::from(label)],
        }
    }

    #[tokio::test]
    async fn test_load_leaderboard() {
        let source = StubSource::new(vec![
            Ok(vec![merged("alice", "level-2"), merged("sayeeg-11", "level-3")]),
            Ok(vec![merged("alice", "docs")]),
        ]);

        let board = load_leaderboard(&source, &Config::default()).await.unwrap();

        assert_eq!(board.contributors.len(), 1);
        assert_eq!(board.contributors[0].login(), "alice");
        assert_eq!(board.contributors[0].total_points, 6);
        assert_eq!(board.totals.commits, CommitCount::Exact(250));
        assert_eq!(board.totals.stars, 9);
        assert_eq!(board.totals.contributor_count, 3);
        assert!(board.lead.is_some());
        // Page 3 is requested and comes back empty.
        assert_eq!(source.requested(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_contributor_failure_aborts_load() {
        let mut source = StubSource::new(vec![Ok(vec![merged("alice", "level-1")])]);
        source.contributors_fail = true;

        let result = load_leaderboard(&source, &Config::default()).await;
        assert!(matches!(result, Err(LoadError::Fetch(FetchError::Status { .. }))));
    }

    #[tokio::test]
    async fn test_commit_count_failure_degrades() {
        let mut source = StubSource::new(vec![Ok(vec![merged("bob", "level-1")])]);
        source.commits_fail = true;

        let board = load_leaderboard(&source, &Config::default()).await.unwrap();
        assert_eq!(board.totals.commits, CommitCount::Placeholder);
        assert_eq!(board.contributors[0].login(), "bob");
    }

    #[tokio::test]
    async fn test_paging_stops_at_empty_page() {
        let source = StubSource::new(vec![Ok(vec![merged("alice", "x")]), Ok(Vec::new())]);

        let pulls = fetch_all_pulls(&source, 3).await;
        assert_eq!(pulls.len(), 1);
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_paging_stops_at_failed_page() {
        let source = StubSource::new(vec![
            Ok(vec![merged("alice", "x")]),
            Err(StatusCode::INTERNAL_SERVER_ERROR),
            Ok(vec![merged("bob", "x")]),
        ]);

        let pulls = fetch_all_pulls(&source, 3).await;
        assert_eq!(pulls.len(), 1);
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_paging_respects_page_limit() {
        let full = || Ok(vec![merged("alice", "x")]);
        let source = StubSource::new(vec![full(), full(), full(), full()]);

        let pulls = fetch_all_pulls(&source, 3).await;
        assert_eq!(pulls.len(), 3);
        assert_eq!(source.requested(), vec![1, 2, 3]);
    }

    #[test]
    fn test_load_activity() {
        let source = StubSource::new(Vec::new());
        let feed = tokio_test::block_on(load_activity(&source, 10)).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].author, "Alice");
        assert_eq!(feed[0].message, "Add footer");
    }

    #[test]
    fn test_load_activity_failure_is_none() {
        let mut source = StubSource::new(Vec::new());
        source.activity_fail = true;
        assert!(tokio_test::block_on(load_activity(&source, 10)).is_none());
    }
}
