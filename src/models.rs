//! Data models for the contributor leaderboard.
//!
//! This module contains the records deserialized from the GitHub API and
//! the derived structures produced by the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contributor profile as returned by the contributors endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorProfile {
    /// Unique account login.
    pub login: String,
    /// Numeric account id.
    pub id: u64,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Public profile URL.
    pub html_url: String,
    /// Commit contributions counted by GitHub.
    #[serde(default)]
    pub contributions: u64,
}

/// The author of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestUser {
    pub login: String,
}

/// A label attached to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[cfg(test)]
impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A pull request as returned by the pulls endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Author; `None` for deleted accounts.
    pub user: Option<PullRequestUser>,
    /// Merge timestamp, absent for open or closed-unmerged pull requests.
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl PullRequest {
    /// Login of the author, if the account still exists.
    pub fn author_login(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }

    /// Returns true if the pull request was merged.
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// Repository metadata used for the summary totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub stargazers_count: u64,
    pub forks_count: u64,
}

/// Per-login statistics folded from merged pull requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStat {
    pub merged_pr_count: u32,
    pub total_points: u32,
}

/// A contributor profile enriched with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedContributor {
    #[serde(flatten)]
    pub profile: ContributorProfile,
    pub merged_pr_count: u32,
    pub total_points: u32,
}

impl RankedContributor {
    /// Attach stats to a profile.
    pub fn new(profile: ContributorProfile, stat: ContributorStat) -> Self {
        Self {
            profile,
            merged_pr_count: stat.merged_pr_count,
            total_points: stat.total_points,
        }
    }

    pub fn login(&self) -> &str {
        &self.profile.login
    }
}

/// Total commit count, or a placeholder when it could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitCount {
    Exact(u64),
    Placeholder,
}

impl fmt::Display for CommitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitCount::Exact(n) => write!(f, "{}", n),
            CommitCount::Placeholder => write!(f, "50+"),
        }
    }
}

/// Project-wide summary totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTotals {
    /// Number of contributor profiles fetched, before filtering.
    pub contributor_count: usize,
    /// Merged pull requests across all authors.
    pub merged_pr_count: u32,
    /// Points across all merged pull requests.
    pub total_points: u32,
    pub stars: u64,
    pub forks: u64,
    pub commits: CommitCount,
}

/// The ranked snapshot produced by one load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Ranked contributors, highest score first.
    pub contributors: Vec<RankedContributor>,
    pub totals: ProjectTotals,
    /// The repository owner's profile, if it appeared in the contributor list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<ContributorProfile>,
}

impl Leaderboard {
    /// Find a ranked contributor by login (case-insensitive), with its 1-based rank.
    pub fn find(&self, login: &str) -> Option<(usize, &RankedContributor)> {
        self.contributors
            .iter()
            .enumerate()
            .find(|(_, c)| c.login().eq_ignore_ascii_case(login))
            .map(|(i, c)| (i + 1, c))
    }
}

/// Commit entry from the commits endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitEntry {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// One row of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub author: String,
    pub message: String,
    pub date: DateTime<Utc>,
}

impl ActivityItem {
    /// Build a feed row from a commit. Commits without author metadata are skipped.
    pub fn from_commit(entry: CommitEntry) -> Option<Self> {
        let author = entry.commit.author?;
        Some(Self {
            author: author.name,
            message: entry.commit.message,
            date: author.date,
        })
    }

    /// The first line of the commit message.
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
