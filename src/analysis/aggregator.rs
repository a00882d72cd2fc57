//! Pull-request scoring and contributor ranking.
//!
//! Merged pull requests are scored by their level labels, folded into
//! per-login stats, merged with the contributor profiles and ranked.

use crate::config::ScoringConfig;
use crate::models::{
    CommitCount, ContributorProfile, ContributorStat, Leaderboard, ProjectTotals, PullRequest,
    RankedContributor, RepoMetadata,
};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

/// Difficulty level carried by a pull-request label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelLabel {
    NoLevel,
    Level1,
    Level2,
    Level3,
}

impl LevelLabel {
    /// Classify a label name. Matching is case-insensitive and accepts either
    /// a space or a hyphen, anywhere in the name.
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |n: u8| {
            name.contains(&format!("level {}", n)) || name.contains(&format!("level-{}", n))
        };

        if has(3) {
            LevelLabel::Level3
        } else if has(2) {
            LevelLabel::Level2
        } else if has(1) {
            LevelLabel::Level1
        } else {
            LevelLabel::NoLevel
        }
    }

    /// Points this label contributes; `None` for labels that carry no level.
    pub fn weight(self, scoring: &ScoringConfig) -> Option<u32> {
        match self {
            LevelLabel::Level3 => Some(scoring.level3),
            LevelLabel::Level2 => Some(scoring.level2),
            LevelLabel::Level1 => Some(scoring.level1),
            LevelLabel::NoLevel => None,
        }
    }
}

/// Points for a single pull request, ignoring whether it was merged.
///
/// Every level label counts, so a PR tagged both level 1 and level 3 earns
/// both weights. A PR without any level label earns the default weight.
pub fn score_pull_request(pr: &PullRequest, scoring: &ScoringConfig) -> u32 {
    let level_points: Option<u32> = pr
        .labels
        .iter()
        .filter_map(|label| LevelLabel::classify(&label.name).weight(scoring))
        .reduce(|acc, w| acc + w);

    level_points.unwrap_or(scoring.default)
}

/// Per-author stats plus project totals folded from a pull-request list.
#[derive(Debug, Clone, Default)]
pub struct PullRequestTally {
    pub stats: HashMap<String, ContributorStat>,
    pub merged_pr_count: u32,
    pub total_points: u32,
}

impl PullRequestTally {
    /// Stats for a login, zero if the login has no merged pull requests.
    pub fn stat_for(&self, login: &str) -> ContributorStat {
        self.stats.get(login).copied().unwrap_or_default()
    }
}

/// Fold merged pull requests into per-author stats. Unmerged pull requests
/// and pull requests from deleted accounts are ignored.
pub fn tally_pull_requests(pulls: &[PullRequest], scoring: &ScoringConfig) -> PullRequestTally {
    let mut tally = PullRequestTally::default();

    for pr in pulls.iter().filter(|pr| pr.is_merged()) {
        let Some(login) = pr.author_login() else {
            debug!("Skipping merged pull request without an author");
            continue;
        };

        let points = score_pull_request(pr, scoring);
        let stat = tally.stats.entry(login.to_string()).or_default();
        stat.merged_pr_count += 1;
        stat.total_points += points;

        tally.merged_pr_count += 1;
        tally.total_points += points;
    }

    tally
}

/// Returns true if `login` is the repository owner.
pub fn is_owner(login: &str, owner: &str) -> bool {
    login.eq_ignore_ascii_case(owner)
}

/// Attach stats to every profile, drop the owner and anyone without a merged
/// pull request, then sort by points (highest first).
///
/// The sort is stable, so tied contributors keep their order from the
/// contributors endpoint.
pub fn rank_contributors(
    profiles: &[ContributorProfile],
    tally: &PullRequestTally,
    owner: &str,
) -> Vec<RankedContributor> {
    let mut ranked: Vec<RankedContributor> = profiles
        .iter()
        .filter(|p| !is_owner(&p.login, owner))
        .map(|p| RankedContributor::new(p.clone(), tally.stat_for(&p.login)))
        .filter(|c| c.merged_pr_count > 0)
        .collect();

    ranked.sort_by_key(|c| Reverse(c.total_points));
    ranked
}

/// Build the leaderboard snapshot from the fetched data.
pub fn build_leaderboard(
    repo: &RepoMetadata,
    profiles: &[ContributorProfile],
    pulls: &[PullRequest],
    commits: CommitCount,
    owner: &str,
    scoring: &ScoringConfig,
) -> Leaderboard {
    let tally = tally_pull_requests(pulls, scoring);
    let contributors = rank_contributors(profiles, &tally, owner);
    let lead = profiles.iter().find(|p| is_owner(&p.login, owner)).cloned();

    debug!(
        "Ranked {} of {} contributors from {} merged pull requests",
        contributors.len(),
        profiles.len(),
        tally.merged_pr_count
    );

    Leaderboard {
        contributors,
        totals: ProjectTotals {
            contributor_count: profiles.len(),
            merged_pr_count: tally.merged_pr_count,
            total_points: tally.total_points,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            commits,
        },
        lead,
    }
}
