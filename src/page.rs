//! Leaderboard session state.
//!
//! The [`PageController`] owns the ranked snapshot and the current page.
//! Each rendered page gets a card map from [`CardId`] to the login shown on
//! that card, which is resolved when a card is opened.

use crate::analysis::{LeagueTier, PageControls, Paginator};
use crate::config::{Config, LeagueConfig};
use crate::models::{Leaderboard, RankedContributor};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Position of a card on the current page (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CardId(pub usize);

/// One leaderboard entry on a page.
#[derive(Debug, Clone, Serialize)]
pub struct Card<'a> {
    pub id: CardId,
    /// 1-based rank across the whole leaderboard.
    pub rank: usize,
    pub tier: LeagueTier,
    pub contributor: &'a RankedContributor,
}

/// A rendered page of cards.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub page: usize,
    pub cards: Vec<Card<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<PageControlsView>,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Serializable pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageControlsView {
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl From<PageControls> for PageControlsView {
    fn from(c: PageControls) -> Self {
        Self {
            page: c.page,
            total_pages: c.total_pages,
            has_prev: c.has_prev,
            has_next: c.has_next,
        }
    }
}

/// Everything shown when a single contributor is opened.
#[derive(Debug, Clone, Serialize)]
pub struct ContributorDetail<'a> {
    pub rank: usize,
    pub tier: LeagueTier,
    pub contributor: &'a RankedContributor,
    /// Search link for the contributor's pull requests in this repository.
    pub pull_requests_url: String,
}

/// Owns the snapshot and the current page.
pub struct PageController {
    leaderboard: Leaderboard,
    paginator: Paginator,
    thresholds: LeagueConfig,
    repo_html_url: String,
    current_page: usize,
    cards: HashMap<CardId, String>,
}

impl PageController {
    /// Take ownership of a freshly loaded snapshot, positioned on page 1.
    pub fn new(leaderboard: Leaderboard, config: &Config) -> Self {
        let mut controller = Self {
            leaderboard,
            paginator: Paginator::new(config.display.page_size),
            thresholds: config.league,
            repo_html_url: format!(
                "https://github.com/{}/{}",
                config.repository.owner, config.repository.name
            ),
            current_page: 1,
            cards: HashMap::new(),
        };
        controller.change_page(1);
        controller
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.leaderboard.contributors.len())
    }

    /// Move to `page` and rebuild the card map. Out-of-range pages are kept
    /// as-is and render empty.
    pub fn change_page(&mut self, page: usize) {
        self.current_page = page;
        self.cards = self
            .paginator
            .page(&self.leaderboard.contributors, page)
            .iter()
            .enumerate()
            .map(|(i, c)| (CardId(i), c.login().to_string()))
            .collect();
        debug!("Page {} has {} cards", page, self.cards.len());
    }

    /// The cards of the current page.
    pub fn view(&self) -> PageView<'_> {
        // Unrepresentable pages have no start and render empty.
        let cards = match self.paginator.start_index(self.current_page) {
            Some(start) => self
                .paginator
                .page(&self.leaderboard.contributors, self.current_page)
                .iter()
                .enumerate()
                .map(|(i, contributor)| Card {
                    id: CardId(i),
                    rank: start + i + 1,
                    tier: self.tier_for(contributor),
                    contributor,
                })
                .collect(),
            None => Vec::new(),
        };

        PageView {
            page: self.current_page,
            cards,
            controls: PageControls::for_page(self.current_page, self.total_pages())
                .map(Into::into),
        }
    }

    /// Resolve a card on the current page to its contributor.
    pub fn open_card(&self, card: CardId) -> Option<ContributorDetail<'_>> {
        let login = self.cards.get(&card)?;
        self.detail(login)
    }

    /// Detail view for a login anywhere in the ranking (case-insensitive).
    pub fn detail(&self, login: &str) -> Option<ContributorDetail<'_>> {
        let (rank, contributor) = self.leaderboard.find(login)?;
        Some(ContributorDetail {
            rank,
            tier: self.tier_for(contributor),
            contributor,
            pull_requests_url: format!(
                "{}/pulls?q=is%3Apr+author%3A{}",
                self.repo_html_url,
                contributor.login()
            ),
        })
    }

    pub fn tier_for(&self, contributor: &RankedContributor) -> LeagueTier {
        LeagueTier::from_points(contributor.total_points, &self.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommitCount, ContributorProfile, ContributorStat, ProjectTotals};

    fn leaderboard(n: u32) -> Leaderboard {
        let contributors = (0..n)
            .map(|i| {
                RankedContributor::new(
                    ContributorProfile {
                        login: format!("user{}", i + 1),
                        id: i as u64,
                        avatar_url: String::new(),
                        html_url: String::new(),
                        contributions: 0,
                    },
                    ContributorStat {
                        merged_pr_count: 1,
                        total_points: 200 - i * 10,
                    },
                )
            })
            .collect();

        Leaderboard {
            contributors,
            totals: ProjectTotals {
                contributor_count: n as usize,
                merged_pr_count: n,
                total_points: 0,
                stars: 0,
                forks: 0,
                commits: CommitCount::Exact(1),
            },
            lead: None,
        }
    }

    #[test]
    fn test_first_page() {
        let controller = PageController::new(leaderboard(17), &Config::default());
        let view = controller.view();

        assert_eq!(view.page, 1);
        assert_eq!(view.cards.len(), 8);
        assert_eq!(view.cards[0].rank, 1);
        assert_eq!(view.cards[0].tier, LeagueTier::Gold);
        let controls = view.controls.unwrap();
        assert_eq!(controls.total_pages, 3);
        assert!(!controls.has_prev);
    }

    #[test]
    fn test_last_and_beyond_pages() {
        let mut controller = PageController::new(leaderboard(17), &Config::default());

        controller.change_page(3);
        let view = controller.view();
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].rank, 17);
        assert_eq!(view.cards[0].contributor.login(), "user17");

        controller.change_page(4);
        assert!(controller.view().is_empty());
        assert_eq!(controller.current_page(), 4);
        assert!(controller.open_card(CardId(0)).is_none());
    }

    #[test]
    fn test_huge_page_renders_empty() {
        let mut controller = PageController::new(leaderboard(17), &Config::default());
        controller.change_page((1usize << 61) + 1);

        let view = controller.view();
        assert!(view.is_empty());
        assert!(!view.controls.unwrap().has_next);
        assert!(controller.open_card(CardId(0)).is_none());

        controller.change_page(usize::MAX);
        assert!(controller.view().is_empty());
    }

    #[test]
    fn test_open_card_resolves_current_page() {
        let mut controller = PageController::new(leaderboard(17), &Config::default());
        controller.change_page(2);

        let detail = controller.open_card(CardId(1)).unwrap();
        assert_eq!(detail.contributor.login(), "user10");
        assert_eq!(detail.rank, 10);
        assert_eq!(
            detail.pull_requests_url,
            "https://github.com/sayeeg-11/Pixel_Phantoms/pulls?q=is%3Apr+author%3Auser10"
        );
        assert!(controller.open_card(CardId(8)).is_none());
    }

    #[test]
    fn test_single_page_has_no_controls() {
        let controller = PageController::new(leaderboard(5), &Config::default());
        assert!(controller.view().controls.is_none());
    }

    #[test]
    fn test_detail_by_login() {
        let controller = PageController::new(leaderboard(3), &Config::default());
        let detail = controller.detail("USER2").unwrap();
        assert_eq!(detail.rank, 2);
        assert_eq!(detail.tier, LeagueTier::Gold);
        assert!(controller.detail("nobody").is_none());
    }
}
