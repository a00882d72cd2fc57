//! League tiers derived from a contributor's points.

use crate::config::LeagueConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display tier for a contributor, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueTier {
    Contributor,
    Bronze,
    Silver,
    Gold,
}

impl fmt::Display for LeagueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl LeagueTier {
    /// Tier for a point total. Thresholds are exclusive: exactly 150 points
    /// is still Silver with the default thresholds.
    pub fn from_points(points: u32, thresholds: &LeagueConfig) -> Self {
        if points > thresholds.gold {
            LeagueTier::Gold
        } else if points > thresholds.silver {
            LeagueTier::Silver
        } else if points > thresholds.bronze {
            LeagueTier::Bronze
        } else {
            LeagueTier::Contributor
        }
    }

    /// Short badge text shown on a card.
    pub fn badge_text(&self) -> &'static str {
        match self {
            LeagueTier::Gold => "Gold 🏆",
            LeagueTier::Silver => "Silver 🥈",
            LeagueTier::Bronze => "Bronze 🥉",
            LeagueTier::Contributor => "Contributor 🎖️",
        }
    }

    /// Style class for the badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            LeagueTier::Gold => "badge-gold",
            LeagueTier::Silver => "badge-silver",
            LeagueTier::Bronze => "badge-bronze",
            LeagueTier::Contributor => "badge-contributor",
        }
    }

    /// Style class for the whole card.
    pub fn tier_class(&self) -> &'static str {
        match self {
            LeagueTier::Gold => "tier-gold",
            LeagueTier::Silver => "tier-silver",
            LeagueTier::Bronze => "tier-bronze",
            LeagueTier::Contributor => "tier-contributor",
        }
    }

    /// Long label used in the detail view.
    pub fn label(&self) -> &'static str {
        match self {
            LeagueTier::Gold => "Gold League",
            LeagueTier::Silver => "Silver League",
            LeagueTier::Bronze => "Bronze League",
            LeagueTier::Contributor => "Contributor",
        }
    }
}
