//! Leaderboard analysis: scoring, league tiers and pagination.

pub mod aggregator;
pub mod league;
pub mod pagination;

pub use aggregator::build_leaderboard;
pub use league::LeagueTier;
pub use pagination::{PageControls, Paginator};
