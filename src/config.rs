//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.prleague.toml` files. Every value has a compiled-in default, so the
//! file is optional.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".prleague.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Repository settings.
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Point weights for pull-request labels.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// League tier thresholds.
    #[serde(default)]
    pub league: LeagueConfig,

    /// Output settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// HTTP fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Which repository to build the leaderboard for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository owner; also the lead account excluded from the ranking.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name.
    #[serde(default = "default_repo")]
    pub name: String,

    /// GitHub REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            name: default_repo(),
            api_base: default_api_base(),
        }
    }
}

fn default_owner() -> String {
    "sayeeg-11".to_string()
}

fn default_repo() -> String {
    "Pixel_Phantoms".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

/// Points awarded per merged pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_level3")]
    pub level3: u32,

    #[serde(default = "default_level2")]
    pub level2: u32,

    #[serde(default = "default_level1")]
    pub level1: u32,

    /// Awarded when no level label is present.
    #[serde(default = "default_unlabeled")]
    pub default: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            level3: default_level3(),
            level2: default_level2(),
            level1: default_level1(),
            default: default_unlabeled(),
        }
    }
}

fn default_level3() -> u32 {
    11
}

fn default_level2() -> u32 {
    5
}

fn default_level1() -> u32 {
    2
}

fn default_unlabeled() -> u32 {
    1
}

/// Point thresholds for each league. A tier applies when points are strictly above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default = "default_gold")]
    pub gold: u32,

    #[serde(default = "default_silver")]
    pub silver: u32,

    #[serde(default = "default_bronze")]
    pub bronze: u32,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            gold: default_gold(),
            silver: default_silver(),
            bronze: default_bronze(),
        }
    }
}

fn default_gold() -> u32 {
    150
}

fn default_silver() -> u32 {
    75
}

fn default_bronze() -> u32 {
    30
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Contributor cards per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Commits shown in the recent-activity feed.
    #[serde(default = "default_activity_count")]
    pub activity_count: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            activity_count: default_activity_count(),
        }
    }
}

fn default_page_size() -> usize {
    8
}

fn default_activity_count() -> usize {
    10
}

/// HTTP fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum pull-request pages to walk.
    #[serde(default = "default_max_pr_pages")]
    pub max_pr_pages: u32,

    /// Page size for the contributors and pulls endpoints (API maximum is 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_pr_pages: default_max_pr_pages(),
            per_page: default_per_page(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_pr_pages() -> u32 {
    3
}

fn default_per_page() -> u32 {
    100
}

fn default_user_agent() -> String {
    format!("prleague/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.prleague.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref owner) = args.owner {
            self.repository.owner = owner.clone();
        }
        if let Some(ref repo) = args.repo {
            self.repository.name = repo.clone();
        }
        if let Some(ref api_base) = args.api_base {
            self.repository.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = args.timeout {
            self.fetch.timeout_seconds = timeout;
        }
    }

    /// Check values that would make the leaderboard meaningless.
    pub fn validate(&self) -> Result<()> {
        let api_base = &self.repository.api_base;
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            bail!("API base must start with 'http://' or 'https://'");
        }
        if self.repository.owner.is_empty() || self.repository.name.is_empty() {
            bail!("Repository owner and name must not be empty");
        }
        if self.display.page_size == 0 {
            bail!("Page size must be at least 1");
        }
        if self.fetch.max_pr_pages == 0 {
            bail!("Pull-request page limit must be at least 1");
        }
        if !(1..=100).contains(&self.fetch.per_page) {
            bail!("Per-page must be between 1 and 100");
        }
        let league = &self.league;
        if !(league.gold > league.silver && league.silver > league.bronze) {
            bail!(
                "League thresholds must be strictly decreasing (gold {} > silver {} > bronze {})",
                league.gold,
                league.silver,
                league.bronze
            );
        }
        Ok(())
    }

    /// `{api_base}/repos/{owner}/{name}`
    pub fn repo_api_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.repository.api_base.trim_end_matches('/'),
            self.repository.owner,
            self.repository.name
        )
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
