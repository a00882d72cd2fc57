//! Leaderboard page rendering.
//!
//! This module renders the loaded leaderboard as Markdown or JSON: summary
//! totals, one page of contributor cards, pagination controls, the recent
//! activity feed and an optional contributor detail view.

use crate::models::{ActivityItem, ContributorProfile, ProjectTotals};
use crate::page::{Card, ContributorDetail, PageControlsView, PageView};
use anyhow::Result;
use serde::Serialize;

/// Shown in place of the grid when the load fails.
pub const FAILED_MESSAGE: &str = "Failed to load data.";

/// Shown when the requested page has no cards.
pub const EMPTY_MESSAGE: &str = "No active contributors found (Must have at least 1 Merged PR).";

/// Everything rendered for one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport<'a> {
    /// `owner/name`
    pub repository: String,
    pub totals: &'a ProjectTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<&'a ContributorProfile>,
    pub page: PageView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<&'a [ActivityItem]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ContributorDetail<'a>>,
}

/// Generate the Markdown page.
pub fn generate_markdown_report(report: &PageReport<'_>) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {} Contributors\n\n", report.repository));
    output.push_str(&generate_summary_section(report.totals, report.lead));
    output.push_str(&generate_leaderboard_section(&report.page));

    if let Some(ref detail) = report.detail {
        output.push_str(&generate_detail_section(detail));
    }

    if let Some(activity) = report.activity {
        output.push_str(&generate_activity_section(activity));
    }

    output
}

/// Generate the Markdown page shown when loading failed.
pub fn generate_failed_markdown(repository: &str) -> String {
    format!("# {} Contributors\n\n{}\n", repository, FAILED_MESSAGE)
}

/// Generate a JSON page.
pub fn generate_json_report(report: &PageReport<'_>) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate the JSON document shown when loading failed.
pub fn generate_failed_json(repository: &str, error: &str) -> Result<String> {
    let value = serde_json::json!({
        "repository": repository,
        "error": FAILED_MESSAGE,
        "cause": error,
    });
    serde_json::to_string_pretty(&value).map_err(Into::into)
}

/// Generate the summary totals section.
fn generate_summary_section(totals: &ProjectTotals, lead: Option<&ContributorProfile>) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Contributors | Merged PRs | Points | Stars | Forks | Commits |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n\n",
        totals.contributor_count,
        totals.merged_pr_count,
        totals.total_points,
        totals.stars,
        totals.forks,
        totals.commits
    ));

    if let Some(lead) = lead {
        section.push_str(&format!(
            "**Project Lead:** [{}]({}) ![{}]({})\n\n",
            lead.login, lead.html_url, lead.login, lead.avatar_url
        ));
    }

    section
}

/// Generate the leaderboard grid for one page.
fn generate_leaderboard_section(page: &PageView<'_>) -> String {
    let mut section = String::new();

    section.push_str("## Leaderboard\n\n");

    if page.is_empty() {
        section.push_str(EMPTY_MESSAGE);
        section.push_str("\n\n");
        return section;
    }

    section.push_str("| Rank | | Contributor | PRs | Points | League |\n");
    section.push_str("|:---:|:---:|:---|:---:|:---:|:---|\n");
    for card in &page.cards {
        section.push_str(&generate_card_row(card));
    }
    section.push('\n');

    if let Some(ref controls) = page.controls {
        section.push_str(&generate_pagination_controls(controls));
    }

    section
}

/// Generate a single card row.
fn generate_card_row(card: &Card<'_>) -> String {
    let profile = &card.contributor.profile;
    format!(
        "| #{} | <img class=\"{}\" src=\"{}\" alt=\"{}\" width=\"32\"> | [{}]({}) | {} | {} | \
         <span class=\"{}\">{}</span> |\n",
        card.rank,
        card.tier.tier_class(),
        profile.avatar_url,
        profile.login,
        profile.login,
        profile.html_url,
        card.contributor.merged_pr_count,
        card.contributor.total_points,
        card.tier.badge_class(),
        card.tier.badge_text()
    )
}

/// Generate the prev/next line. Disabled links are rendered as plain text.
fn generate_pagination_controls(controls: &PageControlsView) -> String {
    let prev = if controls.has_prev {
        format!("[« Prev](?page={})", controls.page - 1)
    } else {
        "« Prev".to_string()
    };
    let next = if controls.has_next {
        format!("[Next »](?page={})", controls.page + 1)
    } else {
        "Next »".to_string()
    };

    format!(
        "{} | Page {} of {} | {}\n\n",
        prev, controls.page, controls.total_pages, next
    )
}

/// Generate the contributor detail section.
fn generate_detail_section(detail: &ContributorDetail<'_>) -> String {
    let contributor = detail.contributor;
    let profile = &contributor.profile;
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", profile.login));
    section.push_str(&format!("![{}]({})\n\n", profile.login, profile.avatar_url));
    section.push_str(&format!("- **ID:** {}\n", profile.id));
    section.push_str(&format!("- **Rank:** #{}\n", detail.rank));
    section.push_str(&format!("- **Score:** {}\n", contributor.total_points));
    section.push_str(&format!("- **Merged PRs:** {}\n", contributor.merged_pr_count));
    section.push_str(&format!("- **Commits:** {}\n", profile.contributions));
    section.push_str(&format!("- **League:** {}\n", detail.tier.label()));
    section.push_str(&format!(
        "- [View pull requests]({}) | [Profile]({})\n\n",
        detail.pull_requests_url, profile.html_url
    ));

    section
}

/// Generate the recent activity feed.
fn generate_activity_section(activity: &[ActivityItem]) -> String {
    let mut section = String::new();

    section.push_str("## Recent Activity\n\n");
    for item in activity {
        section.push_str(&format!(
            "- **{}**: {} _({})_\n",
            item.author,
            item.headline(),
            item.date.format("%Y-%m-%d")
        ));
    }
    section.push('\n');

    section
}
