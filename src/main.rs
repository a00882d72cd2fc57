//! prleague - pull-request points leaderboard for GitHub repositories
//!
//! A CLI tool that fetches a repository's contributors and pull requests,
//! scores merged pull requests by their level labels and prints a ranked,
//! paginated leaderboard with summary totals and recent activity.
//!
//! Exit codes:
//!   0 - Success (including an empty leaderboard page)
//!   1 - Failed to load data, or a runtime error (config, output file, etc.)

mod analysis;
mod cli;
mod config;
mod github;
mod models;
mod page;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE};
use github::GitHubClient;
use indicatif::{ProgressBar, ProgressStyle};
use page::{CardId, PageController};
use report::PageReport;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("prleague v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("prleague failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .prleague.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change the repository, point weights, league thresholds and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load the leaderboard and render the requested page. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let repository = format!("{}/{}", config.repository.owner, config.repository.name);
    let client = GitHubClient::new(&config).context("Failed to create GitHub client")?;
    info!("Loading leaderboard for {}", client.repo_url());

    let spinner = start_spinner(&args, &repository);

    let activity = async {
        if args.no_activity {
            None
        } else {
            github::load_activity(&client, config.display.activity_count).await
        }
    };
    let (loaded, activity) = tokio::join!(github::load_leaderboard(&client, &config), activity);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let leaderboard = match loaded {
        Ok(leaderboard) => leaderboard,
        Err(e) => {
            error!("Error initializing data: {}", e);
            let output = match args.format {
                OutputFormat::Json => report::generate_failed_json(&repository, &e.to_string())?,
                OutputFormat::Markdown => report::generate_failed_markdown(&repository),
            };
            write_output(&args, &output)?;
            return Ok(1);
        }
    };

    let mut controller = PageController::new(leaderboard, &config);
    controller.change_page(args.page);

    if args.page > controller.total_pages() {
        warn!(
            "Page {} is past the last page ({})",
            args.page,
            controller.total_pages()
        );
    }

    let detail = match (args.contributor.as_deref(), args.card) {
        (Some(login), _) => {
            let detail = controller.detail(login);
            if detail.is_none() {
                warn!("{} is not on the leaderboard", login);
            }
            detail
        }
        (None, Some(card)) => {
            let detail = controller.open_card(CardId(card - 1));
            if detail.is_none() {
                warn!("Page {} has no card {}", controller.current_page(), card);
            }
            detail
        }
        (None, None) => None,
    };

    let leaderboard = controller.leaderboard();
    let page_report = PageReport {
        repository,
        totals: &leaderboard.totals,
        lead: leaderboard.lead.as_ref(),
        page: controller.view(),
        activity: activity.as_deref(),
        detail,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&page_report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&page_report),
    };
    write_output(&args, &output)?;

    info!(
        "Ranked {} contributors; showing page {} of {}",
        leaderboard.contributors.len(),
        controller.current_page(),
        controller.total_pages()
    );

    Ok(0)
}

/// Spinner shown while fetching, unless running quietly.
fn start_spinner(args: &Args, repository: &str) -> Option<ProgressBar> {
    if args.quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching {} from GitHub...", repository));
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Write the rendered page to --output, or stdout.
fn write_output(args: &Args, output: &str) -> Result<()> {
    match args.output {
        Some(ref path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Saved page to {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
