mod console;

use anyhow::{bail, Context};
use clap::Parser;
use console::ConsoleSurface;
use insight_core::{ClientConfig, ErrorExt, SortOrder, Timeframe};
use page_controller::{PageController, ViewState};
use std::path::PathBuf;
use task_client::HttpTaskApi;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reddit-insight", about = "Run a Reddit keyword research task")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the configuration file)
    #[arg(long, env = "INSIGHT_SERVER_URL")]
    server: Option<String>,

    #[arg(long)]
    keyword: String,

    #[arg(long)]
    timeframe: Option<Timeframe>,

    #[arg(long)]
    sort: Option<SortOrder>,

    /// Subreddit scope: smart, standard, all_reddit
    #[arg(long)]
    subreddits: Option<String>,

    #[arg(long)]
    limit: Option<u32>,

    /// Analysis mode, e.g. pain_points
    #[arg(long)]
    mode: Option<String>,

    /// Add a keyword to the blocklist (repeatable)
    #[arg(long = "block")]
    block: Vec<String>,

    /// Remove a default keyword from the blocklist (repeatable)
    #[arg(long = "unblock")]
    unblock: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("reddit_insight=info,page_controller=info,task_client=info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    tracing::info!("Starting Reddit Insight");

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
        config.validate()?;
    }

    let api = HttpTaskApi::from_config(&config)?;
    let controller = PageController::new(api, ConsoleSurface::default(), &config);

    for word in &cli.unblock {
        controller.remove_blockword(word).await;
    }
    for word in &cli.block {
        controller.add_blockword(word).await;
    }
    if let Some(sort) = cli.sort {
        controller.set_sort_order(sort).await;
    }
    controller
        .edit_form(|form| {
            form.keyword = cli.keyword.clone();
            if let Some(timeframe) = cli.timeframe {
                form.timeframe = timeframe;
            }
            if let Some(subreddits) = &cli.subreddits {
                form.subreddits = subreddits.clone();
            }
            if let Some(limit) = cli.limit {
                form.limit = limit.to_string();
            }
            if let Some(mode) = &cli.mode {
                form.analysis_mode = Some(mode.clone());
            }
        })
        .await;

    tracing::info!(
        "Blocking {} keywords",
        controller.blocked_keywords().await.len()
    );

    if let Err(e) = controller.launch().await {
        e.log_error();
        bail!(e.user_friendly_message());
    }
    controller.wait_for_session().await;

    match controller.view_state().await {
        ViewState::Result => {
            tracing::info!("Task finished");
            Ok(())
        }
        state => bail!("task stopped before completing (page left in {} view)", state),
    }
}
