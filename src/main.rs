mod animate;
mod config;
mod fetch;
mod listing;
mod portfolio;
mod render;
mod session;
mod stats;

use chrono::Utc;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

use fetch::{DevToClient, Fetcher, GitHubClient};
use portfolio::Portfolio;
use render::Terminal;

/// devfolio: a developer portfolio in the terminal, built from public
/// GitHub and dev.to activity.
#[derive(Parser, Debug)]
#[command(name = "devfolio", version, about)]
struct Cli {
    /// GitHub username (overrides .devfolio.toml and DEVFOLIO_GITHUB_USER)
    #[arg(long)]
    github_user: Option<String>,

    /// dev.to username (defaults to the GitHub username, lowercased)
    #[arg(long)]
    devto_user: Option<String>,

    /// Config file to read instead of ./.devfolio.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the page as markdown to this file instead of the terminal
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Browse projects and articles with typed commands
    #[arg(short, long)]
    interactive: bool,

    /// Skip the network and show the built-in demo data
    #[arg(long)]
    offline: bool,

    /// Print counters without animating them
    #[arg(long)]
    no_animate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.github_user.is_some() {
        config.github.username = cli.github_user.clone();
    }
    if cli.devto_user.is_some() {
        config.devto.username = cli.devto_user.clone();
    }

    let (fetcher, owner) = if cli.offline {
        info!("offline mode, using demo data");
        let owner = config.github_user().unwrap_or("demo").to_string();
        (Fetcher::offline(), owner)
    } else {
        let github_user = config.github_user()?.to_string();
        let devto_user = config.devto_user()?;
        debug!(github = %github_user, devto = %devto_user, "resolved usernames");

        let client = reqwest::Client::new();
        let fetcher = Fetcher::new(
            Box::new(GitHubClient::new(client.clone(), config.github_api_base())),
            Box::new(DevToClient::new(client, config.devto_api_base())),
            github_user.clone(),
            devto_user,
        );
        (fetcher, github_user)
    };

    let now = Utc::now();
    info!("fetching portfolio data");
    let portfolio = Portfolio::load(&fetcher, &owner, now)
        .instrument(info_span!("fetch", owner = %owner))
        .await;

    if let Some(path) = cli.output.as_deref() {
        render::write_markdown(&portfolio.page(now), path)?;
        info!(path = %path.display(), "done");
        return Ok(());
    }

    let is_tty = std::io::stdout().is_terminal();
    let animation = config.animation().filter(|_| is_tty && !cli.no_animate);
    let terminal = Terminal::new(animation, is_tty);
    let mut stdout = std::io::stdout();

    if cli.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut session = session::Session::new(&fetcher, portfolio, terminal);
        session.run(stdin, &mut stdout).await?;
    } else {
        let mut terminal = terminal;
        terminal.print_page(&portfolio.page(now), &mut stdout).await?;
    }

    info!("done");
    Ok(())
}
