use clap::Parser;
use colored::*;
use portfolio_panel::cli::Cli;
use portfolio_panel::github::GitHubClient;
use portfolio_panel::loader::load_panel;
use portfolio_panel::server::{render_page, start_server, AppState, GridQuery};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = GitHubClient::with_base_url(&cli.api_url)?;

    if cli.render {
        let snapshot = load_panel(&client, &cli.username).await;
        print!(
            "{}",
            render_page(&cli.username, Some(&snapshot.repos), Some(&snapshot.stats), &GridQuery::default())
        );
        return Ok(());
    }

    eprintln!("{}", "Portfolio Panel".bold().green());
    eprintln!("{}\n", "=".repeat(50).dimmed());
    eprintln!("👤 Account: {}", cli.username.cyan());
    eprintln!("🌐 GitHub API: {}", client.base_url());

    let state = AppState::new(&cli.username);
    state.spawn_load(client);

    let addr = cli.listen_addr();
    eprintln!("✅ Serving panel on http://{}\n", addr);

    tokio::select! {
        result = start_server(state, &addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n🛑 Shutting down server...");
        }
    }

    Ok(())
}
