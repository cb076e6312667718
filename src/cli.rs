use crate::github::API_BASE_URL;
use clap::Parser;

pub const DEFAULT_USERNAME: &str = "thekaranpargaie";

#[derive(Parser, Debug)]
#[command(name = "portfolio-panel")]
#[command(about = "Portfolio Panel - Renders a GitHub user's repositories, language filters and account stats")]
#[command(version)]
pub struct Cli {
    /// GitHub account whose repositories are shown
    #[arg(long, env = "PORTFOLIO_USERNAME", default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// Address the panel server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// Port the panel server listens on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Load the panel once, print the page to stdout and exit
    #[arg(long)]
    pub render: bool,
}

impl Cli {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
