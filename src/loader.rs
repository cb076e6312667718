use crate::error::{PanelError, Result};
use crate::github::GitHubClient;
use crate::models::{AnnotatedRepo, PanelSnapshot, PanelState, RepoOutcome, StatsOutcome};
use futures::future::try_join_all;
use tracing::{error, info, warn};

pub const MAX_REPOS: usize = 10;

/// Repo list → fan-out language fetches → tally.
///
/// Returns `Ok(None)` when the account has no non-fork repositories; in that
/// case no language requests are issued.
pub async fn fetch_panel_state(client: &GitHubClient, username: &str) -> Result<Option<PanelState>> {
    let repos = client.fetch_repos(username).await?;
    let fetched = repos.len();

    let candidates: Vec<_> = repos.into_iter().filter(|r| !r.fork).take(MAX_REPOS).collect();
    info!(username, fetched, candidates = candidates.len(), "Fetched repository list");

    if candidates.is_empty() {
        return Ok(None);
    }

    let annotated = try_join_all(candidates.into_iter().map(|repo| async move {
        let languages = client.fetch_languages(username, &repo.name).await?;
        Ok::<_, PanelError>(AnnotatedRepo::new(repo, languages))
    }))
    .await?;

    let state = PanelState::new(annotated);
    info!(
        repos = state.repos.len(),
        languages = state.tally.len(),
        filters = ?state.filter_languages,
        "Repository panel ready"
    );

    Ok(Some(state))
}

/// The repo chain with its failures folded into an outcome for the grid.
pub async fn load_repositories(client: &GitHubClient, username: &str) -> RepoOutcome {
    match fetch_panel_state(client, username).await {
        Ok(Some(state)) => RepoOutcome::Loaded(state),
        Ok(None) => {
            warn!(username, "No repositories found");
            RepoOutcome::Empty
        }
        Err(e) => {
            error!(username, error = %e, "Failed to load repositories");
            RepoOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// The stats chain. Failures are only logged.
pub async fn load_stats(client: &GitHubClient, username: &str) -> StatsOutcome {
    match client.fetch_user(username).await {
        Ok(user) => {
            info!(
                username,
                public_repos = user.public_repos,
                followers = user.followers,
                following = user.following,
                "Fetched account stats"
            );
            StatsOutcome::Loaded(user.into())
        }
        Err(e) => {
            error!(username, error = %e, "Failed to load account stats");
            StatsOutcome::Unavailable
        }
    }
}

/// Runs both chains concurrently; neither waits on the other.
pub async fn load_panel(client: &GitHubClient, username: &str) -> PanelSnapshot {
    let (stats, repos) = tokio::join!(load_stats(client, username), load_repositories(client, username));
    PanelSnapshot { repos, stats }
}
