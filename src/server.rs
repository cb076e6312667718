use crate::error::Result;
use crate::github::GitHubClient;
use crate::loader::{load_repositories, load_stats};
use crate::models::{FilterSelection, PanelSnapshot, RepoOutcome, StatsOutcome};
use crate::render::{self, escape_html, GridLinks};
use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower_http::trace::TraceLayer;
use tracing::info;
use url::form_urlencoded;

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Shared panel state. Each chain's outcome is written once and read-only after.
#[derive(Clone)]
pub struct AppState {
    pub username: Arc<str>,
    repos: Arc<OnceCell<RepoOutcome>>,
    stats: Arc<OnceCell<StatsOutcome>>,
}

impl AppState {
    pub fn new(username: &str) -> Self {
        Self {
            username: Arc::from(username),
            repos: Arc::new(OnceCell::new()),
            stats: Arc::new(OnceCell::new()),
        }
    }

    /// State with both chains already settled.
    pub fn from_snapshot(username: &str, snapshot: PanelSnapshot) -> Self {
        Self {
            username: Arc::from(username),
            repos: Arc::new(OnceCell::new_with(Some(snapshot.repos))),
            stats: Arc::new(OnceCell::new_with(Some(snapshot.stats))),
        }
    }

    /// Starts the stats chain and the repo chain as independent tasks.
    pub fn spawn_load(&self, client: GitHubClient) {
        let stats_client = client.clone();
        let username = self.username.clone();
        let stats = self.stats.clone();
        tokio::spawn(async move {
            let outcome = load_stats(&stats_client, &username).await;
            let _ = stats.set(outcome);
        });

        let username = self.username.clone();
        let repos = self.repos.clone();
        tokio::spawn(async move {
            let outcome = load_repositories(&client, &username).await;
            let _ = repos.set(outcome);
        });
    }

    pub fn repos(&self) -> Option<&RepoOutcome> {
        self.repos.get()
    }

    pub fn stats(&self) -> Option<&StatsOutcome> {
        self.stats.get()
    }
}

/// Links for controls rendered on a given route.
#[derive(Debug, Clone, Copy)]
pub struct RouteLinks(pub &'static str);

impl GridLinks for RouteLinks {
    fn grid_href(&self, filter: &FilterSelection, expanded: bool) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for language in filter.iter() {
            query.append_pair("lang", language);
        }
        if expanded {
            query.append_pair("expanded", "true");
        }
        let query = query.finish();

        if query.is_empty() {
            self.0.to_string()
        } else {
            format!("{}?{}", self.0, query)
        }
    }
}

/// Filter selection and expansion flag carried in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridQuery {
    pub filter: FilterSelection,
    pub expanded: bool,
}

impl GridQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut languages = Vec::new();
        let mut expanded = false;

        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "lang" if !value.is_empty() => languages.push(value.into_owned()),
                "expanded" => expanded = matches!(value.as_ref(), "true" | "1"),
                _ => {}
            }
        }

        Self {
            filter: languages.into_iter().collect(),
            expanded,
        }
    }
}

pub const PAGE_ROUTE: &str = "/";
pub const PROJECTS_ROUTE: &str = "/projects";

/// Create the panel router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(PAGE_ROUTE, get(panel_page))
        .route(PROJECTS_ROUTE, get(project_grid))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the panel HTTP server
pub async fn start_server(state: AppState, addr: &str) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Portfolio panel listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Full page for the current panel state.
pub fn render_page(
    username: &str,
    repos: Option<&RepoOutcome>,
    stats: Option<&StatsOutcome>,
    query: &GridQuery,
) -> String {
    let links = RouteLinks(PAGE_ROUTE);
    let filters = match repos {
        Some(RepoOutcome::Loaded(state)) => render::render_filters(&state.filter_languages, &query.filter, &links),
        _ => render::render_filters(&[], &query.filter, &links),
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8"><title>{title}</title></head><body>"#,
            r#"<section id="stats"><h2>GitHub</h2>{stats}</section>"#,
            r#"<section id="projects"><h2>Projects</h2>{filters}{grid}</section>"#,
            "</body></html>\n"
        ),
        title = escape_html(username),
        stats = render::render_stats(stats),
        filters = filters,
        grid = render::render_grid_section(repos, &query.filter, query.expanded, &links),
    )
}

async fn panel_page(State(state): State<AppState>, RawQuery(raw): RawQuery) -> impl IntoResponse {
    let query = GridQuery::parse(raw.as_deref());
    Html(render_page(&state.username, state.repos(), state.stats(), &query))
}

/// Grid fragment only, re-projected for the requested filter selection.
async fn project_grid(State(state): State<AppState>, RawQuery(raw): RawQuery) -> impl IntoResponse {
    let query = GridQuery::parse(raw.as_deref());
    Html(render::render_grid_section(
        state.repos(),
        &query.filter,
        query.expanded,
        &RouteLinks(PROJECTS_ROUTE),
    ))
}

async fn liveness_check() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "ok".to_string(),
    })
}
