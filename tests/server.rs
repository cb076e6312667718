use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use portfolio_panel::models::{
    AccountStats, AnnotatedRepo, PanelSnapshot, PanelState, RepoOutcome, StatsOutcome,
};
use portfolio_panel::server::{create_router, AppState};
use portfolio_panel::types::LanguageBytes;
use tower::ServiceExt;

fn repo(name: &str, langs: &[&str]) -> AnnotatedRepo {
    AnnotatedRepo {
        name: name.to_string(),
        description: None,
        html_url: format!("https://github.com/octo/{}", name),
        languages: LanguageBytes::new(langs.iter().map(|l| (l.to_string(), 100)).collect()),
    }
}

fn loaded_state() -> AppState {
    let repos = (0..9)
        .map(|i| {
            let langs: &[&str] = if i < 3 { &["Rust", "Shell"] } else { &["TypeScript"] };
            repo(&format!("repo{}", i), langs)
        })
        .collect();

    AppState::from_snapshot(
        "octo",
        PanelSnapshot {
            repos: RepoOutcome::Loaded(PanelState::new(repos)),
            stats: StatsOutcome::Loaded(AccountStats {
                public_repos: 20,
                followers: 10,
                following: 1,
            }),
        },
    )
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let app = create_router(state);
    let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn card_count(html: &str) -> usize {
    html.matches(r#"class="project glass""#).count()
}

#[tokio::test]
async fn test_page_renders_all_three_containers() {
    let (status, html) = get(loaded_state(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"id="statsContainer""#));
    assert!(html.contains(r#"id="languageFilters""#));
    assert!(html.contains(r#"id="projectGrid""#));
    assert_eq!(html.matches(r#"class="stat-card glass""#).count(), 3);
    assert_eq!(card_count(&html), 6);
    assert!(html.contains("Show 3 more projects"));
    assert!(html.contains(r#"data-language="TypeScript""#));
}

#[tokio::test]
async fn test_projects_fragment_filters_by_language() {
    let (status, html) = get(loaded_state(), "/projects?lang=Rust").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.starts_with(r#"<div id="projectGrid""#));
    assert_eq!(card_count(&html), 3);
    assert!(!html.contains("show-more-btn"));
}

#[tokio::test]
async fn test_projects_fragment_or_filter_and_expansion() {
    let (_, collapsed) = get(loaded_state(), "/projects?lang=Shell&lang=TypeScript").await;
    assert_eq!(card_count(&collapsed), 6);
    assert!(collapsed.contains(r#"href="/projects?lang=Shell&amp;lang=TypeScript&amp;expanded=true""#));

    let (_, expanded) = get(loaded_state(), "/projects?lang=Shell&lang=TypeScript&expanded=true").await;
    assert_eq!(card_count(&expanded), 9);
    assert!(!expanded.contains("show-more-btn"));
}

#[tokio::test]
async fn test_unknown_language_shows_empty_state() {
    let (_, html) = get(loaded_state(), "/projects?lang=Haskell").await;
    assert!(html.contains("No repositories match selected languages"));
}

#[tokio::test]
async fn test_page_shows_skeletons_before_load() {
    let (status, html) = get(AppState::new("octo"), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-loading="true""#));
    assert_eq!(html.matches("stat-card glass skeleton").count(), 4);
    assert_eq!(html.matches("project glass skeleton").count(), 6);
}

#[tokio::test]
async fn test_failed_stats_keep_skeletons() {
    let state = AppState::from_snapshot(
        "octo",
        PanelSnapshot {
            repos: RepoOutcome::Empty,
            stats: StatsOutcome::Unavailable,
        },
    );
    let (_, html) = get(state, "/").await;

    assert!(html.contains("No repositories found"));
    assert_eq!(html.matches("stat-card glass skeleton").count(), 4);
    assert!(!html.contains("Unable"));
}

#[tokio::test]
async fn test_liveness() {
    let (status, body) = get(AppState::new("octo"), "/livez").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);
}
