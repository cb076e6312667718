//! Projection from panel state to what the page shows, and the HTML for it.
//!
//! Every render call produces the full content of its container; nothing is
//! patched incrementally.

use crate::models::{AnnotatedRepo, FilterSelection, RepoOutcome, StatCard, StatsOutcome};
use std::fmt::Write;

pub const PAGE_SIZE: usize = 6;
pub const CARD_LANGUAGES: usize = 3;
pub const GRID_SKELETONS: usize = 6;
pub const STAT_SKELETONS: usize = 4;

pub const NO_DESCRIPTION: &str = "No description provided";
pub const NO_LANGUAGES: &str = "N/A";
pub const NO_REPOSITORIES: &str = "No repositories found";
pub const NO_MATCHES: &str = "No repositories match selected languages";
pub const FETCH_FAILED: &str = "Unable to fetch repositories";

pub const GRID_ID: &str = "projectGrid";
pub const FILTERS_ID: &str = "languageFilters";
pub const STATS_ID: &str = "statsContainer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub name: String,
    pub url: String,
    pub description: String,
    pub languages: String,
}

impl ProjectCard {
    pub fn from_repo(repo: &AnnotatedRepo) -> Self {
        let languages = repo
            .languages
            .names()
            .take(CARD_LANGUAGES)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            name: repo.name.clone(),
            url: repo.html_url.clone(),
            description: repo
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            languages: if languages.is_empty() {
                NO_LANGUAGES.to_string()
            } else {
                languages
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMore {
    pub remaining: usize,
}

impl ShowMore {
    pub fn label(&self) -> String {
        format!("Show {} more projects", self.remaining)
    }
}

/// Eligible cards for one filter state, collapsed to the first page until expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGrid {
    eligible: Vec<ProjectCard>,
    show_more: Option<ShowMore>,
}

impl CardGrid {
    fn new(eligible: Vec<ProjectCard>) -> Self {
        let show_more = (eligible.len() > PAGE_SIZE).then(|| ShowMore {
            remaining: eligible.len() - PAGE_SIZE,
        });
        Self { eligible, show_more }
    }

    pub fn visible(&self) -> &[ProjectCard] {
        match self.show_more {
            Some(_) => &self.eligible[..PAGE_SIZE],
            None => &self.eligible,
        }
    }

    pub fn show_more(&self) -> Option<ShowMore> {
        self.show_more
    }

    /// Reveals the remaining cards and drops the control. Returns `false` if
    /// there was nothing to expand, so repeated activation is a no-op.
    pub fn expand(&mut self) -> bool {
        self.show_more.take().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    NoMatches,
    Cards(CardGrid),
}

impl GridView {
    pub fn expand(&mut self) -> bool {
        match self {
            GridView::Cards(grid) => grid.expand(),
            GridView::NoMatches => false,
        }
    }

    pub fn visible(&self) -> &[ProjectCard] {
        match self {
            GridView::Cards(grid) => grid.visible(),
            GridView::NoMatches => &[],
        }
    }

    pub fn show_more(&self) -> Option<ShowMore> {
        match self {
            GridView::Cards(grid) => grid.show_more(),
            GridView::NoMatches => None,
        }
    }
}

/// Pure projection of (repos, filter) onto the grid. Each call starts collapsed.
pub fn project(repos: &[AnnotatedRepo], filter: &FilterSelection) -> GridView {
    let eligible: Vec<ProjectCard> = repos
        .iter()
        .filter(|repo| filter.matches(repo))
        .map(ProjectCard::from_repo)
        .collect();

    if eligible.is_empty() {
        GridView::NoMatches
    } else {
        GridView::Cards(CardGrid::new(eligible))
    }
}

/// Builds the hrefs the rendered controls point at.
pub trait GridLinks {
    fn grid_href(&self, filter: &FilterSelection, expanded: bool) -> String;
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn message(text: &str) -> String {
    format!(r#"<p class="muted">{}</p>"#, escape_html(text))
}

fn render_card(out: &mut String, card: &ProjectCard) {
    let _ = write!(
        out,
        r#"<div class="project glass"><h3><a href="{url}" target="_blank" rel="noopener">{name}</a></h3><p>{description}</p><small class="accent">{languages}</small></div>"#,
        url = escape_html(&card.url),
        name = escape_html(&card.name),
        description = escape_html(&card.description),
        languages = escape_html(&card.languages),
    );
}

/// Inner HTML of the project grid for a projected view.
pub fn render_grid(view: &GridView, filter: &FilterSelection, links: &impl GridLinks) -> String {
    let grid = match view {
        GridView::NoMatches => return message(NO_MATCHES),
        GridView::Cards(grid) => grid,
    };

    let mut out = String::new();
    for card in grid.visible() {
        render_card(&mut out, card);
    }

    if let Some(show_more) = grid.show_more() {
        let _ = write!(
            out,
            r#"<div class="show-more"><a class="show-more-btn" href="{href}">{label}</a></div>"#,
            href = escape_html(&links.grid_href(filter, true)),
            label = escape_html(&show_more.label()),
        );
    }
    out
}

pub fn render_grid_skeletons() -> String {
    r#"<div class="project glass skeleton"><h3></h3><p></p><small></small></div>"#.repeat(GRID_SKELETONS)
}

/// Full `projectGrid` element for whatever state the repo chain is in.
/// `None` means the chain has not finished yet.
pub fn render_grid_section(
    outcome: Option<&RepoOutcome>,
    filter: &FilterSelection,
    expanded: bool,
    links: &impl GridLinks,
) -> String {
    let (inner, loading, paginated) = match outcome {
        None => (render_grid_skeletons(), true, false),
        Some(RepoOutcome::Failed { .. }) => (message(FETCH_FAILED), false, false),
        Some(RepoOutcome::Empty) => (message(NO_REPOSITORIES), false, false),
        Some(RepoOutcome::Loaded(state)) => {
            let mut view = project(&state.repos, filter);
            if expanded {
                view.expand();
            }
            let paginated = view.show_more().is_some();
            (render_grid(&view, filter, links), false, paginated)
        }
    };

    format!(
        r#"<div id="{id}" class="project-grid{paginated}" data-loading="{loading}">{inner}</div>"#,
        id = GRID_ID,
        paginated = if paginated { " paginated" } else { "" },
        loading = loading,
        inner = inner,
    )
}

/// Filter buttons; each links to the grid with its language toggled.
pub fn render_filters(languages: &[String], filter: &FilterSelection, links: &impl GridLinks) -> String {
    let mut out = format!(r#"<div id="{}" class="language-filters">"#, FILTERS_ID);
    for language in languages {
        let _ = write!(
            out,
            r#"<a role="button" class="filter-btn{active}" data-language="{lang}" href="{href}">{lang}</a>"#,
            active = if filter.is_active(language) { " active" } else { "" },
            lang = escape_html(language),
            href = escape_html(&links.grid_href(&filter.toggled(language), false)),
        );
    }
    out.push_str("</div>");
    out
}

fn render_stat_card(out: &mut String, card: &StatCard) {
    let _ = write!(
        out,
        r#"<div class="stat-card glass"><i class="fas {icon} stat-icon"></i><div class="stat-value">{value}</div><div class="stat-label">{label}</div></div>"#,
        icon = card.icon,
        value = card.value,
        label = card.label,
    );
}

/// Stats cards, or skeletons while loading and after a failed fetch.
pub fn render_stats(outcome: Option<&StatsOutcome>) -> String {
    let mut out = format!(r#"<div id="{}" class="stats">"#, STATS_ID);
    match outcome {
        Some(StatsOutcome::Loaded(stats)) => {
            for card in stats.cards().iter() {
                render_stat_card(&mut out, card);
            }
        }
        Some(StatsOutcome::Unavailable) | None => {
            out.push_str(
                &r#"<div class="stat-card glass skeleton"><div class="stat-value"></div><div class="stat-label"></div></div>"#
                    .repeat(STAT_SKELETONS),
            );
        }
    }
    out.push_str("</div>");
    out
}
