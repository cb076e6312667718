use crate::tally::{LanguageTally, TOP_LANGUAGES};
use crate::types::{GitHubRepo, GitHubUser, LanguageBytes};
use std::collections::BTreeSet;

/// A repository whose language fetch has resolved.
///
/// Only repos in this shape ever reach the panel, so a card can never be
/// rendered for a repo with languages still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRepo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub languages: LanguageBytes,
}

impl AnnotatedRepo {
    pub fn new(repo: GitHubRepo, languages: LanguageBytes) -> Self {
        Self {
            name: repo.name,
            description: repo.description,
            html_url: repo.html_url,
            languages,
        }
    }
}

/// Languages the user has toggled on. Empty means no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    active: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one language and returns whether it is now active.
    pub fn toggle(&mut self, language: &str) -> bool {
        if self.active.remove(language) {
            false
        } else {
            self.active.insert(language.to_string());
            true
        }
    }

    /// Copy of this selection with one language flipped.
    pub fn toggled(&self, language: &str) -> Self {
        let mut next = self.clone();
        next.toggle(language);
        next
    }

    pub fn is_active(&self, language: &str) -> bool {
        self.active.contains(language)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    /// OR across active languages; everything matches an empty selection.
    pub fn matches(&self, repo: &AnnotatedRepo) -> bool {
        self.is_empty() || self.active.iter().any(|lang| repo.languages.contains(lang))
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the repo chain produced for one page load. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub repos: Vec<AnnotatedRepo>,
    pub tally: LanguageTally,
    pub filter_languages: Vec<String>,
}

impl PanelState {
    pub fn new(repos: Vec<AnnotatedRepo>) -> Self {
        let tally = LanguageTally::from_repos(&repos);
        let filter_languages = tally.top(TOP_LANGUAGES);
        Self {
            repos,
            tally,
            filter_languages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    Loaded(PanelState),
    /// No non-fork repositories; not an error.
    Empty,
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountStats {
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: u32,
    pub icon: &'static str,
}

impl AccountStats {
    pub fn cards(&self) -> [StatCard; 3] {
        [
            StatCard {
                label: "Repositories",
                value: self.public_repos,
                icon: "fa-code-branch",
            },
            StatCard {
                label: "Followers",
                value: self.followers,
                icon: "fa-users",
            },
            StatCard {
                label: "Following",
                value: self.following,
                icon: "fa-user-check",
            },
        ]
    }
}

impl From<GitHubUser> for AccountStats {
    fn from(user: GitHubUser) -> Self {
        Self {
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOutcome {
    Loaded(AccountStats),
    /// The stats area stays in its skeleton state.
    Unavailable,
}

/// Result of both fetch chains for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub repos: RepoOutcome,
    pub stats: StatsOutcome,
}
