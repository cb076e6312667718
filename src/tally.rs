use crate::models::AnnotatedRepo;

pub const TOP_LANGUAGES: usize = 8;

/// How many fetched repositories include each language.
///
/// Entries stay in first-seen order so that ranking ties are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTally {
    counts: Vec<(String, usize)>,
}

impl LanguageTally {
    /// One increment per repository that lists a language; byte counts are ignored.
    pub fn from_repos(repos: &[AnnotatedRepo]) -> Self {
        let mut tally = LanguageTally::default();
        for repo in repos {
            for language in repo.languages.names() {
                tally.increment(language);
            }
        }
        tally
    }

    fn increment(&mut self, language: &str) {
        match self.counts.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((language.to_string(), 1)),
        }
    }

    pub fn get(&self, language: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Languages by descending count, ties kept in first-seen order.
    pub fn ranked(&self) -> Vec<&str> {
        let mut ranked: Vec<&(String, usize)> = self.counts.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn top(&self, n: usize) -> Vec<String> {
        self.ranked().into_iter().take(n).map(str::to_string).collect()
    }
}
