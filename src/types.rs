use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

// GitHub API response structures
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub fork: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Language byte counts for a repository, in the order GitHub returned them.
///
/// GitHub orders the `/languages` object by descending byte count, and the
/// card shows the first three entries, so the order has to survive decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBytes(Vec<(String, u64)>);

impl LanguageBytes {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self(entries)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, language: &str) -> bool {
        self.0.iter().any(|(name, _)| name == language)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for LanguageBytes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LanguageBytesVisitor;

        impl<'de> Visitor<'de> for LanguageBytesVisitor {
            type Value = LanguageBytes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language names to byte counts")
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(LanguageBytes::default())
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, bytes)) = map.next_entry::<String, u64>()? {
                    entries.push((name, bytes));
                }
                Ok(LanguageBytes(entries))
            }
        }

        // `null` is treated as no languages
        deserializer.deserialize_any(LanguageBytesVisitor)
    }
}
