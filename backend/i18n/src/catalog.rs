//! Strongly-typed string catalog: locale → category → key → template.
//!
//! Templates use `{name}` placeholders. [`Catalog::validated`] checks at
//! startup that every locale defines the same keys with the same
//! placeholders, so lookups at runtime never miss.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::locale::Locale;
use crate::tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Commands,
    Status,
    Youtube,
    Progress,
    Platforms,
    Language,
    Promotional,
    Stats,
    Errors,
    Replies,
    Admin,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Commands => "commands",
            Category::Status => "status",
            Category::Youtube => "youtube",
            Category::Progress => "progress",
            Category::Platforms => "platforms",
            Category::Language => "language",
            Category::Promotional => "promotional",
            Category::Stats => "stats",
            Category::Errors => "errors",
            Category::Replies => "replies",
            Category::Admin => "admin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a locale table.
pub(crate) type Entry = (Category, &'static str, &'static str);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{locale}: missing {category}.{key}")]
    MissingKey {
        locale: Locale,
        category: Category,
        key: &'static str,
    },

    #[error("{locale}: duplicate {category}.{key}")]
    DuplicateKey {
        locale: Locale,
        category: Category,
        key: &'static str,
    },

    #[error("{locale}: {category}.{key} placeholders {found:?} differ from {expected:?}")]
    PlaceholderMismatch {
        locale: Locale,
        category: Category,
        key: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<(Locale, Category), HashMap<&'static str, &'static str>>,
}

impl Catalog {
    /// Build from explicit per-locale tables, rejecting duplicates.
    pub(crate) fn from_tables(
        tables: &[(Locale, &'static [Entry])],
    ) -> Result<Self, CatalogError> {
        let mut entries: HashMap<_, HashMap<_, _>> = HashMap::new();
        for (locale, rows) in tables {
            for (category, key, template) in rows.iter().copied() {
                let slot = entries.entry((*locale, category)).or_default();
                if slot.insert(key, template).is_some() {
                    return Err(CatalogError::DuplicateKey {
                        locale: *locale,
                        category,
                        key,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// The built-in catalog, checked for completeness across all locales.
    pub fn validated() -> Result<Self, CatalogError> {
        let catalog = Self::from_tables(&tables::ALL)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every key known to any locale must exist in every locale, with the
    /// same placeholder set as the default locale's template.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let keys: BTreeSet<(Category, &'static str)> = self
            .entries
            .iter()
            .flat_map(|((_, c), rows)| rows.keys().map(move |k| (*c, *k)))
            .collect();

        for (category, key) in keys {
            let reference = Locale::ALL
                .iter()
                .find_map(|l| self.get(*l, category, key))
                .map(placeholders)
                .unwrap_or_default();

            for locale in Locale::ALL {
                let Some(template) = self.get(locale, category, key) else {
                    return Err(CatalogError::MissingKey { locale, category, key });
                };
                let found = placeholders(template);
                if found != reference {
                    return Err(CatalogError::PlaceholderMismatch {
                        locale,
                        category,
                        key,
                        expected: reference,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, locale: Locale, category: Category, key: &str) -> Option<&'static str> {
        self.entries
            .get(&(locale, category))
            .and_then(|rows| rows.get(key))
            .copied()
    }

    /// Render a template with `{name}` substitutions. Falls back to the
    /// default locale, then to a `Text not found` placeholder. Never panics.
    pub fn render(
        &self,
        locale: Locale,
        category: Category,
        key: &str,
        args: &[(&str, &str)],
    ) -> String {
        let template = self.get(locale, category, key).or_else(|| {
            warn!(%locale, %category, key, "Missing catalog entry, using default locale");
            self.get(Locale::default(), category, key)
        });

        match template {
            Some(t) => fill(t, args),
            None => format!("Text not found: {category}.{key}"),
        }
    }

    /// Render without substitutions.
    pub fn text(&self, locale: Locale, category: Category, key: &str) -> String {
        self.render(locale, category, key, &[])
    }

    /// Number of (category, key) pairs per locale.
    pub fn key_count(&self) -> BTreeMap<Locale, usize> {
        let mut counts = BTreeMap::new();
        for ((locale, _), rows) in &self.entries {
            *counts.entry(*locale).or_insert(0) += rows.len();
        }
        counts
    }
}

fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Sorted, de-duplicated `{name}` placeholders of a template.
fn placeholders(template: &str) -> Vec<String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    names.insert(name.to_string());
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names.into_iter().collect()
}
