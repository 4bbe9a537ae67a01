//! Bulk provider import/export.
//!
//! An import document is either a single provider object or an array of
//! them, in the same shape the registry persists. Entries are applied one by
//! one through [`Registry::add`], so a duplicate or malformed entry only
//! affects itself.

use reelgate_model::{ModelError, Provider};
use serde::Deserialize;

use super::{Registry, RegistryError};

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    One(Provider),
    Many(Vec<Provider>),
}

/// Parse an import document into providers, in document order.
pub fn parse_import(document: &str) -> Result<Vec<Provider>, serde_json::Error> {
    Ok(match serde_json::from_str(document)? {
        ImportDocument::One(provider) => vec![provider],
        ImportDocument::Many(providers) => providers,
    })
}

/// What happened to one imported entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Added,
    Rejected(RegistryError),
    Invalid(ModelError),
}

/// Per-entry results of an import, keyed by the entry's name as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub entries: Vec<(String, ImportOutcome)>,
}

impl ImportReport {
    pub fn added(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| *outcome == ImportOutcome::Added)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.len() - self.added()
    }
}

impl Registry {
    /// Add every importable provider, returning the resulting snapshot and
    /// a report for each entry.
    pub fn import(&self, providers: Vec<Provider>) -> (Registry, ImportReport) {
        let mut current = self.clone();
        let mut report = ImportReport::default();

        for raw in providers {
            let label = raw.name.clone();
            let outcome = match raw.normalized() {
                Err(err) => ImportOutcome::Invalid(err),
                Ok(provider) => match current.add(provider) {
                    Ok(next) => {
                        current = next;
                        ImportOutcome::Added
                    }
                    Err(err) => ImportOutcome::Rejected(err),
                },
            };
            report.entries.push((label, outcome));
        }

        (current, report)
    }

    /// Providers as a pretty-printed JSON array, importable as-is.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.providers())
    }
}
