//! The provider registry.
//!
//! [`Registry`] is an immutable value: every operation hands back a new
//! snapshot or a [`RegistryError`] naming why the request was refused, and the
//! original is never touched. The invariants hold for every value that can be
//! constructed:
//!
//! - there is always at least one provider;
//! - provider names are unique (exact, case-sensitive comparison);
//! - the active provider is always one of the registered providers.
//!
//! Persistence lives in [`crate::store`]; this module only knows the JSON
//! layout (see [`persisted`]).

mod defaults;
pub mod import;
pub mod persisted;

use reelgate_model::{ModelError, Provider};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::default_providers;
pub use import::{ImportOutcome, ImportReport, parse_import};
pub use persisted::{PersistedRegistry, STORAGE_KEY};

/// Reasons a registry operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a provider named '{0}' already exists")]
    DuplicateName(String),
    #[error("'{0}' is the only provider left and cannot be removed")]
    LastProviderProtected(String),
    #[error("no provider named '{0}'")]
    NotFound(String),
}

/// Reasons a persisted registry cannot be turned back into a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRegistry {
    #[error("registry has no providers")]
    Empty,
    #[error("provider name '{0}' appears more than once")]
    DuplicateName(String),
    #[error(transparent)]
    InvalidProvider(#[from] ModelError),
}

/// Ordered providers plus the active selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PersistedRegistry", try_from = "PersistedRegistry")]
pub struct Registry {
    providers: Vec<Provider>,
    active: usize,
}

impl Default for Registry {
    /// The two built-in providers, first one active.
    fn default() -> Self {
        Self {
            providers: default_providers(),
            active: 0,
        }
    }
}

impl Registry {
    /// Build a registry from providers in order, first one active.
    pub fn new(providers: Vec<Provider>) -> Result<Self, InvalidRegistry> {
        check_providers(&providers)?;
        Ok(Self {
            providers,
            active: 0,
        })
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn active(&self) -> &Provider {
        &self.providers[self.active]
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active().name == name
    }

    pub fn get(&self, name: &str) -> Option<&Provider> {
        self.position(name).map(|index| &self.providers[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Never true for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Append a provider whose name is not yet taken.
    pub fn add(&self, provider: Provider) -> Result<Self, RegistryError> {
        if self.contains(&provider.name) {
            return Err(RegistryError::DuplicateName(provider.name));
        }
        let mut next = self.clone();
        next.providers.push(provider);
        Ok(next)
    }

    /// Remove a provider by name.
    ///
    /// Removing the active provider hands the selection to the first
    /// remaining provider.
    pub fn remove(&self, name: &str) -> Result<Self, RegistryError> {
        let index = self
            .position(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        if self.providers.len() == 1 {
            return Err(RegistryError::LastProviderProtected(name.to_string()));
        }

        let mut next = self.clone();
        next.providers.remove(index);
        next.active = match index.cmp(&self.active) {
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Less => self.active - 1,
            std::cmp::Ordering::Greater => self.active,
        };
        Ok(next)
    }

    /// Make a registered provider the active one.
    pub fn set_active(&self, name: &str) -> Result<Self, RegistryError> {
        let index = self
            .position(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        let mut next = self.clone();
        next.active = index;
        Ok(next)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.providers.iter().position(|p| p.name == name)
    }
}

fn check_providers(providers: &[Provider]) -> Result<(), InvalidRegistry> {
    if providers.is_empty() {
        return Err(InvalidRegistry::Empty);
    }
    for (index, provider) in providers.iter().enumerate() {
        if providers[..index].iter().any(|p| p.name == provider.name) {
            return Err(InvalidRegistry::DuplicateName(provider.name.clone()));
        }
    }
    Ok(())
}

impl From<Registry> for PersistedRegistry {
    fn from(registry: Registry) -> Self {
        let active_provider = registry.active().clone();
        Self {
            providers: registry.providers,
            active_provider,
        }
    }
}

impl TryFrom<PersistedRegistry> for Registry {
    type Error = InvalidRegistry;

    fn try_from(persisted: PersistedRegistry) -> Result<Self, Self::Error> {
        let providers = persisted
            .providers
            .into_iter()
            .map(Provider::normalized)
            .collect::<Result<Vec<_>, _>>()?;
        check_providers(&providers)?;

        let wanted = persisted.active_provider.name.trim();
        let active = match providers.iter().position(|p| p.name == wanted)
        {
            Some(index) => index,
            None => {
                tracing::warn!(
                    active = %wanted,
                    "persisted active provider is not registered; selecting the first provider"
                );
                0
            }
        };
        Ok(Self { providers, active })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str) -> Provider {
        Provider::new(
            name,
            format!("https://{name}.test/embed/{{id}}"),
            format!("https://{name}.test/tv/{{id}}/{{season}}/{{episode}}"),
        )
        .unwrap()
    }

    fn names(registry: &Registry) -> Vec<&str> {
        registry.providers().iter().map(|p| p.name.as_str()).collect()
    }

    fn registry(names: &[&str]) -> Registry {
        Registry::new(names.iter().map(|n| provider(n)).collect()).unwrap()
    }

    #[test]
    fn default_has_two_builtins_first_active() {
        let registry = Registry::default();
        assert_eq!(names(&registry), ["Vidsrc.vip", "2Embed.cc"]);
        assert_eq!(registry.active().name, "Vidsrc.vip");
    }

    #[test]
    fn add_appends_new_name() {
        let base = registry(&["a", "b"]);
        let next = base.add(provider("c")).unwrap();
        assert_eq!(next.len(), base.len() + 1);
        assert_eq!(names(&next), ["a", "b", "c"]);
        assert_eq!(next.active().name, "a");
        assert_eq!(names(&base), ["a", "b"]);
    }

    #[test]
    fn add_duplicate_is_rejected() {
        let base = registry(&["a", "b"]);
        let mut duplicate = provider("b");
        duplicate.url = "https://other.test/{id}".into();
        assert_eq!(
            base.add(duplicate),
            Err(RegistryError::DuplicateName("b".into()))
        );
        assert_eq!(base.get("b").unwrap().url, "https://b.test/embed/{id}");
    }

    #[test]
    fn names_are_case_sensitive() {
        let base = registry(&["abc"]);
        assert!(base.add(provider("ABC")).is_ok());
    }

    #[test]
    fn remove_drops_provider() {
        let base = registry(&["a", "b", "c"]);
        let next = base.remove("b").unwrap();
        assert_eq!(next.len(), base.len() - 1);
        assert_eq!(names(&next), ["a", "c"]);
        assert!(!next.contains("b"));
    }

    #[test]
    fn remove_last_provider_is_rejected() {
        let base = registry(&["only"]);
        assert_eq!(
            base.remove("only"),
            Err(RegistryError::LastProviderProtected("only".into()))
        );
        assert_eq!(base, registry(&["only"]));
    }

    #[test]
    fn remove_unknown_is_not_found() {
        let base = registry(&["only"]);
        assert_eq!(base.remove("ghost"), Err(RegistryError::NotFound("ghost".into())));
        let base = registry(&["a", "b"]);
        assert_eq!(base.remove("ghost"), Err(RegistryError::NotFound("ghost".into())));
    }

    #[test]
    fn removing_active_selects_first_remaining() {
        let base = registry(&["a", "b", "c"]).set_active("b").unwrap();
        let next = base.remove("b").unwrap();
        assert_eq!(next.active().name, "a");

        let base = registry(&["a", "b", "c"]);
        let next = base.remove("a").unwrap();
        assert_eq!(next.active().name, "b");
    }

    #[test]
    fn removing_before_active_keeps_selection() {
        let base = registry(&["a", "b", "c"]).set_active("c").unwrap();
        let next = base.remove("a").unwrap();
        assert_eq!(next.active().name, "c");
        let next = next.remove("b").unwrap();
        assert_eq!(next.active().name, "c");
    }

    #[test]
    fn set_active_requires_membership() {
        let base = registry(&["a", "b"]);
        let next = base.set_active("b").unwrap();
        assert!(next.is_active("b"));
        assert_eq!(
            base.set_active("zzz"),
            Err(RegistryError::NotFound("zzz".into()))
        );
        assert!(base.is_active("a"));
    }

    #[test]
    fn new_rejects_broken_provider_lists() {
        assert_eq!(Registry::new(Vec::new()), Err(InvalidRegistry::Empty));
        assert_eq!(
            Registry::new(vec![provider("a"), provider("a")]),
            Err(InvalidRegistry::DuplicateName("a".into()))
        );
    }

    #[test]
    fn serde_round_trip_preserves_registry() {
        let original = registry(&["a", "b", "c"])
            .set_active("c")
            .unwrap()
            .add(provider("d").with_logo("https://d.test/logo.png"))
            .unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Registry = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(serde_json::to_string(&decoded).unwrap(), json);
    }

    #[test]
    fn dangling_active_is_repaired_on_load() {
        let json = r#"{
            "providers": [
                {"name": "a", "url": "a/{id}", "tv_url": "a/{id}"},
                {"name": "b", "url": "b/{id}", "tv_url": "b/{id}"}
            ],
            "activeProvider": {"name": "gone", "url": "g", "tv_url": "g"}
        }"#;
        let registry: Registry = serde_json::from_str(json).unwrap();
        assert!(registry.is_active("a"));
    }

    #[test]
    fn active_matches_by_name_and_uses_registered_copy() {
        let json = r#"{
            "providers": [
                {"name": "a", "url": "a/{id}", "tv_url": "a/{id}"},
                {"name": "b", "url": "b/{id}", "tv_url": "b/{id}"}
            ],
            "activeProvider": {"name": "b", "url": "stale", "tv_url": "stale"}
        }"#;
        let registry: Registry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.active().url, "b/{id}");
    }

    #[test]
    fn empty_or_duplicate_persisted_state_is_rejected() {
        let empty = r#"{"providers": [], "activeProvider": {"name": "a", "url": "", "tv_url": ""}}"#;
        assert!(serde_json::from_str::<Registry>(empty).is_err());

        let duplicate = r#"{
            "providers": [
                {"name": "a", "url": "1", "tv_url": "1"},
                {"name": "a", "url": "2", "tv_url": "2"}
            ],
            "activeProvider": {"name": "a", "url": "1", "tv_url": "1"}
        }"#;
        assert!(serde_json::from_str::<Registry>(duplicate).is_err());

        // Names that collide once trimmed are duplicates too.
        let padded_duplicate = r#"{
            "providers": [
                {"name": "a", "url": "1", "tv_url": "1"},
                {"name": " a ", "url": "2", "tv_url": "2"}
            ],
            "activeProvider": {"name": "a", "url": "1", "tv_url": "1"}
        }"#;
        assert!(serde_json::from_str::<Registry>(padded_duplicate).is_err());
    }

    #[test]
    fn persisted_providers_with_blank_fields_are_rejected() {
        let blank = r#"{
            "providers": [
                {"name": "", "url": "", "tv_url": ""},
                {"name": "ok", "url": "u/{id}", "tv_url": "t/{id}"}
            ],
            "activeProvider": {"name": "ok", "url": "u/{id}", "tv_url": "t/{id}"}
        }"#;
        assert!(serde_json::from_str::<Registry>(blank).is_err());

        let blank_url = r#"{
            "providers": [{"name": "x", "url": "  ", "tv_url": "t/{id}"}],
            "activeProvider": {"name": "x", "url": "  ", "tv_url": "t/{id}"}
        }"#;
        let err = Registry::try_from(
            serde_json::from_str::<PersistedRegistry>(blank_url).unwrap(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvalidRegistry::InvalidProvider(ModelError::InvalidProvider {
                field: "url"
            })
        );
    }

    #[test]
    fn persisted_providers_are_trimmed_on_load() {
        let padded = r#"{
            "providers": [
                {"name": "  padded  ", "url": " u/{id} ", "tv_url": "t/{id}"},
                {"name": "b", "url": "b/{id}", "tv_url": "b/{id}"}
            ],
            "activeProvider": {"name": "padded ", "url": "u/{id}", "tv_url": "t/{id}"}
        }"#;
        let registry: Registry = serde_json::from_str(padded).unwrap();
        assert_eq!(names(&registry), ["padded", "b"]);
        assert_eq!(registry.active().url, "u/{id}");
        assert!(registry.is_active("padded"));
    }
}
