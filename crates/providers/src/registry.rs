//! Provider registry and current-provider resolution.
//!
//! One registry instance lives for the whole host session. It is populated
//! once with the built-in provider matching the active game system, then
//! accepts registrations from collaborating modules and systems. Exactly
//! one provider is "current" at a time: the configured one when it is
//! still registered, otherwise a deterministically computed default.

use indexmap::IndexMap;
use tracing::warn;

use partyview_core::{HostSnapshot, RegistrationError};

use crate::provider::SystemProvider;
use crate::systems::{
    Dnd5eProvider, GenericProvider, Pf2eProvider, SwadeProvider, Wfrp4eProvider,
};

/// Reserved identifier of this plugin itself; modules may not register
/// under it.
pub const MODULE_ID: &str = "party-overview";

/// Constructor signature external collaborators hand to the registration
/// entry points: the registry computes the namespaced identifier and the
/// constructor builds the provider around it.
pub type ProviderCtor = Box<dyn FnOnce(String) -> Box<dyn SystemProvider>>;

/// All registered providers plus the "current" pointer.
pub struct ProviderRegistry {
    providers: IndexMap<String, Box<dyn SystemProvider>>,
    /// Last configured provider id seen from settings
    configured: Option<String>,
    /// Resolved current provider id
    current: Option<String>,
    system_id: String,
    active_modules: Vec<String>,
}

impl ProviderRegistry {
    /// Build a registry for the given host session and install the
    /// built-in provider for the active game system, falling back to the
    /// generic provider for unrecognized systems.
    pub fn new(snapshot: &HostSnapshot) -> Self {
        let mut registry = Self {
            providers: IndexMap::new(),
            configured: None,
            current: None,
            system_id: snapshot.system_id.clone(),
            active_modules: snapshot.active_modules.clone(),
        };

        let native: Box<dyn SystemProvider> = match snapshot.system_id.as_str() {
            "dnd5e" => Box::new(Dnd5eProvider::new("native.dnd5e")),
            "pf2e" => Box::new(Pf2eProvider::new("native.pf2e")),
            "swade" => Box::new(SwadeProvider::new("native.swade")),
            "wfrp4e" => Box::new(Wfrp4eProvider::new("native.wfrp4e")),
            _ => Box::new(GenericProvider::new("native")),
        };
        registry.insert(native);
        registry
    }

    /// Register a provider on behalf of a host module.
    ///
    /// The module must be active in the host and must not use the reserved
    /// plugin id. Violations are logged and ignored; no error escapes to
    /// the caller.
    pub fn register_module(&mut self, module_id: &str, ctor: ProviderCtor) {
        if !self.active_modules.iter().any(|m| m == module_id) {
            let error = RegistrationError::UnknownModule { module_id: module_id.to_string() };
            warn!(module_id, "{error}");
            return;
        }
        if module_id == MODULE_ID {
            let error = RegistrationError::ReservedId { module_id: module_id.to_string() };
            warn!(module_id, "{error}");
            return;
        }
        self.insert(ctor(format!("module.{module_id}")));
    }

    /// Register a provider on behalf of a game system.
    ///
    /// The id must match the actively loaded system; a mismatch is logged
    /// and ignored the same way module violations are.
    pub fn register_system(&mut self, system_id: &str, ctor: ProviderCtor) {
        if system_id != self.system_id {
            let error = RegistrationError::SystemMismatch {
                requested: system_id.to_string(),
                active: self.system_id.clone(),
            };
            warn!(system_id, active = %self.system_id, "{error}");
            return;
        }
        self.insert(ctor(format!("system.{system_id}")));
    }

    fn insert(&mut self, provider: Box<dyn SystemProvider>) {
        self.providers.insert(provider.id().to_string(), provider);
        self.resolve_current();
    }

    /// The deterministic default provider for the current registry
    /// contents.
    ///
    /// Game systems take precedence: a `system.`-namespaced provider wins
    /// outright, then a module provider written for the active game system
    /// beats the built-in one, then any provider matching the active
    /// system id, then any module at all, then whatever was registered
    /// first. Insertion order breaks every tie, so the result is stable
    /// for a fixed registration sequence.
    pub fn default_provider_id(&self) -> Option<&str> {
        if self.providers.is_empty() {
            return None;
        }

        self.find_id(|id| id.starts_with("system."))
            .or_else(|| self.find_id(|id| id.starts_with("module.") && id.contains(&self.system_id)))
            .or_else(|| self.find_id(|id| id.contains(&self.system_id)))
            .or_else(|| self.find_id(|id| id.starts_with("module.")))
            .or_else(|| self.providers.keys().next().map(String::as_str))
    }

    fn find_id(&self, predicate: impl Fn(&str) -> bool) -> Option<&str> {
        self.providers.keys().map(String::as_str).find(|id| predicate(id))
    }

    /// Re-resolve the current provider from a configured identifier: the
    /// configured provider if it is still registered, else the computed
    /// default. Idempotent; called on registry mutation and on every
    /// settings change.
    pub fn update_current(&mut self, configured: Option<&str>) {
        self.configured = configured.map(str::to_string);
        self.resolve_current();
    }

    fn resolve_current(&mut self) {
        let configured = self
            .configured
            .as_deref()
            .filter(|id| self.providers.contains_key(*id))
            .map(str::to_string);
        self.current = configured.or_else(|| self.default_provider_id().map(str::to_string));
    }

    /// The active provider instance.
    pub fn current(&self) -> Option<&dyn SystemProvider> {
        self.current
            .as_deref()
            .and_then(|id| self.providers.get(id))
            .map(Box::as_ref)
    }

    /// Identifier of the active provider.
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Look a provider up by its full identifier.
    pub fn get(&self, id: &str) -> Option<&dyn SystemProvider> {
        self.providers.get(id).map(Box::as_ref)
    }

    /// All registered identifiers in insertion order.
    pub fn provider_ids(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partyview_core::Result;

    struct TestProvider {
        id: String,
    }

    impl TestProvider {
        fn ctor() -> ProviderCtor {
            Box::new(|id| Box::new(TestProvider { id }) as Box<dyn SystemProvider>)
        }
    }

    impl SystemProvider for TestProvider {
        fn id(&self) -> &str {
            &self.id
        }

        fn template(&self) -> Result<&'static str> {
            Ok("modules/party-overview/templates/test.hbs")
        }
    }

    fn snapshot(system_id: &str, modules: &[&str]) -> HostSnapshot {
        let mut snapshot = HostSnapshot::new(system_id);
        snapshot.active_modules = modules.iter().map(|m| m.to_string()).collect();
        snapshot
    }

    #[test]
    fn test_native_provider_matches_active_system() {
        let registry = ProviderRegistry::new(&snapshot("dnd5e", &[]));
        assert_eq!(registry.current_id(), Some("native.dnd5e"));

        let registry = ProviderRegistry::new(&snapshot("wfrp4e", &[]));
        assert_eq!(registry.current_id(), Some("native.wfrp4e"));
    }

    #[test]
    fn test_unrecognized_system_falls_back_to_generic() {
        let registry = ProviderRegistry::new(&snapshot("13th-age-homebrew", &[]));
        assert_eq!(registry.current_id(), Some("native"));
        // the generic fallback intentionally has no template
        assert!(registry.current().unwrap().template().is_err());
    }

    #[test]
    fn test_module_registration_requires_active_module() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &[]));
        registry.register_module("better-dnd5e", TestProvider::ctor());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("module.better-dnd5e").is_none());
    }

    #[test]
    fn test_module_registration_rejects_reserved_id() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &["party-overview"]));
        registry.register_module("party-overview", TestProvider::ctor());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_system_registration_rejects_mismatch() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &[]));
        registry.register_system("pf2e", TestProvider::ctor());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("system.pf2e").is_none());
    }

    #[test]
    fn test_module_for_active_system_beats_native_default() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &["better-dnd5e"]));
        registry.register_module("better-dnd5e", TestProvider::ctor());
        assert_eq!(registry.default_provider_id(), Some("module.better-dnd5e"));
        assert_eq!(registry.current_id(), Some("module.better-dnd5e"));
    }

    #[test]
    fn test_system_namespace_beats_matching_module() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &["better-dnd5e"]));
        registry.register_module("better-dnd5e", TestProvider::ctor());
        registry.register_system("dnd5e", TestProvider::ctor());
        assert_eq!(registry.default_provider_id(), Some("system.dnd5e"));
        assert_eq!(registry.current_id(), Some("system.dnd5e"));
    }

    #[test]
    fn test_unrelated_module_is_last_resort_before_native() {
        // generic native fallback doesn't contain the system id, so an
        // unrelated module wins the default
        let mut registry = ProviderRegistry::new(&snapshot("custom-system", &["some-module"]));
        registry.register_module("some-module", TestProvider::ctor());
        assert_eq!(registry.default_provider_id(), Some("module.some-module"));
    }

    #[test]
    fn test_default_selection_is_deterministic() {
        let build = || {
            let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &["better-dnd5e", "other"]));
            registry.register_module("other", TestProvider::ctor());
            registry.register_module("better-dnd5e", TestProvider::ctor());
            registry
        };
        let first = build().default_provider_id().map(str::to_string);
        let second = build().default_provider_id().map(str::to_string);
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("module.better-dnd5e"));
    }

    #[test]
    fn test_configured_provider_wins_when_registered() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &["better-dnd5e"]));
        registry.register_module("better-dnd5e", TestProvider::ctor());
        registry.update_current(Some("native.dnd5e"));
        assert_eq!(registry.current_id(), Some("native.dnd5e"));
    }

    #[test]
    fn test_stale_configured_provider_falls_back_to_default() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &[]));
        registry.update_current(Some("module.disabled-since-last-session"));
        assert_eq!(registry.current_id(), Some("native.dnd5e"));
    }

    #[test]
    fn test_update_current_is_idempotent() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &[]));
        registry.update_current(Some("native.dnd5e"));
        let first = registry.current_id().map(str::to_string);
        registry.update_current(Some("native.dnd5e"));
        assert_eq!(registry.current_id().map(str::to_string), first);
    }

    #[test]
    fn test_registration_resolves_against_last_configured_value() {
        let mut registry = ProviderRegistry::new(&snapshot("dnd5e", &["better-dnd5e"]));
        registry.update_current(Some("module.better-dnd5e"));
        // configured id is stale until the module registers
        assert_eq!(registry.current_id(), Some("native.dnd5e"));
        registry.register_module("better-dnd5e", TestProvider::ctor());
        assert_eq!(registry.current_id(), Some("module.better-dnd5e"));
    }
}
