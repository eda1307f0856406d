use crate::provider::SystemProvider;

/// Native fallback registered when the active game system has no built-in
/// adapter. It keeps every trait default, including the unimplemented
/// template, so rendering it surfaces the registration gap as a hard
/// fault instead of a half-working panel.
pub struct GenericProvider {
    id: String,
}

impl GenericProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl SystemProvider for GenericProvider {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partyview_core::{Actor, Error};

    #[test]
    fn test_generic_provider_keeps_the_defaults() {
        let provider = GenericProvider::new("native");
        assert_eq!(provider.id(), "native");
        assert_eq!(provider.width(), 500);
        assert!(matches!(
            provider.template(),
            Err(Error::UnimplementedProvider { ref id }) if id == "native"
        ));
        let details = provider.get_actor_details(&Actor::new("a1", "Someone")).unwrap();
        assert_eq!(details.name, "Someone");
    }
}
