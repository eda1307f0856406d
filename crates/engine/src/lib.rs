pub mod engine;
pub mod mode;
pub mod render;

pub use engine::PartyOverview;
pub use mode::DisplayMode;
pub use render::RenderModel;

pub use partyview_core::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use partyview_core::{HostSnapshot, Scene, Settings, Token};
    use partyview_providers::ProviderRegistry;
    use serde_json::json;

    /// End-to-end pass over a small pf2e party, from host snapshot to the
    /// flattened render value the template layer binds to.
    #[test]
    fn test_full_cycle_against_pf2e_fixture() {
        let mut host = HostSnapshot::new("pf2e");
        host.actors = vec![
            partyview_core::Actor::new("p1", "Seelah")
                .with_kind("character")
                .with_system(json!({
                    "attributes": { "hp": { "value": 31, "max": 36 } },
                    "traits": { "languages": { "value": ["common"] } },
                }))
                .with_items(vec![json!({
                    "name": "Gold Pieces",
                    "type": "treasure",
                    "system": { "quantity": { "value": 4 } },
                })]),
        ];
        host.scene = Some(Scene::new(vec![Token::new("p1")]));

        let registry = ProviderRegistry::new(&host);
        assert_eq!(registry.current_id(), Some("native.pf2e"));

        let overview = PartyOverview::new();
        let model = overview.update(&host, &registry, &Settings::default()).unwrap();
        let value = model.to_value().unwrap();

        assert_eq!(value["mode"], "SHOW_VISIBLE");
        assert_eq!(value["actors"][0]["short_name"], "Seelah");
        assert_eq!(value["total_party_gp"], "4.00");
        assert_eq!(value["languages"], json!(["common"]));
        assert_eq!(value["tabs"]["lore"]["visible"], true);
    }
}
