use serde_json::{Value, json};

use partyview_core::{Actor, ActorDetails, Error, Result};

use crate::provider::SystemProvider;

/// Savage Worlds Adventure Edition adapter.
///
/// SWADE tracks wounds, fatigue and bennies instead of hit points and has
/// no party-wide currency or language matrix, so the reduction step stays
/// the passthrough default.
pub struct SwadeProvider {
    id: String,
}

impl SwadeProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl SystemProvider for SwadeProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn template(&self) -> Result<&'static str> {
        Ok("modules/party-overview/templates/swade.hbs")
    }

    fn get_actor_details(&self, actor: &Actor) -> Result<ActorDetails> {
        if actor.value_at("/wounds").and_then(Value::as_object).is_none() {
            return Err(Error::extraction(&actor.name, &actor.id, "missing wounds block"));
        }
        let details = ActorDetails::new(&actor.id, &actor.name)
            .with(
                "wounds",
                json!({
                    "value": actor.num_at("/wounds/value", 0.0),
                    "max": actor.num_at("/wounds/max", 0.0),
                }),
            )
            .with(
                "fatigue",
                json!({
                    "value": actor.num_at("/fatigue/value", 0.0),
                    "max": actor.num_at("/fatigue/max", 0.0),
                }),
            )
            .with("bennies", actor.num_at("/bennies/value", 0.0))
            .with("parry", actor.num_at("/stats/parry/value", 0.0))
            .with("toughness", actor.num_at("/stats/toughness/value", 0.0))
            .with("armor", actor.num_at("/stats/toughness/armor", 0.0));
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_extraction() {
        let provider = SwadeProvider::new("native.swade");
        let actor = Actor::new("s1", "Red Hargreaves").with_system(json!({
            "wounds": { "value": 1, "max": 3 },
            "fatigue": { "value": 0, "max": 2 },
            "bennies": { "value": 2 },
            "stats": {
                "parry": { "value": 6 },
                "toughness": { "value": 8, "armor": 2 },
            },
        }));

        let details = provider.get_actor_details(&actor).unwrap();
        assert_eq!(details.get("wounds").unwrap()["value"], 1.0);
        assert_eq!(details.get("bennies").unwrap(), &json!(2.0));
        assert_eq!(details.get("toughness").unwrap(), &json!(8.0));
        assert_eq!(details.get("armor").unwrap(), &json!(2.0));
    }

    #[test]
    fn test_sparse_stats_take_defaults() {
        let provider = SwadeProvider::new("native.swade");
        let actor = Actor::new("s2", "Greenhorn").with_system(json!({
            "wounds": { "value": 0 },
        }));

        let details = provider.get_actor_details(&actor).unwrap();
        assert_eq!(details.get("wounds").unwrap()["max"], 0.0);
        assert_eq!(details.get("parry").unwrap(), &json!(0.0));
    }

    #[test]
    fn test_update_is_passthrough() {
        let provider = SwadeProvider::new("native.swade");
        let details = vec![ActorDetails::new("s1", "Red")];
        let (actors, extensions) = provider.get_update(details);
        assert_eq!(actors.len(), 1);
        assert!(extensions.is_empty());
    }
}
