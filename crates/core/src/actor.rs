//! Host-boundary data model.
//!
//! The host application owns all of these records; the overview core only
//! reads them. An [`Actor`] carries its game-system payload as an opaque
//! [`serde_json::Value`] because every game system nests its data
//! differently, and the whole point of the provider layer is to interpret
//! that nesting. The pointer helpers on [`Actor`] give providers the
//! "absent path yields a documented default" access discipline instead of
//! ad hoc unwrap chains.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A player-character record supplied by the host actor collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable host-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether any player user owns this actor
    #[serde(default)]
    pub has_player_owner: bool,
    /// Host-side actor sub-type, e.g. "character" or "vehicle"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The opaque, system-specific data payload
    #[serde(default)]
    pub system: Value,
    /// Embedded items owned by the actor (some systems keep currency and
    /// skills here rather than in the system payload)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Value>,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_player_owner: true,
            kind: None,
            system: Value::Null,
            items: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: Value) -> Self {
        self.system = system;
        self
    }

    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_player_owner(mut self, has_player_owner: bool) -> Self {
        self.has_player_owner = has_player_owner;
        self
    }

    /// Raw value at a JSON pointer into the system payload, e.g.
    /// `"/attributes/hp/value"`.
    pub fn value_at(&self, pointer: &str) -> Option<&Value> {
        self.system.pointer(pointer)
    }

    /// Numeric value at a pointer, tolerating numbers stored as strings
    /// (several host systems do), with a default for absent or
    /// non-numeric values.
    pub fn num_at(&self, pointer: &str, default: f64) -> f64 {
        self.value_at(pointer).and_then(as_number).unwrap_or(default)
    }

    /// Integer value at a pointer with a default.
    pub fn int_at(&self, pointer: &str, default: i64) -> i64 {
        self.num_at(pointer, default as f64) as i64
    }

    /// String value at a pointer, or `None` for absent/non-string values.
    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.value_at(pointer).and_then(Value::as_str)
    }

    /// Owned string value at a pointer with a default.
    pub fn string_at(&self, pointer: &str, default: &str) -> String {
        self.str_at(pointer).unwrap_or(default).to_string()
    }

    /// Boolean value at a pointer with a default.
    pub fn bool_at(&self, pointer: &str, default: bool) -> bool {
        self.value_at(pointer).and_then(Value::as_bool).unwrap_or(default)
    }

    /// String entries of an array at a pointer; absent paths and
    /// non-string entries yield an empty/filtered list.
    pub fn strings_at(&self, pointer: &str) -> Vec<String> {
        self.value_at(pointer)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A placed, scene-scoped token referencing an actor. One actor may have
/// zero or more tokens on the current scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub actor_id: String,
}

impl Token {
    pub fn new(actor_id: impl Into<String>) -> Self {
        Self { actor_id: actor_id.into() }
    }
}

/// The currently active scene and its placed tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl Scene {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

/// The viewing user, as far as the overview cares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUser {
    /// GM-equivalent privileges force every tab visible
    #[serde(default)]
    pub is_gm: bool,
    /// The actor assigned to this user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
}

/// A point-in-time view of everything the core reads from the host.
///
/// The host's globals (`game.actors`, `game.scenes.active`, `game.modules`,
/// `game.system`, `game.user`) collapse into this one explicit context
/// object, so the registry and the update engine are unit-testable without
/// a host runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// Identifier of the actively loaded game system, e.g. "dnd5e"
    pub system_id: String,
    /// Ids of host modules that are currently active
    #[serde(default)]
    pub active_modules: Vec<String>,
    /// The full host actor collection
    #[serde(default)]
    pub actors: Vec<Actor>,
    /// The active scene, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    /// The viewing user
    #[serde(default)]
    pub user: HostUser,
}

impl HostSnapshot {
    pub fn new(system_id: impl Into<String>) -> Self {
        Self { system_id: system_id.into(), ..Self::default() }
    }

    /// Look an actor up by id.
    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Whether a host module with the given id is currently active.
    pub fn module_active(&self, module_id: &str) -> bool {
        self.active_modules.iter().any(|m| m == module_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_actor() -> Actor {
        Actor::new("a1", "Ezren").with_system(json!({
            "attributes": {
                "hp": { "value": 24, "max": "30" },
                "ac": { "value": null }
            },
            "traits": {
                "languages": { "value": ["common", "draconic", 7] }
            },
            "details": { "alignment": "NG" }
        }))
    }

    #[test]
    fn test_num_at_handles_numbers_and_numeric_strings() {
        let actor = sample_actor();
        assert_eq!(actor.num_at("/attributes/hp/value", 0.0), 24.0);
        // "30" is stored as a string by some systems
        assert_eq!(actor.num_at("/attributes/hp/max", 0.0), 30.0);
    }

    #[test]
    fn test_num_at_defaults_for_missing_or_null() {
        let actor = sample_actor();
        assert_eq!(actor.num_at("/attributes/hp/temp", 0.0), 0.0);
        assert_eq!(actor.num_at("/attributes/ac/value", 10.0), 10.0);
        assert_eq!(actor.num_at("/nowhere/at/all", 3.0), 3.0);
    }

    #[test]
    fn test_str_at_and_string_at() {
        let actor = sample_actor();
        assert_eq!(actor.str_at("/details/alignment"), Some("NG"));
        assert_eq!(actor.str_at("/details/ideal"), None);
        assert_eq!(actor.string_at("/details/ideal", ""), "");
    }

    #[test]
    fn test_strings_at_filters_non_strings() {
        let actor = sample_actor();
        assert_eq!(
            actor.strings_at("/traits/languages/value"),
            vec!["common".to_string(), "draconic".to_string()]
        );
        assert!(actor.strings_at("/traits/di/value").is_empty());
    }

    #[test]
    fn test_snapshot_lookups() {
        let mut snapshot = HostSnapshot::new("dnd5e");
        snapshot.actors.push(sample_actor());
        snapshot.active_modules.push("better-rolls".to_string());

        assert_eq!(snapshot.actor("a1").map(|a| a.name.as_str()), Some("Ezren"));
        assert!(snapshot.actor("a2").is_none());
        assert!(snapshot.module_active("better-rolls"));
        assert!(!snapshot.module_active("party-overview"));
    }
}
