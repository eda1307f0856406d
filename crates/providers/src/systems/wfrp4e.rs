use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use partyview_core::{Actor, ActorDetails, Error, Result, Tab};

use crate::aggregate::{CurrencyRecord, CurrencyTable};
use crate::provider::SystemProvider;

/// Warhammer Fantasy Roleplay 4th edition adapter.
///
/// Coins and skills both live in the actor's embedded items. Coin items
/// are matched by their canonical English names; the host's localized
/// names are presentation concerns outside this core. Skills with at
/// least one advance are grouped the way the sheet groups them.
pub struct Wfrp4eProvider {
    id: String,
}

/// 240 brass pennies = 20 silver shillings = 1 gold crown.
pub const CURRENCY: CurrencyTable = CurrencyTable::new(&[
    ("gc", 1.0),
    ("ss", 1.0 / 20.0),
    ("bp", 1.0 / 240.0),
]);

const COIN_ITEMS: [(&str, &str); 3] = [
    ("Gold Crown", "gc"),
    ("Silver Shilling", "ss"),
    ("Brass Penny", "bp"),
];

impl Wfrp4eProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    fn item_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
        item.get(key).and_then(Value::as_str)
    }

    fn currency(actor: &Actor) -> CurrencyRecord {
        let mut record = CURRENCY.zeroed();
        for item in &actor.items {
            if Self::item_str(item, "type") != Some("money") {
                continue;
            }
            let Some(name) = Self::item_str(item, "name") else { continue };
            if let Some((_, key)) = COIN_ITEMS.iter().find(|(coin, _)| *coin == name) {
                let quantity = item
                    .pointer("/system/quantity/value")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                *record.entry(key.to_string()).or_insert(0.0) += quantity;
            }
        }
        record
    }

    fn currency_value(record: &CurrencyRecord) -> Value {
        let mut object = CURRENCY.to_value(record);
        if let Some(map) = object.as_object_mut() {
            map.insert("total".to_string(), Value::from(CURRENCY.total_display(record)));
        }
        object
    }

    /// Advanced skills grouped the way the sheet presents them: weapon
    /// skills, languages, lore, trade, then the remaining basic and
    /// advanced skills.
    fn skills(actor: &Actor) -> Value {
        let mut skills: Vec<Value> = actor
            .items
            .iter()
            .filter(|item| Self::item_str(item, "type") == Some("skill"))
            .filter(|item| {
                item.pointer("/system/advances/value")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0)
                    > 0.0
            })
            .filter_map(|item| {
                let name = Self::item_str(item, "name")?;
                let spec = name
                    .find('(')
                    .map(|open| name[open + 1..].trim_end_matches(')').to_string())
                    .unwrap_or_default();
                Some(json!({
                    "name": name,
                    "name_spec": spec,
                    "total": item.pointer("/system/total/value").and_then(Value::as_f64).unwrap_or(0.0),
                    "advanced": item.pointer("/system/advanced/value").and_then(Value::as_str).unwrap_or(""),
                }))
            })
            .collect();
        skills.sort_by(|a, b| a["name"].as_str().unwrap_or("").cmp(b["name"].as_str().unwrap_or("")));

        let name_contains = |skill: &Value, needle: &str| {
            skill["name"].as_str().is_some_and(|name| name.contains(needle))
        };
        let mut groups: IndexMap<&str, Vec<Value>> = [
            ("melee_ranged", Vec::new()),
            ("languages", Vec::new()),
            ("lore", Vec::new()),
            ("trade", Vec::new()),
            ("other_basic", Vec::new()),
            ("other_advanced", Vec::new()),
        ]
        .into_iter()
        .collect();

        for skill in skills {
            let group = if name_contains(&skill, "Melee") || name_contains(&skill, "Ranged") {
                "melee_ranged"
            } else if name_contains(&skill, "Language") {
                "languages"
            } else if name_contains(&skill, "Lore") {
                "lore"
            } else if name_contains(&skill, "Trade") {
                "trade"
            } else if skill["advanced"] == "bsc" {
                "other_basic"
            } else {
                "other_advanced"
            };
            if let Some(bucket) = groups.get_mut(group) {
                bucket.push(skill);
            }
        }

        let mut object = Map::new();
        for (key, bucket) in groups {
            object.insert(key.to_string(), Value::Array(bucket));
        }
        Value::Object(object)
    }
}

impl SystemProvider for Wfrp4eProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn custom_css(&self) -> &str {
        "wfrp4e"
    }

    fn template(&self) -> Result<&'static str> {
        Ok("modules/party-overview/templates/wfrp4e.hbs")
    }

    fn tabs(&self) -> IndexMap<String, Tab> {
        [
            ("currencies", "party-overview.tabs.currencies"),
            ("skills", "party-overview.tabs.skills"),
        ]
        .into_iter()
        .map(|(id, localization)| (id.to_string(), Tab::new(id, localization)))
        .collect()
    }

    fn get_actor_details(&self, actor: &Actor) -> Result<ActorDetails> {
        if actor.value_at("/status/wounds").and_then(Value::as_object).is_none() {
            return Err(Error::extraction(&actor.name, &actor.id, "missing wounds block"));
        }
        let currency = Self::currency(actor);
        let details = ActorDetails::new(&actor.id, &actor.name)
            .with(
                "wounds",
                json!({
                    "value": actor.num_at("/status/wounds/value", 0.0),
                    "max": actor.num_at("/status/wounds/max", 0.0),
                }),
            )
            .with("advantage", actor.num_at("/status/advantage/value", 0.0))
            .with("movement", actor.num_at("/details/move/value", 0.0))
            .with("fortune", actor.num_at("/status/fortune/value", 0.0))
            .with("fate", actor.num_at("/status/fate/value", 0.0))
            .with("resilience", actor.num_at("/status/resilience/value", 0.0))
            .with("resolve", actor.num_at("/status/resolve/value", 0.0))
            .with(
                "corruption",
                json!({
                    "value": actor.num_at("/status/corruption/value", 0.0),
                    "max": actor.num_at("/status/corruption/max", 0.0),
                }),
            )
            .with("status", actor.string_at("/details/status/value", ""))
            .with("skills", Self::skills(actor))
            .with("currency", Self::currency_value(&currency));
        Ok(details)
    }

    fn get_update(&self, actors: Vec<ActorDetails>) -> (Vec<ActorDetails>, Map<String, Value>) {
        let records: Vec<_> = actors
            .iter()
            .map(|actor| CURRENCY.read(actor.get("currency")))
            .collect();
        let total_currency = CURRENCY.sum(records.iter());

        let mut extensions = Map::new();
        extensions.insert("total_currency".to_string(), Self::currency_value(&total_currency));
        (actors, extensions)
    }
}
