use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use partyview_core::{Actor, ActorDetails, Error, Result, Tab};

use crate::aggregate::{CurrencyRecord, CurrencyTable, Rank, RankTable, annotate_presence, sorted_union};
use crate::provider::SystemProvider;

/// Pathfinder 2nd edition adapter.
///
/// Canonical contract: coins are physical items named after their
/// denomination, lore skills are items of type `lore`, saves and
/// perception are plain integers (no sign formatting), and proficiency
/// ordinals 0..4 map through the rank table below.
pub struct Pf2eProvider {
    id: String,
}

/// 100 cp = 10 sp = 1 gp, 1 pp = 10 gp. No electrum in Golarion.
pub const CURRENCY: CurrencyTable = CurrencyTable::new(&[
    ("pp", 10.0),
    ("gp", 1.0),
    ("sp", 0.1),
    ("cp", 0.01),
]);

/// Proficiency ranks 0..4; out-of-range ordinals fall back to untrained.
pub const PROFICIENCY: RankTable = RankTable::new(&[
    Rank { label: "untrained", icon: "-", color: "#424242" },
    Rank { label: "trained", icon: "T", color: "#171f69" },
    Rank { label: "expert", icon: "E", color: "#3c005e" },
    Rank { label: "master", icon: "M", color: "#5e0000" },
    Rank { label: "legendary", icon: "L", color: "#5e4000" },
]);

const COIN_ITEMS: [(&str, &str); 4] = [
    ("Platinum Pieces", "pp"),
    ("Gold Pieces", "gp"),
    ("Silver Pieces", "sp"),
    ("Copper Pieces", "cp"),
];

impl Pf2eProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    fn item_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
        item.get(key).and_then(Value::as_str)
    }

    fn item_quantity(item: &Value) -> f64 {
        // both historical payload generations are in the wild
        item.pointer("/system/quantity/value")
            .or_else(|| item.pointer("/system/quantity"))
            .or_else(|| item.get("quantity"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    fn currency(actor: &Actor) -> CurrencyRecord {
        let mut record = CURRENCY.zeroed();
        for item in &actor.items {
            let Some(name) = Self::item_str(item, "name") else { continue };
            if let Some((_, key)) = COIN_ITEMS.iter().find(|(coin, _)| *coin == name) {
                *record.entry(key.to_string()).or_insert(0.0) += Self::item_quantity(item);
            }
        }
        record
    }

    fn lore(actor: &Actor) -> Vec<String> {
        actor
            .items
            .iter()
            .filter(|item| Self::item_str(item, "type") == Some("lore"))
            .filter_map(|item| Self::item_str(item, "name"))
            .map(str::to_string)
            .collect()
    }

    /// Total bulk carried plus the light-item remainder, with the
    /// system's strength-based thresholds. Ten light items make one bulk.
    fn encumbrance(actor: &Actor) -> Value {
        let mut bulk = 0.0;
        let mut light = 0_i64;
        for item in &actor.items {
            let weight = item
                .pointer("/system/weight/value")
                .cloned()
                .unwrap_or(Value::Null);
            match weight {
                Value::String(ref w) if w == "L" => light += 1,
                Value::String(ref w) => bulk += w.parse::<f64>().unwrap_or(0.0),
                Value::Number(ref n) => bulk += n.as_f64().unwrap_or(0.0),
                _ => {}
            }
        }
        bulk += (light / 10) as f64;
        light %= 10;

        let str_mod = actor.num_at("/abilities/str/mod", 0.0);
        json!({
            "bulk": bulk,
            "light_items": light,
            "encumbered_at": str_mod + actor.num_at("/attributes/bonusEncumbranceBulk", 0.0) + 5.0,
            "limit": str_mod + actor.num_at("/attributes/bonusLimitBulk", 0.0) + 10.0,
        })
    }
}

impl SystemProvider for Pf2eProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn template(&self) -> Result<&'static str> {
        Ok("modules/party-overview/templates/pf2e.hbs")
    }

    fn width(&self) -> u32 {
        540
    }

    fn load_templates(&self) -> Vec<&'static str> {
        vec![
            "modules/party-overview/templates/parts/PF2e-Lore.html",
            "modules/party-overview/templates/parts/PF2e-Bulk.html",
        ]
    }

    fn tabs(&self) -> IndexMap<String, Tab> {
        [
            ("languages", "party-overview.tabs.languages"),
            ("currencies", "party-overview.tabs.currencies"),
            ("lore", "party-overview.tabs.lore"),
            ("bulk", "party-overview.tabs.bulk"),
        ]
        .into_iter()
        .map(|(id, localization)| (id.to_string(), Tab::new(id, localization)))
        .collect()
    }

    fn actor_filter(&self, actor: &Actor) -> bool {
        // familiars and vehicles have player owners but don't belong in
        // the party table
        actor.has_player_owner
            && matches!(actor.kind.as_deref(), None | Some("character"))
    }

    fn get_actor_details(&self, actor: &Actor) -> Result<ActorDetails> {
        if actor.value_at("/attributes/hp").and_then(Value::as_object).is_none() {
            return Err(Error::extraction(&actor.name, &actor.id, "missing hit point block"));
        }
        let currency = Self::currency(actor);
        let shield_ac = actor.num_at("/attributes/shield/ac", 0.0);
        let details = ActorDetails::new(&actor.id, &actor.name)
            .with(
                "hp",
                json!({
                    "value": actor.num_at("/attributes/hp/value", 0.0),
                    "max": actor.num_at("/attributes/hp/max", 0.0),
                }),
            )
            .with("armor", actor.num_at("/attributes/ac/value", 10.0))
            .with(
                "shield_ac",
                if shield_ac > 0.0 { format!("(+{shield_ac})") } else { String::new() },
            )
            .with("perception", actor.int_at("/attributes/perception/value", 0))
            .with(
                "perception_rank",
                PROFICIENCY.value_for(actor.value_at("/attributes/perception/rank").and_then(Value::as_i64)),
            )
            .with("stealth", actor.int_at("/skills/ste/value", 0))
            .with("speed", actor.num_at("/attributes/speed/value", 0.0))
            .with(
                "saves",
                json!({
                    "fortitude": actor.int_at("/saves/fortitude/value", 0),
                    "reflex": actor.int_at("/saves/reflex/value", 0),
                    "will": actor.int_at("/saves/will/value", 0),
                }),
            )
            .with("languages", Value::from(actor.strings_at("/traits/languages/value")))
            .with("lore", Value::from(Self::lore(actor)))
            .with("encumbrance", Self::encumbrance(actor))
            .with("total_gp", CURRENCY.total_display(&currency))
            .with("currency", CURRENCY.to_value(&currency));
        Ok(details)
    }

    fn get_update(&self, mut actors: Vec<ActorDetails>) -> (Vec<ActorDetails>, Map<String, Value>) {
        let languages = sorted_union(&actors, "languages");
        let lore = sorted_union(&actors, "lore");

        let records: Vec<_> = actors
            .iter()
            .map(|actor| CURRENCY.read(actor.get("currency")))
            .collect();
        let total_currency = CURRENCY.sum(records.iter());
        let total_party_gp = CURRENCY.total_display(&total_currency);

        annotate_presence(&mut actors, "languages", &languages);
        annotate_presence(&mut actors, "lore", &lore);

        let mut extensions = Map::new();
        extensions.insert("languages".to_string(), Value::from(languages));
        extensions.insert("lore".to_string(), Value::from(lore));
        extensions.insert("total_currency".to_string(), CURRENCY.to_value(&total_currency));
        extensions.insert("total_party_gp".to_string(), Value::from(total_party_gp));
        (actors, extensions)
    }
}
