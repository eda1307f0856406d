use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use partyview_core::{Actor, ActorDetails, Error, Result, Tab};

use crate::aggregate::{CurrencyTable, annotate_presence, sorted_union};
use crate::provider::SystemProvider;

/// D&D 5th edition adapter.
///
/// Canonical contract for the 5e payload: hit points live under
/// `/attributes/hp` (required; temp pools default to 0), armor class
/// defaults to 10, passives default to 10, languages are the raw trait
/// codes under `/traits/languages/value` plus any `;`-separated custom
/// entries, and currency is the five-denomination record under
/// `/currency`.
pub struct Dnd5eProvider {
    id: String,
}

/// 100 cp = 10 sp = 2 ep = 1 gp, 1 pp = 10 gp.
pub const CURRENCY: CurrencyTable = CurrencyTable::new(&[
    ("pp", 10.0),
    ("gp", 1.0),
    ("ep", 0.5),
    ("sp", 0.1),
    ("cp", 0.01),
]);

impl Dnd5eProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    fn hit_points(actor: &Actor) -> Result<Value> {
        if actor.value_at("/attributes/hp").and_then(Value::as_object).is_none() {
            return Err(Error::extraction(&actor.name, &actor.id, "missing hit point block"));
        }
        let value = actor.num_at("/attributes/hp/value", 0.0);
        let max = actor.num_at("/attributes/hp/max", 0.0);
        let temp = actor.num_at("/attributes/hp/temp", 0.0);
        let temp_max = actor.num_at("/attributes/hp/tempmax", 0.0);
        Ok(json!({
            "value": value,
            "max": max,
            "temp_value": temp,
            "temp_max_value": temp_max,
            "total_value": value + temp,
            "total_max_value": max + temp_max,
        }))
    }

    fn speed(actor: &Actor) -> String {
        let units = actor.string_at("/attributes/movement/units", "ft");
        let mut extra = Vec::new();
        let fly = actor.num_at("/attributes/movement/fly", 0.0);
        if fly > 0.0 {
            extra.push(format!("{fly} {units} fly"));
        }
        if actor.bool_at("/attributes/movement/hover", false) {
            extra.push("hover".to_string());
        }
        for (key, label) in [("burrow", "burrow"), ("swim", "swim"), ("climb", "climb")] {
            let speed = actor.num_at(&format!("/attributes/movement/{key}"), 0.0);
            if speed > 0.0 {
                extra.push(format!("{speed} {units} {label}"));
            }
        }

        let walk = actor.num_at("/attributes/movement/walk", 0.0);
        let mut speed = format!("{walk} {units}");
        if !extra.is_empty() {
            speed.push_str(&format!(" ({})", extra.join(", ")));
        }
        speed
    }

    fn passives(actor: &Actor) -> Value {
        json!({
            "perception": actor.num_at("/skills/prc/passive", 10.0),
            "investigation": actor.num_at("/skills/inv/passive", 10.0),
            "insight": actor.num_at("/skills/ins/passive", 10.0),
            "stealth": actor.num_at("/skills/ste/passive", 10.0),
        })
    }

    fn languages(actor: &Actor) -> Vec<String> {
        let mut languages = actor.strings_at("/traits/languages/value");
        if let Some(custom) = actor.str_at("/traits/languages/custom") {
            languages.extend(
                custom
                    .split(';')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string),
            );
        }
        languages
    }
}

impl SystemProvider for Dnd5eProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn template(&self) -> Result<&'static str> {
        Ok("modules/party-overview/templates/dnd5e.hbs")
    }

    fn width(&self) -> u32 {
        575
    }

    fn tabs(&self) -> IndexMap<String, Tab> {
        [
            ("languages", "party-overview.tabs.languages"),
            ("currencies", "party-overview.tabs.currencies"),
            ("background", "party-overview.tabs.background"),
        ]
        .into_iter()
        .map(|(id, localization)| (id.to_string(), Tab::new(id, localization)))
        .collect()
    }

    fn get_actor_details(&self, actor: &Actor) -> Result<ActorDetails> {
        let currency = CURRENCY.read(actor.value_at("/currency"));
        let details = ActorDetails::new(&actor.id, &actor.name)
            .with("hp", Self::hit_points(actor)?)
            .with("armor", actor.num_at("/attributes/ac/value", 10.0))
            .with("speed", Self::speed(actor))
            .with("spell_dc", actor.num_at("/attributes/spelldc", 0.0))
            .with("passives", Self::passives(actor))
            .with(
                "background",
                json!({
                    "trait": actor.string_at("/details/trait", ""),
                    "ideal": actor.string_at("/details/ideal", ""),
                    "bond": actor.string_at("/details/bond", ""),
                    "flaw": actor.string_at("/details/flaw", ""),
                }),
            )
            .with("inspiration", actor.bool_at("/attributes/inspiration", false))
            .with("alignment", actor.string_at("/details/alignment", ""))
            .with("languages", Value::from(Self::languages(actor)))
            .with("total_gp", CURRENCY.total_display(&currency))
            .with("currency", CURRENCY.to_value(&currency));
        Ok(details)
    }

    fn get_update(&self, mut actors: Vec<ActorDetails>) -> (Vec<ActorDetails>, Map<String, Value>) {
        let languages = sorted_union(&actors, "languages");

        let records: Vec<_> = actors
            .iter()
            .map(|actor| CURRENCY.read(actor.get("currency")))
            .collect();
        let total_currency = CURRENCY.sum(records.iter());
        let total_party_gp = CURRENCY.total_display(&total_currency);

        annotate_presence(&mut actors, "languages", &languages);

        let mut extensions = Map::new();
        extensions.insert("languages".to_string(), Value::from(languages));
        extensions.insert("total_currency".to_string(), CURRENCY.to_value(&total_currency));
        extensions.insert("total_party_gp".to_string(), Value::from(total_party_gp));
        (actors, extensions)
    }
}
