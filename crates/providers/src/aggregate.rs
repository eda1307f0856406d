//! Shared aggregation building blocks.
//!
//! Every system's `get_update` does some mix of the same three things:
//! fold a denomination record into a single normalized total, compute the
//! sorted union of a categorical attribute across the party, and map a
//! small ordinal onto a display rank. Each becomes a data-driven table or
//! free function here so providers declare their system's numbers instead
//! of reimplementing the folds.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use partyview_core::ActorDetails;

/// A per-actor or party-wide currency record: denomination key to amount.
pub type CurrencyRecord = IndexMap<String, f64>;

/// A game system's denomination set and conversion ratios.
///
/// Denominations are listed highest value first; the value is the worth of
/// one unit in the system's normalization unit (gold-piece equivalent or
/// similar). Adjacent denominations must relate by whole-number ratios so
/// low denominations can be carried upward without remainder tricks.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyTable {
    denominations: &'static [(&'static str, f64)],
}

impl CurrencyTable {
    pub const fn new(denominations: &'static [(&'static str, f64)]) -> Self {
        Self { denominations }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.denominations.iter().map(|(key, _)| *key)
    }

    /// A record with every denomination present and zero.
    pub fn zeroed(&self) -> CurrencyRecord {
        self.keys().map(|key| (key.to_string(), 0.0)).collect()
    }

    /// Read a record out of a JSON object, defaulting absent or
    /// non-numeric denominations to zero.
    pub fn read(&self, value: Option<&Value>) -> CurrencyRecord {
        let mut record = self.zeroed();
        if let Some(object) = value.and_then(Value::as_object) {
            for (key, amount) in record.iter_mut() {
                if let Some(raw) = object.get(key.as_str()) {
                    *amount = as_number(raw).unwrap_or(0.0);
                }
            }
        }
        record
    }

    /// Per-denomination sum over many records.
    pub fn sum<'a>(&self, records: impl IntoIterator<Item = &'a CurrencyRecord>) -> CurrencyRecord {
        let mut total = self.zeroed();
        for record in records {
            for (key, amount) in total.iter_mut() {
                *amount += record.get(key.as_str()).copied().unwrap_or(0.0);
            }
        }
        total
    }

    /// Fold whole-unit remainders of low denominations into the next
    /// denomination up, lowest first, leaving a canonical record.
    ///
    /// Summing after this pass avoids the floating-point drift of
    /// repeatedly dividing large copper piles.
    pub fn carry(&self, record: &mut CurrencyRecord) {
        for i in (1..self.denominations.len()).rev() {
            let (low_key, low_value) = self.denominations[i];
            let (high_key, high_value) = self.denominations[i - 1];
            let ratio = (high_value / low_value).round();
            let amount = record.get(low_key).copied().unwrap_or(0.0);
            let overflow = (amount / ratio).floor();
            if overflow > 0.0 {
                record.insert(low_key.to_string(), amount - overflow * ratio);
                let high = record.get(high_key).copied().unwrap_or(0.0);
                record.insert(high_key.to_string(), high + overflow);
            }
        }
    }

    /// Normalized scalar total of a record (gold-piece equivalent),
    /// computed over the canonicalized record.
    pub fn total(&self, record: &CurrencyRecord) -> f64 {
        let mut canonical = record.clone();
        self.carry(&mut canonical);
        self.denominations
            .iter()
            .map(|(key, value)| canonical.get(*key).copied().unwrap_or(0.0) * value)
            .sum()
    }

    /// The total formatted to two decimals, the precision every supported
    /// system documents.
    pub fn total_display(&self, record: &CurrencyRecord) -> String {
        format!("{:.2}", self.total(record))
    }

    /// A record as a JSON object for the render model.
    pub fn to_value(&self, record: &CurrencyRecord) -> Value {
        let mut object = Map::new();
        for (key, amount) in record {
            object.insert(key.clone(), number_value(*amount));
        }
        Value::Object(object)
    }
}

/// Sorted distinct union of a categorical string attribute across actors.
///
/// Sorts on the raw key, not any localized label, so matrix columns are
/// locale-independent.
pub fn sorted_union(actors: &[ActorDetails], key: &str) -> Vec<String> {
    let mut union = BTreeSet::new();
    for actor in actors {
        union.extend(actor.string_list(key));
    }
    union.into_iter().collect()
}

/// Replace each actor's categorical attribute with a fixed-order boolean
/// presence vector against the shared union, so the renderer can present a
/// consistent actor-by-attribute matrix without per-actor branching.
pub fn annotate_presence(actors: &mut [ActorDetails], key: &str, union: &[String]) {
    for actor in actors {
        let own: HashSet<String> = actor.string_list(key).into_iter().collect();
        let vector: Vec<Value> = union.iter().map(|value| Value::Bool(own.contains(value))).collect();
        actor.set(key, Value::Array(vector));
    }
}

/// One display rank in an ordinal rank table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Ordinal-to-rank lookup with a rank-0 fallback.
///
/// Missing or out-of-range source values resolve to the first entry
/// ("untrained" or the system's equivalent).
#[derive(Debug, Clone, Copy)]
pub struct RankTable {
    ranks: &'static [Rank],
}

impl RankTable {
    pub const fn new(ranks: &'static [Rank]) -> Self {
        Self { ranks }
    }

    pub fn get(&self, ordinal: Option<i64>) -> &Rank {
        let index = ordinal.unwrap_or(0).max(0) as usize;
        self.ranks.get(index).unwrap_or(&self.ranks[0])
    }

    /// A rank as a JSON object for the render model.
    pub fn value_for(&self, ordinal: Option<i64>) -> Value {
        let rank = self.get(ordinal);
        serde_json::json!({
            "label": rank.label,
            "icon": rank.icon,
            "color": rank.color,
        })
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integral amounts render as integers, everything else as floats.
fn number_value(amount: f64) -> Value {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        Value::Number(Number::from(amount as i64))
    } else {
        Number::from_f64(amount).map(Value::Number).unwrap_or(Value::Null)
    }
}
