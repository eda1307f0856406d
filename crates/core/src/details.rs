//! Per-cycle derived records and the tab model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An optional, togglable section of the overview panel, declared by the
/// active provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub visible: bool,
    /// Localization key the host resolves to a display label
    pub localization: String,
}

impl Tab {
    pub fn new(id: impl Into<String>, localization: impl Into<String>) -> Self {
        Self { id: id.into(), visible: true, localization: localization.into() }
    }
}

/// Persisted per-tab visibility choices, keyed by tab id. Insertion order
/// is display order.
pub type TabVisibility = IndexMap<String, Tab>;

/// One actor as the render layer sees it: a stable identity, the engine's
/// annotations, and whatever fields the active provider extracted.
///
/// The open `fields` map is deliberate: each provider's detail shape is
/// paired with its render template, and the template binds to these fields
/// verbatim. Fields are flattened when serializing so the render model
/// matches what the template expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorDetails {
    pub id: String,
    pub name: String,
    /// First word of the name, truncated for narrow layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Membership in the user's manually hidden set
    #[serde(default)]
    pub hidden: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ActorDetails {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), ..Self::default() }
    }

    /// Set a provider field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Read a provider field back.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Read a field holding a list of strings (a categorical attribute such
    /// as languages or lore). Absent fields and non-string entries yield an
    /// empty/filtered list.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.fields
            .get(key)
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
