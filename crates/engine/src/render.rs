use serde::Serialize;
use serde_json::{Map, Value};

use partyview_core::{ActorDetails, Result, TabVisibility};

use crate::mode::DisplayMode;

/// The composite state published once per cycle for the render layer.
///
/// The host's templating layer binds to this object verbatim: the active
/// provider's extension fields are flattened to the top level next to the
/// actor list, so a provider and its template agree on the schema
/// out-of-band and nothing here needs to know about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub active_tab: String,
    pub mode: DisplayMode,
    pub actors: Vec<ActorDetails>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
    pub tabs: TabVisibility,
}

impl RenderModel {
    /// The model as a plain JSON object, the form template engines take.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
