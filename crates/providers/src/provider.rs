//! The system provider contract.
//!
//! A provider encapsulates everything system-specific about interpreting
//! one game system's actor schema: which fields to pull out of the opaque
//! payload, which tabs the panel offers, and how to fold per-actor records
//! into party-wide totals. The registry holds one boxed provider per
//! registered identifier and the update engine only ever talks to the
//! current one through this trait.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use partyview_core::{Actor, ActorDetails, Error, Result, Tab};

/// Adapter translating one game system's actor schema into the panel's
/// uniform display schema.
///
/// Every method except [`id`](Self::id) has a default, so a minimal
/// provider is just an identifier; the defaults match the generic
/// fallback's behavior. Providers are immutable after construction and
/// live for the whole host session.
pub trait SystemProvider {
    /// Stable identifier assigned at construction, e.g. `native.dnd5e`.
    fn id(&self) -> &str;

    /// Optional style-namespace hint for the render layer.
    fn custom_css(&self) -> &str {
        ""
    }

    /// Auxiliary template resources to preload alongside the main one.
    fn load_templates(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Optional display sections this provider supports, keyed by tab id.
    fn tabs(&self) -> IndexMap<String, Tab> {
        IndexMap::new()
    }

    /// Resource locator of the main render template.
    ///
    /// Every concrete provider must override this; reaching the default
    /// means an unimplemented provider got registered and rendered, which
    /// is a programming error rather than a data condition.
    fn template(&self) -> Result<&'static str> {
        Err(Error::UnimplementedProvider { id: self.id().to_string() })
    }

    /// Suggested panel width in pixels.
    fn width(&self) -> u32 {
        500
    }

    /// Whether an actor is eligible for party display at all.
    fn actor_filter(&self, actor: &Actor) -> bool {
        actor.has_player_owner
    }

    /// Extract one actor's display record from its opaque payload.
    ///
    /// Sparse data must not fail: absent fields take documented defaults.
    /// An `Err` is reserved for structurally broken records (e.g. the
    /// payload isn't even the right shape) and is isolated per actor by
    /// the update engine.
    fn get_actor_details(&self, actor: &Actor) -> Result<ActorDetails> {
        Ok(ActorDetails::new(&actor.id, &actor.name))
    }

    /// Party-wide reduction over the full detail list.
    ///
    /// Returns the (possibly re-annotated) actor list plus an extension
    /// object merged into the render model. Must be deterministic,
    /// order-stable, and identifier-preserving: annotate or reorder
    /// fields, never drop actors.
    fn get_update(&self, actors: Vec<ActorDetails>) -> (Vec<ActorDetails>, Map<String, Value>) {
        (actors, Map::new())
    }
}
