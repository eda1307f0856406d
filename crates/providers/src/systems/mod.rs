//! Concrete adapters, one per supported game system.
//!
//! These are worked examples of the provider contract, not an exhaustive
//! port of every system the panel has ever supported; new systems register
//! through the registry's module/system entry points instead of growing
//! this list.

pub mod dnd5e;
pub mod generic;
pub mod pf2e;
pub mod swade;
pub mod wfrp4e;

pub use dnd5e::Dnd5eProvider;
pub use generic::GenericProvider;
pub use pf2e::Pf2eProvider;
pub use swade::SwadeProvider;
pub use wfrp4e::Wfrp4eProvider;
