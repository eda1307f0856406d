pub mod aggregate;
pub mod provider;
pub mod registry;
pub mod systems;

pub use aggregate::{CurrencyRecord, CurrencyTable, Rank, RankTable, annotate_presence, sorted_union};
pub use provider::SystemProvider;
pub use registry::{MODULE_ID, ProviderCtor, ProviderRegistry};
pub use systems::{Dnd5eProvider, GenericProvider, Pf2eProvider, SwadeProvider, Wfrp4eProvider};

pub use partyview_core::{Error, Result};
