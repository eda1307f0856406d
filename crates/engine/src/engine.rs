//! The per-cycle aggregation/update engine.
//!
//! Every triggering host event leads to the same full recomputation from
//! current host state; there is no incremental path, which sidesteps
//! ordering races between e.g. an actor update and a token move. Whatever
//! fires last recomputes everything.

use std::collections::HashSet;

use tracing::error;

use partyview_core::{ActorDetails, Error, HostSnapshot, Result, Settings, Tab};
use partyview_providers::{ProviderRegistry, SystemProvider};

use crate::mode::DisplayMode;
use crate::render::RenderModel;

/// Longest short-name before truncation kicks in.
const SHORT_NAME_LIMIT: usize = 10;

/// The overview's own state: the user's filter mode, the manually hidden
/// actor set, and the active tab. Everything else is recomputed per cycle.
#[derive(Debug)]
pub struct PartyOverview {
    display_mode: DisplayMode,
    hidden_actors: HashSet<String>,
    active_tab: String,
}

impl Default for PartyOverview {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyOverview {
    pub fn new() -> Self {
        Self {
            display_mode: DisplayMode::default(),
            hidden_actors: HashSet::new(),
            active_tab: "general".to_string(),
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Advance the filter mode one step (the toolbar toggle action).
    pub fn cycle_display_mode(&mut self) {
        self.display_mode = self.display_mode.cycle();
    }

    /// Step the filter mode backwards.
    pub fn cycle_display_mode_back(&mut self) {
        self.display_mode = self.display_mode.cycle_back();
    }

    /// Flip an actor's membership in the manually hidden set.
    pub fn toggle_hidden(&mut self, actor_id: &str) {
        if !self.hidden_actors.remove(actor_id) {
            self.hidden_actors.insert(actor_id.to_string());
        }
    }

    pub fn is_hidden(&self, actor_id: &str) -> bool {
        self.hidden_actors.contains(actor_id)
    }

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: impl Into<String>) {
        self.active_tab = tab.into();
    }

    /// Recompute the full render model from current host state.
    ///
    /// Pure in host state, persisted settings and this struct's own
    /// fields: two calls with no intervening change produce structurally
    /// equal models.
    pub fn update(
        &self,
        host: &HostSnapshot,
        registry: &ProviderRegistry,
        settings: &Settings,
    ) -> Result<RenderModel> {
        let provider = registry
            .current()
            .ok_or_else(|| Error::Other("no system provider registered".to_string()))?;

        let candidates = self.candidates(host, provider);
        let details = self.extract(provider, &candidates);
        let (actors, extensions) = provider.get_update(details);
        let tabs = self.merge_tabs(provider, settings, host);

        Ok(RenderModel {
            active_tab: self.active_tab.clone(),
            mode: self.display_mode,
            actors,
            extensions,
            tabs,
        })
    }

    /// Candidate actors: those with an active token on the current scene,
    /// passing the provider's eligibility filter, deduplicated by actor id
    /// (an actor with several tokens appears once), then narrowed by the
    /// display mode.
    fn candidates<'a>(
        &self,
        host: &'a HostSnapshot,
        provider: &dyn SystemProvider,
    ) -> Vec<&'a partyview_core::Actor> {
        let Some(scene) = host.scene.as_ref() else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for token in &scene.tokens {
            let Some(actor) = host.actor(&token.actor_id) else { continue };
            if !provider.actor_filter(actor) {
                continue;
            }
            if !seen.insert(actor.id.as_str()) {
                continue;
            }
            let hidden = self.hidden_actors.contains(&actor.id);
            let keep = match self.display_mode {
                DisplayMode::ShowAll => true,
                DisplayMode::ShowVisible => !hidden,
                DisplayMode::ShowHidden => hidden,
            };
            if keep {
                candidates.push(actor);
            }
        }
        candidates
    }

    /// Per-actor extraction with fault isolation: a malformed actor is
    /// logged and dropped from this cycle instead of blanking the panel.
    fn extract(&self, provider: &dyn SystemProvider, candidates: &[&partyview_core::Actor]) -> Vec<ActorDetails> {
        let mut details = Vec::with_capacity(candidates.len());
        for actor in candidates {
            match provider.get_actor_details(actor) {
                Ok(mut record) => {
                    record.hidden = self.hidden_actors.contains(&actor.id);
                    record.short_name = Some(short_name(&actor.name));
                    details.push(record);
                }
                Err(err) => {
                    error!(actor = %actor.name, id = %actor.id, "{err}");
                }
            }
        }
        details
    }

    /// Persisted tab visibility merged with the provider's declared tabs.
    /// Newly declared tabs default to visible; a GM sees every tab
    /// regardless of stored preference.
    fn merge_tabs(
        &self,
        provider: &dyn SystemProvider,
        settings: &Settings,
        host: &HostSnapshot,
    ) -> partyview_core::TabVisibility {
        let mut tabs = settings.tab_visibility.clone();
        for (id, tab) in provider.tabs() {
            tabs.entry(id).or_insert(Tab::new(&tab.id, &tab.localization));
        }
        if host.user.is_gm {
            for tab in tabs.values_mut() {
                tab.visible = true;
            }
        }
        tabs
    }
}

/// First word of the display name, truncated for narrow layouts.
fn short_name(name: &str) -> String {
    let first = name.split_whitespace().next().unwrap_or(name);
    if first.chars().count() > SHORT_NAME_LIMIT {
        let truncated: String = first.chars().take(SHORT_NAME_LIMIT).collect();
        format!("{truncated}…")
    } else {
        first.to_string()
    }
}
