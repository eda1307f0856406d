//! Host notifications.
//!
//! The host dispatches named events when its data changes; the overview's
//! reaction is always the same full recomputation, so the events collapse
//! into one enum and a single "does this trigger a refresh" question. The
//! embedder's hook glue maps its event names onto [`HostEvent`] and calls
//! the engine when a refresh is due.

use std::time::{Duration, Instant};

/// A data-mutation or lifecycle notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    ActorCreated,
    ActorUpdated,
    ActorDeleted,
    TokenCreated,
    TokenUpdated,
    TokenDeleted,
    SceneActivated,
    /// A persisted setting changed (provider selection, tab visibility,
    /// player access)
    SettingsChanged,
    /// The host rendered its actor directory panel; UI glue injects the
    /// open-overview button here, no recomputation needed
    DirectoryRendered,
}

impl HostEvent {
    /// Whether the overview should recompute its render model in response.
    pub fn triggers_refresh(&self) -> bool {
        !matches!(self, HostEvent::DirectoryRendered)
    }
}

/// Leading-edge call coalescer for the settings-save boundary.
///
/// A settings form submission can fire several change notifications in
/// quick succession; the embedder wraps its reload trigger in a debouncer
/// so only the first call within the window fires.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns true when the call falls outside the coalescing window of
    /// the previous accepted call.
    pub fn should_fire(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
