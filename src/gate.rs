//! Navigation gate — decides which root the app shows.
//!
//! The decision is a pure function of the store snapshot: undecided while
//! the initial load is in flight, then exactly one of the two roots keyed
//! off the onboarded flag. [`NavigationGate`] keeps the decision current by
//! listening on the store's event stream; it never polls.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

use crate::appstate::model::{AppStateEvent, AppStateSnapshot};
use crate::appstate::store::AppStateStore;

/// The two roots the app can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootScreen {
    Onboarding,
    Main,
}

impl std::fmt::Display for RootScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RootScreen::Onboarding => "onboarding",
            RootScreen::Main => "main",
        };
        write!(f, "{s}")
    }
}

/// Routing decision for a snapshot. `None` while the store is still loading;
/// afterwards the onboarded flag alone picks the root.
pub fn resolve(snapshot: &AppStateSnapshot) -> Option<RootScreen> {
    if snapshot.loading {
        None
    } else if snapshot.onboarded {
        Some(RootScreen::Main)
    } else {
        Some(RootScreen::Onboarding)
    }
}

/// Event-driven root selection over an [`AppStateStore`].
pub struct NavigationGate {
    store: Arc<AppStateStore>,
    rx: broadcast::Receiver<AppStateEvent>,
    current: Option<RootScreen>,
}

impl NavigationGate {
    /// Attach to a store. Subscribes before taking the first snapshot so a
    /// change landing between the two cannot be missed.
    pub async fn new(store: Arc<AppStateStore>) -> Self {
        let rx = store.subscribe();
        let current = resolve(&store.snapshot().await);
        Self { store, rx, current }
    }

    /// The root currently selected, if the gate has decided.
    pub fn current(&self) -> Option<RootScreen> {
        self.current
    }

    /// Wait until the routing decision changes and return the new root.
    ///
    /// Events that do not move the decision (a repeated completion, say)
    /// are absorbed here. Returns `None` once the event stream is gone.
    pub async fn changed(&mut self) -> Option<RootScreen> {
        loop {
            match self.rx.recv().await {
                Ok(_event) => {
                    if let Some(screen) = self.resync().await {
                        return Some(screen);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "Navigation gate lagged behind state events");
                    if let Some(screen) = self.resync().await {
                        return Some(screen);
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Re-derive the decision from a fresh snapshot. Gives back the new
    /// root when the decision moved.
    async fn resync(&mut self) -> Option<RootScreen> {
        let next = resolve(&self.store.snapshot().await);
        if next != self.current {
            self.current = next;
            next
        } else {
            None
        }
    }
}
