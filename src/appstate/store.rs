//! App-state store — single source of truth for the onboarded flag and the
//! saved profile, with broadcast to subscribers.
//!
//! In-memory state is authoritative and updated synchronously; the durable
//! record trails it. Storage failures are logged and swallowed so a broken
//! disk degrades persistence, never the session. Completion always carries a
//! full profile, so the stored record can only claim `onboarded` together
//! with one; records read back at startup are adopted as-is.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info, warn};

use crate::onboarding::model::Profile;
use crate::store::traits::Database;

use super::model::{AppStateEvent, AppStateSnapshot, StoredAppState, storage_keys};

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 256;

struct Inner {
    onboarded: bool,
    profile: Option<Profile>,
    loading: bool,
    /// Bumped once per mutation; orders durable writes.
    version: u64,
}

/// Persisted app state with synchronous in-memory reads and async fan-out.
pub struct AppStateStore {
    db: Arc<dyn Database>,
    inner: RwLock<Inner>,
    /// Durable-write slot: holds the highest version already applied, so
    /// overlapping mutations settle with storage matching memory.
    durable: Mutex<u64>,
    tx: broadcast::Sender<AppStateEvent>,
}

impl AppStateStore {
    pub fn new(db: Arc<dyn Database>) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Arc::new(Self {
            db,
            inner: RwLock::new(Inner {
                onboarded: false,
                profile: None,
                loading: true,
                version: 0,
            }),
            durable: Mutex::new(0),
            tx,
        })
    }

    /// Subscribe to state-change events. Each consumer calls this.
    pub fn subscribe(&self) -> broadcast::Receiver<AppStateEvent> {
        self.tx.subscribe()
    }

    /// Read the persisted record and settle the loading flag. Called once at
    /// startup, before the store takes any traffic.
    ///
    /// An absent, unreadable, or unparseable record resolves to the fresh
    /// default. Whatever parses is adopted as-is: the completion invariant is
    /// enforced when records are written, not when they are read back.
    pub async fn load(&self) {
        let stored = match self
            .db
            .get_setting(storage_keys::DEFAULT_USER, storage_keys::APP_STATE)
            .await
        {
            Ok(Some(value)) => match serde_json::from_value::<StoredAppState>(value) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    warn!("Failed to parse stored app state: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to load app state: {}", e);
                None
            }
        };

        let onboarded = {
            let mut inner = self.inner.write().await;
            if let Some(stored) = stored {
                inner.onboarded = stored.onboarded;
                inner.profile = stored.profile;
            }
            inner.loading = false;
            inner.onboarded
        };

        info!(onboarded, "App state loaded");

        // Broadcast — ok if no receivers are listening yet
        let _ = self.tx.send(AppStateEvent::Loaded { onboarded });
    }

    /// Record a finished onboarding run. Memory first, then storage.
    pub async fn complete_onboarding(&self, profile: Profile) {
        let (version, record) = {
            let mut inner = self.inner.write().await;
            inner.onboarded = true;
            inner.profile = Some(profile);
            inner.version += 1;
            (
                inner.version,
                StoredAppState {
                    onboarded: true,
                    profile: inner.profile.clone(),
                },
            )
        };

        info!("Onboarding completed");
        let _ = self.tx.send(AppStateEvent::OnboardingCompleted);

        self.persist(version, Some(record)).await;
    }

    /// Clear the onboarded flag and profile, in memory and in storage.
    pub async fn reset_onboarding(&self) {
        let version = {
            let mut inner = self.inner.write().await;
            inner.onboarded = false;
            inner.profile = None;
            inner.version += 1;
            inner.version
        };

        info!("Onboarding state reset");
        let _ = self.tx.send(AppStateEvent::OnboardingReset);

        self.persist(version, None).await;
    }

    pub async fn snapshot(&self) -> AppStateSnapshot {
        let inner = self.inner.read().await;
        AppStateSnapshot {
            onboarded: inner.onboarded,
            profile: inner.profile.clone(),
            loading: inner.loading,
        }
    }

    pub async fn onboarded(&self) -> bool {
        self.inner.read().await.onboarded
    }

    pub async fn loading(&self) -> bool {
        self.inner.read().await.loading
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.inner.read().await.profile.clone()
    }

    /// Apply one durable write: `Some` stores the record, `None` deletes it.
    ///
    /// Writes go through a single slot ordered by mutation version. A write
    /// that arrives after a newer one has claimed the slot is dropped, so
    /// once overlapping mutations settle, storage holds the record of the
    /// last in-memory change. Failures are logged and swallowed; callers
    /// never see them.
    async fn persist(&self, version: u64, record: Option<StoredAppState>) {
        let mut durable = self.durable.lock().await;
        if *durable >= version {
            debug!(version, newest = *durable, "Skipping superseded app-state write");
            return;
        }
        *durable = version;

        let result = match &record {
            Some(record) => match serde_json::to_value(record) {
                Ok(value) => {
                    self.db
                        .set_setting(storage_keys::DEFAULT_USER, storage_keys::APP_STATE, &value)
                        .await
                }
                Err(e) => {
                    warn!("Failed to serialize app state: {}", e);
                    return;
                }
            },
            None => self
                .db
                .delete_setting(storage_keys::DEFAULT_USER, storage_keys::APP_STATE)
                .await
                .map(|_| ()),
        };

        if let Err(e) = result {
            warn!("Failed to persist app state: {}", e);
        }
    }
}
