//! Application-owned provider state.
//!
//! [`ProviderStore`] holds the current [`Registry`] snapshot and persists every
//! accepted mutation in the background. The in-memory snapshot is replaced
//! before the write is queued, so reads right after a mutation always see the
//! new state whether or not the write has landed. Write failures are logged
//! and otherwise ignored; the persisted copy is a best-effort cache.
//!
//! Snapshots travel to the writer task over a `watch` channel. If several
//! mutations happen before the writer wakes up, only the newest snapshot is
//! written.

use std::sync::Arc;

use reelgate_model::Provider;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::registry::{ImportReport, Registry, RegistryError, STORAGE_KEY};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Default)]
struct Snapshot {
    generation: u64,
    payload: String,
}

/// Owner of the registry and its persistence.
#[derive(Debug)]
pub struct ProviderStore {
    registry: Registry,
    generation: u64,
    snapshots: watch::Sender<Snapshot>,
    written: watch::Receiver<u64>,
    writer: JoinHandle<()>,
}

impl ProviderStore {
    /// Load the persisted registry, falling back to the defaults when nothing
    /// is stored or the stored value cannot be used. Never fails.
    ///
    /// Must be called from within a tokio runtime; the background writer is
    /// spawned here.
    pub async fn initialize(storage: Arc<dyn KeyValueStore>) -> Self {
        let registry = load_registry(storage.as_ref()).await;
        debug!(
            providers = registry.len(),
            active = %registry.active().name,
            "provider registry ready"
        );

        let (snapshots, snapshot_rx) = watch::channel(Snapshot::default());
        let (written_tx, written) = watch::channel(0);
        let writer = tokio::spawn(run_writer(storage, snapshot_rx, written_tx));

        Self {
            registry,
            generation: 0,
            snapshots,
            written,
            writer,
        }
    }

    /// Current snapshot.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn active(&self) -> &Provider {
        self.registry.active()
    }

    /// Append a provider; see [`Registry::add`].
    pub fn add(&mut self, provider: Provider) -> Result<&Registry, RegistryError> {
        let next = self.registry.add(provider)?;
        Ok(self.commit(next))
    }

    /// Remove a provider by name; see [`Registry::remove`].
    pub fn remove(&mut self, name: &str) -> Result<&Registry, RegistryError> {
        let next = self.registry.remove(name)?;
        Ok(self.commit(next))
    }

    /// Select the active provider; see [`Registry::set_active`].
    pub fn set_active(&mut self, name: &str) -> Result<&Registry, RegistryError> {
        let next = self.registry.set_active(name)?;
        Ok(self.commit(next))
    }

    /// Add several providers at once; persisted once if anything was added.
    pub fn import(&mut self, providers: Vec<Provider>) -> ImportReport {
        let (next, report) = self.registry.import(providers);
        if report.added() > 0 {
            self.commit(next);
        }
        report
    }

    /// Wait until the newest snapshot has been handed to storage.
    ///
    /// Mutations never wait on persistence; this is for callers that are
    /// about to exit.
    pub async fn flush(&self) {
        let target = self.generation;
        let mut written = self.written.clone();
        if written.wait_for(|done| *done >= target).await.is_err() {
            warn!("provider registry writer stopped before the last snapshot was written");
        }
    }

    /// Flush and stop the background writer.
    pub async fn close(self) {
        self.flush().await;
        let Self {
            snapshots, writer, ..
        } = self;
        drop(snapshots);
        if let Err(err) = writer.await {
            warn!(error = %err, "provider registry writer ended abnormally");
        }
    }

    fn commit(&mut self, next: Registry) -> &Registry {
        self.registry = next;
        match serde_json::to_string(&self.registry) {
            Ok(payload) => {
                self.generation += 1;
                self.snapshots.send_replace(Snapshot {
                    generation: self.generation,
                    payload,
                });
            }
            Err(err) => {
                warn!(error = %err, "failed to serialize provider registry; skipping persistence")
            }
        }
        &self.registry
    }
}

async fn load_registry(storage: &dyn KeyValueStore) -> Registry {
    match storage.get(STORAGE_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<Registry>(&raw) {
            Ok(registry) => registry,
            Err(err) => {
                warn!(error = %err, "persisted provider registry is unusable; using defaults");
                Registry::default()
            }
        },
        Ok(None) => {
            info!("no persisted provider registry; using defaults");
            Registry::default()
        }
        Err(err) => {
            warn!(error = %err, "failed to read provider registry; using defaults");
            Registry::default()
        }
    }
}

async fn run_writer(
    storage: Arc<dyn KeyValueStore>,
    mut snapshots: watch::Receiver<Snapshot>,
    written: watch::Sender<u64>,
) {
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        match storage.set(STORAGE_KEY, &snapshot.payload).await {
            Ok(()) => debug!(
                generation = snapshot.generation,
                "provider registry persisted"
            ),
            Err(err) => warn!(
                generation = snapshot.generation,
                error = %err,
                "failed to persist provider registry"
            ),
        }
        written.send_replace(snapshot.generation);
    }
}
