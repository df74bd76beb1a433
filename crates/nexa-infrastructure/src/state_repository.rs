//! Debounced persistence of the `AppState` blob.
//!
//! `save` only replaces the latest state in a `watch` channel read by a
//! background writer task; older unseen states are overwritten, never queued.
//! The writer keeps that state in a [`Debouncer`] and writes it once the
//! debounce window passes without another save, so a burst of updates costs
//! one write.
//!
//! Storage failures never reach the caller of `load`/`save`. They are logged
//! and published as [`PersistenceEvent`]s; `flush` and `clear` return them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nexa_core::config::StorageSettings;
use nexa_core::error::{NexaError, Result};
use nexa_core::state::{AppState, StateRepository};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::Instant;

use crate::debounce::Debouncer;
use crate::paths::NexaPaths;
use crate::state_codec::{decode_state, encode_state};
use crate::storage::{JsonFileStore, KeyValueStore};

const EVENT_CAPACITY: usize = 64;

/// Out-of-band report from the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PersistenceEvent {
    Persisted { bytes: usize },
    WriteFailed { message: String },
    LoadFellBack { message: String },
    Cleared,
}

enum WriterCommand {
    Flush(oneshot::Sender<Result<()>>),
    Clear(oneshot::Sender<Result<()>>),
}

/// `StateRepository` that coalesces writes over a debounce window.
///
/// Must be created inside a tokio runtime; the writer task is spawned on
/// construction and drains any pending state when the repository is dropped.
#[derive(Clone)]
pub struct DebouncedStateRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
    saves: Arc<watch::Sender<Option<AppState>>>,
    commands: mpsc::UnboundedSender<WriterCommand>,
    events: broadcast::Sender<PersistenceEvent>,
}

impl DebouncedStateRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, window: Duration) -> Self {
        let key = key.into();
        let (saves, latest) = watch::channel(None);
        let (commands, rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let writer = StateWriter {
            store: store.clone(),
            key: key.clone(),
            events: events.clone(),
        };
        tokio::spawn(writer.run(latest, rx, window));

        Self {
            store,
            key,
            saves: Arc::new(saves),
            commands,
            events,
        }
    }

    /// File-backed repository as configured in `[storage]`.
    pub fn open(settings: &StorageSettings, paths: &NexaPaths) -> Result<Self> {
        let dir = match &settings.data_dir {
            Some(dir) => dir.join("state"),
            None => paths.state_dir()?,
        };
        tracing::debug!("[StateRepository] Using state directory {:?}", dir);

        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(dir));
        Ok(Self::new(
            store,
            settings.state_key.clone(),
            settings.debounce(),
        ))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.events.subscribe()
    }

    fn read(&self) -> Result<AppState> {
        let defaults = AppState::default();
        match self.store.get(&self.key)? {
            Some(blob) => decode_state(&blob, &defaults),
            None => Ok(defaults),
        }
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<Result<()>>) -> WriterCommand,
    ) -> Result<()> {
        let (reply, done) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| NexaError::internal("state writer has stopped"))?;
        done.await
            .map_err(|_| NexaError::internal("state writer dropped the request"))?
    }
}

#[async_trait]
impl StateRepository for DebouncedStateRepository {
    fn load(&self) -> AppState {
        match self.read() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    "[StateRepository] Failed to load '{}', using defaults: {}",
                    self.key,
                    e
                );
                let _ = self.events.send(PersistenceEvent::LoadFellBack {
                    message: e.to_string(),
                });
                AppState::default()
            }
        }
    }

    fn save(&self, state: &AppState) {
        if self.saves.is_closed() {
            tracing::warn!("[StateRepository] Writer stopped, dropping save");
            return;
        }
        self.saves.send_replace(Some(state.clone()));
    }

    async fn flush(&self) -> Result<()> {
        self.request(WriterCommand::Flush).await
    }

    async fn clear(&self) -> Result<()> {
        self.request(WriterCommand::Clear).await
    }
}

struct StateWriter {
    store: Arc<dyn KeyValueStore>,
    key: String,
    events: broadcast::Sender<PersistenceEvent>,
}

impl StateWriter {
    async fn run(
        self,
        mut saves: watch::Receiver<Option<AppState>>,
        mut commands: mpsc::UnboundedReceiver<WriterCommand>,
        window: Duration,
    ) {
        let mut pending = Debouncer::new(window);

        loop {
            let deadline = pending.deadline().map(Instant::from_std);

            tokio::select! {
                changed = saves.changed() => match changed {
                    Ok(()) => schedule_latest(&mut saves, &mut pending),
                    Err(_) => {
                        self.drain(&mut saves, &mut pending).await;
                        break;
                    }
                },
                command = commands.recv() => match command {
                    Some(WriterCommand::Flush(reply)) => {
                        // A save issued before the flush may not be seen yet
                        if saves.has_changed().unwrap_or(false) {
                            schedule_latest(&mut saves, &mut pending);
                        }
                        let result = match pending.take() {
                            Some(state) => self.write(state).await,
                            None => Ok(()),
                        };
                        let _ = reply.send(result);
                    }
                    Some(WriterCommand::Clear(reply)) => {
                        saves.borrow_and_update();
                        pending.cancel();
                        let _ = reply.send(self.remove().await);
                    }
                    None => {
                        self.drain(&mut saves, &mut pending).await;
                        break;
                    }
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(state) = pending.take_due(Instant::now().into_std()) {
                        let _ = self.write(state).await;
                    }
                }
            }
        }

        tracing::debug!("[StateRepository] Writer for '{}' stopped", self.key);
    }

    /// Writes whatever is still pending once the repository is gone.
    async fn drain(
        &self,
        saves: &mut watch::Receiver<Option<AppState>>,
        pending: &mut Debouncer<AppState>,
    ) {
        // Resolves with the last unseen save, or fails once the sender is gone
        if saves.changed().await.is_ok() {
            schedule_latest(saves, pending);
        }
        if let Some(state) = pending.take() {
            let _ = self.write(state).await;
        }
    }

    async fn write(&self, state: AppState) -> Result<()> {
        let result = self.put(state).await;
        match &result {
            Ok(bytes) => {
                tracing::debug!("[StateRepository] Persisted {} bytes to '{}'", bytes, self.key);
                let _ = self
                    .events
                    .send(PersistenceEvent::Persisted { bytes: *bytes });
            }
            Err(e) => {
                tracing::warn!("[StateRepository] Failed to persist '{}': {}", self.key, e);
                let _ = self.events.send(PersistenceEvent::WriteFailed {
                    message: e.to_string(),
                });
            }
        }
        result.map(|_| ())
    }

    async fn put(&self, state: AppState) -> Result<usize> {
        let blob = encode_state(&state)?;
        let store = self.store.clone();
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || store.put(&key, &blob).map(|_| blob.len()))
            .await
            .map_err(|e| NexaError::internal(format!("state write task failed: {e}")))?
    }

    async fn remove(&self) -> Result<()> {
        let store = self.store.clone();
        let key = self.key.clone();
        let result = tokio::task::spawn_blocking(move || store.remove(&key))
            .await
            .map_err(|e| NexaError::internal(format!("state remove task failed: {e}")))?;

        match &result {
            Ok(()) => {
                tracing::info!("[StateRepository] Cleared '{}'", self.key);
                let _ = self.events.send(PersistenceEvent::Cleared);
            }
            Err(e) => {
                tracing::warn!("[StateRepository] Failed to clear '{}': {}", self.key, e);
            }
        }
        result
    }
}

/// Moves the latest saved state into the debouncer, restarting its window.
fn schedule_latest(
    saves: &mut watch::Receiver<Option<AppState>>,
    pending: &mut Debouncer<AppState>,
) {
    let latest = saves.borrow_and_update().clone();
    if let Some(state) = latest {
        pending.schedule(state, Instant::now().into_std());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use nexa_core::state::UserStatus;
    use serde_json::json;

    const KEY: &str = "nexa_app";
    const WINDOW: Duration = Duration::from_millis(400);

    fn repository(store: &Arc<MemoryStore>) -> DebouncedStateRepository {
        let store: Arc<dyn KeyValueStore> = store.clone();
        DebouncedStateRepository::new(store, KEY, WINDOW)
    }

    fn state_with_liked(id: &str) -> AppState {
        let mut state = AppState::default();
        state.liked_ids.insert(id.to_string());
        state
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_saves_is_one_write_of_the_latest_state() {
        let store = Arc::new(MemoryStore::new());
        let repo = repository(&store);
        let mut events = repo.subscribe();

        repo.save(&state_with_liked("u101"));
        repo.save(&state_with_liked("u102"));
        repo.save(&state_with_liked("u103"));

        assert!(matches!(
            events.recv().await.unwrap(),
            PersistenceEvent::Persisted { .. }
        ));
        repo.flush().await.unwrap();

        assert_eq!(store.write_count(), 1);
        assert_eq!(repo.load(), state_with_liked("u103"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_inside_window_restarts_it() {
        let store = Arc::new(MemoryStore::new());
        let repo = repository(&store);
        let mut events = repo.subscribe();
        let start = Instant::now();

        repo.save(&state_with_liked("u101"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.write_count(), 0);
        repo.save(&state_with_liked("u102"));

        events.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(700));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_written_without_saves() {
        let store = Arc::new(MemoryStore::new());
        let repo = repository(&store);

        tokio::time::sleep(Duration::from_secs(5)).await;
        repo.flush().await.unwrap();
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_flush_writes_immediately() {
        let store = Arc::new(MemoryStore::new());
        let repo = DebouncedStateRepository::new(store.clone(), KEY, Duration::from_secs(3600));

        repo.save(&state_with_liked("u104"));
        repo.flush().await.unwrap();

        assert_eq!(store.write_count(), 1);
        assert_eq!(repo.load(), state_with_liked("u104"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failure_is_reported_not_raised() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let repo = repository(&store);
        let mut events = repo.subscribe();

        repo.save(&state_with_liked("u101"));
        assert!(matches!(
            events.recv().await.unwrap(),
            PersistenceEvent::WriteFailed { .. }
        ));

        repo.save(&state_with_liked("u102"));
        assert!(repo.flush().await.is_err());
    }

    /// Store whose writes block until the test releases them.
    struct GatedStore {
        inner: MemoryStore,
        started: tokio::sync::mpsc::UnboundedSender<()>,
        permits: std::sync::Mutex<std::sync::mpsc::Receiver<()>>,
    }

    impl KeyValueStore for GatedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn put(&self, key: &str, value: &str) -> Result<()> {
            let _ = self.started.send(());
            let _ = self.permits.lock().unwrap().recv();
            self.inner.put(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[tokio::test]
    async fn test_saves_during_slow_write_collapse_to_latest() {
        let (started_tx, mut started) = tokio::sync::mpsc::unbounded_channel();
        let (release, permits) = std::sync::mpsc::channel();
        let store = Arc::new(GatedStore {
            inner: MemoryStore::new(),
            started: started_tx,
            permits: std::sync::Mutex::new(permits),
        });
        let repo = DebouncedStateRepository::new(store.clone(), KEY, Duration::ZERO);

        repo.save(&state_with_liked("u100"));
        started.recv().await.unwrap();

        // The writer is stuck in the first write while these arrive
        for i in 101..=150 {
            repo.save(&state_with_liked(&format!("u{i}")));
        }
        release.send(()).unwrap();
        release.send(()).unwrap();
        repo.flush().await.unwrap();

        assert_eq!(store.inner.write_count(), 2);
        assert_eq!(repo.load(), state_with_liked("u150"));
    }

    #[tokio::test]
    async fn test_clear_cancels_pending_and_removes_blob() {
        let store = Arc::new(MemoryStore::with_record(KEY, r#"{"demoMode":false}"#));
        let repo = DebouncedStateRepository::new(store.clone(), KEY, Duration::from_secs(3600));
        let mut events = repo.subscribe();

        repo.save(&state_with_liked("u101"));
        repo.clear().await.unwrap();
        repo.flush().await.unwrap();

        assert_eq!(events.recv().await.unwrap(), PersistenceEvent::Cleared);
        assert_eq!(store.get(KEY).unwrap(), None);
        assert_eq!(store.write_count(), 0);
        assert_eq!(repo.load(), AppState::default());
    }

    #[tokio::test]
    async fn test_drop_drains_pending_state() {
        let store = Arc::new(MemoryStore::new());
        let repo = DebouncedStateRepository::new(store.clone(), KEY, Duration::from_secs(3600));
        let mut events = repo.subscribe();

        repo.save(&state_with_liked("u105"));
        drop(repo);

        assert!(matches!(
            events.recv().await.unwrap(),
            PersistenceEvent::Persisted { .. }
        ));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_blob_is_default() {
        let store = Arc::new(MemoryStore::new());
        let repo = repository(&store);
        assert_eq!(repo.load(), AppState::default());
    }

    #[tokio::test]
    async fn test_load_corrupt_blob_falls_back_to_defaults() {
        let store = Arc::new(MemoryStore::with_record(KEY, "{not json"));
        let repo = repository(&store);
        let mut events = repo.subscribe();

        assert_eq!(repo.load(), AppState::default());
        assert!(matches!(
            events.recv().await.unwrap(),
            PersistenceEvent::LoadFellBack { .. }
        ));
    }

    #[tokio::test]
    async fn test_load_read_failure_falls_back_to_defaults() {
        let store = Arc::new(MemoryStore::with_record(KEY, "{}"));
        store.set_fail_reads(true);
        let repo = repository(&store);
        assert_eq!(repo.load(), AppState::default());
    }

    #[tokio::test]
    async fn test_load_partial_blob_merges_over_defaults() {
        let blob = json!({ "userStatus": "approved", "demoMode": false }).to_string();
        let store = Arc::new(MemoryStore::with_record(KEY, &blob));
        let repo = repository(&store);

        let state = repo.load();
        assert_eq!(state.user_status, UserStatus::Approved);
        assert!(!state.demo_mode);
        assert_eq!(state.candidate_pool, AppState::default().candidate_pool);
    }

    #[tokio::test]
    async fn test_open_uses_configured_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = StorageSettings {
            data_dir: Some(dir.path().to_path_buf()),
            ..StorageSettings::default()
        };
        let repo = DebouncedStateRepository::open(&settings, &NexaPaths::default()).unwrap();

        repo.save(&state_with_liked("u106"));
        repo.flush().await.unwrap();

        assert!(dir.path().join("state").join("nexa_app.json").exists());
        assert_eq!(repo.load(), state_with_liked("u106"));
    }
}
