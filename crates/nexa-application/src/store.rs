//! The state store: owner of the current `AppState`.
//!
//! All mutation goes through [`StateStore::try_update`]. A transform receives
//! the current state and returns the next one; the store persists it through
//! the repository, publishes it on a `watch` channel and broadcasts the
//! [`StoreEvent`]s the transition produced.
//!
//! Transforms run while the `watch` sender holds its lock, so two updates
//! never interleave.

use std::sync::Arc;

use nexa_core::error::Result;
use nexa_core::state::{AppState, StateRepository, StoreEvent};
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 128;

pub struct StateStore {
    state: watch::Sender<AppState>,
    repository: Arc<dyn StateRepository>,
    events: broadcast::Sender<StoreEvent>,
}

impl StateStore {
    /// Opens the store with whatever the repository loads.
    pub fn open(repository: Arc<dyn StateRepository>) -> Self {
        let initial = repository.load();
        tracing::debug!(
            "[StateStore] Loaded state: status={}, matches={}, decided={}",
            initial.user_status,
            initial.matches.len(),
            initial.liked_ids.len() + initial.disliked_ids.len()
        );
        Self::with_state(repository, initial)
    }

    /// Opens the store on an explicit initial state without loading.
    pub fn with_state(repository: Arc<dyn StateRepository>, initial: AppState) -> Self {
        let (state, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state,
            repository,
            events,
        }
    }

    /// A snapshot of the current state.
    pub fn current(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Reads the current state without cloning it.
    ///
    /// The closure runs under the state lock and must not call back into
    /// the store.
    pub fn read<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.state.borrow())
    }

    pub fn subscribe_state(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Applies a fallible transform.
    ///
    /// On `Err` the state is left as it was, a `Rejected` event is broadcast
    /// and the error is returned. A transform that returns an equal state is
    /// neither persisted nor published.
    pub fn try_update<F>(&self, transform: F) -> Result<AppState>
    where
        F: FnOnce(&AppState) -> Result<AppState>,
    {
        self.apply(transform, StoreEvent::between)
    }

    fn apply<F>(
        &self,
        transform: F,
        derive_events: fn(&AppState, &AppState) -> Vec<StoreEvent>,
    ) -> Result<AppState>
    where
        F: FnOnce(&AppState) -> Result<AppState>,
    {
        let mut outcome: Option<Result<(AppState, Vec<StoreEvent>)>> = None;

        self.state.send_if_modified(|current| match transform(current) {
            Ok(next) if next == *current => {
                outcome = Some(Ok((next, Vec::new())));
                false
            }
            Ok(next) => {
                let events = derive_events(current, &next);
                self.repository.save(&next);
                *current = next.clone();
                outcome = Some(Ok((next, events)));
                true
            }
            Err(e) => {
                outcome = Some(Err(e));
                false
            }
        });

        match outcome {
            Some(Ok((next, events))) => {
                for event in events {
                    self.publish(event);
                }
                Ok(next)
            }
            Some(Err(e)) => {
                tracing::warn!("[StateStore] Transform rejected: {}", e);
                self.publish(StoreEvent::Rejected {
                    reason: e.to_string(),
                });
                Err(e)
            }
            None => Ok(self.current()),
        }
    }

    /// Applies an infallible transform.
    pub fn update<F>(&self, transform: F) -> AppState
    where
        F: FnOnce(&AppState) -> AppState,
    {
        match self.try_update(|state| Ok(transform(state))) {
            Ok(next) => next,
            Err(_) => self.current(),
        }
    }

    /// Writes any pending state now.
    pub async fn flush(&self) -> Result<()> {
        self.repository.flush().await
    }

    /// Discards the stored blob and returns to the defaults.
    ///
    /// Publishes a single `FactoryReset`; the deck, match and status changes
    /// it implies are not broadcast separately.
    pub async fn factory_reset(&self) -> Result<AppState> {
        self.repository.clear().await?;
        let next = self.apply(|_| Ok(AppState::default()), |_, _| Vec::new())?;
        tracing::info!("[StateStore] Factory reset");
        self.publish(StoreEvent::FactoryReset);
        Ok(next)
    }

    fn publish(&self, event: StoreEvent) {
        match &event {
            StoreEvent::MatchCreated {
                match_id,
                connection_type,
                ..
            } => tracing::info!("[StateStore] Match {} ({})", match_id, connection_type),
            StoreEvent::DeckReset | StoreEvent::MatchesReset => {
                tracing::info!("[StateStore] {:?}", event)
            }
            _ => tracing::debug!("[StateStore] {:?}", event),
        }
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
