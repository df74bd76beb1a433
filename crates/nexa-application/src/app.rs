//! Wiring of store, repository and use cases.

use std::sync::{Arc, Mutex};

use nexa_core::config::NexaConfig;
use nexa_core::error::Result;
use nexa_core::matching::RngSource;
use nexa_core::state::StateRepository;
use nexa_infrastructure::{DebouncedStateRepository, NexaPaths, PersistenceEvent};
use tokio::sync::broadcast;

use crate::account_usecase::AccountUseCase;
use crate::messaging_usecase::MessagingUseCase;
use crate::profile_usecase::ProfileUseCase;
use crate::settings_usecase::SettingsUseCase;
use crate::store::StateStore;
use crate::swipe_usecase::{SharedRandom, SwipeUseCase};

/// A ready-to-use engine: one store and the use cases sharing it.
pub struct NexaApp {
    pub store: Arc<StateStore>,
    pub swipe: SwipeUseCase,
    pub messaging: MessagingUseCase,
    pub account: AccountUseCase,
    pub settings: SettingsUseCase,
    pub profile: ProfileUseCase,
    repository: DebouncedStateRepository,
}

impl NexaApp {
    /// Opens the file-backed engine described by `config`.
    ///
    /// Must run inside a tokio runtime.
    pub fn bootstrap(config: &NexaConfig, paths: &NexaPaths) -> Result<Self> {
        let rng: SharedRandom = Arc::new(Mutex::new(RngSource::from_entropy()));
        Self::bootstrap_with(config, paths, rng)
    }

    /// Like [`NexaApp::bootstrap`] with a caller-chosen random source.
    pub fn bootstrap_with(config: &NexaConfig, paths: &NexaPaths, rng: SharedRandom) -> Result<Self> {
        config.validate()?;
        let repository = DebouncedStateRepository::open(&config.storage, paths)?;
        Ok(Self::assemble(config, repository, rng))
    }

    /// Builds the engine on an existing repository and random source.
    pub fn assemble(
        config: &NexaConfig,
        repository: DebouncedStateRepository,
        rng: SharedRandom,
    ) -> Self {
        let shared: Arc<dyn StateRepository> = Arc::new(repository.clone());
        let store = Arc::new(StateStore::open(shared));

        tracing::info!(
            "[NexaApp] Ready: demo_mode={}, status={}",
            store.read(|s| s.demo_mode),
            store.read(|s| s.user_status)
        );

        Self {
            swipe: SwipeUseCase::new(store.clone(), config.demo.odds(), rng),
            messaging: MessagingUseCase::new(store.clone()),
            account: AccountUseCase::new(store.clone(), config.auth.approve_on_sign_in),
            settings: SettingsUseCase::new(store.clone()),
            profile: ProfileUseCase::new(store.clone()),
            store,
            repository,
        }
    }

    pub fn subscribe_persistence(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.repository.subscribe()
    }

    /// Writes pending state; call before shutting down.
    pub async fn shutdown(&self) -> Result<()> {
        self.store.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexa_core::matching::{Decision, ScriptedRandom};
    use nexa_core::state::{SignInEvent, UserStatus};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> NexaConfig {
        let mut config = NexaConfig::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        config
    }

    fn sign_in_event() -> SignInEvent {
        SignInEvent {
            is_signed_in: true,
            provider: "linkedin".to_string(),
            identity: "emir".to_string(),
        }
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let first_match = {
            let repository = DebouncedStateRepository::open(&config.storage, &NexaPaths::default())
                .unwrap();
            let rng: SharedRandom = Arc::new(Mutex::new(ScriptedRandom::always_match()));
            let app = NexaApp::assemble(&config, repository, rng);

            app.account.on_sign_in(&sign_in_event());
            let outcome = app.swipe.decide(Decision::Like).unwrap();
            let matched = outcome.new_match.unwrap();
            app.messaging.send("Nice to meet you").unwrap();
            app.shutdown().await.unwrap();
            matched
        };

        let app = NexaApp::bootstrap(&config, &NexaPaths::default()).unwrap();
        let state = app.store.current();

        assert_eq!(state.user_status, UserStatus::Approved);
        assert_eq!(state.matches, vec![first_match.clone()]);
        assert_eq!(app.messaging.thread(&first_match.id).len(), 1);
        assert_ne!(app.swipe.current_candidate().map(|p| p.id), Some(first_match.b_id));
    }

    #[tokio::test]
    async fn test_factory_reset_removes_stored_state() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let app = NexaApp::bootstrap(&config, &NexaPaths::default()).unwrap();
        let mut persistence = app.subscribe_persistence();
        app.settings.set_demo_mode(false);
        app.shutdown().await.unwrap();
        assert!(matches!(
            persistence.recv().await.unwrap(),
            PersistenceEvent::Persisted { .. }
        ));

        app.settings.factory_reset().await.unwrap();
        app.shutdown().await.unwrap();

        let reopened = NexaApp::bootstrap(&config, &NexaPaths::default()).unwrap();
        assert!(reopened.store.current().demo_mode);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.demo.like_match_probability = -0.1;
        assert!(NexaApp::bootstrap(&config, &NexaPaths::default()).is_err());
    }
}
