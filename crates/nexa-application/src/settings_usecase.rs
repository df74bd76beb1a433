//! Settings use case: demo switches and resets.

use std::sync::Arc;

use nexa_core::error::Result;
use nexa_core::state::{self, AppState};

use crate::store::StateStore;

pub struct SettingsUseCase {
    store: Arc<StateStore>,
}

impl SettingsUseCase {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    pub fn set_demo_mode(&self, enabled: bool) -> AppState {
        self.store
            .update(|current| state::set_demo_mode(current, enabled))
    }

    /// Forgets every like and pass so the whole pool is browsable again.
    pub fn reset_deck(&self) -> AppState {
        self.store.update(state::reset_deck)
    }

    pub fn reset_matches(&self) -> AppState {
        self.store.update(state::reset_matches)
    }

    pub fn seed_demo_data(&self) -> AppState {
        self.store.update(state::seed_demo_data)
    }

    /// Deletes the stored state and starts over from the defaults.
    pub async fn factory_reset(&self) -> Result<AppState> {
        self.store.factory_reset().await
    }
}
