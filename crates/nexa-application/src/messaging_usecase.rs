//! Messaging use case: conversations with matches.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexa_core::error::{NexaError, Result};
use nexa_core::matching::{Match, matched_profile};
use nexa_core::messaging::{self, Message, conversation_previews};
use nexa_core::profile::Profile;
use serde::Serialize;

use crate::store::StateStore;

/// Owned view of one conversation for list screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub matched: Match,
    pub profile: Option<Profile>,
    pub last_message: Option<Message>,
    pub last_activity: DateTime<Utc>,
    pub selected: bool,
}

pub struct MessagingUseCase {
    store: Arc<StateStore>,
}

impl MessagingUseCase {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Conversations ordered by most recent activity.
    pub fn conversations(&self) -> Vec<ConversationSummary> {
        self.store.read(|state| {
            conversation_previews(state)
                .into_iter()
                .map(|preview| ConversationSummary {
                    matched: preview.matched.clone(),
                    profile: preview.profile.cloned(),
                    last_message: preview.last_message.cloned(),
                    last_activity: preview.last_activity(),
                    selected: state.selected_match_id.as_deref() == Some(preview.matched.id.as_str()),
                })
                .collect()
        })
    }

    pub fn select(&self, match_id: &str) -> Result<()> {
        self.store
            .try_update(|state| messaging::select_match(state, match_id))?;
        Ok(())
    }

    /// The selected match, if one is selected.
    pub fn selected(&self) -> Option<Match> {
        self.store.read(|state| state.selected_match().cloned())
    }

    pub fn thread(&self, match_id: &str) -> Vec<Message> {
        self.store
            .read(|state| messaging::thread(state, match_id).to_vec())
    }

    pub fn last_message(&self, match_id: &str) -> Option<Message> {
        self.store
            .read(|state| messaging::last_message(state, match_id).cloned())
    }

    pub fn matched_profile(&self, match_id: &str) -> Option<Profile> {
        self.store
            .read(|state| matched_profile(state, match_id).cloned())
    }

    /// Sends `text` as `me` to the selected match.
    pub fn send(&self, text: &str) -> Result<Message> {
        let match_id = self
            .selected()
            .map(|m| m.id)
            .ok_or_else(|| NexaError::validation("no conversation selected"))?;
        self.send_to(&match_id, text)
    }

    /// Sends `text` as `me` to a specific match.
    pub fn send_to(&self, match_id: &str, text: &str) -> Result<Message> {
        let next = self.store.try_update(|state| {
            messaging::append_message(state, match_id, &state.me.id, text)
        })?;

        messaging::last_message(&next, match_id)
            .cloned()
            .ok_or_else(|| NexaError::internal("appended message is missing"))
    }
}
