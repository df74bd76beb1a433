//! Events describing what a state transition did.
//!
//! Events are derived by comparing the state before and after a transform,
//! so no transform has to report them by hand.

use serde::{Deserialize, Serialize};

use crate::matching::ConnectionType;

use super::model::{AppState, UserStatus};

/// High-level events published by the state store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A new match appeared.
    MatchCreated {
        match_id: String,
        profile_id: String,
        connection_type: ConnectionType,
    },
    /// A message was appended to a thread.
    MessageAppended {
        match_id: String,
        message_id: String,
        sender_id: String,
    },
    /// Both decision sets were emptied.
    DeckReset,
    /// All matches and threads were removed.
    MatchesReset,
    /// The stored blob was discarded and the defaults reloaded.
    FactoryReset,
    /// Approval status moved.
    StatusChanged { from: UserStatus, to: UserStatus },
    /// The signed-in flag flipped.
    AuthChanged { is_signed_in: bool },
    /// A transform was rejected; the state did not change.
    Rejected { reason: String },
}

impl StoreEvent {
    /// Lists the observable changes between two states.
    pub fn between(prev: &AppState, next: &AppState) -> Vec<StoreEvent> {
        let mut events = Vec::new();

        if prev.auth.is_signed_in != next.auth.is_signed_in {
            events.push(StoreEvent::AuthChanged {
                is_signed_in: next.auth.is_signed_in,
            });
        }

        if prev.user_status != next.user_status {
            events.push(StoreEvent::StatusChanged {
                from: prev.user_status,
                to: next.user_status,
            });
        }

        let had_decisions = !prev.liked_ids.is_empty() || !prev.disliked_ids.is_empty();
        if had_decisions && next.liked_ids.is_empty() && next.disliked_ids.is_empty() {
            events.push(StoreEvent::DeckReset);
        }

        if !prev.matches.is_empty() && next.matches.is_empty() {
            events.push(StoreEvent::MatchesReset);
        }

        for created in next
            .matches
            .iter()
            .filter(|m| prev.find_match(&m.id).is_none())
        {
            events.push(StoreEvent::MatchCreated {
                match_id: created.id.clone(),
                profile_id: created.other_participant(&next.me.id).to_string(),
                connection_type: created.connection_type,
            });
        }

        for (match_id, thread) in &next.messages {
            let seen = prev.messages.get(match_id).map_or(0, Vec::len);
            for message in thread.iter().skip(seen) {
                events.push(StoreEvent::MessageAppended {
                    match_id: match_id.clone(),
                    message_id: message.id.clone(),
                    sender_id: message.sender_id.clone(),
                });
            }
        }

        events
    }
}
