//! Message ledger: one ordered, append-only thread per match.

use chrono::{DateTime, Utc};

use crate::error::{NexaError, Result};
use crate::matching::{Match, matched_profile};
use crate::profile::Profile;
use crate::state::AppState;

use super::model::Message;

/// Appends a message to the thread of `match_id`.
///
/// Rejects whitespace-only text and unknown matches with a validation error;
/// the input state is never modified. The stored text is trimmed.
pub fn append_message(
    state: &AppState,
    match_id: &str,
    sender_id: &str,
    text: &str,
) -> Result<AppState> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NexaError::validation("message text must not be empty"));
    }
    if state.find_match(match_id).is_none() {
        return Err(NexaError::validation(format!(
            "cannot send to unknown match '{match_id}'"
        )));
    }

    let mut next = state.clone();
    next.messages
        .entry(match_id.to_string())
        .or_default()
        .push(Message::new(sender_id, text));
    Ok(next)
}

/// Messages of a thread in display order; empty when nothing was sent.
pub fn thread<'a>(state: &'a AppState, match_id: &str) -> &'a [Message] {
    state
        .messages
        .get(match_id)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// The newest message of a thread, for previews.
pub fn last_message<'a>(state: &'a AppState, match_id: &str) -> Option<&'a Message> {
    thread(state, match_id).last()
}

/// Points the selected-match pointer at an existing match.
pub fn select_match(state: &AppState, match_id: &str) -> Result<AppState> {
    if state.find_match(match_id).is_none() {
        return Err(NexaError::not_found("Match", match_id));
    }
    Ok(AppState {
        selected_match_id: Some(match_id.to_string()),
        ..state.clone()
    })
}

/// A row of the conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationPreview<'a> {
    pub matched: &'a Match,
    pub profile: Option<&'a Profile>,
    pub last_message: Option<&'a Message>,
}

impl ConversationPreview<'_> {
    /// Time of the latest activity: last message, or match creation.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_message
            .map(|m| m.created_at)
            .unwrap_or(self.matched.created_at)
    }
}

/// Every match with its last message, most recent activity first.
pub fn conversation_previews(state: &AppState) -> Vec<ConversationPreview<'_>> {
    let mut previews: Vec<ConversationPreview<'_>> = state
        .matches
        .iter()
        .map(|m| ConversationPreview {
            matched: m,
            profile: matched_profile(state, &m.id),
            last_message: last_message(state, &m.id),
        })
        .collect();
    previews.sort_by_key(|p| std::cmp::Reverse(p.last_activity()));
    previews
}
