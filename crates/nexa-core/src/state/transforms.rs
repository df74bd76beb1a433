//! Whole-state transforms: resets, account and mode switches.
//!
//! Every function takes the current state by reference and returns the next
//! state; none of them perform I/O.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{AppState, AuthState, SignInEvent, UserStatus};
use super::seed;

/// Clears both decision sets. Matches, threads and filters are untouched.
pub fn reset_deck(state: &AppState) -> AppState {
    AppState {
        liked_ids: BTreeSet::new(),
        disliked_ids: BTreeSet::new(),
        ..state.clone()
    }
}

/// Clears matches, the message ledger and the selected-match pointer.
pub fn reset_matches(state: &AppState) -> AppState {
    AppState {
        matches: Vec::new(),
        messages: BTreeMap::new(),
        selected_match_id: None,
        ..state.clone()
    }
}

/// Starts the demo over: no decisions, no matches, and the demo pool back in
/// place if the candidate pool was emptied.
pub fn seed_demo_data(state: &AppState) -> AppState {
    let mut next = reset_matches(&reset_deck(state));
    if next.candidate_pool.is_empty() {
        next.candidate_pool = seed::demo_candidate_pool();
    }
    next
}

pub fn set_demo_mode(state: &AppState, enabled: bool) -> AppState {
    AppState {
        demo_mode: enabled,
        ..state.clone()
    }
}

pub fn set_user_status(state: &AppState, status: UserStatus) -> AppState {
    AppState {
        user_status: status,
        ..state.clone()
    }
}

/// Applies a sign-in event from the authentication collaborator.
///
/// A successful sign-in records provider and identity and, when
/// `approve_on_sign_in` is set, moves a pending application to approved.
/// Denied applications stay denied. An event reporting `is_signed_in: false`
/// is handled as a sign-out.
pub fn sign_in(state: &AppState, event: &SignInEvent, approve_on_sign_in: bool) -> AppState {
    if !event.is_signed_in {
        return sign_out(state);
    }

    let user_status = if approve_on_sign_in && state.user_status == UserStatus::Pending {
        UserStatus::Approved
    } else {
        state.user_status
    };

    AppState {
        auth: AuthState {
            is_signed_in: true,
            provider: Some(event.provider.clone()),
            identity: Some(event.identity.clone()),
        },
        user_status,
        ..state.clone()
    }
}

/// Clears the session and returns the application to pending.
pub fn sign_out(state: &AppState) -> AppState {
    AppState {
        auth: AuthState::default(),
        user_status: UserStatus::Pending,
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{ConnectionType, form_match};

    fn busy_state() -> AppState {
        let mut state = AppState::default();
        state.liked_ids.insert("u101".to_string());
        state.disliked_ids.insert("u102".to_string());
        form_match(&state, "me-001", "u101", ConnectionType::Social)
    }

    fn event(signed_in: bool) -> SignInEvent {
        SignInEvent {
            is_signed_in: signed_in,
            provider: "email".to_string(),
            identity: "emir@example.com".to_string(),
        }
    }

    #[test]
    fn test_reset_deck_keeps_matches() {
        let state = busy_state();
        let next = reset_deck(&state);
        assert!(next.liked_ids.is_empty());
        assert!(next.disliked_ids.is_empty());
        assert_eq!(next.matches, state.matches);
        assert_eq!(next.messages, state.messages);
        assert_eq!(next.selected_match_id, state.selected_match_id);
    }

    #[test]
    fn test_reset_matches_keeps_decisions() {
        let state = busy_state();
        let next = reset_matches(&state);
        assert!(next.matches.is_empty());
        assert!(next.messages.is_empty());
        assert!(next.selected_match_id.is_none());
        assert_eq!(next.liked_ids, state.liked_ids);
    }

    #[test]
    fn test_seed_demo_data_restores_pool() {
        let mut state = busy_state();
        state.candidate_pool.clear();
        let next = seed_demo_data(&state);
        assert_eq!(next.candidate_pool, seed::demo_candidate_pool());
        assert!(next.matches.is_empty());
        assert!(next.liked_ids.is_empty());
    }

    #[test]
    fn test_sign_in_approves_pending_user() {
        let state = sign_in(&AppState::default(), &event(true), true);
        assert!(state.auth.is_signed_in);
        assert_eq!(state.auth.provider.as_deref(), Some("email"));
        assert_eq!(state.user_status, UserStatus::Approved);
    }

    #[test]
    fn test_sign_in_without_auto_approval_stays_pending() {
        let state = sign_in(&AppState::default(), &event(true), false);
        assert!(state.auth.is_signed_in);
        assert_eq!(state.user_status, UserStatus::Pending);
    }

    #[test]
    fn test_denied_user_stays_denied() {
        let denied = set_user_status(&AppState::default(), UserStatus::Denied);
        let state = sign_in(&denied, &event(true), true);
        assert_eq!(state.user_status, UserStatus::Denied);
    }

    #[test]
    fn test_failed_sign_in_event_signs_out() {
        let signed_in = sign_in(&AppState::default(), &event(true), true);
        let state = sign_in(&signed_in, &event(false), true);
        assert_eq!(state.auth, AuthState::default());
        assert_eq!(state.user_status, UserStatus::Pending);
    }

    #[test]
    fn test_set_demo_mode() {
        let state = set_demo_mode(&AppState::default(), false);
        assert!(!state.demo_mode);
    }
}
