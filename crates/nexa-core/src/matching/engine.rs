//! Matching engine: decisions and match formation.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::state::AppState;

use super::model::{ConnectionType, Decision, Match, match_id, ordered_pair};
use super::random::RandomSource;

/// Probability that the simulated other side likes back, per decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOdds {
    pub like: f64,
    pub superlike: f64,
}

impl Default for MatchOdds {
    fn default() -> Self {
        Self {
            like: 0.4,
            superlike: 0.6,
        }
    }
}

impl MatchOdds {
    pub fn for_decision(&self, decision: Decision) -> f64 {
        match decision {
            Decision::Pass => 0.0,
            Decision::Like => self.like,
            Decision::Superlike => self.superlike,
        }
    }
}

/// Picks a connection type uniformly at random.
pub fn pick_connection_type<R: RandomSource + ?Sized>(rng: &mut R) -> ConnectionType {
    ConnectionType::ALL[rng.next_index(ConnectionType::ALL.len())]
}

/// Records a decision on `profile_id`.
///
/// Pass lands in `disliked_ids`; Like and Superlike land in `liked_ids`.
/// The two sets stay mutually exclusive and repeated decisions add nothing.
/// In demo mode a positive decision forms a match when a uniform draw falls
/// below the decision's probability. Outside demo mode no match is formed.
pub fn record_decision<R: RandomSource + ?Sized>(
    state: &AppState,
    profile_id: &str,
    decision: Decision,
    odds: &MatchOdds,
    rng: &mut R,
) -> AppState {
    let mut next = state.clone();

    if !decision.is_positive() {
        next.liked_ids.remove(profile_id);
        next.disliked_ids.insert(profile_id.to_string());
        return next;
    }

    next.disliked_ids.remove(profile_id);
    next.liked_ids.insert(profile_id.to_string());

    if next.demo_mode && rng.next_unit() < odds.for_decision(decision) {
        let connection_type = pick_connection_type(rng);
        let self_id = next.me.id.clone();
        return form_match(&next, &self_id, profile_id, connection_type);
    }

    next
}

/// Forms the match between `self_id` and `other_id`.
///
/// Idempotent: if the pair already has a match the state is returned
/// unchanged. Otherwise the match is appended, its thread initialised (an
/// existing thread for the same id is kept) and it becomes the selected match.
/// A pair of identical ids never forms a match.
pub fn form_match(
    state: &AppState,
    self_id: &str,
    other_id: &str,
    connection_type: ConnectionType,
) -> AppState {
    if self_id == other_id {
        return state.clone();
    }

    let id = match_id(self_id, other_id);
    if state.find_match(&id).is_some() {
        return state.clone();
    }

    let (a_id, b_id) = ordered_pair(self_id, other_id);
    let mut next = state.clone();
    next.matches.push(Match {
        id: id.clone(),
        a_id: a_id.to_string(),
        b_id: b_id.to_string(),
        connection_type,
        created_at: Utc::now(),
    });
    next.messages.entry(id.clone()).or_default();
    next.selected_match_id = Some(id);
    next
}

/// The profile on the other side of a match.
pub fn matched_profile<'a>(state: &'a AppState, match_id: &str) -> Option<&'a Profile> {
    let found = state.find_match(match_id)?;
    state.find_profile(found.other_participant(&state.me.id))
}

/// The match between `me` and `profile_id`, if one was formed.
pub fn match_with(state: &AppState, profile_id: &str) -> Option<Match> {
    let id = match_id(&state.me.id, profile_id);
    state.find_match(&id).cloned()
}
