//! Swipe use case: browsing the deck and deciding on candidates.

use std::sync::{Arc, Mutex};

use nexa_core::deck::{
    self, AxisFilter, FilterAxis, available_profiles, current_candidate, explore_profiles,
};
use nexa_core::error::{NexaError, Result};
use nexa_core::matching::{Decision, Match, MatchOdds, RandomSource, match_with, record_decision};
use nexa_core::profile::Profile;
use serde::Serialize;

use crate::store::StateStore;

/// Random source shared by decisions.
pub type SharedRandom = Arc<Mutex<dyn RandomSource + Send>>;

/// What a decision did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutcome {
    pub profile: Profile,
    pub decision: Decision,
    /// The match this decision formed, if any.
    pub new_match: Option<Match>,
}

/// Deck browsing and decisions against a [`StateStore`].
pub struct SwipeUseCase {
    store: Arc<StateStore>,
    odds: MatchOdds,
    rng: SharedRandom,
}

impl SwipeUseCase {
    pub fn new(store: Arc<StateStore>, odds: MatchOdds, rng: SharedRandom) -> Self {
        Self { store, odds, rng }
    }

    /// The single profile presented right now.
    pub fn current_candidate(&self) -> Option<Profile> {
        self.store.read(|state| current_candidate(state).cloned())
    }

    pub fn available(&self) -> Vec<Profile> {
        self.store
            .read(|state| available_profiles(state).into_iter().cloned().collect())
    }

    /// Filtered pool including already decided profiles.
    pub fn explore(&self) -> Vec<Profile> {
        self.store
            .read(|state| explore_profiles(state).into_iter().cloned().collect())
    }

    /// Decides on the current candidate.
    pub fn decide(&self, decision: Decision) -> Result<DecisionOutcome> {
        let profile_id = self
            .current_candidate()
            .map(|profile| profile.id)
            .ok_or_else(|| NexaError::validation("no candidate to decide on"))?;
        self.decide_on(&profile_id, decision)
    }

    /// Decides on a specific pool profile, e.g. one picked from explore.
    pub fn decide_on(&self, profile_id: &str, decision: Decision) -> Result<DecisionOutcome> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let mut decided: Option<(Profile, bool)> = None;

        let next = self.store.try_update(|state| {
            if !state.is_approved() {
                return Err(NexaError::validation(
                    "browsing is only available once approved",
                ));
            }
            let profile = state
                .find_profile(profile_id)
                .ok_or_else(|| NexaError::not_found("Profile", profile_id))?;
            decided = Some((profile.clone(), match_with(state, profile_id).is_some()));
            Ok(record_decision(state, profile_id, decision, &self.odds, &mut *rng))
        })?;

        let (profile, was_matched) =
            decided.ok_or_else(|| NexaError::internal("decision transform did not run"))?;
        let new_match = match_with(&next, &profile.id).filter(|_| !was_matched);

        tracing::debug!(
            "[SwipeUseCase] {:?} on {} (matched: {})",
            decision,
            profile.id,
            new_match.is_some()
        );

        Ok(DecisionOutcome {
            profile,
            decision,
            new_match,
        })
    }

    pub fn set_filter(&self, axis: FilterAxis, value: &str) -> Result<()> {
        let value = AxisFilter::parse(value)?;
        self.store
            .update(|state| deck::set_filter(state, axis, value));
        Ok(())
    }

    pub fn clear_filters(&self) {
        self.store.update(deck::clear_filters);
    }

    /// Values offered for a filter axis, `All` first.
    pub fn filter_options(&self, axis: FilterAxis) -> Vec<String> {
        self.store.read(|state| deck::filter_options(state, axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::store_with;
    use nexa_core::matching::ScriptedRandom;
    use nexa_core::state::{AppState, StoreEvent, UserStatus, seed};

    fn approved() -> AppState {
        AppState {
            user_status: UserStatus::Approved,
            ..AppState::default()
        }
    }

    fn swipe(state: AppState, rng: ScriptedRandom) -> (Arc<StateStore>, SwipeUseCase) {
        let (_, store) = store_with(state);
        let store = Arc::new(store);
        let rng: SharedRandom = Arc::new(Mutex::new(rng));
        let usecase = SwipeUseCase::new(store.clone(), MatchOdds::default(), rng);
        (store, usecase)
    }

    #[test]
    fn test_pass_advances_to_next_candidate() {
        let mut state = approved();
        state.candidate_pool.truncate(3);
        let pool = state.candidate_pool.clone();
        let (store, swipe) = swipe(state, ScriptedRandom::never_match());

        assert_eq!(swipe.current_candidate(), Some(pool[0].clone()));
        let outcome = swipe.decide(Decision::Pass).unwrap();

        assert_eq!(outcome.profile.id, pool[0].id);
        assert!(outcome.new_match.is_none());
        assert_eq!(swipe.current_candidate(), Some(pool[1].clone()));
        assert!(store.current().disliked_ids.contains(&pool[0].id));
    }

    #[test]
    fn test_like_with_forced_match() {
        let (store, swipe) = swipe(approved(), ScriptedRandom::always_match());
        let mut events = store.subscribe_events();

        let outcome = swipe.decide(Decision::Like).unwrap();
        let formed = outcome.new_match.unwrap();
        let state = store.current();

        assert_eq!(state.matches.len(), 1);
        assert_eq!(state.selected_match_id.as_deref(), Some(formed.id.as_str()));
        assert!(state.messages[&formed.id].is_empty());
        assert!(matches!(
            events.try_recv().unwrap(),
            StoreEvent::MatchCreated { match_id, .. } if match_id == formed.id
        ));
    }

    #[test]
    fn test_like_without_match_in_live_mode() {
        let state = AppState {
            demo_mode: false,
            ..approved()
        };
        let (store, swipe) = swipe(state, ScriptedRandom::always_match());

        let outcome = swipe.decide(Decision::Superlike).unwrap();

        assert!(outcome.new_match.is_none());
        assert!(store.current().matches.is_empty());
        assert!(store.current().liked_ids.contains(&outcome.profile.id));
    }

    #[test]
    fn test_repeat_like_reports_no_new_match() {
        let (_, swipe) = swipe(approved(), ScriptedRandom::always_match());
        let first = swipe.decide_on("u104", Decision::Like).unwrap();
        let second = swipe.decide_on("u104", Decision::Superlike).unwrap();

        assert!(first.new_match.is_some());
        assert!(second.new_match.is_none());
    }

    #[test]
    fn test_pending_user_cannot_decide() {
        let (store, swipe) = swipe(AppState::default(), ScriptedRandom::always_match());

        assert!(swipe.current_candidate().is_none());
        assert!(swipe.decide(Decision::Like).unwrap_err().is_validation());
        assert!(swipe.decide_on("u101", Decision::Like).is_err());
        assert!(store.current().liked_ids.is_empty());
    }

    #[test]
    fn test_unknown_profile_is_not_found() {
        let (_, swipe) = swipe(approved(), ScriptedRandom::never_match());
        assert!(swipe.decide_on("nobody", Decision::Pass).unwrap_err().is_not_found());
    }

    #[test]
    fn test_filters_narrow_the_deck() {
        let (_, swipe) = swipe(approved(), ScriptedRandom::never_match());
        let city = seed::demo_candidate_pool()[1].city.clone();

        swipe.set_filter(FilterAxis::City, &city).unwrap();
        assert!(swipe.available().iter().all(|p| p.city == city));
        assert_eq!(swipe.filter_options(FilterAxis::City)[0], "All");

        assert!(swipe.set_filter(FilterAxis::Sector, "  ").is_err());

        swipe.clear_filters();
        assert_eq!(swipe.available().len(), seed::demo_candidate_pool().len());
    }

    #[test]
    fn test_explore_keeps_decided_profiles() {
        let (_, swipe) = swipe(approved(), ScriptedRandom::never_match());
        swipe.decide(Decision::Pass).unwrap();

        assert_eq!(swipe.explore().len(), swipe.available().len() + 1);
    }
}
