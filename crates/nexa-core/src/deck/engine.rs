//! Candidate engine.
//!
//! There is no stored deck: the browsable set is recomputed from `AppState`
//! on every read.

use crate::profile::Profile;
use crate::state::AppState;

use super::filter::{ALL, AxisFilter, FilterAxis};

fn eligible<'a>(state: &'a AppState) -> impl Iterator<Item = &'a Profile> + 'a {
    let gated: &[Profile] = if state.is_approved() {
        state.candidate_pool.as_slice()
    } else {
        &[]
    };
    gated
        .iter()
        .filter(move |p| !state.has_decided(&p.id))
        .filter(move |p| state.filters.admits(p))
}

/// Profiles the user can still decide on, in pool order.
///
/// Always empty until the user's application is approved.
pub fn available_profiles(state: &AppState) -> Vec<&Profile> {
    eligible(state).collect()
}

/// The single profile presented to the user right now.
pub fn current_candidate(state: &AppState) -> Option<&Profile> {
    eligible(state).next()
}

/// Pool profiles passing the active filters, decided or not.
///
/// Backs the explore listing; gated on approval like the deck.
pub fn explore_profiles(state: &AppState) -> Vec<&Profile> {
    if !state.is_approved() {
        return Vec::new();
    }
    state
        .candidate_pool
        .iter()
        .filter(|p| state.filters.admits(p))
        .collect()
}

/// Selectable values for one filter axis: `All` first, then every distinct
/// value in pool order.
pub fn filter_options(state: &AppState, axis: FilterAxis) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for profile in &state.candidate_pool {
        let value = match axis {
            FilterAxis::City => &profile.city,
            FilterAxis::Sector => &profile.sector,
        };
        if !options.iter().any(|o| o == value) {
            options.push(value.clone());
        }
    }
    options
}

/// Replaces one filter axis.
pub fn set_filter(state: &AppState, axis: FilterAxis, value: AxisFilter) -> AppState {
    AppState {
        filters: state.filters.clone().with(axis, value),
        ..state.clone()
    }
}

/// Resets both axes to `All`.
pub fn clear_filters(state: &AppState) -> AppState {
    AppState {
        filters: Default::default(),
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::state::UserStatus;

    fn profile(id: &str, city: &str, sector: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: id.to_uppercase(),
            headline: String::new(),
            city: city.to_string(),
            sector: sector.to_string(),
            bio: String::new(),
            tags: Vec::new(),
            photos: vec![format!("{id}.jpg")],
            privacy: None,
        }
    }

    fn approved_state() -> AppState {
        AppState {
            user_status: UserStatus::Approved,
            candidate_pool: vec![
                profile("a", "Istanbul", "Tech"),
                profile("b", "London", "Finance"),
                profile("c", "Istanbul", "Media"),
            ],
            ..AppState::default()
        }
    }

    fn ids(profiles: &[&Profile]) -> Vec<String> {
        profiles.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_pool_order_when_unfiltered() {
        let state = approved_state();
        assert_eq!(ids(&available_profiles(&state)), vec!["a", "b", "c"]);
        assert_eq!(current_candidate(&state).unwrap().id, "a");
    }

    #[test]
    fn test_decided_profiles_are_excluded() {
        let mut state = approved_state();
        state.liked_ids.insert("a".to_string());
        state.disliked_ids.insert("c".to_string());

        let available = available_profiles(&state);
        assert_eq!(ids(&available), vec!["b"]);
        for p in &available {
            assert!(!state.liked_ids.contains(&p.id));
            assert!(!state.disliked_ids.contains(&p.id));
        }
    }

    #[test]
    fn test_not_approved_sees_nothing() {
        for status in [UserStatus::Pending, UserStatus::Denied] {
            let state = AppState {
                user_status: status,
                ..approved_state()
            };
            assert!(available_profiles(&state).is_empty());
            assert!(current_candidate(&state).is_none());
            assert!(explore_profiles(&state).is_empty());
        }
    }

    #[test]
    fn test_city_and_sector_filters() {
        let state = set_filter(
            &approved_state(),
            FilterAxis::City,
            AxisFilter::Only("Istanbul".to_string()),
        );
        assert_eq!(ids(&available_profiles(&state)), vec!["a", "c"]);

        let state = set_filter(&state, FilterAxis::Sector, AxisFilter::Only("Media".to_string()));
        assert_eq!(ids(&available_profiles(&state)), vec!["c"]);

        let state = clear_filters(&state);
        assert_eq!(ids(&available_profiles(&state)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_explore_ignores_decisions() {
        let mut state = approved_state();
        state.liked_ids.insert("a".to_string());
        assert_eq!(ids(&explore_profiles(&state)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_options() {
        let state = approved_state();
        assert_eq!(
            filter_options(&state, FilterAxis::City),
            vec!["All", "Istanbul", "London"]
        );
        assert_eq!(
            filter_options(&state, FilterAxis::Sector),
            vec!["All", "Tech", "Finance", "Media"]
        );
    }

    #[test]
    fn test_empty_deck_has_no_candidate() {
        let mut state = approved_state();
        for id in ["a", "b", "c"] {
            state.disliked_ids.insert(id.to_string());
        }
        assert!(current_candidate(&state).is_none());
    }
}
