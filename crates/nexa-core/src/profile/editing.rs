//! Transforms editing the signed-in user's own profile.

use crate::error::{NexaError, Result};
use crate::state::AppState;

use super::model::{PrivacySettings, Profile, ProfileUpdate};

fn with_me(state: &AppState, edit: impl FnOnce(&mut Profile)) -> AppState {
    let mut next = state.clone();
    edit(&mut next.me);
    next
}

/// Replaces the editable fields of `me`.
pub fn update_profile(state: &AppState, update: ProfileUpdate) -> Result<AppState> {
    let me = update.apply_to(&state.me)?;
    Ok(AppState {
        me,
        ..state.clone()
    })
}

/// Adds a tag; an already present tag leaves the profile unchanged.
pub fn add_tag(state: &AppState, tag: &str) -> Result<AppState> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(NexaError::validation("tag must not be empty"));
    }
    if state.me.has_tag(tag) {
        return Ok(state.clone());
    }
    Ok(with_me(state, |me| me.tags.push(tag.to_string())))
}

pub fn remove_tag(state: &AppState, tag: &str) -> AppState {
    with_me(state, |me| me.tags.retain(|t| t != tag.trim()))
}

/// Appends a photo reference; one already on the profile is ignored.
pub fn add_photo(state: &AppState, photo: &str) -> Result<AppState> {
    let photo = photo.trim();
    if photo.is_empty() {
        return Err(NexaError::validation("photo reference must not be empty"));
    }
    if state.me.photos.iter().any(|p| p == photo) {
        return Ok(state.clone());
    }
    Ok(with_me(state, |me| me.photos.push(photo.to_string())))
}

/// Removes the photo at `index`. The last remaining photo cannot be removed.
pub fn remove_photo(state: &AppState, index: usize) -> Result<AppState> {
    if index >= state.me.photos.len() {
        return Err(NexaError::validation(format!(
            "no photo at position {index}"
        )));
    }
    if state.me.photos.len() == 1 {
        return Err(NexaError::validation("a profile needs at least one photo"));
    }
    Ok(with_me(state, |me| {
        me.photos.remove(index);
    }))
}

pub fn set_privacy(state: &AppState, privacy: PrivacySettings) -> AppState {
    with_me(state, |me| me.privacy = Some(privacy))
}
