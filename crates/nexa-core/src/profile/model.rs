//! Profile domain model.
//!
//! A profile is both the signed-in user (`me`) and every entry of the
//! candidate pool.

use serde::{Deserialize, Serialize};

use crate::error::{NexaError, Result};

/// Visibility switches a user controls on their own profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    /// Profile is listed publicly.
    pub public: bool,
    /// Profile is shown to people filtering by the same city.
    pub visible_by_city: bool,
    /// Profile is shown to people filtering by the same sector.
    pub visible_by_sector: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            public: true,
            visible_by_city: true,
            visible_by_sector: true,
        }
    }
}

/// A browsable person.
///
/// `id` is globally unique and never changes once the profile exists.
/// `photos` must hold at least one image reference for the profile to be
/// displayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub headline: String,
    pub city: String,
    pub sector: String,
    pub bio: String,
    /// Ordered set of short labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered image references; the first one is the cover photo.
    pub photos: Vec<String>,
    #[serde(default)]
    pub privacy: Option<PrivacySettings>,
}

impl Profile {
    /// Returns the cover photo, if the profile has any.
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Privacy settings with the all-visible fallback applied.
    pub fn effective_privacy(&self) -> PrivacySettings {
        self.privacy.unwrap_or_default()
    }

    /// Checks the display invariants of a profile.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(NexaError::validation("profile id must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(NexaError::validation("profile name must not be empty"));
        }
        if self.photos.is_empty() {
            return Err(NexaError::validation(format!(
                "profile '{}' needs at least one photo",
                self.id
            )));
        }
        Ok(())
    }
}

/// The editable part of the signed-in user's profile.
///
/// Applying an update never touches `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub headline: String,
    pub city: String,
    pub sector: String,
    pub bio: String,
    pub tags: Vec<String>,
    pub photos: Vec<String>,
    pub privacy: PrivacySettings,
}

impl ProfileUpdate {
    /// Starts an update pre-filled with the profile's current values.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            headline: profile.headline.clone(),
            city: profile.city.clone(),
            sector: profile.sector.clone(),
            bio: profile.bio.clone(),
            tags: profile.tags.clone(),
            photos: profile.photos.clone(),
            privacy: profile.effective_privacy(),
        }
    }

    /// Produces the updated profile, keeping the identity of `profile`.
    pub fn apply_to(self, profile: &Profile) -> Result<Profile> {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim().to_string();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let updated = Profile {
            id: profile.id.clone(),
            name: self.name.trim().to_string(),
            headline: self.headline.trim().to_string(),
            city: self.city.trim().to_string(),
            sector: self.sector.trim().to_string(),
            bio: self.bio,
            tags,
            photos: self
                .photos
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            privacy: Some(self.privacy),
        };
        updated.validate()?;
        Ok(updated)
    }
}
