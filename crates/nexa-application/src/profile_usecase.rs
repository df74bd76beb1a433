//! Profile use case: editing the signed-in user's own profile.

use std::sync::Arc;

use nexa_core::error::Result;
use nexa_core::profile::{self, PrivacySettings, Profile, ProfileUpdate};

use crate::store::StateStore;

pub struct ProfileUseCase {
    store: Arc<StateStore>,
}

impl ProfileUseCase {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    pub fn me(&self) -> Profile {
        self.store.read(|state| state.me.clone())
    }

    /// Applies `edit` to a form pre-filled with the current profile.
    pub fn edit(&self, edit: impl FnOnce(&mut ProfileUpdate)) -> Result<Profile> {
        let next = self.store.try_update(|state| {
            let mut update = ProfileUpdate::from_profile(&state.me);
            edit(&mut update);
            profile::update_profile(state, update)
        })?;
        Ok(next.me)
    }

    pub fn add_tag(&self, tag: &str) -> Result<Profile> {
        let next = self.store.try_update(|state| profile::add_tag(state, tag))?;
        Ok(next.me)
    }

    pub fn remove_tag(&self, tag: &str) -> Profile {
        self.store.update(|state| profile::remove_tag(state, tag)).me
    }

    pub fn add_photo(&self, photo: &str) -> Result<Profile> {
        let next = self
            .store
            .try_update(|state| profile::add_photo(state, photo))?;
        Ok(next.me)
    }

    pub fn remove_photo(&self, index: usize) -> Result<Profile> {
        let next = self
            .store
            .try_update(|state| profile::remove_photo(state, index))?;
        Ok(next.me)
    }

    pub fn set_privacy(&self, privacy: PrivacySettings) -> Profile {
        self.store
            .update(|state| profile::set_privacy(state, privacy))
            .me
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::store_with;
    use nexa_core::state::AppState;

    fn profiles() -> ProfileUseCase {
        let (_, store) = store_with(AppState::default());
        ProfileUseCase::new(Arc::new(store))
    }

    #[test]
    fn test_edit_fields() {
        let profiles = profiles();
        let me = profiles
            .edit(|form| {
                form.headline = "  Building things ".to_string();
                form.city = "Ankara".to_string();
            })
            .unwrap();

        assert_eq!(me.headline, "Building things");
        assert_eq!(me.city, "Ankara");
        assert_eq!(profiles.me(), me);
    }

    #[test]
    fn test_invalid_edit_is_rejected() {
        let profiles = profiles();
        let before = profiles.me();

        assert!(profiles.edit(|form| form.name = "  ".to_string()).is_err());
        assert!(profiles.edit(|form| form.photos.clear()).is_err());
        assert_eq!(profiles.me(), before);
    }

    #[test]
    fn test_photos_keep_at_least_one() {
        let profiles = profiles();
        let count = profiles.me().photos.len();

        let me = profiles.add_photo("https://picsum.photos/seed/me3/600/800").unwrap();
        assert_eq!(me.photos.len(), count + 1);

        for _ in 0..count {
            profiles.remove_photo(0).unwrap();
        }
        assert_eq!(profiles.me().photos.len(), 1);
        assert!(profiles.remove_photo(0).is_err());
    }

    #[test]
    fn test_tags_and_privacy() {
        let profiles = profiles();
        profiles.add_tag("Chess").unwrap();
        profiles.add_tag("Chess").unwrap();
        assert_eq!(profiles.me().tags.iter().filter(|t| *t == "Chess").count(), 1);

        assert!(!profiles.remove_tag("Chess").has_tag("Chess"));

        let private = PrivacySettings {
            public: false,
            ..PrivacySettings::default()
        };
        assert_eq!(profiles.set_privacy(private).privacy, Some(private));
    }
}
