//! Profile domain module.

mod editing;
mod model;

pub use editing::{add_photo, add_tag, remove_photo, remove_tag, set_privacy, update_profile};
pub use model::{PrivacySettings, Profile, ProfileUpdate};
