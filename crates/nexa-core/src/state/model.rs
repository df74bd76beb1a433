//! Application state domain models.
//!
//! `AppState` is the aggregate root: the single source of truth and the single
//! unit of persistence.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::deck::Filters;
use crate::matching::Match;
use crate::messaging::Message;
use crate::profile::Profile;

use super::seed;

/// Approval status of the signed-in user's application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        };
        f.write_str(label)
    }
}

/// Authentication snapshot delivered by the sign-in provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_signed_in: bool,
    /// Provider name, e.g. "email" or "linkedin".
    #[serde(default)]
    pub provider: Option<String>,
    /// Provider-side identity (email address, subject id, ...).
    #[serde(default)]
    pub identity: Option<String>,
}

/// Boundary event produced by the external authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInEvent {
    pub is_signed_in: bool,
    pub provider: String,
    pub identity: String,
}

/// Application state that persists across restarts.
///
/// # Fields
///
/// * `me` - The signed-in user's own profile.
/// * `user_status` - Browsing is only possible once this is `Approved`.
/// * `demo_mode` - Simulates the other side's like locally.
/// * `liked_ids` / `disliked_ids` - Decided profile ids, mutually exclusive.
/// * `messages` - Message ledger keyed by match id.
/// * `candidate_pool` - Every browsable profile, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub me: Profile,
    #[serde(default)]
    pub auth: AuthState,
    #[serde(default)]
    pub user_status: UserStatus,
    #[serde(default)]
    pub demo_mode: bool,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub liked_ids: BTreeSet<String>,
    #[serde(default)]
    pub disliked_ids: BTreeSet<String>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub selected_match_id: Option<String>,
    #[serde(default)]
    pub messages: BTreeMap<String, Vec<Message>>,
    #[serde(default, rename = "mockProfiles")]
    pub candidate_pool: Vec<Profile>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            me: seed::demo_self_profile(),
            auth: AuthState::default(),
            user_status: UserStatus::Pending,
            demo_mode: true,
            filters: Filters::default(),
            liked_ids: BTreeSet::new(),
            disliked_ids: BTreeSet::new(),
            matches: Vec::new(),
            selected_match_id: None,
            messages: BTreeMap::new(),
            candidate_pool: seed::demo_candidate_pool(),
        }
    }
}

impl AppState {
    pub fn is_approved(&self) -> bool {
        self.user_status == UserStatus::Approved
    }

    /// True when the profile has already been liked or passed.
    pub fn has_decided(&self, profile_id: &str) -> bool {
        self.liked_ids.contains(profile_id) || self.disliked_ids.contains(profile_id)
    }

    pub fn find_profile(&self, profile_id: &str) -> Option<&Profile> {
        self.candidate_pool.iter().find(|p| p.id == profile_id)
    }

    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn selected_match(&self) -> Option<&Match> {
        self.selected_match_id
            .as_deref()
            .and_then(|id| self.find_match(id))
    }
}
