//! Account use case: sign-in events and approval status.

use std::sync::Arc;

use nexa_core::state::{self, AppState, AuthState, SignInEvent, UserStatus};

use crate::store::StateStore;

pub struct AccountUseCase {
    store: Arc<StateStore>,
    approve_on_sign_in: bool,
}

impl AccountUseCase {
    pub fn new(store: Arc<StateStore>, approve_on_sign_in: bool) -> Self {
        Self {
            store,
            approve_on_sign_in,
        }
    }

    /// Consumes the authentication collaborator's result.
    pub fn on_sign_in(&self, event: &SignInEvent) -> AppState {
        tracing::info!(
            "[AccountUseCase] Sign-in event: signed_in={}, provider={}",
            event.is_signed_in,
            event.provider
        );
        let approve = self.approve_on_sign_in;
        self.store
            .update(|current| state::sign_in(current, event, approve))
    }

    pub fn sign_out(&self) -> AppState {
        self.store.update(state::sign_out)
    }

    pub fn set_status(&self, status: UserStatus) -> AppState {
        self.store
            .update(|current| state::set_user_status(current, status))
    }

    pub fn auth(&self) -> AuthState {
        self.store.read(|current| current.auth.clone())
    }

    pub fn status(&self) -> UserStatus {
        self.store.read(|current| current.user_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::store_with;

    fn event(signed_in: bool) -> SignInEvent {
        SignInEvent {
            is_signed_in: signed_in,
            provider: "email".to_string(),
            identity: "emir@example.com".to_string(),
        }
    }

    fn account(approve_on_sign_in: bool) -> AccountUseCase {
        let (_, store) = store_with(AppState::default());
        AccountUseCase::new(Arc::new(store), approve_on_sign_in)
    }

    #[test]
    fn test_sign_in_approves_pending_user() {
        let account = account(true);
        account.on_sign_in(&event(true));

        assert_eq!(account.status(), UserStatus::Approved);
        assert_eq!(account.auth().identity.as_deref(), Some("emir@example.com"));
    }

    #[test]
    fn test_sign_in_without_auto_approval() {
        let account = account(false);
        account.on_sign_in(&event(true));

        assert!(account.auth().is_signed_in);
        assert_eq!(account.status(), UserStatus::Pending);
    }

    #[test]
    fn test_denied_stays_denied_and_sign_out_resets() {
        let account = account(true);
        account.set_status(UserStatus::Denied);
        account.on_sign_in(&event(true));
        assert_eq!(account.status(), UserStatus::Denied);

        account.sign_out();
        assert!(!account.auth().is_signed_in);
        assert_eq!(account.status(), UserStatus::Pending);
    }

    #[test]
    fn test_failed_sign_in_signs_out() {
        let account = account(true);
        account.on_sign_in(&event(true));
        account.on_sign_in(&event(false));

        assert_eq!(account.auth(), AuthState::default());
        assert_eq!(account.status(), UserStatus::Pending);
    }
}
