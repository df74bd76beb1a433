//! Application layer for Nexa.
//!
//! Coordinates the domain transforms of `nexa-core` with the persistence of
//! `nexa-infrastructure`. Every use case mutates state through the shared
//! [`StateStore`].

pub mod account_usecase;
pub mod app;
pub mod messaging_usecase;
pub mod profile_usecase;
pub mod settings_usecase;
pub mod store;
pub mod swipe_usecase;

pub use account_usecase::AccountUseCase;
pub use app::NexaApp;
pub use messaging_usecase::{ConversationSummary, MessagingUseCase};
pub use profile_usecase::ProfileUseCase;
pub use settings_usecase::SettingsUseCase;
pub use store::StateStore;
pub use swipe_usecase::{DecisionOutcome, SharedRandom, SwipeUseCase};
