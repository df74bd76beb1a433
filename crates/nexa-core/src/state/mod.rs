//! Application state domain module.
//!
//! # Module Structure
//!
//! - `model`: the `AppState` aggregate and its auth/status parts
//! - `transforms`: resets, sign-in/out, mode switches
//! - `event`: events derived from state transitions
//! - `repository`: persistence trait
//! - `seed`: built-in demo data

mod event;
mod model;
mod repository;
pub mod seed;
mod transforms;

pub use event::StoreEvent;
pub use model::{AppState, AuthState, SignInEvent, UserStatus};
pub use repository::StateRepository;
pub use transforms::{
    reset_deck, reset_matches, seed_demo_data, set_demo_mode, set_user_status, sign_in, sign_out,
};
