//! Domain core of the Nexa matching engine.
//!
//! Everything in here is pure: models, the candidate / matching / messaging
//! engines and the state transforms. Storage and the runtime live in
//! `nexa-infrastructure` and `nexa-application`.

pub mod config;
pub mod deck;
pub mod error;
pub mod matching;
pub mod messaging;
pub mod profile;
pub mod state;

// Re-export common error type
pub use error::NexaError;
pub use state::AppState;
