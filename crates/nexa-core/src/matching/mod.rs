//! Matching domain module.
//!
//! # Module Structure
//!
//! - `model`: `Match`, `ConnectionType`, `Decision` and match identity
//! - `engine`: decision recording and match formation
//! - `random`: injectable random source for demo-mode simulation

mod engine;
mod model;
mod random;

pub use engine::{
    MatchOdds, form_match, match_with, matched_profile, pick_connection_type, record_decision,
};
pub use model::{ConnectionType, Decision, Match, match_id, ordered_pair};
pub use random::{RandomSource, RngSource, ScriptedRandom};
