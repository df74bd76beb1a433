//! Candidate deck: eligibility and filtering.

mod engine;
mod filter;

pub use engine::{
    available_profiles, clear_filters, current_candidate, explore_profiles, filter_options,
    set_filter,
};
pub use filter::{ALL, AxisFilter, FilterAxis, Filters};
