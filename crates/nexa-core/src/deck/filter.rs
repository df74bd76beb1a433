//! Browsing filters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NexaError, Result};
use crate::profile::Profile;

/// Sentinel meaning "no filtering on this axis".
pub const ALL: &str = "All";

/// One filter axis: either the `All` sentinel or a concrete value.
///
/// Persisted as a plain string so stored blobs read `"city": "All"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxisFilter {
    #[default]
    All,
    Only(String),
}

impl AxisFilter {
    /// Parses a user-supplied filter value.
    ///
    /// Empty or whitespace-only input is malformed and rejected.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(NexaError::validation("filter value must not be empty"));
        }
        Ok(Self::from(value.to_string()))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// True when `value` passes this axis.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl From<String> for AxisFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }
}

impl From<AxisFilter> for String {
    fn from(filter: AxisFilter) -> Self {
        match filter {
            AxisFilter::All => ALL.to_string(),
            AxisFilter::Only(value) => value,
        }
    }
}

impl fmt::Display for AxisFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => f.write_str(value),
        }
    }
}

/// Which filter axis an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAxis {
    City,
    Sector,
}

/// Current city/sector selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub city: AxisFilter,
    #[serde(default)]
    pub sector: AxisFilter,
}

impl Filters {
    /// True when the profile passes both axes.
    pub fn admits(&self, profile: &Profile) -> bool {
        self.city.admits(&profile.city) && self.sector.admits(&profile.sector)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.city.is_all() && self.sector.is_all()
    }

    pub fn with(mut self, axis: FilterAxis, value: AxisFilter) -> Self {
        match axis {
            FilterAxis::City => self.city = value,
            FilterAxis::Sector => self.sector = value,
        }
        self
    }
}
