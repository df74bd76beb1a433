//! Match domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of connection two matched people are looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    Professional,
    Social,
    Personal,
}

impl ConnectionType {
    /// Every connection type, in the order random picks index into.
    pub const ALL: [ConnectionType; 3] = [
        ConnectionType::Professional,
        ConnectionType::Social,
        ConnectionType::Personal,
    ];
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Professional => "Professional",
            Self::Social => "Social",
            Self::Personal => "Personal",
        };
        f.write_str(label)
    }
}

/// A terminal user action on a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Pass,
    Like,
    Superlike,
}

impl Decision {
    pub fn is_positive(self) -> bool {
        !matches!(self, Self::Pass)
    }
}

/// A confirmed mutual pairing.
///
/// `a_id`/`b_id` are stored sorted, so the record looks the same whichever
/// side initiated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub a_id: String,
    pub b_id: String,
    pub connection_type: ConnectionType,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// The participant that is not `self_id`.
    ///
    /// Falls back to `a_id` when `self_id` is not part of the match.
    pub fn other_participant(&self, self_id: &str) -> &str {
        if self.a_id == self_id {
            &self.b_id
        } else {
            &self.a_id
        }
    }
}

/// Sorts an unordered participant pair.
pub fn ordered_pair<'a>(first: &'a str, second: &'a str) -> (&'a str, &'a str) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}

/// Derives the match identity of an unordered pair.
///
/// `match_id("a", "b") == match_id("b", "a")`.
pub fn match_id(first: &str, second: &str) -> String {
    let (lo, hi) = ordered_pair(first, second);
    format!("m-{lo}-{hi}")
}
