//! Stop identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// An opaque, non-empty transit stop identifier.
///
/// The transit API accepts a single platform id or a comma-separated list
/// of platform ids for stops with several platforms; both forms are passed
/// through untouched apart from surrounding whitespace.
///
/// # Examples
///
/// ```
/// use stop_board::domain::StopId;
///
/// let id = StopId::parse(" 60200624 ").unwrap();
/// assert_eq!(id.as_str(), "60200624");
///
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStopId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The stop the user is currently looking at.
///
/// At most one selection is active per board; it is replaced, never
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSelection {
    pub id: StopId,
    pub name: String,
}

impl StopSelection {
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
