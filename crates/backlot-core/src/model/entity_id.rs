// ── Core identity type ──
//
// EntityId is the foundation of every catalog record. The API hands out
// numeric ids for SQL-backed resources and slug strings in a few legacy
// payloads; consumers never care which.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Canonical identifier for any Backlot catalog record.
///
/// Equality and hashing are defined on the canonical string rendering,
/// so `EntityId::from(5)` and `EntityId::from("5")` compare equal. This
/// matters because user input (CLI args, query strings) always arrives
/// as text while the wire format uses numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(i64),
    Str(String),
}

impl EntityId {
    pub fn as_num(&self) -> Option<i64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Num(_) => None,
        }
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Num(n), Self::Str(s)) | (Self::Str(s), Self::Num(n)) => {
                *s == n.to_string()
            }
        }
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with PartialEq: both variants hash their canonical
        // string rendering.
        match self {
            Self::Num(n) => n.to_string().hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::Str(s.to_owned()))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}
