// ── Core identity types ──
//
// PersonId and MacAddress anchor every per-person view. The portal
// issues opaque string identifiers; we keep them opaque but typed so a
// person id can never be confused with a MAC or a display name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PersonId ────────────────────────────────────────────────────────

/// Stable identifier the portal assigns to a person.
///
/// Opaque to this system. Two snapshots referring to the same person use
/// the same id; everything else about the person may change between polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl FromStr for PersonId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address of a person's phone, exactly as the provider sent it.
///
/// Kept verbatim. The portal is the source of truth for formatting, and
/// consumers compare against the provider's own strings, so no case or
/// separator rewriting happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
