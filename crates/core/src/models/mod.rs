//! Legislative act records as published by the Sejm ELI registry.
//!
//! Field names on the wire are fixed by the upstream API, so every struct here
//! (de)serializes with the registry's own keys (`ELI`, `promulgation`, `pos`...).

mod details;

pub use details::{ActDetails, Reference, References, Text, TextKind};

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// Publisher code of the Journal of Laws (Dziennik Ustaw).
pub const PUBLISHER: &str = "DU";

static ACT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^DU/(\d{4})/(\d+)$").unwrap());

/// Summary of a legislative act as listed for a year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Act {
    #[serde(rename = "ELI", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(rename = "promulgation", deserialize_with = "nullable")]
    pub published: String,
    #[serde(rename = "pos", deserialize_with = "nullable")]
    pub position: u32,
    #[serde(deserialize_with = "nullable")]
    pub year: i32,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Canonical act identifier, `DU/<year>/<position>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActId {
    year: i32,
    position: u32,
}

impl ActId {
    pub fn new(year: i32, position: u32) -> Self {
        Self { year, position }
    }

    /// Build an identifier from the raw year and position path parts.
    pub fn from_parts(year: &str, position: &str) -> Result<Self, Error> {
        format!("{PUBLISHER}/{}/{}", year.trim(), position.trim()).parse()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn position(&self) -> u32 {
        self.position
    }
}

impl FromStr for ActId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidInput(format!("invalid act identifier: {s}"));
        let caps = ACT_ID.captures(s).ok_or_else(invalid)?;
        let year = caps[1].parse().map_err(|_| invalid())?;
        let position: u32 = caps[2].parse().map_err(|_| invalid())?;
        if position == 0 {
            return Err(invalid());
        }
        Ok(Self { year, position })
    }
}

impl fmt::Display for ActId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PUBLISHER}/{}/{}", self.year, self.position)
    }
}
