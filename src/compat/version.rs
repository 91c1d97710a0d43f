//! Node.js release version handling
//!
//! Versions are ordered triples compared the same way semver orders release
//! versions. Compatibility data never carries pre-release or build metadata,
//! so the triple is the whole story.

use crate::error::{AutocompatError, Result};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Node.js release version, totally ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl NodeVersion {
    /// Baseline version used for empty groups.
    pub const ZERO: NodeVersion = NodeVersion {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for NodeVersion {
    type Err = AutocompatError;

    /// Parse `"18"`, `"18.2"` or `"18.2.1"`; missing components are zero.
    /// Compatibility corpora record bare majors for old releases.
    fn from_str(value: &str) -> Result<Self> {
        let mut parts = value.trim().splitn(3, '.');

        let component = |part: Option<&str>| -> Result<u32> {
            match part {
                None => Ok(0),
                Some(text) => text
                    .parse::<u32>()
                    .map_err(|_| AutocompatError::version_error(value)),
            }
        };

        let first = parts.next().filter(|s| !s.is_empty());
        if first.is_none() {
            return Err(AutocompatError::version_error(value));
        }

        Ok(Self {
            major: component(first)?,
            minor: component(parts.next())?,
            patch: component(parts.next())?,
        })
    }
}

impl fmt::Display for NodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for NodeVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
