use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::grammar;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),
}

/// A `major.minor.patch` version. Ordering is lexicographic over the three
/// components; pre-release and build metadata are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The same version with the patch component raised by one, or `None` on
    /// overflow. Major and minor never roll over.
    pub fn next_patch(&self) -> Option<SemVer> {
        self.patch
            .checked_add(1)
            .map(|patch| SemVer::new(self.major, self.minor, patch))
    }

    /// First version of the next major series (`2.0.0` for `1.4.2`)
    pub fn next_major(&self) -> Option<SemVer> {
        self.major.checked_add(1).map(|major| SemVer::new(major, 0, 0))
    }
}

impl FromStr for SemVer {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        grammar::version()
            .exhaustive()
            .run(s.trim())
            .result
            .ok_or_else(|| VersionError::InvalidVersion(s.to_string()))
    }
}

impl TryFrom<String> for SemVer {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SemVer> for String {
    fn from(version: SemVer) -> Self {
        version.to_string()
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
