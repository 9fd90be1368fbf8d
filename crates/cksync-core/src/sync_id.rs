use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Length of a sync identifier, in bytes.
pub const SYNC_ID_LEN: usize = 8;

/// Opaque identifier of one stored checklist document.
///
/// Identifiers are generated by clients. The only structural rule is the
/// length: exactly [`SYNC_ID_LEN`] bytes of UTF-8. The same namespace is used
/// for short codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SyncId(String);

impl SyncId {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != SYNC_ID_LEN {
            return Err(CoreError::InvalidSyncId {
                expected: SYNC_ID_LEN,
                actual: raw.len(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for SyncId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for SyncId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SyncId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
