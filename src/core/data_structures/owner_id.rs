/*!
 * Owner Identifier
 * Bounded, validated id of the process that owns an allocated block
 */

use crate::core::limits::OWNER_ID_MAX_LEN;
use crate::memory::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Owner id of an allocated block (1 to `OWNER_ID_MAX_LEN` characters, no whitespace)
///
/// ASCII ids always fit the inline representation of `SmartString`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(transparent)]
pub struct OwnerId {
    inner: SmartString,
}

impl OwnerId {
    /// Validate and wrap an owner id
    ///
    /// Over-long ids are rejected rather than truncated.
    pub fn new(id: &str) -> MemoryResult<Self> {
        let invalid = |reason: &str| MemoryError::InvalidOwner {
            owner: id.to_string(),
            reason: reason.to_string(),
        };

        if id.is_empty() {
            return Err(invalid("owner id must not be empty"));
        }
        if id.chars().count() > OWNER_ID_MAX_LEN {
            return Err(invalid(&format!(
                "owner id longer than {} characters",
                OWNER_ID_MAX_LEN
            )));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(invalid("owner id must not contain whitespace"));
        }

        Ok(Self {
            inner: SmartString::from(id),
        })
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

impl TryFrom<&str> for OwnerId {
    type Error = MemoryError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<String> for OwnerId {
    type Error = MemoryError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(&id)
    }
}

impl std::str::FromStr for OwnerId {
    type Err = MemoryError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::new(id)
    }
}

impl From<OwnerId> for String {
    #[inline]
    fn from(id: OwnerId) -> Self {
        id.inner.into()
    }
}

impl AsRef<str> for OwnerId {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for OwnerId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for OwnerId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
