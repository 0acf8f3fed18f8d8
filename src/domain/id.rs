//! Topic identifiers, sentinel keys and identifier sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SheetError, SheetResult};

/// Content identifier of a real topic.
///
/// Always exactly [`TopicId::LEN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(String);

impl TopicId {
    pub const LEN: usize = 26;

    pub fn parse(raw: impl Into<String>) -> SheetResult<Self> {
        let raw = raw.into();
        let actual = raw.chars().count();
        if actual != Self::LEN {
            return Err(SheetError::InvalidTopicId {
                id: raw,
                expected: Self::LEN,
                actual,
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TopicId {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TopicId {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TopicId> for String {
    fn from(id: TopicId) -> Self {
        id.0
    }
}

/// Address of an entry in a sheet's resource index.
///
/// The sentinel variants live in their own namespace, so they can never be
/// confused with a content identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TopicKey {
    /// The document root (the sheet itself).
    Root,
    /// The central topic.
    #[default]
    Center,
    /// Whatever topic was focused last.
    Last,
    Content(TopicId),
}

impl TopicKey {
    pub fn content_id(&self) -> Option<&TopicId> {
        match self {
            TopicKey::Content(id) => Some(id),
            _ => None,
        }
    }
}

impl From<TopicId> for TopicKey {
    fn from(id: TopicId) -> Self {
        TopicKey::Content(id)
    }
}

impl From<&TopicId> for TopicKey {
    fn from(id: &TopicId) -> Self {
        TopicKey::Content(id.clone())
    }
}

/// Supplies fresh content identifiers for one sheet.
pub trait IdSource {
    /// Returns an identifier of length [`TopicId::LEN`], unique for the
    /// lifetime of the sheet.
    ///
    /// A sheet redraws a bounded number of times when an id is already
    /// registered, then switches to [`UuidIdSource`].
    fn next_id(&mut self) -> TopicId;
}

/// Random identifiers derived from a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> TopicId {
        let mut raw = Uuid::new_v4().simple().to_string();
        raw.truncate(TopicId::LEN);
        TopicId(raw)
    }
}

/// Deterministic, zero-padded hexadecimal identifiers: `00..01`, `00..02`, ...
///
/// The counter wraps around after `u64::MAX`.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdSource {
    next: u64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> TopicId {
        self.next = self.next.wrapping_add(1);
        TopicId(format!("{:0width$x}", self.next, width = TopicId::LEN))
    }
}
