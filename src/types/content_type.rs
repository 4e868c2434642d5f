//! Content classification flags
//!
//! Every feed item carries exactly one [`ContentType`]. Filters and cache keys
//! use a [`ContentTypes`] bitset so that two sets with the same members produce
//! the same signature regardless of the order they were built in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Content classification of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Sfw,
    Nsfw,
    Nsfl,
    Nsfp,
}

impl ContentType {
    /// All content types, in flag order
    pub const ALL: [ContentType; 4] = [Self::Sfw, Self::Nsfw, Self::Nsfl, Self::Nsfp];

    /// Bit flag used by the remote API
    #[must_use]
    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            Self::Sfw => 1,
            Self::Nsfw => 2,
            Self::Nsfl => 4,
            Self::Nsfp => 8,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sfw => "sfw",
            Self::Nsfw => "nsfw",
            Self::Nsfl => "nsfl",
            Self::Nsfp => "nsfp",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownContentType(needle.to_string()))
    }
}

/// Order-independent set of content types (bitset over [`ContentType::flag`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTypes(u8);

impl ContentTypes {
    /// Only safe-for-work content
    pub const SFW: Self = Self(1);

    /// Create an empty set
    #[must_use]
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Combine content types into a single signature
    ///
    /// The result only depends on which types are present, never on order
    /// or repetition.
    pub fn combine<I>(types: I) -> Self
    where
        I: IntoIterator<Item = ContentType>,
    {
        Self(types.into_iter().fold(0, |acc, ct| acc | ct.flag()))
    }

    /// Add a content type to the set
    #[inline]
    pub fn insert(&mut self, content_type: ContentType) -> &mut Self {
        self.0 |= content_type.flag();
        self
    }

    #[must_use]
    #[inline]
    pub const fn contains(&self, content_type: ContentType) -> bool {
        self.0 & content_type.flag() != 0
    }

    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw bitmask (what the remote API calls "flags")
    #[must_use]
    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Iterate over the members in flag order
    pub fn iter(&self) -> impl Iterator<Item = ContentType> + '_ {
        ContentType::ALL
            .into_iter()
            .filter(move |ct| self.contains(*ct))
    }
}

impl FromIterator<ContentType> for ContentTypes {
    fn from_iter<T: IntoIterator<Item = ContentType>>(iter: T) -> Self {
        Self::combine(iter)
    }
}

impl fmt::Display for ContentTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ContentType::as_str).collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for ContentTypes {
    type Err = ValidationError;

    /// Parse a comma separated list like `"sfw,nsfw"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let types = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(ContentType::from_str)
            .collect::<Result<ContentTypes, _>>()?;

        if types.is_empty() {
            return Err(ValidationError::EmptyContentTypes);
        }
        Ok(types)
    }
}
