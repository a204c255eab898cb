use std::fmt;
use std::str::FromStr;

use crate::domain::Domain;
use crate::error::ModelError;

/// Numeric genre / category identifier as used by the discovery API.
///
/// Film genres and show genres share one integer space; which content
/// domain an id belongs to is decided by the catalog, not by the id itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GenreId(pub u32);

impl GenreId {
    /// Ids at or above this value were historically reserved for show-only
    /// genres. Only used when an id is absent from both curated lists.
    pub const SHOW_RANGE_START: u32 = 10_000;

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Domain implied by the numeric range alone.
    pub const fn range_domain(self) -> Domain {
        if self.0 < Self::SHOW_RANGE_START {
            Domain::Film
        } else {
            Domain::Show
        }
    }
}

impl From<u32> for GenreId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenreId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(GenreId)
            .map_err(|_| ModelError::InvalidGenreId(s.to_string()))
    }
}

/// Identity of a media item for deduplication: the same numeric id may
/// exist once per domain.
pub type MediaKey = (u64, Domain);
