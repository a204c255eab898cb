use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// The two disjoint content domains of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Domain {
    /// Feature films (`movie` on the wire)
    Film,
    /// Episodic shows (`tv` on the wire)
    Show,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Film, Domain::Show];

    /// Path segment and `media_type` value used by the API.
    pub const fn api_segment(self) -> &'static str {
        match self {
            Domain::Film => "movie",
            Domain::Show => "tv",
        }
    }

    /// Short label shown on result cards.
    pub const fn label(self) -> &'static str {
        match self {
            Domain::Film => "Movie",
            Domain::Show => "TV",
        }
    }

    /// Parse a `media_type` tag. Anything other than a film or show
    /// (e.g. `person`) yields `None`.
    pub fn from_media_type(raw: &str) -> Option<Self> {
        match raw {
            "movie" => Some(Domain::Film),
            "tv" => Some(Domain::Show),
            _ => None,
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Film => write!(f, "Film"),
            Domain::Show => write!(f, "Show"),
        }
    }
}

impl FromStr for Domain {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" | "film" | "films" => Ok(Domain::Film),
            "tv" | "show" | "shows" | "series" => Ok(Domain::Show),
            _ => Err(ModelError::UnknownDomain(s.to_string())),
        }
    }
}
