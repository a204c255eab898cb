use std::fmt;
use std::str::FromStr;

use crate::domain::Domain;
use crate::error::ModelError;
use crate::ids::GenreId;

/// Curated list endpoints offered for each domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PresetList {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
}

impl PresetList {
    pub const ALL: [PresetList; 4] = [
        PresetList::NowPlaying,
        PresetList::Popular,
        PresetList::TopRated,
        PresetList::Upcoming,
    ];

    pub fn selector(&self) -> &'static str {
        match self {
            PresetList::NowPlaying => "now_playing",
            PresetList::Popular => "popular",
            PresetList::TopRated => "top_rated",
            PresetList::Upcoming => "upcoming",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PresetList::NowPlaying => "Now Playing",
            PresetList::Popular => "Popular",
            PresetList::TopRated => "Top Rated",
            PresetList::Upcoming => "Upcoming",
        }
    }
}

/// A named list scoped to exactly one domain, e.g. "popular films".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preset {
    pub list: PresetList,
    pub domain: Domain,
}

impl Preset {
    pub const fn new(list: PresetList, domain: Domain) -> Self {
        Self { list, domain }
    }

    /// Selector as it appears in page links (`popular_movies`, `upcoming_shows`).
    pub fn selector(&self) -> String {
        let suffix = match self.domain {
            Domain::Film => "movies",
            Domain::Show => "shows",
        };
        format!("{}_{}", self.list.selector(), suffix)
    }

    pub fn title(&self) -> String {
        let noun = match self.domain {
            Domain::Film => "Movies",
            Domain::Show => "TV Shows",
        };
        format!("{} {}", self.list.label(), noun)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}

impl FromStr for Preset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (list, domain) = if let Some(list) = raw.strip_suffix("_movies") {
            (list, Domain::Film)
        } else if let Some(list) = raw.strip_suffix("_shows") {
            (list, Domain::Show)
        } else {
            return Err(ModelError::UnknownPreset(s.to_string()));
        };

        PresetList::ALL
            .into_iter()
            .find(|candidate| candidate.selector() == list)
            .map(|list| Preset::new(list, domain))
            .ok_or_else(|| ModelError::UnknownPreset(s.to_string()))
    }
}

/// What a browse action is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BrowseTarget {
    /// Free-text search across both domains
    Keywords(String),
    /// Canonical or extra category
    Genre(GenreId),
    /// Named single-domain list
    Preset(Preset),
}

/// A browse target plus the 1-based page being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrowseQuery {
    pub target: BrowseTarget,
    pub page: u32,
}

impl BrowseQuery {
    pub fn new(target: BrowseTarget, page: u32) -> Self {
        Self {
            target,
            page: page.max(1),
        }
    }

    pub fn keywords(text: impl Into<String>) -> Self {
        Self::new(BrowseTarget::Keywords(text.into()), 1)
    }

    pub fn genre(id: GenreId) -> Self {
        Self::new(BrowseTarget::Genre(id), 1)
    }

    pub fn preset(preset: Preset) -> Self {
        Self::new(BrowseTarget::Preset(preset), 1)
    }

    /// Same target, different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self::new(self.target.clone(), page)
    }

    /// Query keys that select a listing; a link carries exactly one.
    pub const SELECTOR_KEYS: [&'static str; 3] = ["keywords", "genre", "param"];

    /// The link parameter identifying this query's target.
    pub fn selector(&self) -> (&'static str, String) {
        match &self.target {
            BrowseTarget::Keywords(text) => ("keywords", text.clone()),
            BrowseTarget::Genre(id) => ("genre", id.to_string()),
            BrowseTarget::Preset(preset) => ("param", preset.selector()),
        }
    }

    /// Link parameters identifying this query, selector first, `page` last.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![self.selector(), ("page", self.page.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_selectors_round_trip_through_parse() {
        let preset: Preset = "now_playing_shows".parse().unwrap();
        assert_eq!(preset, Preset::new(PresetList::NowPlaying, Domain::Show));
        assert_eq!(preset.selector(), "now_playing_shows");
        assert_eq!(preset.title(), "Now Playing TV Shows");
    }

    #[test]
    fn unknown_presets_are_rejected() {
        assert!("trending_movies".parse::<Preset>().is_err());
        assert!("popular".parse::<Preset>().is_err());
    }

    #[test]
    fn with_page_keeps_target() {
        let query = BrowseQuery::keywords("alien");
        let next = query.with_page(3);
        assert_eq!(next.target, query.target);
        assert_eq!(next.page, 3);
        assert_eq!(query.with_page(0).page, 1);
    }

    #[test]
    fn query_pairs_put_selector_first() {
        let query = BrowseQuery::genre(GenreId(28)).with_page(2);
        assert_eq!(
            query.query_pairs(),
            vec![("genre", "28".to_string()), ("page", "2".to_string())]
        );
    }
}
