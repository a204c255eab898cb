use crate::domain::Domain;
use crate::ids::{GenreId, MediaKey};

/// Fields shared by films and shows in a discovery listing.
///
/// Titles and release years are already unified at ingestion: shows report
/// `name`/`first_air_date` on the wire, films `title`/`release_date`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSummary {
    pub id: u64,
    pub popularity: f64,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub title: String,
    pub release_year: Option<String>,
    pub genre_ids: Vec<GenreId>,
    pub vote_average: Option<f32>,
}

impl MediaSummary {
    /// Year component of an ISO date (`"2019-05-02"` -> `"2019"`).
    pub fn year_from_date(date: &str) -> Option<String> {
        let year = date.get(..4)?;
        year.chars()
            .all(|c| c.is_ascii_digit())
            .then(|| year.to_string())
    }
}

/// A discovery result, tagged with its content domain once at ingestion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "media_type", rename_all = "lowercase"))]
pub enum MediaItem {
    Film(MediaSummary),
    Show(MediaSummary),
}

impl MediaItem {
    pub fn new(domain: Domain, summary: MediaSummary) -> Self {
        match domain {
            Domain::Film => MediaItem::Film(summary),
            Domain::Show => MediaItem::Show(summary),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            MediaItem::Film(_) => Domain::Film,
            MediaItem::Show(_) => Domain::Show,
        }
    }

    pub fn summary(&self) -> &MediaSummary {
        match self {
            MediaItem::Film(s) | MediaItem::Show(s) => s,
        }
    }

    pub fn into_summary(self) -> MediaSummary {
        match self {
            MediaItem::Film(s) | MediaItem::Show(s) => s,
        }
    }

    pub fn id(&self) -> u64 {
        self.summary().id
    }

    /// Deduplication identity.
    pub fn key(&self) -> MediaKey {
        (self.id(), self.domain())
    }

    pub fn popularity(&self) -> f64 {
        self.summary().popularity
    }

    pub fn title(&self) -> &str {
        &self.summary().title
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        self.summary().backdrop_path.as_deref()
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.summary().poster_path.as_deref()
    }

    pub fn release_year(&self) -> Option<&str> {
        self.summary().release_year.as_deref()
    }

    pub fn genre_ids(&self) -> &[GenreId] {
        &self.summary().genre_ids
    }

    /// Rating with one decimal, `"0.0"` when unrated.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.summary().vote_average.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_from_date_takes_leading_digits() {
        assert_eq!(MediaSummary::year_from_date("2019-05-02").as_deref(), Some("2019"));
        assert_eq!(MediaSummary::year_from_date(""), None);
        assert_eq!(MediaSummary::year_from_date("n/a"), None);
    }

    #[test]
    fn same_id_differs_by_domain() {
        let summary = MediaSummary {
            id: 42,
            ..Default::default()
        };
        let film = MediaItem::new(Domain::Film, summary.clone());
        let show = MediaItem::new(Domain::Show, summary);
        assert_ne!(film.key(), show.key());
        assert_eq!(film.id(), show.id());
    }

    #[test]
    fn rating_label_defaults_to_zero() {
        let mut summary = MediaSummary::default();
        assert_eq!(MediaItem::Film(summary.clone()).rating_label(), "0.0");
        summary.vote_average = Some(7.26);
        assert_eq!(MediaItem::Film(summary).rating_label(), "7.3");
    }
}
