//! Title details and reviews.
//!
//! Unlike browse aggregation these lookups are single requests, so failures
//! are returned to the caller instead of degrading to empty values.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use marquee_model::{Category, Domain, MediaSummary};

use crate::genres::GenreResolver;
use crate::provider::{DiscoveryClient, ProviderError, RawDetails, RawReview, RawVideo};

const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub key: String,
    pub site: Option<String>,
    pub kind: Option<String>,
}

impl Trailer {
    /// First YouTube trailer, else the first video with a key.
    fn pick(videos: &[RawVideo]) -> Option<Self> {
        let is_youtube_trailer = |v: &&RawVideo| {
            v.kind.as_deref() == Some("Trailer") && v.site.as_deref() == Some("YouTube")
        };
        let video = videos
            .iter()
            .find(is_youtube_trailer)
            .or_else(|| videos.first())?;

        Some(Self {
            key: video.key.clone().filter(|k| !k.is_empty())?,
            site: video.site.clone(),
            kind: video.kind.clone(),
        })
    }

    pub fn watch_url(&self) -> Option<String> {
        match self.site.as_deref() {
            Some("YouTube") | None => Some(format!("{YOUTUBE_WATCH_BASE}{}", self.key)),
            Some(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetails {
    pub domain: Domain,
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub vote_average: Option<f32>,
    pub release_year: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub genres: Vec<Category>,
    pub trailer: Option<Trailer>,
}

impl MediaDetails {
    pub fn from_raw(domain: Domain, raw: RawDetails, resolver: &GenreResolver) -> Self {
        let (title, date, runtime) = match domain {
            Domain::Film => (raw.title.or(raw.name), raw.release_date, raw.runtime),
            Domain::Show => (
                raw.name.or(raw.title),
                raw.first_air_date,
                raw.episode_run_time.first().copied(),
            ),
        };

        let genres = raw
            .genres
            .into_iter()
            .map(|genre| {
                let name = if genre.name.is_empty() {
                    resolver.resolve_name(genre.id.into()).to_string()
                } else {
                    genre.name
                };
                Category::new(genre.id, name)
            })
            .collect();

        let trailer = raw
            .videos
            .as_ref()
            .and_then(|videos| Trailer::pick(&videos.results));

        Self {
            domain,
            id: raw.id,
            title: title.unwrap_or_else(|| "Unknown".to_string()),
            overview: raw.overview.filter(|o| !o.trim().is_empty()),
            vote_average: raw.vote_average,
            release_year: date.as_deref().and_then(MediaSummary::year_from_date),
            runtime_minutes: runtime.filter(|m| *m > 0),
            adult: raw.adult,
            backdrop_path: raw.backdrop_path,
            poster_path: raw.poster_path,
            genres,
            trailer,
        }
    }

    pub fn overview_text(&self) -> &str {
        self.overview
            .as_deref()
            .unwrap_or("No description available.")
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.vote_average.unwrap_or(0.0))
    }

    pub fn year_label(&self) -> &str {
        self.release_year.as_deref().unwrap_or("N/A")
    }

    /// "2 h 5 min", or "N/A" without a runtime.
    pub fn runtime_label(&self) -> String {
        match self.runtime_minutes {
            Some(minutes) => format!("{} h {} min", minutes / 60, minutes % 60),
            None => "N/A".to_string(),
        }
    }

    pub fn age_label(&self) -> &'static str {
        if self.adult { "18+" } else { "13+" }
    }

    pub fn primary_genre(&self) -> Option<&Category> {
        self.genres.first()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub author: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub rating: Option<f32>,
    pub avatar_path: Option<String>,
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        let created_at = raw.created_at.as_deref().and_then(|ts| {
            DateTime::parse_from_rfc3339(ts)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        });
        let (avatar_path, rating) = raw
            .author_details
            .map(|details| (details.avatar_path, details.rating))
            .unwrap_or_default();

        Self {
            author: raw
                .author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            content: raw.content,
            created_at,
            rating,
            avatar_path: avatar_path.filter(|p| !p.is_empty()),
        }
    }
}

impl Review {
    /// Avatar URL. Some avatar paths are absolute URLs with a stray leading
    /// slash (`/https://...`); those are returned as-is minus the slash.
    pub fn avatar_url(&self, image_url: impl Fn(&str) -> String) -> Option<String> {
        let path = self.avatar_path.as_deref()?;
        if path.starts_with("/http") {
            Some(path[1..].to_string())
        } else {
            Some(image_url(path))
        }
    }

    /// First `max_chars` characters, with an ellipsis when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    /// "18.03.2024", or an empty string for unparseable timestamps.
    pub fn date_label(&self) -> String {
        self.created_at
            .map(|dt| dt.format("%d.%m.%Y").to_string())
            .unwrap_or_default()
    }
}

/// Details page lookups.
#[derive(Clone)]
pub struct DetailsService {
    client: Arc<dyn DiscoveryClient>,
    resolver: GenreResolver,
}

impl std::fmt::Debug for DetailsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailsService")
            .field("client", &self.client.name())
            .finish_non_exhaustive()
    }
}

impl DetailsService {
    pub fn new(client: Arc<dyn DiscoveryClient>, resolver: GenreResolver) -> Self {
        Self { client, resolver }
    }

    pub async fn details(&self, domain: Domain, id: u64) -> Result<MediaDetails, ProviderError> {
        let raw = self.client.details(domain, id).await.inspect_err(|e| {
            tracing::warn!("Failed to fetch {} {} details: {}", domain, id, e);
        })?;
        Ok(MediaDetails::from_raw(domain, raw, &self.resolver))
    }

    pub async fn reviews(&self, domain: Domain, id: u64) -> Result<Vec<Review>, ProviderError> {
        let raw = self.client.reviews(domain, id).await.inspect_err(|e| {
            tracing::warn!("Failed to fetch {} {} reviews: {}", domain, id, e);
        })?;
        Ok(raw.into_iter().map(Review::from).collect())
    }
}
