use async_trait::async_trait;
use marquee_model::{Domain, GenreId, MediaItem, MediaSummary, Preset};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// One page of a discovery, search or preset listing.
///
/// A body without `results` is an empty page, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverPage {
    #[serde(default)]
    pub results: Vec<RawMediaResult>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl DiscoverPage {
    /// Convert raw results into tagged items.
    ///
    /// `fallback` tags results that carry no `media_type` (discover and
    /// preset listings). Results tagged as anything other than a film or
    /// show, e.g. people from a multi search, are dropped.
    pub fn into_items(self, fallback: Option<Domain>) -> Vec<MediaItem> {
        self.results
            .into_iter()
            .filter_map(|raw| raw.into_item(fallback))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMediaResult {
    pub id: u64,
    pub media_type: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>, // shows use "name" instead of "title"
    pub release_date: Option<String>,
    pub first_air_date: Option<String>, // shows
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    pub vote_average: Option<f32>,
}

impl RawMediaResult {
    pub fn into_item(self, fallback: Option<Domain>) -> Option<MediaItem> {
        let domain = match self.media_type.as_deref() {
            Some(tag) => Domain::from_media_type(tag)?,
            None => fallback?,
        };

        let date = match domain {
            Domain::Film => self.release_date.as_deref(),
            Domain::Show => self.first_air_date.as_deref(),
        };
        let release_year = date.and_then(MediaSummary::year_from_date);

        let title = self
            .title
            .filter(|t| !t.is_empty())
            .or(self.name)
            .unwrap_or_else(|| "Unknown".to_string());

        Some(MediaItem::new(
            domain,
            MediaSummary {
                id: self.id,
                popularity: self.popularity,
                backdrop_path: self.backdrop_path.filter(|p| !p.is_empty()),
                poster_path: self.poster_path.filter(|p| !p.is_empty()),
                title,
                release_year,
                genre_ids: self.genre_ids.into_iter().map(GenreId).collect(),
                vote_average: self.vote_average,
            },
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGenre {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVideo {
    pub key: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVideos {
    #[serde(default)]
    pub results: Vec<RawVideo>,
}

/// Detail record with `append_to_response=videos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDetails {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub adult: bool,
    pub vote_average: Option<f32>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<RawGenre>,
    pub videos: Option<RawVideos>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAuthorDetails {
    pub avatar_path: Option<String>,
    pub rating: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReview {
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
    pub created_at: Option<String>,
    pub author_details: Option<RawAuthorDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ReviewsPage {
    #[serde(default)]
    pub results: Vec<RawReview>,
}

/// The paginated discovery API the core aggregates over.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    /// Titles of one domain carrying `genre`, most popular first
    async fn discover(
        &self,
        domain: Domain,
        genre: GenreId,
        page: u32,
    ) -> Result<DiscoverPage, ProviderError>;

    /// Keyword search across both domains; results carry `media_type`
    async fn search_multi(&self, query: &str, page: u32) -> Result<DiscoverPage, ProviderError>;

    /// A curated single-domain list
    async fn preset(&self, preset: Preset, page: u32) -> Result<DiscoverPage, ProviderError>;

    async fn details(&self, domain: Domain, id: u64) -> Result<RawDetails, ProviderError>;

    async fn reviews(&self, domain: Domain, id: u64) -> Result<Vec<RawReview>, ProviderError>;

    /// Get the provider name
    fn name(&self) -> &'static str;
}
