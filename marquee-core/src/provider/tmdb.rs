use std::sync::Arc;

use async_trait::async_trait;
use marquee_model::{Domain, GenreId, Preset, PresetList};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::traits::{
    DiscoverPage, DiscoveryClient, ProviderError, RawDetails, RawReview, ReviewsPage,
};
use crate::config::MarqueeConfig;

/// [`DiscoveryClient`] backed by the TMDB v3 REST API.
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: Option<String>,
    client: Arc<Client>,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(config: &MarqueeConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_client(config, client))
    }

    /// Reuse an existing HTTP client (connection pool, proxies, ...).
    pub fn with_client(config: &MarqueeConfig, client: Client) -> Self {
        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
            language: config.language.clone(),
            client: Arc::new(client),
        }
    }

    fn preset_endpoint(preset: Preset) -> &'static str {
        match (preset.domain, preset.list) {
            (Domain::Film, PresetList::NowPlaying) => "movie/now_playing",
            (Domain::Film, PresetList::Popular) => "movie/popular",
            (Domain::Film, PresetList::TopRated) => "movie/top_rated",
            (Domain::Film, PresetList::Upcoming) => "movie/upcoming",
            (Domain::Show, PresetList::NowPlaying) => "tv/on_the_air",
            (Domain::Show, PresetList::Popular) => "tv/popular",
            (Domain::Show, PresetList::TopRated) => "tv/top_rated",
            (Domain::Show, PresetList::Upcoming) => "tv/airing_today",
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("TMDB request URL: {} {:?}", url, params);

        let mut request = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(ProviderError::InvalidApiKey),
            StatusCode::NOT_FOUND => return Err(ProviderError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            status if !status.is_success() => {
                return Err(ProviderError::ApiError(format!(
                    "TMDB API returned status: {}",
                    status
                )));
            }
            _ => {}
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DiscoveryClient for TmdbClient {
    async fn discover(
        &self,
        domain: Domain,
        genre: GenreId,
        page: u32,
    ) -> Result<DiscoverPage, ProviderError> {
        let endpoint = format!("discover/{}", domain.api_segment());
        self.get_json(
            &endpoint,
            &[
                ("with_genres", genre.to_string()),
                ("page", page.to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ],
        )
        .await
    }

    async fn search_multi(&self, query: &str, page: u32) -> Result<DiscoverPage, ProviderError> {
        tracing::info!("TMDB search for: {:?} (page {})", query, page);
        self.get_json(
            "search/multi",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn preset(&self, preset: Preset, page: u32) -> Result<DiscoverPage, ProviderError> {
        self.get_json(Self::preset_endpoint(preset), &[("page", page.to_string())])
            .await
    }

    async fn details(&self, domain: Domain, id: u64) -> Result<RawDetails, ProviderError> {
        let endpoint = format!("{}/{}", domain.api_segment(), id);
        self.get_json(&endpoint, &[("append_to_response", "videos".to_string())])
            .await
    }

    async fn reviews(&self, domain: Domain, id: u64) -> Result<Vec<RawReview>, ProviderError> {
        let endpoint = format!("{}/{}/reviews", domain.api_segment(), id);
        let page: ReviewsPage = self.get_json(&endpoint, &[]).await?;
        Ok(page.results)
    }

    fn name(&self) -> &'static str {
        "TMDB"
    }
}
