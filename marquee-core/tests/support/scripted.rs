//! A [`DiscoveryClient`] that answers from canned responses.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use marquee_core::DiscoveryClient;
use marquee_core::provider::{DiscoverPage, ProviderError, RawDetails, RawMediaResult, RawReview};
use marquee_model::{Domain, GenreId, Preset};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Request {
    Discover(Domain, GenreId, u32),
    Search(String, u32),
    Preset(Preset, u32),
}

#[derive(Debug, Clone)]
enum Reply {
    Page(DiscoverPage),
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedClient {
    replies: HashMap<Request, (Reply, Duration)>,
    calls: Mutex<Vec<Request>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, request: Request, page: DiscoverPage, delay_ms: u64) -> Self {
        self.replies
            .insert(request, (Reply::Page(page), Duration::from_millis(delay_ms)));
        self
    }

    pub fn fail(mut self, request: Request, message: &str, delay_ms: u64) -> Self {
        self.replies.insert(
            request,
            (Reply::Fail(message.to_string()), Duration::from_millis(delay_ms)),
        );
        self
    }

    pub fn calls(&self) -> Vec<Request> {
        self.calls.lock().clone()
    }

    /// Highest number of requests that were waiting at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, request: Request) -> Result<DiscoverPage, ProviderError> {
        self.calls.lock().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let reply = self.replies.get(&request).cloned();
        if let Some((_, delay)) = &reply {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            Some((Reply::Page(page), _)) => Ok(page),
            Some((Reply::Fail(message), _)) => Err(ProviderError::ApiError(message)),
            None => Err(ProviderError::NotFound),
        }
    }
}

#[async_trait]
impl DiscoveryClient for ScriptedClient {
    async fn discover(
        &self,
        domain: Domain,
        genre: GenreId,
        page: u32,
    ) -> Result<DiscoverPage, ProviderError> {
        self.answer(Request::Discover(domain, genre, page)).await
    }

    async fn search_multi(&self, query: &str, page: u32) -> Result<DiscoverPage, ProviderError> {
        self.answer(Request::Search(query.to_string(), page)).await
    }

    async fn preset(&self, preset: Preset, page: u32) -> Result<DiscoverPage, ProviderError> {
        self.answer(Request::Preset(preset, page)).await
    }

    async fn details(&self, _domain: Domain, _id: u64) -> Result<RawDetails, ProviderError> {
        Err(ProviderError::NotFound)
    }

    async fn reviews(&self, _domain: Domain, _id: u64) -> Result<Vec<RawReview>, ProviderError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// An untagged discover/preset result.
pub fn result(id: u64, popularity: f64, backdrop: Option<&str>) -> RawMediaResult {
    RawMediaResult {
        id,
        popularity,
        backdrop_path: backdrop.map(str::to_string),
        title: Some(format!("Title {id}")),
        ..Default::default()
    }
}

pub fn discover_page(results: Vec<RawMediaResult>, total_pages: u32) -> DiscoverPage {
    DiscoverPage {
        total_results: results.len() as u64 * u64::from(total_pages),
        results,
        total_pages,
    }
}
