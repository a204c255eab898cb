//! Concurrent fan-out over the discovery API and the merge of its results.
//!
//! One browse action becomes a set of sub-queries (one per domain and genre
//! id, one multi-search, or one preset list). They run concurrently, are
//! awaited together, and the collected lists are merged only after every
//! sub-query has finished, so completion order never reaches the output.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use marquee_model::{BrowseQuery, BrowseTarget, Domain, GenreId, MediaItem, MediaKey, Preset};
use ordered_float::OrderedFloat;

use crate::genres::GenreResolver;
use crate::provider::{DiscoverPage, DiscoveryClient, ProviderError};

/// A single request issued on behalf of a browse action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubQuery {
    Discover { domain: Domain, genre: GenreId },
    Search(String),
    Preset(Preset),
}

/// What one sub-query contributed. A failed sub-query contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct SubQueryOutcome {
    pub items: Vec<MediaItem>,
    pub total_pages: u32,
    pub total_results: u64,
    pub failed: bool,
}

impl SubQueryOutcome {
    pub fn from_page(page: DiscoverPage, fallback: Option<Domain>) -> Self {
        Self {
            total_pages: page.total_pages,
            total_results: page.total_results,
            items: page.into_items(fallback),
            failed: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            failed: true,
            ..Self::default()
        }
    }
}

/// Merged, popularity-ordered results of one browse action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub items: Vec<MediaItem>,
    /// Largest page count reported by any sub-query. This is an
    /// approximation: the real merged page count is not knowable.
    pub total_pages: u32,
    /// Sum of reported result counts, before deduplication.
    pub total_results: u64,
    pub issued: usize,
    pub failed: usize,
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when at least one sub-query ran and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.issued > 0 && self.failed == self.issued
    }
}

/// Issues and merges discovery queries for browse actions.
#[derive(Clone)]
pub struct ResultAggregator {
    client: Arc<dyn DiscoveryClient>,
    resolver: GenreResolver,
}

impl std::fmt::Debug for ResultAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultAggregator")
            .field("client", &self.client.name())
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl ResultAggregator {
    pub fn new(client: Arc<dyn DiscoveryClient>, resolver: GenreResolver) -> Self {
        Self { client, resolver }
    }

    pub fn resolver(&self) -> &GenreResolver {
        &self.resolver
    }

    pub fn client(&self) -> &Arc<dyn DiscoveryClient> {
        &self.client
    }

    /// Sub-queries needed for a target.
    ///
    /// Keyword searches hit the combined endpoint once; presets hit exactly
    /// one domain; genres fan out to every id the resolver yields for each
    /// domain. A blank keyword search plans nothing.
    pub fn plan(&self, target: &BrowseTarget) -> Vec<SubQuery> {
        match target {
            BrowseTarget::Keywords(text) => {
                let text = text.trim();
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![SubQuery::Search(text.to_string())]
                }
            }
            BrowseTarget::Genre(id) => self
                .resolver
                .forward_ids(*id)
                .pairs()
                .map(|(domain, genre)| SubQuery::Discover { domain, genre })
                .collect(),
            BrowseTarget::Preset(preset) => vec![SubQuery::Preset(*preset)],
        }
    }

    pub async fn aggregate(&self, query: &BrowseQuery) -> Aggregate {
        let plan = self.plan(&query.target);
        if plan.is_empty() {
            tracing::debug!("Nothing to query for {:?}", query.target);
            return Aggregate::default();
        }

        let outcomes = join_all(plan.iter().map(|sub| self.run(sub, query.page))).await;
        let aggregate = merge_outcomes(outcomes);

        if aggregate.all_failed() {
            tracing::warn!(
                "All {} sub-queries failed for {:?} page {}",
                aggregate.issued,
                query.target,
                query.page
            );
        } else {
            tracing::info!(
                "Aggregated {} items for {:?} page {} ({}/{} sub-queries ok, {} pages)",
                aggregate.items.len(),
                query.target,
                query.page,
                aggregate.issued - aggregate.failed,
                aggregate.issued,
                aggregate.total_pages
            );
        }

        aggregate
    }

    async fn run(&self, sub: &SubQuery, page: u32) -> SubQueryOutcome {
        let result: Result<(DiscoverPage, Option<Domain>), ProviderError> = match sub {
            SubQuery::Discover { domain, genre } => self
                .client
                .discover(*domain, *genre, page)
                .await
                .map(|p| (p, Some(*domain))),
            SubQuery::Search(text) => self.client.search_multi(text, page).await.map(|p| (p, None)),
            SubQuery::Preset(preset) => self
                .client
                .preset(*preset, page)
                .await
                .map(|p| (p, Some(preset.domain))),
        };

        match result {
            Ok((page, fallback)) => SubQueryOutcome::from_page(page, fallback),
            Err(e) => {
                tracing::warn!("{} sub-query {:?} failed: {}", self.client.name(), sub, e);
                SubQueryOutcome::failed()
            }
        }
    }
}

/// Concatenate, order by descending popularity and drop repeated
/// `(id, domain)` pairs, keeping the first (most popular) occurrence.
///
/// The sort is stable, so equally popular items keep their input order.
pub fn merge_items<I>(lists: I) -> Vec<MediaItem>
where
    I: IntoIterator<Item = Vec<MediaItem>>,
{
    let mut items: Vec<MediaItem> = lists.into_iter().flatten().collect();
    items.sort_by_key(|item| Reverse(OrderedFloat(item.popularity())));

    let mut seen: HashSet<MediaKey> = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.key()));
    items
}

/// Fold sub-query outcomes into one [`Aggregate`].
pub fn merge_outcomes(outcomes: Vec<SubQueryOutcome>) -> Aggregate {
    let issued = outcomes.len();
    let failed = outcomes.iter().filter(|o| o.failed).count();
    let total_pages = outcomes.iter().map(|o| o.total_pages).max().unwrap_or(0);
    let total_results = outcomes.iter().map(|o| o.total_results).sum();

    let items = merge_items(outcomes.into_iter().map(|o| o.items));

    Aggregate {
        // An empty merge has nothing to page through.
        total_pages: if items.is_empty() { 0 } else { total_pages },
        items,
        total_results,
        issued,
        failed,
    }
}
