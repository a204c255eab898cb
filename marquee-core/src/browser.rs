//! The top-level entry point tying the browse pipeline together.

use std::sync::Arc;

use marquee_model::{BrowseQuery, Category, Domain, GenreId, MediaItem, PageWindow};
use url::Url;

use crate::aggregate::{Aggregate, ResultAggregator};
use crate::backdrop::{self, BackdropRegistry};
use crate::catalog::CategoryCatalog;
use crate::config::MarqueeConfig;
use crate::details::{DetailsService, MediaDetails, Review};
use crate::error::Result;
use crate::genres::{ForwardIds, GenreResolver};
use crate::grid::{CategoryGrid, CategoryTile};
use crate::paginate;
use crate::provider::{DiscoveryClient, TmdbClient};

/// One browse listing ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowsePage {
    pub heading: String,
    pub query: BrowseQuery,
    pub aggregate: Aggregate,
    pub window: PageWindow,
    pub results_per_page: u32,
}

impl BrowsePage {
    pub fn items(&self) -> &[MediaItem] {
        &self.aggregate.items
    }

    pub fn summary(&self) -> String {
        paginate::summarize(
            self.aggregate.items.len(),
            &self.window,
            self.results_per_page,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Marquee {
    config: MarqueeConfig,
    aggregator: ResultAggregator,
    details: DetailsService,
}

impl Marquee {
    /// Browser over TMDB with the builtin category catalog.
    pub fn from_config(config: MarqueeConfig) -> Result<Self> {
        let client = TmdbClient::new(&config)?;
        Ok(Self::with_client(config, Arc::new(client), GenreResolver::default()))
    }

    pub fn with_client(
        config: MarqueeConfig,
        client: Arc<dyn DiscoveryClient>,
        resolver: GenreResolver,
    ) -> Self {
        Self {
            aggregator: ResultAggregator::new(client.clone(), resolver.clone()),
            details: DetailsService::new(client, resolver),
            config,
        }
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn resolver(&self) -> &GenreResolver {
        self.aggregator.resolver()
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        self.resolver().catalog()
    }

    /// Display name for any category id; "Unknown" when not curated.
    pub fn resolve_category_display(&self, id: GenreId) -> &str {
        self.resolver().resolve_name(id)
    }

    /// Categories shown in the browse grid, in display order.
    pub fn display_categories(&self) -> Vec<Category> {
        self.catalog().display_categories()
    }

    pub fn forward_ids(&self, category: GenreId) -> ForwardIds {
        self.resolver().forward_ids(category)
    }

    pub async fn aggregate(&self, query: &BrowseQuery) -> Aggregate {
        self.aggregator.aggregate(query).await
    }

    /// Aggregate a query and window its page count.
    pub async fn browse(&self, query: &BrowseQuery) -> BrowsePage {
        let aggregate = self.aggregate(query).await;
        let window = self.paginate(query.page, aggregate.total_pages);
        BrowsePage {
            heading: self.resolver().heading(query),
            query: query.clone(),
            aggregate,
            window,
            results_per_page: self.config.results_per_page,
        }
    }

    pub async fn render_grid(&self) -> Vec<CategoryTile> {
        CategoryGrid::new(self.aggregator.clone()).render().await
    }

    pub fn claim_backdrop(&self, registry: &BackdropRegistry, items: &[MediaItem]) -> Option<String> {
        backdrop::claim_backdrop(registry, items)
    }

    /// Page window using the configured number of visible pages.
    pub fn paginate(&self, current_page: u32, total_pages: u32) -> PageWindow {
        paginate::window(current_page, total_pages, self.config.max_visible_pages)
    }

    pub fn build_page_url(
        &self,
        window: &PageWindow,
        base: &Url,
        query: &BrowseQuery,
        page: u32,
    ) -> Url {
        paginate::build_page_url(window, base, query, page)
    }

    pub async fn details(&self, domain: Domain, id: u64) -> Result<MediaDetails> {
        Ok(self.details.details(domain, id).await?)
    }

    pub async fn reviews(&self, domain: Domain, id: u64) -> Result<Vec<Review>> {
        Ok(self.details.reviews(domain, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{DiscoverPage, MockDiscoveryClient, RawMediaResult};

    fn marquee(client: MockDiscoveryClient) -> Marquee {
        let config = MarqueeConfig {
            max_visible_pages: 3,
            ..MarqueeConfig::default()
        };
        Marquee::with_client(config, Arc::new(client), GenreResolver::default())
    }

    #[tokio::test]
    async fn browse_windows_the_aggregate_with_configured_width() {
        let mut client = MockDiscoveryClient::new();
        client.expect_name().return_const("mock");
        client.expect_search_multi().returning(|_, _| {
            Ok(DiscoverPage {
                results: vec![RawMediaResult {
                    id: 1,
                    media_type: Some("movie".into()),
                    title: Some("Alien".into()),
                    popularity: 3.0,
                    ..Default::default()
                }],
                total_pages: 12,
                total_results: 240,
            })
        });

        let page = marquee(client)
            .browse(&BrowseQuery::keywords("alien").with_page(6))
            .await;
        assert_eq!(page.heading, "Search Results for \"alien\"");
        assert_eq!(page.items().len(), 1);
        assert_eq!((page.window.visible_start, page.window.visible_end), (5, 7));
        assert_eq!(page.summary(), "Page 6 of 12 (240 items)");
    }

    #[tokio::test]
    async fn blank_search_issues_nothing() {
        let mut client = MockDiscoveryClient::new();
        client.expect_name().return_const("mock");
        client.expect_search_multi().never();

        let page = marquee(client).browse(&BrowseQuery::keywords("   ")).await;
        assert!(page.aggregate.is_empty());
        assert!(page.window.is_empty());
        assert_eq!(page.summary(), "No results found");
    }

    #[test]
    fn category_names_and_grid_come_from_the_catalog() {
        let m = marquee(MockDiscoveryClient::new());
        assert_eq!(m.resolve_category_display(GenreId(10765)), "Science Fiction");
        assert_eq!(m.resolve_category_display(GenreId(4)), "Unknown");
        assert_eq!(m.display_categories().len(), 24);
    }
}
