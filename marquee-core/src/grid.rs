use futures::future::join_all;
use marquee_model::{BrowseQuery, Category};

use crate::aggregate::ResultAggregator;
use crate::backdrop::{BackdropClaim, BackdropRegistry};

/// One filled category tile.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTile {
    pub category: Category,
    /// Summed result counts of the tile's sub-queries; 0 on failure.
    pub total_results: u64,
    pub backdrop: Option<BackdropClaim>,
}

impl CategoryTile {
    pub fn backdrop_path(&self) -> Option<&str> {
        self.backdrop.as_ref().map(BackdropClaim::path)
    }
}

/// Fills the browse grid: one tile per display category.
#[derive(Debug, Clone)]
pub struct CategoryGrid {
    aggregator: ResultAggregator,
}

impl CategoryGrid {
    pub fn new(aggregator: ResultAggregator) -> Self {
        Self { aggregator }
    }

    /// Render the whole grid with a fresh backdrop registry.
    pub async fn render(&self) -> Vec<CategoryTile> {
        let registry = BackdropRegistry::new();
        self.render_with(&registry).await
    }

    /// Render every tile concurrently against `registry`. Tiles come back in
    /// display order; backdrop assignment follows fetch completion order.
    pub async fn render_with(&self, registry: &BackdropRegistry) -> Vec<CategoryTile> {
        let categories = self.aggregator.resolver().catalog().display_categories();
        tracing::info!("Rendering {} category tiles", categories.len());

        let tiles = join_all(
            categories
                .into_iter()
                .map(|category| self.fill_tile(category, registry)),
        )
        .await;

        tracing::debug!(
            "Category grid done: {} tiles, {} unique backdrops",
            tiles.len(),
            registry.len()
        );
        tiles
    }

    /// Fetch the first page for a category and claim its backdrop as soon
    /// as the fetch resolves.
    pub async fn fill_tile(&self, category: Category, registry: &BackdropRegistry) -> CategoryTile {
        let result = self
            .aggregator
            .aggregate(&BrowseQuery::genre(category.id))
            .await;

        if result.all_failed() {
            return CategoryTile {
                category,
                total_results: 0,
                backdrop: None,
            };
        }

        let backdrop = registry.claim(&result.items);
        CategoryTile {
            category,
            total_results: result.total_results,
            backdrop,
        }
    }
}
