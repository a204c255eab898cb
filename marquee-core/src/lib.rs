//! # Marquee Core
//!
//! Browse logic for a film and TV catalogue backed by a paginated discovery
//! API (TMDB).
//!
//! ## Overview
//!
//! - **Categories**: a fixed catalog of film genres, extra show genres and a
//!   cross-map linking each category to its counterparts in the other domain
//! - **Aggregation**: one browse action fans out to every relevant endpoint
//!   concurrently; the results are merged by popularity and deduplicated
//! - **Backdrops**: category tiles claim distinct representative images from
//!   a shared registry while their fetches complete in any order
//! - **Pagination**: a fixed-width page window and links that keep the
//!   current query context
//! - **Details**: title details, trailers and reviews
//!
//! ## Architecture
//!
//! - [`catalog`]: category tables and the display grid
//! - [`genres`]: id forwarding and name resolution
//! - [`provider`]: the [`provider::DiscoveryClient`] seam and its TMDB client
//! - [`aggregate`]: sub-query planning and result merging
//! - [`backdrop`]: the per-render backdrop registry
//! - [`grid`]: concurrent category tile rendering
//! - [`paginate`]: page windows and page links
//! - [`details`]: details and reviews
//! - [`config`]: layered configuration
//!
//! ## Examples
//!
//! ```no_run
//! use marquee_core::{Marquee, MarqueeConfig};
//! use marquee_model::BrowseQuery;
//!
//! async fn search() -> Result<(), Box<dyn std::error::Error>> {
//!     let marquee = Marquee::from_config(MarqueeConfig::load(None)?)?;
//!     let page = marquee.browse(&BrowseQuery::keywords("alien")).await;
//!     for item in page.items() {
//!         println!("{} ({})", item.title(), item.domain().label());
//!     }
//!     println!("{}", page.summary());
//!     Ok(())
//! }
//! ```
#![allow(missing_docs)]

pub mod aggregate;
pub mod backdrop;
pub mod browser;
pub mod catalog;
pub mod config;
pub mod details;
pub mod error;
pub mod genres;
pub mod grid;
pub mod paginate;
pub mod provider;

pub use aggregate::{Aggregate, ResultAggregator, SubQuery};
pub use backdrop::{BackdropClaim, BackdropRegistry, claim_backdrop};
pub use browser::{BrowsePage, Marquee};
pub use catalog::CategoryCatalog;
pub use config::{ConfigError, MarqueeConfig};
pub use details::{DetailsService, MediaDetails, Review, Trailer};
pub use error::{MarqueeError, Result};
pub use genres::{ForwardIds, GenreResolver};
pub use grid::{CategoryGrid, CategoryTile};
pub use paginate::{PageLink, PageLinks, build_page_url, page_links, paginate, result_summary};
pub use provider::{DiscoveryClient, ProviderError, TmdbClient};
