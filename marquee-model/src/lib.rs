//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod category;
pub mod domain;
pub mod error;
pub mod ids;
pub mod image;
pub mod media;
pub mod page;
pub mod query;

// Intentionally curated re-exports for downstream consumers.
pub use category::Category;
pub use domain::Domain;
pub use error::{ModelError, Result as ModelResult};
pub use ids::{GenreId, MediaKey};
pub use image::{BackdropSize, ImageSize, PosterSize};
pub use media::{MediaItem, MediaSummary};
pub use page::PageWindow;
pub use query::{BrowseQuery, BrowseTarget, Preset, PresetList};
