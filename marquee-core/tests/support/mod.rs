//! Shared helpers for core integration tests.
#![allow(dead_code)]

pub mod scripted;

use std::sync::Arc;

use marquee_core::{CategoryCatalog, GenreResolver};
use marquee_model::{Category, GenreId};

/// Resolver over a small hand-written catalog.
pub fn resolver(
    primary: &[(u32, &str)],
    extras: &[(u32, &str)],
    cross_map: &[(u32, &[u32])],
) -> GenreResolver {
    let catalog = CategoryCatalog::new(
        primary.iter().map(|&(id, name)| Category::new(id, name)),
        extras.iter().map(|&(id, name)| Category::new(id, name)),
        cross_map
            .iter()
            .map(|&(key, related)| (GenreId(key), related.iter().copied().map(GenreId))),
    );
    GenreResolver::new(Arc::new(catalog))
}
