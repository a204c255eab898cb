//! Representative image selection for category tiles.
//!
//! Every tile of one grid render claims a backdrop from a shared
//! [`BackdropRegistry`]. Tiles finish their fetches in arbitrary order and
//! the first tile to claim a path keeps it. Which tile gets which image
//! therefore depends on completion order; the check-then-register step is a
//! single critical section so two tiles never both take the same free path.

use std::collections::HashSet;

use marquee_model::MediaItem;
use parking_lot::Mutex;

/// Result of a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackdropClaim {
    /// Not used by any other tile; now registered.
    Fresh(String),
    /// Every candidate path was taken; this one is shared and not registered.
    Reused(String),
}

impl BackdropClaim {
    pub fn path(&self) -> &str {
        match self {
            BackdropClaim::Fresh(path) | BackdropClaim::Reused(path) => path,
        }
    }

    pub fn into_path(self) -> String {
        match self {
            BackdropClaim::Fresh(path) | BackdropClaim::Reused(path) => path,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, BackdropClaim::Fresh(_))
    }
}

/// Image paths already taken during one grid render.
///
/// Create one per render and hand it by reference to every tile.
#[derive(Debug, Default)]
pub struct BackdropRegistry {
    claimed: Mutex<HashSet<String>>,
}

impl BackdropRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, path: &str) -> bool {
        self.claimed.lock().contains(path)
    }

    pub fn len(&self) -> usize {
        self.claimed.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.lock().is_empty()
    }

    /// Pick a backdrop from `candidates`, scanned in the order given
    /// (callers pass them most popular first).
    ///
    /// Returns the first unclaimed path and registers it. If every path is
    /// already claimed, returns the first candidate that has a path without
    /// registering it. Returns `None` only if no candidate has a path.
    pub fn claim<'a, I>(&self, candidates: I) -> Option<BackdropClaim>
    where
        I: IntoIterator<Item = &'a MediaItem>,
    {
        let mut claimed = self.claimed.lock();
        let mut fallback: Option<&str> = None;

        for path in candidates.into_iter().filter_map(MediaItem::backdrop_path) {
            if claimed.insert(path.to_string()) {
                return Some(BackdropClaim::Fresh(path.to_string()));
            }
            fallback.get_or_insert(path);
        }

        fallback.map(|path| {
            tracing::debug!("No unclaimed backdrop left, reusing {}", path);
            BackdropClaim::Reused(path.to_string())
        })
    }
}

/// Claim a backdrop path for one tile; see [`BackdropRegistry::claim`].
pub fn claim_backdrop(registry: &BackdropRegistry, items: &[MediaItem]) -> Option<String> {
    registry.claim(items).map(BackdropClaim::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::{Domain, MediaSummary};

    fn with_backdrop(id: u64, path: Option<&str>) -> MediaItem {
        MediaItem::new(
            Domain::Film,
            MediaSummary {
                id,
                backdrop_path: path.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[test]
    fn first_free_path_is_claimed_and_registered() {
        let registry = BackdropRegistry::new();
        let items = vec![
            with_backdrop(1, None),
            with_backdrop(2, Some("/a.jpg")),
            with_backdrop(3, Some("/b.jpg")),
        ];

        assert_eq!(
            registry.claim(&items),
            Some(BackdropClaim::Fresh("/a.jpg".into()))
        );
        assert!(registry.is_claimed("/a.jpg"));
        assert_eq!(claim_backdrop(&registry, &items).as_deref(), Some("/b.jpg"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn exhausted_candidates_fall_back_to_first_path_without_registering() {
        let registry = BackdropRegistry::new();
        let items = vec![with_backdrop(1, Some("/a.jpg")), with_backdrop(2, Some("/b.jpg"))];
        registry.claim(&items);
        registry.claim(&items);

        let third = registry.claim(&items).unwrap();
        assert_eq!(third, BackdropClaim::Reused("/a.jpg".into()));
        assert!(!third.is_fresh());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn collisions_are_never_preferred_over_a_free_path() {
        let registry = BackdropRegistry::new();
        registry.claim(&[with_backdrop(1, Some("/popular.jpg"))]);

        let items = vec![
            with_backdrop(1, Some("/popular.jpg")),
            with_backdrop(9, Some("/obscure.jpg")),
        ];
        assert_eq!(registry.claim(&items).unwrap().path(), "/obscure.jpg");
    }

    #[test]
    fn no_paths_means_no_claim() {
        let registry = BackdropRegistry::new();
        assert_eq!(registry.claim(&[with_backdrop(1, None)]), None);
        let none: Vec<MediaItem> = Vec::new();
        assert_eq!(registry.claim(&none), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_claims_over_disjoint_pools_are_distinct() {
        let registry = BackdropRegistry::new();
        let pools: Vec<Vec<MediaItem>> = (0..16)
            .map(|tile| {
                vec![
                    with_backdrop(0, Some("/shared.jpg")),
                    with_backdrop(tile, Some(format!("/own-{tile}.jpg").as_str())),
                ]
            })
            .collect();

        let registry = &registry;
        let claims: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = pools
                .iter()
                .map(|pool| scope.spawn(move || claim_backdrop(registry, pool).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let distinct: HashSet<&String> = claims.iter().collect();
        assert_eq!(distinct.len(), claims.len());
        assert_eq!(claims.iter().filter(|c| *c == "/shared.jpg").count(), 1);
    }
}
