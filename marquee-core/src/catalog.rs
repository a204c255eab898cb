//! Curated genre tables and the cross-domain genre map.
//!
//! Two curated lists exist: the primary (film) genres and the extra (show)
//! genres. Within each list the *first* entry for an id wins; later entries
//! with the same id are name aliases. They are skipped when building the
//! display catalog but the id still resolves.
//!
//! The shipped show list repeats ids with different names (10759 is both
//! "Action" and "Adventure"). That looks like an authoring slip rather than
//! intent, but lookups keep first-wins behaviour so names stay stable.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use marquee_model::{Category, Domain, GenreId};
use once_cell::sync::Lazy;

/// Name returned for ids that are in neither curated list.
pub const UNKNOWN_GENRE: &str = "Unknown";

const PRIMARY_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

const EXTRA_GENRES: &[(u32, &str)] = &[
    (10759, "Action"),
    (10759, "Adventure"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Science Fiction"),
    (10765, "Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War"),
    (10768, "Politics"),
];

/// Related ids per genre, as authored. The map is asymmetric: 10752 points
/// at 10768 but 10768 has no entry of its own.
const GENRE_CROSS_MAP: &[(u32, &[u32])] = &[
    (28, &[28, 10759]),
    (12, &[12, 10759]),
    (16, &[16]),
    (35, &[35]),
    (80, &[80]),
    (99, &[99]),
    (18, &[18]),
    (10751, &[10751]),
    (14, &[14, 10765]),
    (36, &[36]),
    (27, &[27]),
    (10402, &[10402]),
    (9648, &[9648, 10765]),
    (10749, &[10749]),
    (878, &[878, 10765]),
    (10770, &[10770]),
    (53, &[53]),
    (10752, &[10752, 10768]),
    (37, &[37]),
    (10759, &[28, 12]),
    (10762, &[10762]),
    (10763, &[10763]),
    (10764, &[10764]),
    (10765, &[14, 878]),
    (10766, &[10766]),
    (10767, &[10767]),
];

static BUILTIN: Lazy<Arc<CategoryCatalog>> = Lazy::new(|| {
    Arc::new(CategoryCatalog::new(
        PRIMARY_GENRES.iter().map(|&(id, name)| Category::new(id, name)),
        EXTRA_GENRES.iter().map(|&(id, name)| Category::new(id, name)),
        GENRE_CROSS_MAP
            .iter()
            .map(|&(key, related)| (GenreId(key), related.iter().copied().map(GenreId))),
    ))
});

/// Related ids of one genre, split by the domain each id belongs to.
/// Both lists keep authoring order and contain no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    pub films: Vec<GenreId>,
    pub shows: Vec<GenreId>,
}

impl CrossReference {
    pub fn ids(&self, domain: Domain) -> &[GenreId] {
        match domain {
            Domain::Film => &self.films,
            Domain::Show => &self.shows,
        }
    }

    fn push(&mut self, domain: Domain, id: GenreId) {
        let list = match domain {
            Domain::Film => &mut self.films,
            Domain::Show => &mut self.shows,
        };
        if !list.contains(&id) {
            list.push(id);
        }
    }
}

/// Typed view of the cross-domain genre map.
#[derive(Debug, Clone, Default)]
pub struct GenreCrossMap {
    entries: HashMap<GenreId, CrossReference>,
}

impl GenreCrossMap {
    pub fn get(&self, id: GenreId) -> Option<&CrossReference> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every id appearing as a key or as a related value.
    pub fn all_ids(&self) -> impl Iterator<Item = GenreId> + '_ {
        self.entries.iter().flat_map(|(key, xref)| {
            std::iter::once(*key).chain(xref.films.iter().chain(&xref.shows).copied())
        })
    }
}

/// Immutable genre tables, loaded once at start-up.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    primary: Vec<Category>,
    extras: Vec<Category>,
    primary_index: HashMap<GenreId, usize>,
    extra_index: HashMap<GenreId, usize>,
    cross_map: GenreCrossMap,
}

impl CategoryCatalog {
    /// Build a catalog from raw lists (aliases included) and raw cross-map
    /// entries. Related ids are classified by [`CategoryCatalog::domain_of`].
    pub fn new<P, E, M, R>(primary: P, extras: E, cross_map: M) -> Self
    where
        P: IntoIterator<Item = Category>,
        E: IntoIterator<Item = Category>,
        M: IntoIterator<Item = (GenreId, R)>,
        R: IntoIterator<Item = GenreId>,
    {
        let primary: Vec<Category> = primary.into_iter().collect();
        let extras: Vec<Category> = extras.into_iter().collect();
        let primary_index = first_occurrence_index(&primary);
        let extra_index = first_occurrence_index(&extras);

        let mut catalog = Self {
            primary,
            extras,
            primary_index,
            extra_index,
            cross_map: GenreCrossMap::default(),
        };

        let mut entries: HashMap<GenreId, CrossReference> = HashMap::new();
        for (key, related) in cross_map {
            let xref = entries.entry(key).or_default();
            for id in related {
                xref.push(catalog.domain_of(id), id);
            }
        }
        catalog.cross_map = GenreCrossMap { entries };

        let unresolved = catalog.unresolved_ids();
        if !unresolved.is_empty() {
            tracing::warn!(
                "Genre cross-map references {} id(s) with no curated name: {:?}",
                unresolved.len(),
                unresolved
            );
        }

        catalog
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> &'static CategoryCatalog {
        &BUILTIN
    }

    /// Shared handle to [`CategoryCatalog::builtin`].
    pub fn builtin_shared() -> Arc<CategoryCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Primary list with aliases removed, in authoring order.
    pub fn primary(&self) -> impl Iterator<Item = &Category> + '_ {
        first_occurrences(&self.primary)
    }

    /// Extra list with aliases removed, in authoring order.
    pub fn extras(&self) -> impl Iterator<Item = &Category> + '_ {
        first_occurrences(&self.extras)
    }

    pub fn cross_map(&self) -> &GenreCrossMap {
        &self.cross_map
    }

    pub fn cross_reference(&self, id: GenreId) -> Option<&CrossReference> {
        self.cross_map.get(id)
    }

    pub fn is_primary(&self, id: GenreId) -> bool {
        self.primary_index.contains_key(&id)
    }

    pub fn is_extra(&self, id: GenreId) -> bool {
        self.extra_index.contains_key(&id)
    }

    /// First matching entry, primary list before extras.
    pub fn find(&self, id: GenreId) -> Option<&Category> {
        self.primary_index
            .get(&id)
            .map(|&idx| &self.primary[idx])
            .or_else(|| self.extra_index.get(&id).map(|&idx| &self.extras[idx]))
    }

    /// Which domain's discovery endpoint understands this id.
    ///
    /// Membership decides, not the numeric range: the primary list contains
    /// ids above 10000 (Family, Music, War...). The range is only consulted
    /// for ids in neither list.
    pub fn domain_of(&self, id: GenreId) -> Domain {
        if self.is_primary(id) {
            Domain::Film
        } else if self.is_extra(id) {
            Domain::Show
        } else {
            id.range_domain()
        }
    }

    /// Cross-map ids (keys or values) that resolve to no curated name.
    pub fn unresolved_ids(&self) -> Vec<GenreId> {
        let mut seen = HashSet::new();
        let mut missing: Vec<GenreId> = self
            .cross_map
            .all_ids()
            .filter(|id| self.find(*id).is_none() && seen.insert(*id))
            .collect();
        missing.sort();
        missing
    }

    /// Categories shown in the browse grid.
    ///
    /// Primary genres first, then extra genres that no primary genre's
    /// cross-map entry already points at (those are merged show genres such
    /// as "Action & Adventure" and would otherwise appear twice). Sorted by
    /// name, case-insensitively; ties keep catalog order.
    pub fn display_categories(&self) -> Vec<Category> {
        let subsumed: HashSet<GenreId> = self
            .primary()
            .filter_map(|category| self.cross_reference(category.id))
            .flat_map(|xref| xref.shows.iter().copied())
            .collect();

        let mut shown: Vec<Category> = self.primary().cloned().collect();
        let mut shown_ids: HashSet<GenreId> = shown.iter().map(|c| c.id).collect();
        for extra in self.extras() {
            if subsumed.contains(&extra.id) || !shown_ids.insert(extra.id) {
                continue;
            }
            shown.push(extra.clone());
        }

        shown.sort_by_cached_key(|category| category.name.to_lowercase());
        shown
    }
}

fn first_occurrence_index(list: &[Category]) -> HashMap<GenreId, usize> {
    let mut index = HashMap::with_capacity(list.len());
    for (idx, category) in list.iter().enumerate() {
        index.entry(category.id).or_insert(idx);
    }
    index
}

fn first_occurrences(list: &[Category]) -> impl Iterator<Item = &Category> + '_ {
    let mut seen = HashSet::new();
    list.iter().filter(move |category| seen.insert(category.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn builtin_cross_map_fully_resolves() {
        assert!(CategoryCatalog::builtin().unresolved_ids().is_empty());
    }

    #[test]
    fn aliases_are_hidden_but_first_name_wins() {
        let catalog = CategoryCatalog::builtin();
        let extras: Vec<_> = catalog.extras().map(|c| (c.id.get(), c.name.as_str())).collect();
        assert_eq!(extras.len(), 8);
        assert!(extras.contains(&(10759, "Action")));
        assert!(!extras.contains(&(10759, "Adventure")));
        assert_eq!(catalog.find(GenreId(10768)).unwrap().name, "War");
    }

    #[test]
    fn domain_follows_membership_before_range() {
        let catalog = CategoryCatalog::builtin();
        assert_eq!(catalog.domain_of(GenreId(10751)), Domain::Film);
        assert_eq!(catalog.domain_of(GenreId(10759)), Domain::Show);
        assert_eq!(catalog.domain_of(GenreId(4242)), Domain::Film);
        assert_eq!(catalog.domain_of(GenreId(42_424)), Domain::Show);
    }

    #[test]
    fn cross_reference_splits_related_ids_by_domain() {
        let catalog = CategoryCatalog::builtin();
        let war = catalog.cross_reference(GenreId(10752)).unwrap();
        assert_eq!(war.films, vec![GenreId(10752)]);
        assert_eq!(war.shows, vec![GenreId(10768)]);

        let action_adventure = catalog.cross_reference(GenreId(10759)).unwrap();
        assert_eq!(action_adventure.films, vec![GenreId(28), GenreId(12)]);
        assert!(action_adventure.shows.is_empty());

        assert!(catalog.cross_reference(GenreId(10768)).is_none());
    }

    #[test]
    fn display_categories_skip_merged_show_genres() {
        let grid = CategoryCatalog::builtin().display_categories();
        let ids: HashSet<u32> = grid.iter().map(|c| c.id.get()).collect();

        assert_eq!(grid.len(), 19 + 5);
        for merged in [10759, 10765, 10768] {
            assert!(!ids.contains(&merged), "{merged} should be hidden");
        }
        for kept in [10762, 10763, 10764, 10766, 10767] {
            assert!(ids.contains(&kept), "{kept} should be shown");
        }

        let shown = names(&grid);
        let mut sorted = shown.clone();
        sorted.sort_by_key(|name| name.to_lowercase());
        assert_eq!(shown, sorted);
        assert_eq!(shown.first(), Some(&"Action"));
    }

    #[test]
    fn find_is_stable_under_alias_reordering() {
        let catalog = CategoryCatalog::new(
            vec![Category::new(1, "One")],
            vec![
                Category::new(20_000, "First"),
                Category::new(20_000, "Second"),
                Category::new(1, "Shadowed by primary"),
            ],
            Vec::<(GenreId, Vec<GenreId>)>::new(),
        );
        for _ in 0..3 {
            assert_eq!(catalog.find(GenreId(20_000)).unwrap().name, "First");
            assert_eq!(catalog.find(GenreId(1)).unwrap().name, "One");
        }
    }

    #[test]
    fn unresolved_ids_are_reported() {
        let catalog = CategoryCatalog::new(
            vec![Category::new(1, "One")],
            Vec::new(),
            vec![(GenreId(1), vec![GenreId(1), GenreId(30_000)])],
        );
        assert_eq!(catalog.unresolved_ids(), vec![GenreId(30_000)]);
    }
}
