use std::sync::Arc;

use marquee_model::{BrowseQuery, BrowseTarget, Domain, GenreId, MediaItem};

use crate::catalog::{CategoryCatalog, UNKNOWN_GENRE};

/// Query identifiers to use against each domain for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardIds {
    pub films: Vec<GenreId>,
    pub shows: Vec<GenreId>,
}

impl ForwardIds {
    pub fn ids(&self, domain: Domain) -> &[GenreId] {
        match domain {
            Domain::Film => &self.films,
            Domain::Show => &self.shows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty() && self.shows.is_empty()
    }

    /// Every `(domain, id)` pair, films first.
    pub fn pairs(&self) -> impl Iterator<Item = (Domain, GenreId)> + '_ {
        Domain::ALL
            .into_iter()
            .flat_map(move |domain| self.ids(domain).iter().map(move |id| (domain, *id)))
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

/// Maps user-facing categories to per-domain query ids, and any id back to a
/// display name.
#[derive(Debug, Clone)]
pub struct GenreResolver {
    catalog: Arc<CategoryCatalog>,
}

impl Default for GenreResolver {
    fn default() -> Self {
        Self::new(CategoryCatalog::builtin_shared())
    }
}

impl GenreResolver {
    pub fn new(catalog: Arc<CategoryCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// The category's own id is always queried in its own domain; ids for
    /// the other domain come only from the cross-map, which may fan out to
    /// several ids or to none.
    pub fn forward_ids(&self, category: GenreId) -> ForwardIds {
        let mut ids = ForwardIds::default();
        ids.push(self.catalog.domain_of(category), category);

        if let Some(xref) = self.catalog.cross_reference(category) {
            for domain in Domain::ALL {
                for id in xref.ids(domain) {
                    ids.push(domain, *id);
                }
            }
        }

        ids
    }

    /// Best display name for any genre id. Never fails.
    pub fn resolve_name(&self, id: GenreId) -> &str {
        self.catalog
            .find(id)
            .map(|category| category.name.as_str())
            .unwrap_or(UNKNOWN_GENRE)
    }

    /// Genre shown on a result card: the browsed genre when there is one,
    /// otherwise the item's first genre.
    pub fn genre_label(&self, item: &MediaItem, highlighted: Option<GenreId>) -> &str {
        match highlighted.or_else(|| item.genre_ids().first().copied()) {
            Some(id) => self.resolve_name(id),
            None => UNKNOWN_GENRE,
        }
    }

    /// Page heading for a browse action.
    pub fn heading(&self, query: &BrowseQuery) -> String {
        match &query.target {
            BrowseTarget::Keywords(text) => format!("Search Results for \"{text}\""),
            BrowseTarget::Genre(id) => match self.catalog.find(*id) {
                Some(category) => format!("Genre: {}", category.name),
                None => "Genre Results".to_string(),
            },
            BrowseTarget::Preset(preset) => preset.title(),
        }
    }
}
