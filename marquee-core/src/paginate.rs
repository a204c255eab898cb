use marquee_model::{BrowseQuery, PageWindow};
use url::Url;

use crate::config::{DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_RESULTS_PER_PAGE};

/// Compute the visible page window.
///
/// The window is centred on the current page where possible and re-anchored
/// against the last page so it stays as full as `max_visible` allows.
/// `current_page` is clamped into `1..=total_pages`.
pub fn window(current_page: u32, total_pages: u32, max_visible: u32) -> PageWindow {
    if total_pages == 0 {
        return PageWindow::EMPTY;
    }

    let max_visible = max_visible.max(1);
    let current_page = current_page.clamp(1, total_pages);

    let mut start = current_page.saturating_sub(max_visible / 2).max(1);
    let end = total_pages.min(start.saturating_add(max_visible - 1));
    if end - start + 1 < max_visible && start > 1 {
        start = end.saturating_sub(max_visible - 1).max(1);
    }

    PageWindow {
        current_page,
        total_pages,
        visible_start: start,
        visible_end: end,
        prev_enabled: current_page > 1,
        next_enabled: current_page < total_pages,
    }
}

/// [`window`] with the default of five visible pages.
pub fn paginate(current_page: u32, total_pages: u32) -> PageWindow {
    window(current_page, total_pages, DEFAULT_MAX_VISIBLE_PAGES)
}

/// Link to `page` of the listing at `current`.
///
/// Every query pair is copied verbatim and in order; only `page` changes.
/// A missing `page` pair is appended.
pub fn page_url(current: &Url, page: u32) -> Url {
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in current.query_pairs() {
        if key == "page" {
            if !replaced {
                pairs.push((key.into_owned(), page.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }
    if !replaced {
        pairs.push(("page".to_string(), page.to_string()));
    }

    let mut url = current.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}

/// Link for a browse query on the listing page at `base`.
///
/// Pairs on `base` are kept in order. The query's selector replaces any
/// selector already present, or is appended; `page` is set last.
pub fn browse_url(base: &Url, query: &BrowseQuery) -> Url {
    let (selector_key, selector_value) = query.selector();
    let mut placed = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in base.query_pairs() {
        if BrowseQuery::SELECTOR_KEYS.contains(&&*key) {
            if !placed {
                pairs.push((selector_key.to_string(), selector_value.clone()));
                placed = true;
            }
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }
    if !placed {
        pairs.push((selector_key.to_string(), selector_value));
    }

    let mut url = base.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    page_url(&url, query.page)
}

/// Navigation target for `page`: the same query context with only the page
/// number replaced.
pub fn build_page_url(window: &PageWindow, base: &Url, query: &BrowseQuery, page: u32) -> Url {
    let page = if window.is_empty() {
        1
    } else {
        page.clamp(1, window.total_pages)
    };
    page_url(&browse_url(base, query), page)
}

/// One numbered paginator entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub page: u32,
    pub url: Url,
    pub active: bool,
}

/// Everything a paginator control renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub prev: Option<Url>,
    pub pages: Vec<PageLink>,
    pub next: Option<Url>,
}

/// Resolve a window into concrete links relative to the current listing URL.
/// Disabled edges have no link.
pub fn page_links(window: &PageWindow, current: &Url) -> PageLinks {
    PageLinks {
        prev: window.prev_page().map(|page| page_url(current, page)),
        pages: window
            .pages()
            .map(|page| PageLink {
                page,
                url: page_url(current, page),
                active: window.is_current(page),
            })
            .collect(),
        next: window.next_page().map(|page| page_url(current, page)),
    }
}

/// "Page 2 of 9 (180 items)" with the API's fixed page size.
pub fn result_summary(item_count: usize, window: &PageWindow) -> String {
    summarize(item_count, window, DEFAULT_RESULTS_PER_PAGE)
}

/// Like [`result_summary`]; the item total assumes full pages of
/// `results_per_page`.
pub fn summarize(item_count: usize, window: &PageWindow, results_per_page: u32) -> String {
    if item_count == 0 || window.is_empty() {
        return "No results found".to_string();
    }
    let approx_items = u64::from(window.total_pages) * u64::from(results_per_page);
    format!(
        "Page {} of {} ({} items)",
        window.current_page, window.total_pages, approx_items
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::GenreId;

    fn span(w: &PageWindow) -> (u32, u32, bool, bool) {
        (w.visible_start, w.visible_end, w.prev_enabled, w.next_enabled)
    }

    #[test]
    fn boundary_windows() {
        assert_eq!(span(&paginate(1, 3)), (1, 3, false, true));
        assert_eq!(span(&paginate(5, 5)), (1, 5, true, false));
        assert_eq!(span(&paginate(7, 20)), (5, 9, true, true));
        assert_eq!(span(&paginate(20, 20)), (16, 20, true, false));
        assert_eq!(span(&paginate(2, 20)), (1, 5, true, true));

        let empty = paginate(1, 0);
        assert!(!empty.prev_enabled && !empty.next_enabled);
        assert_eq!(empty.pages().count(), 0);
    }

    #[test]
    fn window_invariants_hold_everywhere() {
        for max_visible in 1..=7 {
            for total in 1..=25 {
                for current in 1..=total {
                    let w = window(current, total, max_visible);
                    assert!(w.visible_end - w.visible_start < max_visible);
                    assert!(1 <= w.visible_start);
                    assert!(w.visible_start <= w.current_page);
                    assert!(w.current_page <= w.visible_end);
                    assert!(w.visible_end <= total);
                    let full = total.min(max_visible);
                    assert_eq!(w.pages().count() as u32, full, "{current}/{total}/{max_visible}");
                }
            }
        }
    }

    #[test]
    fn huge_max_visible_does_not_overflow() {
        let w = window(1, 5, u32::MAX);
        assert_eq!(span(&w), (1, 5, false, true));

        let last = window(u32::MAX, u32::MAX, 5);
        assert_eq!(span(&last), (u32::MAX - 4, u32::MAX, true, false));

        let wide = window(3, 5, u32::MAX);
        assert_eq!(span(&wide), (1, 5, true, true));
    }

    #[test]
    fn out_of_range_current_page_is_clamped() {
        let w = paginate(40, 6);
        assert_eq!(w.current_page, 6);
        assert_eq!(span(&w), (2, 6, true, false));
        assert_eq!(paginate(0, 6).current_page, 1);
    }

    #[test]
    fn page_url_only_touches_page() {
        let current = Url::parse("https://example.test/search.html?keywords=star+wars&page=2&sort=x")
            .unwrap();
        let next = page_url(&current, 3);
        let pairs: Vec<(String, String)> = next.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("keywords".to_string(), "star wars".to_string()),
                ("page".to_string(), "3".to_string()),
                ("sort".to_string(), "x".to_string()),
            ]
        );
        assert_eq!(next.path(), "/search.html");

        let without_page = Url::parse("https://example.test/search.html?genre=27").unwrap();
        assert_eq!(page_url(&without_page, 2).query(), Some("genre=27&page=2"));
    }

    #[test]
    fn build_page_url_preserves_selector() {
        let base = Url::parse("https://example.test/search.html").unwrap();
        let query = BrowseQuery::genre(GenreId(10765)).with_page(4);
        let w = paginate(4, 10);

        let url = build_page_url(&w, &base, &query, 5);
        assert_eq!(url.query(), Some("genre=10765&page=5"));

        let clamped = build_page_url(&w, &base, &query, 99);
        assert_eq!(clamped.query(), Some("genre=10765&page=10"));
    }

    #[test]
    fn build_page_url_keeps_unrelated_pairs_on_the_listing_url() {
        let base = Url::parse("https://x.test/search.html?genre=27&lang=fr&page=1").unwrap();
        let query = BrowseQuery::genre(GenreId(27));

        let url = build_page_url(&paginate(1, 10), &base, &query, 2);
        assert_eq!(url.query(), Some("genre=27&lang=fr&page=2"));
        assert_eq!(url.path(), "/search.html");
    }

    #[test]
    fn browse_url_swaps_the_selector_in_place() {
        let base = Url::parse("https://x.test/search.html?keywords=alien&lang=fr&page=3").unwrap();
        let query = BrowseQuery::genre(GenreId(27));
        assert_eq!(
            browse_url(&base, &query).query(),
            Some("genre=27&lang=fr&page=1")
        );

        let bare = Url::parse("https://x.test/search.html?lang=fr").unwrap();
        let preset: marquee_model::Preset = "popular_movies".parse().unwrap();
        assert_eq!(
            browse_url(&bare, &BrowseQuery::preset(preset).with_page(2)).query(),
            Some("lang=fr&param=popular_movies&page=2")
        );
    }

    #[test]
    fn links_mark_active_page_and_skip_disabled_edges() {
        let current = Url::parse("https://example.test/search.html?param=popular_movies&page=1")
            .unwrap();
        let links = page_links(&paginate(1, 3), &current);
        assert!(links.prev.is_none());
        assert_eq!(links.pages.len(), 3);
        assert!(links.pages[0].active);
        assert_eq!(
            links.next.unwrap().query(),
            Some("param=popular_movies&page=2")
        );

        let none = page_links(&PageWindow::EMPTY, &current);
        assert!(none.prev.is_none() && none.next.is_none() && none.pages.is_empty());
    }

    #[test]
    fn summaries() {
        assert_eq!(result_summary(20, &paginate(2, 9)), "Page 2 of 9 (180 items)");
        assert_eq!(result_summary(0, &paginate(1, 9)), "No results found");
        assert_eq!(summarize(3, &paginate(1, 2), 50), "Page 1 of 2 (100 items)");
    }
}
