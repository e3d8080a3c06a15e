//! Discover page: the full track listing with sorting, filtering and paging.

use super::TrackCard;
use crate::catalog::Track;
use crate::router::Router;
use crate::state::SiteState;
use std::cmp::Ordering;

/// Tracks per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order
    #[default]
    Default,
    Title,
    Artist,
    /// Shortest first; unknown durations last
    Duration,
    /// Featured, then trending, then the rest
    Featured,
}

impl SortOrder {
    /// Unknown values fall back to catalog order.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "title" => Self::Title,
            "artist" => Self::Artist,
            "duration" => Self::Duration,
            "featured" => Self::Featured,
            _ => Self::Default,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Duration => "duration",
            Self::Featured => "featured",
        }
    }

    fn compare(self, a: &Track, b: &Track) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Artist => a.artist.to_lowercase().cmp(&b.artist.to_lowercase()),
            Self::Duration => match (a.duration, b.duration) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Featured => rank(b).cmp(&rank(a)),
        }
    }
}

fn rank(track: &Track) -> u8 {
    u8::from(track.featured) * 2 + u8::from(track.trending)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Featured,
    Trending,
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "featured" => Self::Featured,
            "trending" => Self::Trending,
            _ => Self::All,
        }
    }

    fn accepts(self, track: &Track) -> bool {
        match self {
            Self::All => true,
            Self::Featured => track.featured,
            Self::Trending => track.trending,
        }
    }
}

/// Listing parameters, normally read from `?sort=`, `?filter=` and `?page=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub sort: SortOrder,
    pub filter: Filter,
    /// 1-based; clamped into range when the view is built
    pub page: usize,
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            sort: SortOrder::Default,
            filter: Filter::All,
            page: 1,
        }
    }
}

impl DiscoverQuery {
    pub fn from_router(router: &Router) -> Self {
        Self {
            sort: router
                .param("sort")
                .map(|s| SortOrder::parse(&s))
                .unwrap_or_default(),
            filter: router
                .param("filter")
                .map(|f| Filter::parse(&f))
                .unwrap_or_default(),
            page: router
                .param("page")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based current page
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl Pagination {
    /// Clamps `page` into `1..=total_pages`. There is always at least one page.
    pub fn new(page: usize, total_items: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
            total_items,
            page_size,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Item range covered by the current page.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1) * self.page_size;
        start.min(self.total_items)..(start + self.page_size).min(self.total_items)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverView {
    pub query: DiscoverQuery,
    pub tracks: Vec<TrackCard>,
    pub pagination: Pagination,
}

/// Builds one page of the track listing.
pub fn discover(state: &SiteState, query: DiscoverQuery, page_size: usize) -> DiscoverView {
    let catalog = state.catalog().unwrap_or_default();

    let mut tracks: Vec<&Track> = catalog
        .tracks
        .iter()
        .filter(|t| query.filter.accepts(t))
        .collect();
    // Stable, so ties keep catalog order
    tracks.sort_by(|a, b| query.sort.compare(a, b));

    let pagination = Pagination::new(query.page, tracks.len(), page_size);
    let tracks = tracks[pagination.range()]
        .iter()
        .map(|t| TrackCard::from(*t))
        .collect();

    DiscoverView {
        query: DiscoverQuery {
            page: pagination.page,
            ..query
        },
        tracks,
        pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0, 24, 1, 1)]
    #[case(0, 10, 4, 1, 3)]
    #[case(9, 10, 4, 3, 3)]
    #[case(2, 48, 24, 2, 2)]
    #[case(1, 5, 0, 1, 5)]
    fn test_pagination_clamps(
        #[case] page: usize,
        #[case] items: usize,
        #[case] size: usize,
        #[case] expected_page: usize,
        #[case] expected_pages: usize,
    ) {
        let p = Pagination::new(page, items, size);
        check!(p.page == expected_page);
        check!(p.total_pages == expected_pages);
    }

    #[test]
    fn test_last_page_range_is_partial() {
        let p = Pagination::new(3, 10, 4);
        check!(p.range() == (8..10));
        check!(p.has_prev());
        check!(!p.has_next());
    }

    #[test]
    fn test_query_from_router() {
        let router =
            Router::parse("https://site.test/discover.html?sort=ARTIST&page=3&filter=trending")
                .unwrap();
        let query = DiscoverQuery::from_router(&router);
        check!(query.sort == SortOrder::Artist);
        check!(query.filter == Filter::Trending);
        check!(query.page == 3);

        let router = Router::parse("https://site.test/discover.html?page=abc&sort=nope").unwrap();
        check!(DiscoverQuery::from_router(&router) == DiscoverQuery::default());
    }
}
