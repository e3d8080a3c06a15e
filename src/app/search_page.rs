//! Search results page and the global search box dropdown.

use crate::catalog::{Album, Track};
use crate::router::{Page, Router};
use crate::search::{SearchResults, escape_html, highlight};
use crate::state::SiteState;
use rapidfuzz::distance::jaro_winkler;

/// Minimum similarity for an artist to be offered as a spelling suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;
const MAX_SPELLING_SUGGESTIONS: usize = 3;

const DROPDOWN_TRACKS: usize = 5;
const DROPDOWN_ALBUMS: usize = 3;
const DROPDOWN_ARTISTS: usize = 3;

/// A matching track with highlighted fields. `*_html` fields are escaped HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackHit {
    pub id: String,
    pub title_html: String,
    pub artist_html: String,
    pub album_html: Option<String>,
    pub cover: Option<String>,
    pub duration: String,
    pub href: String,
}

impl TrackHit {
    fn new(track: &Track, query: &str) -> Self {
        Self {
            id: track.id.clone(),
            title_html: highlight(&track.title, query),
            artist_html: highlight(&track.artist, query),
            album_html: track.album.as_deref().map(|a| highlight(a, query)),
            cover: track.cover.clone(),
            duration: super::format_duration(track.duration),
            href: Page::Track.href(&[("id", track.id.as_str())]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumHit {
    pub id: String,
    pub title_html: String,
    pub artist_html: String,
    pub year: Option<u32>,
    pub cover: Option<String>,
    pub href: String,
}

impl AlbumHit {
    fn new(album: &Album, query: &str) -> Self {
        Self {
            id: album.id.clone(),
            title_html: highlight(&album.title, query),
            artist_html: highlight(&album.artist, query),
            year: album.year,
            cover: album.cover.clone(),
            href: Page::Album.href(&[("id", album.id.as_str())]),
        }
    }
}

/// A matching artist; links to a search for the full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistHit {
    pub name: String,
    pub name_html: String,
    pub href: String,
}

impl ArtistHit {
    fn new(name: &str, query: &str) -> Self {
        Self {
            name: name.to_string(),
            name_html: highlight(name, query),
            href: Page::Search.href(&[("q", name)]),
        }
    }
}

fn hits(results: &SearchResults, query: &str) -> (Vec<TrackHit>, Vec<AlbumHit>, Vec<ArtistHit>) {
    (
        results.tracks.iter().map(|t| TrackHit::new(t, query)).collect(),
        results.albums.iter().map(|a| AlbumHit::new(a, query)).collect(),
        results
            .artists
            .iter()
            .map(|a| ArtistHit::new(a, query))
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPageView {
    /// No `?q=` parameter, or only whitespace
    NoQuery,
    /// Site data failed to load
    Unavailable,
    NoResults {
        query_html: String,
        /// Artist names close to the query
        did_you_mean: Vec<ArtistHit>,
    },
    Results {
        query_html: String,
        tracks: Vec<TrackHit>,
        albums: Vec<AlbumHit>,
        artists: Vec<ArtistHit>,
        total: usize,
    },
}

/// Builds the search results page for the router's `?q=` parameter.
///
/// `limit` caps tracks and albums independently.
pub fn search_page(state: &SiteState, router: &Router, limit: usize) -> SearchPageView {
    let query = router.param("q").unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return SearchPageView::NoQuery;
    }

    let Some(index) = state.index() else {
        return SearchPageView::Unavailable;
    };

    let results = index.search(query, limit);
    let query_html = escape_html(query).into_owned();

    if results.is_empty() {
        let did_you_mean = spelling_suggestions(index.artists(), query)
            .into_iter()
            .map(|name| ArtistHit::new(name, ""))
            .collect();
        return SearchPageView::NoResults {
            query_html,
            did_you_mean,
        };
    }

    let total = results.total();
    let (tracks, albums, artists) = hits(&results, query);
    SearchPageView::Results {
        query_html,
        tracks,
        albums,
        artists,
        total,
    }
}

/// Artist names most similar to `query`, best first.
fn spelling_suggestions<'a>(artists: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.to_lowercase();
    let mut scored: Vec<(f64, &str)> = artists
        .iter()
        .map(|name| {
            let score = jaro_winkler::similarity(query.chars(), name.to_lowercase().chars());
            (score, name.as_str())
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored
        .into_iter()
        .take(MAX_SPELLING_SUGGESTIONS)
        .map(|(_, name)| name)
        .collect()
}

/// Dropdown contents for the global search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub tracks: Vec<TrackHit>,
    pub albums: Vec<AlbumHit>,
    pub artists: Vec<ArtistHit>,
    /// Link to the full results page
    pub see_all_href: String,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty() && self.artists.is_empty()
    }
}

/// Dropdown for a live query; `None` hides it.
pub fn suggestions(results: &SearchResults, query: &str) -> Option<Suggestions> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let mut results = results.clone();
    results.tracks.truncate(DROPDOWN_TRACKS);
    results.albums.truncate(DROPDOWN_ALBUMS);
    results.artists.truncate(DROPDOWN_ARTISTS);

    let (tracks, albums, artists) = hits(&results, query);
    Some(Suggestions {
        tracks,
        albums,
        artists,
        see_all_href: Page::Search.href(&[("q", query)]),
    })
}
