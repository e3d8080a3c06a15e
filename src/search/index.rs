//! Flat in-memory index over the catalog with weighted substring matching.

use crate::catalog::{Album, Catalog, Track};
use ahash::AHashSet;
use std::sync::Arc;

use super::scoring::{score_album, score_track};

/// Default number of track and album results.
pub const DEFAULT_LIMIT: usize = 50;
/// Artist results are capped independently of `limit`.
pub const ARTIST_LIMIT: usize = 10;

/// Lower-cased projection of a track.
#[derive(Debug, Clone)]
struct TrackEntry {
    title: String,
    artist: String,
    album: String,
    /// Position of the original record in the catalog
    position: usize,
}

/// Lower-cased projection of an album.
#[derive(Debug, Clone)]
struct AlbumEntry {
    title: String,
    artist: String,
    position: usize,
}

/// Ranked search results. Records are the originals, not the projections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub artists: Vec<String>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty() && self.artists.is_empty()
    }

    pub fn total(&self) -> usize {
        self.tracks.len() + self.albums.len() + self.artists.len()
    }
}

/// Search index built from a catalog snapshot.
///
/// The index is immutable once built; a new catalog means a new index.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    catalog: Arc<Catalog>,
    tracks: Vec<TrackEntry>,
    albums: Vec<AlbumEntry>,
    /// Unique artist names, first-encounter order across tracks then albums
    artists: Vec<String>,
}

impl SearchIndex {
    /// Builds an index over every track and album in the catalog.
    pub fn build(catalog: Arc<Catalog>) -> Self {
        let tracks = catalog
            .tracks
            .iter()
            .enumerate()
            .map(|(position, track)| TrackEntry {
                title: track.title.to_lowercase(),
                artist: track.artist.to_lowercase(),
                album: track.album.as_deref().unwrap_or_default().to_lowercase(),
                position,
            })
            .collect();

        let albums = catalog
            .albums
            .iter()
            .enumerate()
            .map(|(position, album)| AlbumEntry {
                title: album.title.to_lowercase(),
                artist: album.artist.to_lowercase(),
                position,
            })
            .collect();

        let mut seen: AHashSet<&str> = AHashSet::new();
        let artists = catalog
            .tracks
            .iter()
            .map(|t| t.artist.as_str())
            .chain(catalog.albums.iter().map(|a| a.artist.as_str()))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect();

        let index = Self {
            tracks,
            albums,
            artists,
            catalog,
        };
        tracing::debug!(
            "Built search index ({} tracks, {} albums, {} artists)",
            index.tracks.len(),
            index.albums.len(),
            index.artists.len()
        );
        index
    }

    /// The catalog snapshot this index was built from.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Unique artist names in index order.
    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    /// Searches tracks, albums and artists for the query.
    ///
    /// The query is trimmed and lower-cased; an empty query matches nothing.
    /// Tracks and albums are ranked by score with ties kept in catalog order,
    /// each truncated to `limit`. Artists are unranked and capped at
    /// [`ARTIST_LIMIT`].
    pub fn search(&self, query: &str, limit: usize) -> SearchResults {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return SearchResults::default();
        }

        let mut tracks: Vec<(u32, usize)> = self
            .tracks
            .iter()
            .filter_map(|e| {
                score_track(&e.title, &e.artist, &e.album, &query).map(|s| (s, e.position))
            })
            .collect();
        // Stable: equal scores keep index order
        tracks.sort_by(|(a, _), (b, _)| b.cmp(a));

        let mut albums: Vec<(u32, usize)> = self
            .albums
            .iter()
            .filter_map(|e| score_album(&e.title, &e.artist, &query).map(|s| (s, e.position)))
            .collect();
        albums.sort_by(|(a, _), (b, _)| b.cmp(a));

        let artists = self
            .artists
            .iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .take(ARTIST_LIMIT)
            .cloned()
            .collect();

        SearchResults {
            tracks: tracks
                .into_iter()
                .take(limit)
                .map(|(_, position)| self.catalog.tracks[position].clone())
                .collect(),
            albums: albums
                .into_iter()
                .take(limit)
                .map(|(_, position)| self.catalog.albums[position].clone())
                .collect(),
            artists,
        }
    }
}
