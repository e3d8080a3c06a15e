//! Track and album detail pages.

use super::{AlbumCard, PlayerState, TrackCard, format_duration};
use crate::catalog::PlatformLink;
use crate::state::SiteState;

/// Tracks listed under "more from this artist".
const MORE_FROM_ARTIST: usize = 4;

/// A detail page either renders its subject or a dedicated not-found state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<T> {
    /// `id` is `None` when the URL carried no `?id=`
    NotFound { id: Option<String> },
    Found(T),
}

impl<T> DetailView<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(page) => Some(page),
            Self::NotFound { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackPage {
    pub track: TrackCard,
    pub album: Option<AlbumCard>,
    pub links: Vec<PlatformLink>,
    /// Present when the track has a streamable asset
    pub player: Option<PlayerState>,
    pub more_from_artist: Vec<TrackCard>,
}

/// Builds the track page for `id`.
pub fn track_page(state: &SiteState, id: Option<&str>) -> DetailView<TrackPage> {
    let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
        return DetailView::NotFound { id: None };
    };
    let not_found = || DetailView::NotFound {
        id: Some(id.to_string()),
    };

    let Some(catalog) = state.catalog() else {
        return not_found();
    };
    let Some(track) = catalog.track(id) else {
        tracing::debug!("Track '{}' not in catalog", id);
        return not_found();
    };

    let album = track
        .album_id
        .as_deref()
        .and_then(|album_id| catalog.album(album_id))
        .map(AlbumCard::from);

    let more_from_artist = catalog
        .tracks
        .iter()
        .filter(|t| t.artist == track.artist && t.id != track.id)
        .take(MORE_FROM_ARTIST)
        .map(TrackCard::from)
        .collect();

    DetailView::Found(TrackPage {
        track: TrackCard::from(track),
        album,
        links: state.links().for_track(id),
        player: track
            .audio
            .as_deref()
            .map(|src| PlayerState::new(src, track.duration)),
        more_from_artist,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumPage {
    pub album: AlbumCard,
    /// Ordered by track number
    pub tracks: Vec<TrackCard>,
    pub total_duration: String,
    pub links: Vec<PlatformLink>,
}

impl AlbumPage {
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

/// Builds the album page for `id`.
pub fn album_page(state: &SiteState, id: Option<&str>) -> DetailView<AlbumPage> {
    let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
        return DetailView::NotFound { id: None };
    };
    let not_found = || DetailView::NotFound {
        id: Some(id.to_string()),
    };

    let Some(catalog) = state.catalog() else {
        return not_found();
    };
    let Some(album) = catalog.album(id) else {
        tracing::debug!("Album '{}' not in catalog", id);
        return not_found();
    };

    let tracks = catalog.album_tracks(id);
    let total: f64 = tracks
        .iter()
        .filter_map(|t| t.duration)
        .filter(|d| d.is_finite() && *d > 0.0)
        .sum();

    DetailView::Found(AlbumPage {
        album: AlbumCard::from(album),
        tracks: tracks.into_iter().map(TrackCard::from).collect(),
        total_duration: format_duration(Some(total)),
        links: state.links().for_album(id),
    })
}
