use super::format_duration;
use crate::catalog::{Album, Track};
use crate::router::Page;

/// Summary of a track as shown in listings.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCard {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub cover: Option<String>,
    pub duration: String,
    pub featured: bool,
    pub trending: bool,
    pub href: String,
}

impl From<&Track> for TrackCard {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            cover: track.cover.clone(),
            duration: format_duration(track.duration),
            featured: track.featured,
            trending: track.trending,
            href: Page::Track.href(&[("id", track.id.as_str())]),
        }
    }
}

/// Summary of an album as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCard {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: Option<u32>,
    pub cover: Option<String>,
    pub href: String,
}

impl From<&Album> for AlbumCard {
    fn from(album: &Album) -> Self {
        Self {
            id: album.id.clone(),
            title: album.title.clone(),
            artist: album.artist.clone(),
            year: album.year,
            cover: album.cover.clone(),
            href: Page::Album.href(&[("id", album.id.as_str())]),
        }
    }
}
