//! Catalog data model: tracks, albums and their streaming-platform links.
//!
//! The catalog is a read-only snapshot loaded from `catalog.json`. It is never
//! mutated in place; a fresh catalog replaces the old one wholesale.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    /// Length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub uzt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    /// Streamable audio asset, used by in-page players
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// A single album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// The full set of tracks and albums for the site.
///
/// Missing or non-array `tracks`/`albums` fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub tracks: Vec<Track>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub albums: Vec<Album>,
}

impl Catalog {
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn album(&self, id: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == id)
    }

    /// Tracks belonging to an album, ordered by track number.
    ///
    /// Tracks without a number sort after numbered ones, keeping catalog order.
    pub fn album_tracks(&self, album_id: &str) -> Vec<&Track> {
        let mut tracks: Vec<&Track> = self
            .tracks
            .iter()
            .filter(|t| t.album_id.as_deref() == Some(album_id))
            .collect();
        tracks.sort_by_key(|t| t.track_number.unwrap_or(u32::MAX));
        tracks
    }

    /// Tracks flagged as UZT, in catalog order.
    pub fn uzt_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.uzt)
    }
}

/// Accepts any JSON value, treating anything but an array as empty.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match serde_json::Value::deserialize(deserializer)? {
        value @ serde_json::Value::Array(_) => {
            serde_json::from_value(value).map_err(de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}

/// Streaming platforms recognised in `links.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Spotify,
    Apple,
    Youtube,
    Audiomack,
}

impl Platform {
    /// Platforms shown on track pages, in display order.
    pub const TRACK: [Self; 4] = [Self::Spotify, Self::Apple, Self::Youtube, Self::Audiomack];
    /// Platforms shown on album pages, in display order.
    pub const ALBUM: [Self; 3] = [Self::Spotify, Self::Apple, Self::Youtube];

    /// Key used in `links.json`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::Apple => "apple",
            Self::Youtube => "youtube",
            Self::Audiomack => "audiomack",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::Apple => "Apple Music",
            Self::Youtube => "YouTube",
            Self::Audiomack => "Audiomack",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Platform name → URL for a single track or album.
pub type PlatformLinks = BTreeMap<String, String>;

/// A resolved link to a known platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLink {
    pub platform: Platform,
    pub url: String,
}

/// External links keyed by track or album id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub tracks: HashMap<String, PlatformLinks>,
    #[serde(default)]
    pub albums: HashMap<String, PlatformLinks>,
}

impl Links {
    /// Known-platform links for a track, in display order. Empty URLs are skipped.
    pub fn for_track(&self, id: &str) -> Vec<PlatformLink> {
        resolve(self.tracks.get(id), &Platform::TRACK)
    }

    /// Known-platform links for an album, in display order. Empty URLs are skipped.
    pub fn for_album(&self, id: &str) -> Vec<PlatformLink> {
        resolve(self.albums.get(id), &Platform::ALBUM)
    }
}

fn resolve(links: Option<&PlatformLinks>, platforms: &[Platform]) -> Vec<PlatformLink> {
    let Some(links) = links else {
        return Vec::new();
    };
    platforms
        .iter()
        .filter_map(|&platform| {
            links
                .get(platform.key())
                .filter(|url| !url.is_empty())
                .map(|url| PlatformLink {
                    platform,
                    url: url.clone(),
                })
        })
        .collect()
}
