//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `site_dir`: a temporary data directory holding `catalog.json` and `links.json`
//! - `loaded_state`: a `SiteState` initialized from `site_dir` without a session cache
//!
//! [`TempSite`] writes arbitrary data files for tests that need broken or
//! partial inputs.

use rstest::fixture;
use soundsite::loader::{CATALOG_FILE, LINKS_FILE};
use soundsite::{DataSource, Loader, SiteState};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CATALOG_JSON: &str = r#"{
  "tracks": [
    {"id": "t1", "title": "Midnight Run", "artist": "Jane Doe", "album": "Night Drive",
     "albumId": "a1", "duration": 125, "trackNumber": 2, "featured": true},
    {"id": "t2", "title": "Summer Midnight", "artist": "The Lanterns", "duration": 240,
     "trending": true},
    {"id": "t3", "title": "Headlights", "artist": "Jane Doe", "album": "Night Drive",
     "albumId": "a1", "duration": 198, "trackNumber": 1},
    {"id": "t4", "title": "Rivers", "artist": "Kofi Mensah", "duration": 301,
     "uzt": true, "audio": "audio/rivers.mp3"},
    {"id": "t5", "title": "Harmattan", "artist": "Kofi Mensah", "uzt": true,
     "audio": "audio/harmattan.mp3", "duration": 187.6},
    {"id": "t6", "title": "R&B <Interlude>", "artist": "Ama & Co", "duration": 61}
  ],
  "albums": [
    {"id": "a1", "title": "Night Drive", "artist": "Jane Doe", "year": 2023},
    {"id": "a2", "title": "Coastline", "artist": "Kofi Mensah", "year": 2021}
  ]
}"#;

pub const LINKS_JSON: &str = r#"{
  "tracks": {
    "t1": {"spotify": "https://open.spotify.com/track/t1", "audiomack": "https://audiomack.com/t1"}
  },
  "albums": {
    "a1": {"apple": "https://music.apple.com/a1", "audiomack": "https://audiomack.com/a1"}
  }
}"#;

/// A temporary data directory for test isolation.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempSite {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempSite {
    /// Creates an empty temporary data directory.
    pub fn empty() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Creates a data directory with the standard fixture files.
    pub fn with_fixtures() -> Self {
        let site = Self::empty();
        site.write(CATALOG_FILE, CATALOG_JSON);
        site.write(LINKS_FILE, LINKS_JSON);
        site
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a file relative to the data directory.
    ///
    /// # Panics
    /// Panics if writing fails.
    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.root.join(name), content)
            .unwrap_or_else(|e| panic!("Failed to write '{}': {}", name, e));
    }

    pub fn source(&self) -> DataSource {
        DataSource::Directory(self.root.clone())
    }

    pub fn loader(&self) -> Loader {
        Loader::new(self.source())
    }
}

#[fixture]
pub fn site_dir() -> TempSite {
    TempSite::with_fixtures()
}

/// State loaded from the fixture files. The directory is kept alive alongside.
#[fixture]
pub async fn loaded_state(site_dir: TempSite) -> (TempSite, SiteState) {
    let state = SiteState::new();
    let report = state.initialize(&site_dir.loader()).await;
    assert!(report.is_complete(), "fixture data should load: {:?}", report);
    (site_dir, state)
}
