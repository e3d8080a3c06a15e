//! Shared site state: the current catalog, links and search index.
//!
//! `SiteState` is constructed once at startup and passed to everything that
//! needs catalog data. The index is either absent or fully built; installing a
//! new catalog replaces the index wholesale.

use crate::catalog::{Catalog, Links};
use crate::loader::Loader;
use crate::search::{SearchIndex, SearchResults};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Snapshot {
    catalog: Option<Arc<Catalog>>,
    links: Option<Arc<Links>>,
    index: Option<Arc<SearchIndex>>,
}

/// Outcome of [`SiteState::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub catalog_loaded: bool,
    pub links_loaded: bool,
    pub from_cache: bool,
}

impl LoadReport {
    /// Catalog and links both loaded.
    pub fn is_complete(&self) -> bool {
        self.catalog_loaded && self.links_loaded
    }
}

/// Central holder of catalog data for page rendering and search.
#[derive(Debug, Default)]
pub struct SiteState {
    snapshot: RwLock<Snapshot>,
}

impl SiteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads data through `loader` and installs whatever arrived.
    ///
    /// A missing half is left as it was; the search index is rebuilt only when
    /// a catalog loaded.
    pub async fn initialize(&self, loader: &Loader) -> LoadReport {
        tracing::info!("Loading site data from {}", loader.source());
        let data = loader.load().await;

        let report = LoadReport {
            catalog_loaded: data.catalog.is_some(),
            links_loaded: data.links.is_some(),
            from_cache: data.from_cache,
        };

        if let Some(catalog) = data.catalog {
            self.install_catalog(catalog);
        }
        if let Some(links) = data.links {
            self.install_links(links);
        }

        if report.is_complete() {
            tracing::info!(
                "Site data ready ({})",
                if report.from_cache { "cached" } else { "fetched" }
            );
        } else {
            tracing::warn!(
                "Site data incomplete (catalog: {}, links: {})",
                report.catalog_loaded,
                report.links_loaded
            );
        }
        report
    }

    /// Replaces the catalog and rebuilds the search index from it.
    pub fn install_catalog(&self, catalog: Catalog) {
        let catalog = Arc::new(catalog);
        let index = Arc::new(SearchIndex::build(Arc::clone(&catalog)));
        let mut snapshot = self.write();
        snapshot.catalog = Some(catalog);
        snapshot.index = Some(index);
    }

    pub fn install_links(&self, links: Links) {
        self.write().links = Some(Arc::new(links));
    }

    /// Rebuilds the search index from `catalog` without changing the stored catalog.
    pub fn build_index(&self, catalog: Arc<Catalog>) {
        let index = Arc::new(SearchIndex::build(catalog));
        self.write().index = Some(index);
    }

    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.read().catalog.clone()
    }

    /// Links, or an empty set when none loaded.
    pub fn links(&self) -> Arc<Links> {
        self.read().links.clone().unwrap_or_default()
    }

    pub fn index(&self) -> Option<Arc<SearchIndex>> {
        self.read().index.clone()
    }

    /// Whether a search index has been built.
    pub fn is_ready(&self) -> bool {
        self.read().index.is_some()
    }

    /// Searches the current index; empty results when none is built.
    pub fn search(&self, query: &str, limit: usize) -> SearchResults {
        match self.index() {
            Some(index) => index.search(query, limit),
            None => {
                tracing::debug!("Search before index was built");
                SearchResults::default()
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DEFAULT_LIMIT;
    use assert2::check;

    #[test]
    fn test_new_state_is_empty() {
        let state = SiteState::new();
        check!(!state.is_ready());
        check!(state.catalog().is_none());
        check!(state.links().tracks.is_empty());
        check!(state.search("anything", DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_install_catalog_builds_index() {
        let state = SiteState::new();
        let catalog: Catalog = serde_json::from_str(
            r#"{"tracks": [{"id": "1", "title": "Midnight Run", "artist": "Jane Doe"}]}"#,
        )
        .unwrap();
        state.install_catalog(catalog);

        check!(state.is_ready());
        check!(state.search("mid", DEFAULT_LIMIT).tracks.len() == 1);
    }

    #[test]
    fn test_new_catalog_replaces_index() {
        let state = SiteState::new();
        state.install_catalog(
            serde_json::from_str(r#"{"tracks": [{"id": "1", "title": "Old", "artist": "A"}]}"#)
                .unwrap(),
        );
        state.install_catalog(
            serde_json::from_str(r#"{"tracks": [{"id": "2", "title": "New", "artist": "B"}]}"#)
                .unwrap(),
        );

        check!(state.search("old", DEFAULT_LIMIT).tracks.is_empty());
        check!(state.search("new", DEFAULT_LIMIT).tracks[0].id == "2");
    }
}
