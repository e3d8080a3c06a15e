//! Client-side logic for a static music-discovery site: catalog search,
//! URL routing and page view-models.

pub mod app;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod render;
pub mod router;
pub mod search;
pub mod state;
pub mod tracing;

pub use catalog::{Album, Catalog, Links, Platform, Track};
pub use loader::{DataSource, Loader};
pub use router::{Page, Router};
pub use search::{SearchIndex, SearchResults};
pub use state::{LoadReport, SiteState};
