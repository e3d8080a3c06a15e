//! Catalog search: index building, weighted substring queries, debounced
//! dispatch and result highlighting.

pub(crate) mod debounce;
pub(crate) mod highlight;
pub(crate) mod index;
pub(crate) mod scoring;

pub use debounce::{DEFAULT_DELAY, DebouncedSearch, Debouncer};
pub use highlight::{MARK_CLOSE, MARK_OPEN, escape_html, highlight};
pub use index::{ARTIST_LIMIT, DEFAULT_LIMIT, SearchIndex, SearchResults};
