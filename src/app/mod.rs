//! Page view-models.
//!
//! Each page is a pure function from [`SiteState`](crate::state::SiteState) and
//! URL parameters to a structured view. Markup is left to the host; only search
//! snippets carry pre-escaped HTML.

pub(crate) mod cards;
pub(crate) mod detail;
pub(crate) mod discover;
pub(crate) mod player;
pub(crate) mod search_page;
pub(crate) mod uzt;

pub use cards::{AlbumCard, TrackCard};
pub use detail::{AlbumPage, DetailView, TrackPage, album_page, track_page};
pub use discover::{
    DEFAULT_PAGE_SIZE, DiscoverQuery, DiscoverView, Filter, Pagination, SortOrder, discover,
};
pub use player::PlayerState;
pub use search_page::{
    AlbumHit, ArtistHit, SearchPageView, Suggestions, TrackHit, search_page, suggestions,
};
pub use uzt::{UztEntry, UztView, uzt_page};

/// Formats seconds as `m:ss`.
///
/// Missing, NaN, infinite and negative values format as `0:00`; fractions are
/// truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: Option<f64>) -> String {
    let total = match seconds {
        Some(s) if s.is_finite() && s > 0.0 => s.floor() as u64,
        _ => 0,
    };
    format!("{}:{:02}", total / 60, total % 60)
}
