//! UZT page: curated tracks, each with its own player.
//!
//! At most one player on the page plays at a time.

use super::{PlayerState, TrackCard};
use crate::state::SiteState;

#[derive(Debug, Clone, PartialEq)]
pub struct UztEntry {
    pub track: TrackCard,
    /// `None` when the track has no audio asset
    pub player: Option<PlayerState>,
    /// Fragment id for deep links, e.g. `uzt.html#uzt-42`
    pub anchor: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UztView {
    pub entries: Vec<UztEntry>,
}

impl UztView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Starts the player at `index`, pausing every other one.
    ///
    /// Returns `false` if there is no playable entry at `index`.
    pub fn play(&mut self, index: usize) -> bool {
        if !self
            .entries
            .get(index)
            .is_some_and(|entry| entry.player.is_some())
        {
            return false;
        }

        for (i, entry) in self.entries.iter_mut().enumerate() {
            if let Some(player) = entry.player.as_mut() {
                if i == index {
                    player.play();
                } else {
                    player.pause();
                }
            }
        }
        true
    }

    /// Index of the entry currently playing.
    pub fn now_playing(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player.as_ref().is_some_and(PlayerState::is_playing))
    }

    /// Entry whose anchor matches a URL fragment.
    pub fn find_anchor(&self, anchor: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.anchor == anchor)
    }
}

/// All UZT tracks in catalog order.
pub fn uzt_page(state: &SiteState) -> UztView {
    let Some(catalog) = state.catalog() else {
        return UztView::default();
    };

    UztView {
        entries: catalog
            .uzt_tracks()
            .map(|track| UztEntry {
                track: TrackCard::from(track),
                player: track
                    .audio
                    .as_deref()
                    .map(|src| PlayerState::new(src, track.duration)),
                anchor: format!("uzt-{}", track.id),
            })
            .collect(),
    }
}
