//! Plain-text rendering of page views for terminal output.

use crate::app::{
    AlbumPage, DetailView, DiscoverView, SearchPageView, Suggestions, TrackCard, TrackHit,
    TrackPage, UztView,
};
use crate::catalog::PlatformLink;
use crate::router::Router;
use crate::search::{MARK_CLOSE, MARK_OPEN};
use std::fmt::{self, Write as _};

/// Converts a highlighted HTML snippet to terminal text: marks become brackets
/// and entities are decoded.
pub fn snippet_to_text(html: &str) -> String {
    html.replace(MARK_OPEN, "[")
        .replace(MARK_CLOSE, "]")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn write_track_line(output: &mut String, n: usize, track: &TrackCard) -> fmt::Result {
    write!(output, "{:>3}. {} - {} ({})", n, track.title, track.artist, track.duration)?;
    if track.featured {
        output.push_str(" *featured*");
    }
    if track.trending {
        output.push_str(" *trending*");
    }
    writeln!(output, "  -> {}", track.href)
}

fn write_hit_line(output: &mut String, n: usize, hit: &TrackHit) -> fmt::Result {
    write!(
        output,
        "{:>3}. {} - {}",
        n,
        snippet_to_text(&hit.title_html),
        snippet_to_text(&hit.artist_html)
    )?;
    if let Some(album) = &hit.album_html {
        write!(output, " [{}]", snippet_to_text(album))?;
    }
    writeln!(output, " ({})  -> {}", hit.duration, hit.href)
}

fn write_links(output: &mut String, links: &[PlatformLink]) -> fmt::Result {
    if links.is_empty() {
        return Ok(());
    }
    writeln!(output, "\nListen on:")?;
    for link in links {
        writeln!(output, "  • {}: {}", link.platform, link.url)?;
    }
    Ok(())
}

pub fn render_search_page(view: &SearchPageView) -> Result<String, fmt::Error> {
    let mut output = String::new();
    match view {
        SearchPageView::NoQuery => {
            writeln!(output, "Enter a search term to find tracks, albums and artists.")?;
        }
        SearchPageView::Unavailable => {
            writeln!(output, "Search is unavailable: the catalog failed to load.")?;
        }
        SearchPageView::NoResults {
            query_html,
            did_you_mean,
        } => {
            writeln!(output, "No results found for '{}'.", snippet_to_text(query_html))?;
            if !did_you_mean.is_empty() {
                writeln!(output, "\nDid you mean:")?;
                for artist in did_you_mean {
                    writeln!(output, "  • {}  -> {}", artist.name, artist.href)?;
                }
            }
        }
        SearchPageView::Results {
            query_html,
            tracks,
            albums,
            artists,
            total,
        } => {
            writeln!(
                output,
                "{} results for '{}':",
                total,
                snippet_to_text(query_html)
            )?;
            if !tracks.is_empty() {
                writeln!(output, "\nTracks:")?;
                for (i, hit) in tracks.iter().enumerate() {
                    write_hit_line(&mut output, i + 1, hit)?;
                }
            }
            if !albums.is_empty() {
                writeln!(output, "\nAlbums:")?;
                for (i, album) in albums.iter().enumerate() {
                    write!(
                        output,
                        "{:>3}. {} - {}",
                        i + 1,
                        snippet_to_text(&album.title_html),
                        snippet_to_text(&album.artist_html)
                    )?;
                    if let Some(year) = album.year {
                        write!(output, " ({})", year)?;
                    }
                    writeln!(output, "  -> {}", album.href)?;
                }
            }
            if !artists.is_empty() {
                writeln!(output, "\nArtists:")?;
                for artist in artists {
                    writeln!(output, "  • {}", snippet_to_text(&artist.name_html))?;
                }
            }
        }
    }
    Ok(output)
}

pub fn render_suggestions(suggestions: Option<&Suggestions>) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let Some(suggestions) = suggestions else {
        return Ok(output);
    };
    if suggestions.is_empty() {
        writeln!(output, "No matches.")?;
    }
    for (i, hit) in suggestions.tracks.iter().enumerate() {
        write_hit_line(&mut output, i + 1, hit)?;
    }
    for album in &suggestions.albums {
        writeln!(output, "  album: {}", snippet_to_text(&album.title_html))?;
    }
    for artist in &suggestions.artists {
        writeln!(output, "  artist: {}", snippet_to_text(&artist.name_html))?;
    }
    writeln!(output, "See all results -> {}", suggestions.see_all_href)?;
    Ok(output)
}

pub fn render_discover(view: &DiscoverView) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let p = &view.pagination;
    writeln!(
        output,
        "Discover: {} tracks, sorted by {} (page {}/{})\n",
        p.total_items,
        view.query.sort.as_str(),
        p.page,
        p.total_pages
    )?;
    let offset = p.range().start;
    for (i, track) in view.tracks.iter().enumerate() {
        write_track_line(&mut output, offset + i + 1, track)?;
    }
    if p.has_prev() || p.has_next() {
        writeln!(
            output,
            "\n{}{}",
            if p.has_prev() { "< prev  " } else { "" },
            if p.has_next() { "next >" } else { "" }
        )?;
    }
    Ok(output)
}

pub fn render_track_page(view: &DetailView<TrackPage>) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let page = match view {
        DetailView::NotFound { id: None } => {
            writeln!(output, "No track selected.")?;
            return Ok(output);
        }
        DetailView::NotFound { id: Some(id) } => {
            writeln!(output, "Track '{}' not found.", id)?;
            return Ok(output);
        }
        DetailView::Found(page) => page,
    };

    let track = &page.track;
    writeln!(output, "{}\nby {}", track.title, track.artist)?;
    if let Some(album) = &page.album {
        writeln!(output, "from {}  -> {}", album.title, album.href)?;
    } else if let Some(album) = &track.album {
        writeln!(output, "from {}", album)?;
    }
    writeln!(output, "Duration: {}", track.duration)?;

    if let Some(player) = &page.player {
        writeln!(
            output,
            "\nPlayer: {} [{} / {}]",
            player.source(),
            player.elapsed_label(),
            player.duration_label()
        )?;
    }

    write_links(&mut output, &page.links)?;

    if !page.more_from_artist.is_empty() {
        writeln!(output, "\nMore from {}:", track.artist)?;
        for (i, other) in page.more_from_artist.iter().enumerate() {
            write_track_line(&mut output, i + 1, other)?;
        }
    }
    Ok(output)
}

pub fn render_album_page(view: &DetailView<AlbumPage>) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let page = match view {
        DetailView::NotFound { id: None } => {
            writeln!(output, "No album selected.")?;
            return Ok(output);
        }
        DetailView::NotFound { id: Some(id) } => {
            writeln!(output, "Album '{}' not found.", id)?;
            return Ok(output);
        }
        DetailView::Found(page) => page,
    };

    let album = &page.album;
    write!(output, "{}\nby {}", album.title, album.artist)?;
    if let Some(year) = album.year {
        write!(output, " ({})", year)?;
    }
    writeln!(
        output,
        "\n{} tracks, {}\n",
        page.track_count(),
        page.total_duration
    )?;
    for (i, track) in page.tracks.iter().enumerate() {
        write_track_line(&mut output, i + 1, track)?;
    }
    write_links(&mut output, &page.links)?;
    Ok(output)
}

pub fn render_uzt(view: &UztView) -> Result<String, fmt::Error> {
    let mut output = String::new();
    if view.is_empty() {
        writeln!(output, "No UZT tracks yet.")?;
        return Ok(output);
    }
    for (i, entry) in view.entries.iter().enumerate() {
        write_track_line(&mut output, i + 1, &entry.track)?;
        match &entry.player {
            Some(player) => writeln!(output, "       ▶ {}  #{}", player.source(), entry.anchor)?,
            None => writeln!(output, "       (no audio)  #{}", entry.anchor)?,
        }
    }
    Ok(output)
}

pub fn render_route(router: &Router) -> Result<String, fmt::Error> {
    let mut output = String::new();
    writeln!(output, "page: {}", router.current_page())?;
    for (key, value) in router.params() {
        writeln!(output, "  {} = {}", key, value)?;
    }
    if let Some(hash) = router.hash() {
        writeln!(output, "  #{}", hash)?;
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_snippet_to_text() {
        check!(snippet_to_text("<mark>R&amp;B</mark> &lt;3") == "[R&B] <3");
    }

    #[test]
    fn test_highlighted_snippet_to_text() {
        let html = crate::search::highlight("R&B <Live>", "r&b");
        check!(html.starts_with(MARK_OPEN));
        check!(snippet_to_text(&html) == "[R&B] <Live>");
    }

    #[test]
    fn test_not_found_track() {
        let out = render_track_page(&DetailView::NotFound {
            id: Some("x9".to_string()),
        })
        .unwrap();
        check!(out.contains("Track 'x9' not found."));
    }
}
