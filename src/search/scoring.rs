//! Relevance scoring for catalog matches.
//!
//! Weights are fixed: title matches outrank artist matches, which outrank
//! album matches, and a prefix match outranks a plain substring match.

/// Title starts with the query.
pub const TITLE_PREFIX: u32 = 100;
/// Title contains the query.
pub const TITLE_SUBSTRING: u32 = 50;
/// Artist starts with the query.
pub const ARTIST_PREFIX: u32 = 80;
/// Artist contains the query.
pub const ARTIST_SUBSTRING: u32 = 40;
/// Album name contains the query (tracks only).
pub const ALBUM_SUBSTRING: u32 = 20;

/// Score a single field against the query.
///
/// Returns:
/// - `prefix`: field starts with query
/// - `substring`: field contains query elsewhere
/// - 0: no match
fn field_score(field: &str, query: &str, prefix: u32, substring: u32) -> u32 {
    if field.starts_with(query) {
        prefix
    } else if field.contains(query) {
        substring
    } else {
        0
    }
}

/// Score a track projection. Both sides must already be lower-cased.
///
/// Returns `None` when no field contains the query. Maximum score is 200.
pub fn score_track(title: &str, artist: &str, album: &str, query: &str) -> Option<u32> {
    let matched = title.contains(query) || artist.contains(query) || album.contains(query);
    if !matched {
        return None;
    }

    let mut score = field_score(title, query, TITLE_PREFIX, TITLE_SUBSTRING);
    score += field_score(artist, query, ARTIST_PREFIX, ARTIST_SUBSTRING);
    if album.contains(query) {
        score += ALBUM_SUBSTRING;
    }
    Some(score)
}

/// Score an album projection. Both sides must already be lower-cased.
///
/// Returns `None` when neither field contains the query. Maximum score is 180.
pub fn score_album(title: &str, artist: &str, query: &str) -> Option<u32> {
    if !title.contains(query) && !artist.contains(query) {
        return None;
    }

    Some(
        field_score(title, query, TITLE_PREFIX, TITLE_SUBSTRING)
            + field_score(artist, query, ARTIST_PREFIX, ARTIST_SUBSTRING),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("midnight run", "jane doe", "", "mid", Some(100))]
    #[case("midnight run", "jane doe", "", "run", Some(50))]
    #[case("midnight run", "jane doe", "", "jane", Some(80))]
    #[case("midnight run", "jane doe", "", "doe", Some(40))]
    #[case("midnight run", "jane doe", "night drive", "drive", Some(20))]
    #[case("midnight run", "jane doe", "", "zzz", None)]
    fn test_score_track(
        #[case] title: &str,
        #[case] artist: &str,
        #[case] album: &str,
        #[case] query: &str,
        #[case] expected: Option<u32>,
    ) {
        check!(score_track(title, artist, album, query) == expected);
    }

    #[test]
    fn test_score_track_maximum() {
        check!(score_track("echo", "echo", "echo", "echo") == Some(200));
    }

    #[rstest]
    #[case("blue hours", "sea lion", "blue", Some(100))]
    #[case("blue hours", "sea lion", "lion", Some(40))]
    #[case("blue hours", "sea lion", "sea", Some(80))]
    #[case("blue hours", "sea lion", "green", None)]
    #[case("same", "same", "same", Some(180))]
    fn test_score_album(
        #[case] title: &str,
        #[case] artist: &str,
        #[case] query: &str,
        #[case] expected: Option<u32>,
    ) {
        check!(score_album(title, artist, query) == expected);
    }
}
