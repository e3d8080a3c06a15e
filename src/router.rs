//! URL state: query parameters, hash fragments and page identification.
//!
//! The router owns the current location and a log of navigations, standing in
//! for the browser's location and history.

use std::collections::BTreeMap;
use std::fmt;
use url::{ParseError, Url, form_urlencoded};

/// Site pages, identified by the last path segment without `.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    Index,
    Discover,
    Search,
    Track,
    Album,
    Uzt,
    Other(String),
}

impl Page {
    pub fn from_id(id: &str) -> Self {
        match id {
            "" | "index" => Self::Index,
            "discover" => Self::Discover,
            "search" => Self::Search,
            "track" => Self::Track,
            "album" => Self::Album,
            "uzt" => Self::Uzt,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Index => "index",
            Self::Discover => "discover",
            Self::Search => "search",
            Self::Track => "track",
            Self::Album => "album",
            Self::Uzt => "uzt",
            Self::Other(id) => id,
        }
    }

    /// Relative link to this page with the given query parameters.
    pub fn href(&self, params: &[(&str, &str)]) -> String {
        let mut href = format!("{}.html", self.id());
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            href.push('?');
            href.push_str(&query);
        }
        href
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How a location change was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Full page load
    Load,
    /// In-place replacement without reloading
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: Url,
    pub navigation: Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// Request for the host to scroll an element into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub element_id: String,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone)]
pub struct Router {
    current: Url,
    history: Vec<HistoryEntry>,
}

impl Router {
    pub fn new(current: Url) -> Self {
        Self {
            current,
            history: Vec::new(),
        }
    }

    pub fn parse(url: &str) -> Result<Self, ParseError> {
        Url::parse(url).map(Self::new)
    }

    pub fn current(&self) -> &Url {
        &self.current
    }

    /// One entry per page load; in-place updates overwrite the latest entry.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// All query parameters. Repeated keys keep the last value.
    pub fn params(&self) -> BTreeMap<String, String> {
        self.current.query_pairs().into_owned().collect()
    }

    /// First value of a query parameter.
    pub fn param(&self, key: &str) -> Option<String> {
        self.current
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// URL fragment without the leading `#`.
    pub fn hash(&self) -> Option<&str> {
        self.current.fragment().filter(|f| !f.is_empty())
    }

    /// Resolves `base` against the current location and appends `params`,
    /// skipping `None` values.
    pub fn build_url<'a, I>(&self, base: &str, params: I) -> Result<Url, ParseError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut url = self.current.join(base)?;
        let pairs: Vec<(&str, &str)> = params
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Replaces the whole location, as a full page load.
    pub fn navigate(&mut self, url: Url) {
        tracing::debug!("Navigating to {}", url);
        self.current = url;
        self.record(Navigation::Load);
    }

    /// Sets or deletes query parameters in place without reloading.
    ///
    /// `None` and empty values delete the key. Set keys keep their position;
    /// new keys are appended.
    pub fn update_params<'a, I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut pairs: Vec<(String, String)> = self.current.query_pairs().into_owned().collect();

        for (key, value) in updates {
            match value.filter(|v| !v.is_empty()) {
                Some(value) => match pairs.iter().position(|(k, _)| k == key) {
                    Some(first) => {
                        pairs[first].1 = value.to_string();
                        let mut i = 0;
                        pairs.retain(|(k, _)| {
                            let keep = k != key || i == first;
                            i += 1;
                            keep
                        });
                    }
                    None => pairs.push((key.to_string(), value.to_string())),
                },
                None => pairs.retain(|(k, _)| k != key),
            }
        }

        if pairs.is_empty() {
            self.current.set_query(None);
        } else {
            self.current
                .query_pairs_mut()
                .clear()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        self.record(Navigation::Replace);
    }

    /// Identifier of the current page: last path segment without `.html`.
    pub fn page_id(&self) -> String {
        let segment = self
            .current
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        let id = segment.strip_suffix(".html").unwrap_or(segment);
        if id.is_empty() {
            "index".to_string()
        } else {
            id.to_string()
        }
    }

    pub fn current_page(&self) -> Page {
        Page::from_id(&self.page_id())
    }

    /// Points the fragment at `element_id` and asks the host to scroll smoothly.
    pub fn scroll_to(&mut self, element_id: &str) -> ScrollRequest {
        self.current.set_fragment(Some(element_id));
        self.record(Navigation::Replace);
        ScrollRequest {
            element_id: element_id.to_string(),
            behavior: ScrollBehavior::Smooth,
        }
    }

    fn record(&mut self, navigation: Navigation) {
        let entry = HistoryEntry {
            url: self.current.clone(),
            navigation,
        };
        match (navigation, self.history.last_mut()) {
            (Navigation::Replace, Some(current)) => *current = entry,
            _ => self.history.push(entry),
        }
    }
}
