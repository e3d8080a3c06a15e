//! Runtime configuration assembled from CLI flags and environment.

use crate::app::DEFAULT_PAGE_SIZE;
use crate::cache::{DEFAULT_TTL, SessionCache};
use crate::cli::Cli;
use crate::loader::{DataSource, Loader};
use crate::search::{DEFAULT_DELAY, DEFAULT_LIMIT};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Origin used to resolve relative page links when none is given.
pub const DEFAULT_ORIGIN: &str = "https://soundsite.local/";

#[derive(Debug, Clone)]
pub struct Config {
    pub source: DataSource,
    /// `None` disables the session cache
    pub cache: Option<SessionCache>,
    pub origin: Url,
    pub page_size: usize,
    pub search_limit: usize,
    pub debounce: Duration,
}

impl Config {
    /// Defaults for a local data directory, without a session cache.
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            cache: None,
            origin: default_origin(),
            page_size: DEFAULT_PAGE_SIZE,
            search_limit: DEFAULT_LIMIT,
            debounce: DEFAULT_DELAY,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        let cache = if cli.no_cache {
            None
        } else {
            match &cli.cache_dir {
                Some(dir) => Some(SessionCache::in_dir(dir, DEFAULT_TTL)),
                None => SessionCache::default_location(DEFAULT_TTL),
            }
        };

        let origin = Url::parse(&cli.origin).unwrap_or_else(|e| {
            tracing::warn!("Invalid origin '{}' ({}), using {}", cli.origin, e, DEFAULT_ORIGIN);
            default_origin()
        });

        Self {
            cache,
            origin,
            page_size: cli.page_size,
            ..Self::new(cli.data.clone())
        }
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = Some(SessionCache::in_dir(&dir.into(), DEFAULT_TTL));
        self
    }

    pub fn loader(&self) -> Loader {
        let loader = Loader::new(self.source.clone());
        match &self.cache {
            Some(cache) => loader.with_cache(cache.clone()),
            None => loader,
        }
    }
}

fn default_origin() -> Url {
    Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use clap::Parser;

    #[test]
    fn test_from_cli_disables_cache() {
        let cli = Cli::parse_from(["soundsite", "--data", "site", "--no-cache", "uzt"]);
        let config = Config::from_cli(&cli);
        check!(config.cache.is_none());
        check!(config.source == DataSource::Directory(PathBuf::from("site")));
        check!(config.page_size == DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_from_cli_remote_source_and_cache_dir() {
        let cli = Cli::parse_from([
            "soundsite",
            "--data",
            "https://cdn.example.com/data",
            "--cache-dir",
            "/tmp/sc",
            "--origin",
            "not a url",
            "route",
            "index.html",
        ]);
        let config = Config::from_cli(&cli);

        let_assert!(DataSource::Remote(url) = &config.source);
        check!(url.as_str() == "https://cdn.example.com/data/");
        let_assert!(Some(cache) = &config.cache);
        check!(cache.path() == std::path::Path::new("/tmp/sc/soundsite/session.json"));
        check!(config.origin.as_str() == DEFAULT_ORIGIN);
    }
}
