//! Loading `catalog.json` and `links.json` from a directory or a base URL.

use crate::cache::SessionCache;
use crate::catalog::{Catalog, Links};
use crate::error::FetchError;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// Catalog file name under the data source root.
pub const CATALOG_FILE: &str = "catalog.json";
/// Links file name under the data source root.
pub const LINKS_FILE: &str = "links.json";

/// Where the site data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local directory containing the JSON files
    Directory(PathBuf),
    /// Base URL the JSON files are served under
    Remote(Url),
}

impl FromStr for DataSource {
    type Err = url::ParseError;

    /// `http://` and `https://` strings become remote sources; anything else is a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            let mut url = Url::parse(s)?;
            // Url::join replaces the last segment unless the path ends in '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Directory(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Whatever could be loaded. Either half may be missing.
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub catalog: Option<Catalog>,
    pub links: Option<Links>,
    /// Served from the session cache rather than fetched
    pub from_cache: bool,
}

impl SiteData {
    /// Both catalog and links loaded.
    pub fn is_complete(&self) -> bool {
        self.catalog.is_some() && self.links.is_some()
    }
}

/// Fetches site data, consulting the session cache first.
#[derive(Debug, Clone)]
pub struct Loader {
    source: DataSource,
    client: reqwest::Client,
    cache: Option<SessionCache>,
}

impl Loader {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: SessionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Loads catalog and links.
    ///
    /// A fresh cache entry short-circuits the fetch. Otherwise both files are
    /// fetched concurrently; a failed file is logged and left as `None`. The
    /// pair is cached only when both loaded.
    pub async fn load(&self) -> SiteData {
        if let Some(cache) = &self.cache
            && let Some(entry) = cache.load().await
        {
            return SiteData {
                catalog: Some(entry.catalog),
                links: Some(entry.links),
                from_cache: true,
            };
        }

        let (catalog, links) = tokio::join!(
            self.fetch::<Catalog>(CATALOG_FILE),
            self.fetch::<Links>(LINKS_FILE)
        );

        let data = SiteData {
            catalog: log_failure(CATALOG_FILE, catalog),
            links: log_failure(LINKS_FILE, links),
            from_cache: false,
        };

        if let (Some(cache), Some(catalog), Some(links)) = (&self.cache, &data.catalog, &data.links)
            && let Err(e) = cache.store(catalog, links).await
        {
            tracing::warn!("Failed to cache site data: {:#}", e);
        }

        data
    }

    /// Fetches and parses one JSON file from the source.
    pub async fn fetch<T: DeserializeOwned>(&self, name: &str) -> Result<T, FetchError> {
        let bytes = match &self.source {
            DataSource::Directory(dir) => {
                let path = dir.join(name);
                tokio::fs::read(&path).await.map_err(|source| {
                    if source.kind() == std::io::ErrorKind::NotFound {
                        FetchError::NotFound {
                            name: name.to_string(),
                            path: path.clone(),
                        }
                    } else {
                        FetchError::Io {
                            path: path.clone(),
                            source,
                        }
                    }
                })?
            }
            DataSource::Remote(base) => {
                let url = base.join(name).map_err(|source| FetchError::InvalidUrl {
                    url: format!("{base}{name}"),
                    source,
                })?;
                self.fetch_remote(url).await?
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Parse {
            name: name.to_string(),
            source,
        })
    }

    async fn fetch_remote(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("Fetching {}", url);
        let http_err = |source: reqwest::Error| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await.map_err(http_err)?.to_vec())
    }
}

fn log_failure<T>(name: &str, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com/data", "https://example.com/data/catalog.json")]
    #[case("https://example.com/data/", "https://example.com/data/catalog.json")]
    #[case("http://localhost:8080", "http://localhost:8080/catalog.json")]
    fn test_remote_source_joins_file_names(#[case] input: &str, #[case] expected: &str) {
        let_assert!(Ok(DataSource::Remote(base)) = input.parse::<DataSource>());
        check!(base.join(CATALOG_FILE).unwrap().as_str() == expected);
    }

    #[test]
    fn test_plain_string_is_directory() {
        let_assert!(Ok(DataSource::Directory(path)) = "site/data".parse::<DataSource>());
        check!(path == PathBuf::from("site/data"));
    }
}
