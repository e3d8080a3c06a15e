mod common;

use assert2::{check, let_assert};
use common::{CATALOG_JSON, TempSite, site_dir};
use rstest::rstest;
use soundsite::cache::{DEFAULT_TTL, SessionCache};
use soundsite::error::FetchError;
use soundsite::loader::{CATALOG_FILE, LINKS_FILE};
use soundsite::{Catalog, DataSource, Links, Loader, SiteState};
use std::net::SocketAddr;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves `catalog.json` with 200 and answers 404 for everything else.
async fn serve_catalog_only() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request: Vec<u8> = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or_default();

                let (status, body) = if path.ends_with(CATALOG_FILE) {
                    ("200 OK", CATALOG_JSON)
                } else {
                    ("404 Not Found", "not found")
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    addr
}

fn remote_loader(addr: SocketAddr) -> Loader {
    let source: DataSource = format!("http://{addr}/data").parse().unwrap();
    Loader::new(source)
}

#[rstest]
#[tokio::test]
async fn loads_both_files_from_directory(site_dir: TempSite) {
    let data = site_dir.loader().load().await;
    check!(data.is_complete());
    check!(!data.from_cache);

    let_assert!(Some(catalog) = data.catalog);
    check!(catalog.tracks.len() == 6);
    check!(catalog.albums.len() == 2);
}

#[tokio::test]
async fn missing_links_loads_catalog_only() {
    let site = TempSite::empty();
    site.write(CATALOG_FILE, CATALOG_JSON);
    let cache_dir = TempDir::new().unwrap();
    let cache = SessionCache::in_dir(cache_dir.path(), DEFAULT_TTL);

    let state = SiteState::new();
    let report = state
        .initialize(&site.loader().with_cache(cache.clone()))
        .await;

    check!(report.catalog_loaded);
    check!(!report.links_loaded);
    check!(state.is_ready());
    check!(state.links().for_track("t1").is_empty());
    // Incomplete data is never cached
    check!(!cache.path().exists());
}

#[tokio::test]
async fn malformed_catalog_leaves_search_unavailable() {
    let site = TempSite::empty();
    site.write(CATALOG_FILE, "{ not json");
    site.write(LINKS_FILE, "{}");

    let state = SiteState::new();
    let report = state.initialize(&site.loader()).await;
    check!(!report.catalog_loaded);
    check!(report.links_loaded);
    check!(!state.is_ready());
    check!(state.search("mid", 10).is_empty());
}

#[rstest]
#[tokio::test]
async fn second_load_is_served_from_cache(site_dir: TempSite) {
    let cache_dir = TempDir::new().unwrap();
    let cache = SessionCache::in_dir(cache_dir.path(), DEFAULT_TTL);
    let loader = site_dir.loader().with_cache(cache.clone());

    let first = loader.load().await;
    check!(!first.from_cache);
    check!(cache.path().exists());

    // The source is gone; only the cache can answer now
    std::fs::remove_file(site_dir.path().join(CATALOG_FILE)).unwrap();
    std::fs::remove_file(site_dir.path().join(LINKS_FILE)).unwrap();

    let second = loader.load().await;
    check!(second.from_cache);
    check!(second.catalog == first.catalog);
    check!(second.links == first.links);
}

#[rstest]
#[tokio::test]
async fn expired_cache_is_refetched(site_dir: TempSite) {
    let cache_dir = TempDir::new().unwrap();
    let cache = SessionCache::in_dir(cache_dir.path(), DEFAULT_TTL);

    let stale = site_dir.loader().load().await;
    let_assert!((Some(catalog), Some(links)) = (stale.catalog, stale.links));
    let written = SystemTime::now() - DEFAULT_TTL - Duration::from_secs(1);
    cache.store_at(&catalog, &links, written).await.unwrap();

    let data = site_dir.loader().with_cache(cache).load().await;
    check!(!data.from_cache);
    check!(data.is_complete());
}

#[rstest]
#[tokio::test]
async fn garbage_cache_is_a_miss(site_dir: TempSite) {
    let cache_dir = TempDir::new().unwrap();
    let cache = SessionCache::in_dir(cache_dir.path(), DEFAULT_TTL);
    std::fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
    std::fs::write(cache.path(), "{\"catalog\": 1}").unwrap();

    let data = site_dir.loader().with_cache(cache.clone()).load().await;
    check!(!data.from_cache);
    check!(data.is_complete());
    // Overwritten with a valid entry
    check!(cache.load().await.is_some());
}

#[tokio::test]
async fn remote_status_error_drops_that_file() {
    let addr = serve_catalog_only().await;
    let cache_dir = TempDir::new().unwrap();
    let cache = SessionCache::in_dir(cache_dir.path(), DEFAULT_TTL);

    let state = SiteState::new();
    let report = state
        .initialize(&remote_loader(addr).with_cache(cache.clone()))
        .await;
    check!(report.catalog_loaded);
    check!(!report.links_loaded);
    check!(state.search("midnight", 10).tracks.len() == 2);
    check!(!cache.path().exists());

    let result = remote_loader(addr).fetch::<Links>(LINKS_FILE).await;
    let_assert!(Err(FetchError::Status { url, status }) = result);
    check!(status == 404);
    check!(url.ends_with("/data/links.json"));
}

#[tokio::test]
async fn unreachable_server_loads_nothing() {
    // Bind then drop to get a port nobody listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let data = remote_loader(addr).load().await;
    check!(data.catalog.is_none());
    check!(data.links.is_none());
    check!(!data.from_cache);

    let result = remote_loader(addr).fetch::<Catalog>(CATALOG_FILE).await;
    let_assert!(Err(FetchError::Http { .. }) = result);
}
