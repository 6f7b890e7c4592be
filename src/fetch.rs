//! Resource access for discovery.
//!
//! Both resolvers read through the [`Fetcher`] trait so they run the same
//! way against a deployed site ([`HttpFetcher`]) and against a site root on
//! disk ([`FsFetcher`], used by the CLI before publishing). Tests plug in an
//! in-memory fetcher with per-URL latency.

use async_trait::async_trait;
use reqwest::Url;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Status and body of a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: Vec::new(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Single-shot GET of a resource by URL.
///
/// A non-2xx response is not an error at this level; only transport
/// failures are.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        (**self).get(url).await
    }
}

/// Fetches over HTTP(S), resolving relative URLs against a base.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let base = parse_base(base)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, base })
    }

    /// Resolve `url` against the base. Absolute URLs pass through.
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        self.base.join(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Parse a site base URL, adding the trailing slash `Url::join` needs to
/// treat the last segment as a directory.
fn parse_base(base: &str) -> Result<Url, FetchError> {
    let with_slash = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Url::parse(&with_slash).map_err(|e| FetchError::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let url = self.resolve(url)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(FetchResponse { status, body })
    }
}

/// Serves URLs as paths under a site root on disk.
///
/// Missing files answer 404, like a static file server would. Paths that
/// would escape the root also answer 404.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site-relative URL to a path under the root.
    pub fn path_for(&self, url: &str) -> Option<PathBuf> {
        let rel = url.split(['?', '#']).next().unwrap_or(url);
        let rel = rel.trim_start_matches("./").trim_start_matches('/');
        let rel = Path::new(rel);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(rel))
    }
}

#[async_trait]
impl Fetcher for FsFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let Some(path) = self.path_for(url) else {
            return Ok(FetchResponse::not_found());
        };
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) if e.kind() == io::ErrorKind::IsADirectory => Ok(FetchResponse::not_found()),
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn success_range_is_2xx() {
        assert!(FetchResponse::ok("x").is_success());
        assert!(
            FetchResponse {
                status: 204,
                body: vec![]
            }
            .is_success()
        );
        assert!(!FetchResponse::not_found().is_success());
        assert!(
            !FetchResponse {
                status: 301,
                body: vec![]
            }
            .is_success()
        );
    }

    #[test]
    fn http_fetcher_resolves_relative_urls_against_base() {
        let fetcher = HttpFetcher::new("https://example.com/site").unwrap();
        assert_eq!(
            fetcher.resolve("assets/carousel.json").unwrap().as_str(),
            "https://example.com/site/assets/carousel.json"
        );
        assert_eq!(
            fetcher.resolve("https://cdn.example.com/1.jpg").unwrap().as_str(),
            "https://cdn.example.com/1.jpg"
        );
    }

    #[test]
    fn http_fetcher_rejects_invalid_base() {
        assert!(matches!(
            HttpFetcher::new("not a url"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn fs_fetcher_maps_relative_and_dot_slash_urls() {
        let fetcher = FsFetcher::new("/srv/site");
        assert_eq!(
            fetcher.path_for("./assets/carousel.json"),
            Some(PathBuf::from("/srv/site/assets/carousel.json"))
        );
        assert_eq!(
            fetcher.path_for("/assets/1.jpg?v=2"),
            Some(PathBuf::from("/srv/site/assets/1.jpg"))
        );
    }

    #[test]
    fn fs_fetcher_refuses_parent_traversal() {
        let fetcher = FsFetcher::new("/srv/site");
        assert_eq!(fetcher.path_for("../secret.txt"), None);
    }

    #[tokio::test]
    async fn fs_fetcher_reads_existing_and_404s_missing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("assets")).unwrap();
        fs::write(tmp.path().join("assets/carousel.json"), "[]").unwrap();
        let fetcher = FsFetcher::new(tmp.path());

        let found = fetcher.get("assets/carousel.json").await.unwrap();
        assert_eq!(found, FetchResponse::ok("[]"));

        let missing = fetcher.get("assets/nope.json").await.unwrap();
        assert_eq!(missing.status, 404);
    }
}
