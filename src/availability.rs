//! Image availability memo and existence probing.
//!
//! An image "exists" when its URL answers 2xx **and** the body decodes as an
//! image header (format guessed from the bytes, dimensions readable). A
//! successful response that isn't an image, such as an HTML error page
//! served with status 200, counts as missing.
//!
//! Results are memoized per URL in an [`AvailabilityCache`]. The cache is
//! shared between the probe resolver and the navigation controller's
//! prefetch: once discovery has seen a URL, prefetching it again is free.
//! Entries are never evicted and writes are idempotent (the same URL always
//! maps to the same answer within a page lifetime), so a plain mutex-guarded
//! map is all the coordination needed.

use crate::fetch::Fetcher;
use image::ImageReader;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// URL → reachable memo. Cloning yields another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityCache {
    entries: Arc<Mutex<HashMap<String, bool>>>,
}

impl AvailabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<bool> {
        self.lock().get(url).copied()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    /// Record an answer. Returns `true` if the URL had no entry before.
    pub fn record(&self, url: &str, available: bool) -> bool {
        self.lock().insert(url.to_string(), available).is_none()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, bool>> {
        // A panic while holding the guard cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Result of a fresh existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Decodable image with its pixel dimensions.
    Found { width: u32, height: u32 },
    /// Known available from the cache; dimensions were not re-read.
    Cached,
    Missing,
}

impl Probe {
    pub fn exists(&self) -> bool {
        !matches!(self, Probe::Missing)
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match *self {
            Probe::Found { width, height } => Some((width, height)),
            _ => None,
        }
    }
}

/// Checks image URLs for existence through a [`Fetcher`], memoizing answers.
#[derive(Clone)]
pub struct ImageProber<F> {
    fetcher: F,
    cache: AvailabilityCache,
}

impl<F: Fetcher> ImageProber<F> {
    pub fn new(fetcher: F, cache: AvailabilityCache) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &AvailabilityCache {
        &self.cache
    }

    /// Cached boolean form of [`probe`](Self::probe).
    pub async fn exists(&self, url: &str) -> bool {
        self.probe(url).await.exists()
    }

    /// Check one URL, answering from the cache when possible.
    ///
    /// Transport errors count as missing; they are logged, not returned.
    pub async fn probe(&self, url: &str) -> Probe {
        match self.cache.get(url) {
            Some(true) => return Probe::Cached,
            Some(false) => return Probe::Missing,
            None => {}
        }

        let outcome = match self.fetcher.get(url).await {
            Ok(response) if response.is_success() => match decode_dimensions(&response.body) {
                Some((width, height)) => Probe::Found { width, height },
                None => {
                    debug!(url, "response is not a decodable image");
                    Probe::Missing
                }
            },
            Ok(response) => {
                debug!(url, status = response.status, "image probe miss");
                Probe::Missing
            }
            Err(e) => {
                debug!(url, error = %e, "image probe failed");
                Probe::Missing
            }
        };
        self.cache.record(url, outcome.exists());
        outcome
    }
}

/// Read image dimensions from the header, guessing the format from content.
pub fn decode_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
