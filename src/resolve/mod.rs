//! Slide image discovery.
//!
//! One trait, two strategies, selected by `discovery.mode`:
//!
//! | Strategy | Source | Failure |
//! |----------|--------|---------|
//! | [`ManifestResolver`] | JSON array of `{ url, altText?, width?, height? }` | fetch/status/format error → empty-state render |
//! | [`ProbeResolver`] | `<base><index>.<ext>` candidates, probed concurrently | nothing found by the deadline → inline error |
//!
//! Both produce an ordered, deduplicated `Vec<SlideDescriptor>`. Which
//! failures degrade to the empty state and which replace the carousel with
//! an error message is decided by [`DiscoveryError::falls_back_to_empty`].

pub mod manifest;
pub mod probe;

pub use manifest::ManifestResolver;
pub use probe::ProbeResolver;

use crate::availability::{AvailabilityCache, ImageProber};
use crate::config::{DiscoveryConfig, DiscoveryMode};
use crate::fetch::{FetchError, Fetcher};
use crate::types::SlideDescriptor;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("could not fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("invalid JSON in manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest is not a JSON array")]
    NotAnArray,
    #[error("no carousel images found (timed out: {timed_out})")]
    NothingFound { timed_out: bool },
}

impl DiscoveryError {
    /// Manifest problems degrade to the empty-state carousel; having no
    /// image at all after probing replaces the carousel with an error.
    pub fn falls_back_to_empty(&self) -> bool {
        !matches!(self, DiscoveryError::NothingFound { .. })
    }
}

/// Produces the ordered slide list for a carousel.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve(&self) -> Result<Vec<SlideDescriptor>, DiscoveryError>;
}

/// Build the resolver selected by configuration.
///
/// The probe strategy records its answers in `cache`, so the controller's
/// prefetch can skip URLs discovery already fetched.
pub fn resolver_from_config<F>(
    config: &DiscoveryConfig,
    fetcher: F,
    cache: AvailabilityCache,
) -> Box<dyn ImageResolver>
where
    F: Fetcher + 'static,
{
    match config.mode {
        DiscoveryMode::Manifest => {
            Box::new(ManifestResolver::new(fetcher, config.manifest_url.clone()))
        }
        DiscoveryMode::Probe => Box::new(ProbeResolver::new(
            ImageProber::new(fetcher, cache),
            &config.probe,
        )),
    }
}
