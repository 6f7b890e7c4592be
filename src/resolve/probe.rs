//! Probe-mode discovery: brute-force a numbered naming scheme.
//!
//! For every candidate index `1..=max_index` the extensions are tried in
//! configured order and the first one that resolves wins; the remaining
//! extensions for that index are never requested. Indices are probed
//! concurrently inside one task, raced against a single deadline.
//!
//! When the deadline fires first, whatever has resolved so far is the
//! result, as long as it isn't empty. Probes still in flight are dropped
//! with the pending set; their answers are never observed. Results are
//! sorted by index, since completion order means nothing.

use super::{DiscoveryError, ImageResolver};
use crate::availability::ImageProber;
use crate::config::ProbeConfig;
use crate::fetch::Fetcher;
use crate::naming::probe_url;
use crate::types::SlideDescriptor;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct ProbeResolver<F> {
    prober: ImageProber<F>,
    base_url: String,
    extensions: Vec<String>,
    max_index: u32,
    timeout: Duration,
}

impl<F: Fetcher> ProbeResolver<F> {
    pub fn new(prober: ImageProber<F>, config: &ProbeConfig) -> Self {
        Self {
            prober,
            base_url: config.base_url.clone(),
            extensions: config.extensions.clone(),
            max_index: config.max_index,
            timeout: config.timeout(),
        }
    }

    /// First extension that resolves for `index`, in configured order.
    async fn probe_index(&self, index: u32) -> Option<SlideDescriptor> {
        for extension in &self.extensions {
            let url = probe_url(&self.base_url, index, extension);
            let probe = self.prober.probe(&url).await;
            if probe.exists() {
                debug!(index, url = %url, "probe hit");
                let dimensions = probe.dimensions();
                return Some(SlideDescriptor {
                    alt_text: SlideDescriptor::default_alt_text(index),
                    image_url: url,
                    display_width: dimensions.map(|(w, _)| w),
                    display_height: dimensions.map(|(_, h)| h),
                    sequence_number: index,
                });
            }
        }
        None
    }
}

#[async_trait]
impl<F: Fetcher> ImageResolver for ProbeResolver<F> {
    async fn resolve(&self) -> Result<Vec<SlideDescriptor>, DiscoveryError> {
        let mut pending: FuturesUnordered<_> =
            (1..=self.max_index).map(|i| self.probe_index(i)).collect();
        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        let mut found = Vec::new();
        let mut timed_out = false;
        loop {
            tokio::select! {
                next = pending.next() => match next {
                    Some(Some(slide)) => found.push(slide),
                    Some(None) => {}
                    None => break,
                },
                () = &mut deadline => {
                    timed_out = true;
                    break;
                }
            }
        }
        let abandoned = pending.len();
        drop(pending);

        if found.is_empty() {
            warn!(base = %self.base_url, timed_out, "probe found no images");
            return Err(DiscoveryError::NothingFound { timed_out });
        }
        if timed_out {
            info!(found = found.len(), abandoned, "probe deadline reached, using partial results");
        }
        found.sort_by_key(|s| s.sequence_number);
        Ok(found)
    }
}
