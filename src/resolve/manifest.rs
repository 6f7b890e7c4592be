//! Manifest-mode discovery: a JSON array of slide entries.
//!
//! Parsing is lenient per entry and strict about the document: a payload
//! that isn't an array fails the whole resolution, while individual entries
//! without a usable `url` are simply dropped.

use super::{DiscoveryError, ImageResolver};
use crate::fetch::Fetcher;
use crate::types::SlideDescriptor;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Reads slides from a manifest URL.
pub struct ManifestResolver<F> {
    fetcher: F,
    url: String,
}

impl<F: Fetcher> ManifestResolver<F> {
    pub fn new(fetcher: F, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
        }
    }
}

#[async_trait]
impl<F: Fetcher> ImageResolver for ManifestResolver<F> {
    async fn resolve(&self) -> Result<Vec<SlideDescriptor>, DiscoveryError> {
        let response = self
            .fetcher
            .get(&self.url)
            .await
            .map_err(|source| DiscoveryError::Fetch {
                url: self.url.clone(),
                source,
            })
            .inspect_err(|e| warn!(error = %e, "manifest fetch failed"))?;

        if !response.is_success() {
            warn!(url = %self.url, status = response.status, "manifest request rejected");
            return Err(DiscoveryError::Status {
                url: self.url.clone(),
                status: response.status,
            });
        }

        let slides = parse_manifest(&response.body)?;
        debug!(url = %self.url, count = slides.len(), "manifest resolved");
        Ok(slides)
    }
}

/// Turn a manifest document into slides.
///
/// - entries without a non-empty (trimmed) string `url` are dropped
/// - repeated URLs keep their first occurrence
/// - `altText` falls back to `"Carousel image N"`, N being the 1-based
///   position among kept entries (which is also the sequence number)
/// - `width`/`height` accept positive numbers or numeric strings
pub fn parse_manifest(bytes: &[u8]) -> Result<Vec<SlideDescriptor>, DiscoveryError> {
    let document: Value = serde_json::from_slice(bytes)?;
    let Value::Array(items) = document else {
        return Err(DiscoveryError::NotAnArray);
    };

    let mut seen = HashSet::new();
    let mut slides = Vec::new();
    for item in &items {
        let Some(url) = item
            .get("url")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|u| !u.is_empty())
        else {
            continue;
        };
        if !seen.insert(url) {
            continue;
        }

        let number = slides.len() as u32 + 1;
        let alt_text = item
            .get("altText")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| SlideDescriptor::default_alt_text(number));

        slides.push(SlideDescriptor {
            image_url: url.to_string(),
            alt_text,
            display_width: item.get("width").and_then(positive_dimension),
            display_height: item.get("height").and_then(positive_dimension),
            sequence_number: number,
        });
    }
    Ok(slides)
}

fn positive_dimension(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_finite() && n >= 1.0 && n <= u32::MAX as f64 {
        Some(n.round() as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchResponse;
    use crate::test_helpers::FakeFetcher;

    #[test]
    fn drops_empty_urls_and_synthesizes_alt_text() {
        let slides = parse_manifest(
            br#"[{"url": "a.png"}, {"url": ""}, {"url": "b.png", "altText": "B"}]"#,
        )
        .unwrap();

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].image_url, "a.png");
        assert_eq!(slides[0].alt_text, "Carousel image 1");
        assert_eq!(slides[0].sequence_number, 1);
        assert_eq!(slides[1].image_url, "b.png");
        assert_eq!(slides[1].alt_text, "B");
        assert_eq!(slides[1].sequence_number, 2);
    }

    #[test]
    fn trims_urls_and_alt_text() {
        let slides =
            parse_manifest(br#"[{"url": "  a.png ", "altText": "   "}, {"url": "   "}]"#).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].image_url, "a.png");
        assert_eq!(slides[0].alt_text, "Carousel image 1");
    }

    #[test]
    fn skips_non_object_and_non_string_urls() {
        let slides = parse_manifest(br#"[null, 3, {"url": 7}, {"url": "ok.jpg"}]"#).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].alt_text, "Carousel image 1");
    }

    #[test]
    fn duplicate_urls_keep_first_occurrence() {
        let slides = parse_manifest(
            br#"[{"url": "a.png", "altText": "first"}, {"url": "a.png", "altText": "again"}, {"url": "c.png"}]"#,
        )
        .unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].alt_text, "first");
        assert_eq!(slides[1].alt_text, "Carousel image 2");
    }

    #[test]
    fn dimensions_accept_numbers_and_numeric_strings() {
        let slides = parse_manifest(
            br#"[
                {"url": "a.png", "width": 800, "height": "600"},
                {"url": "b.png", "width": 0, "height": "wide"},
                {"url": "c.png", "width": -5, "height": 533.6}
            ]"#,
        )
        .unwrap();
        assert_eq!((slides[0].display_width, slides[0].display_height), (Some(800), Some(600)));
        assert_eq!((slides[1].display_width, slides[1].display_height), (None, None));
        assert_eq!((slides[2].display_width, slides[2].display_height), (None, Some(534)));
    }

    #[test]
    fn non_array_document_is_rejected() {
        assert!(matches!(
            parse_manifest(br#"{"url": "a.png"}"#),
            Err(DiscoveryError::NotAnArray)
        ));
        assert!(matches!(parse_manifest(b"not json"), Err(DiscoveryError::Json(_))));
    }

    #[test]
    fn empty_array_is_an_empty_success() {
        assert!(parse_manifest(b"[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolver_reports_http_status() {
        let fetcher = FakeFetcher::new().with(
            "carousel.json",
            FetchResponse {
                status: 503,
                body: Vec::new(),
            },
        );
        let err = ManifestResolver::new(fetcher, "carousel.json")
            .resolve()
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Status { status: 503, .. }));
        assert!(err.falls_back_to_empty());
    }

    #[tokio::test]
    async fn resolver_reports_transport_failure() {
        let fetcher = FakeFetcher::new().failing("carousel.json");
        let err = ManifestResolver::new(fetcher, "carousel.json")
            .resolve()
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Fetch { .. }));
        assert!(err.falls_back_to_empty());
    }
}
