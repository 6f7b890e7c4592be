//! Shared types passed between discovery, rendering and the controller.
//!
//! Discovery produces [`SlideDescriptor`]s once; everything downstream
//! treats them as immutable.

use serde::{Deserialize, Serialize};

/// One discovered carousel image.
///
/// `sequence_number` is 1-based: manifest position for manifest mode, the
/// probed candidate index for probe mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    pub image_url: String,
    pub alt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_height: Option<u32>,
    pub sequence_number: u32,
}

impl SlideDescriptor {
    /// Alt text used when a manifest entry or probe result carries none.
    pub fn default_alt_text(number: u32) -> String {
        format!("Carousel image {number}")
    }
}

/// One entry of the `carousel.json` manifest as written by the `manifest`
/// command. Reading is lenient and goes through
/// [`parse_manifest`](crate::resolve::manifest::parse_manifest) instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alt_text_is_one_based_label() {
        assert_eq!(SlideDescriptor::default_alt_text(1), "Carousel image 1");
    }

    #[test]
    fn manifest_entry_serializes_camel_case_and_skips_missing() {
        let entry = ManifestEntry {
            url: "a.png".to_string(),
            alt_text: Some("Dawn".to_string()),
            width: Some(800),
            height: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"url":"a.png","altText":"Dawn","width":800}"#);
    }
}
