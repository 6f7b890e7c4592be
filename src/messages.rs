//! User-visible strings in the supported locales.

use serde::{Deserialize, Serialize};

/// Language of user-visible messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

/// Message catalog for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown when no image could be discovered at all.
    pub no_images: &'static str,
    /// Placeholder slide text for the empty state.
    pub no_content: &'static str,
    /// Accessible label of an image that failed to load.
    pub image_failed: &'static str,
    /// `<noscript>` fallback inside every slide.
    pub noscript: &'static str,
    /// Live-region template; `{current}` and `{total}` are substituted.
    pub announce: &'static str,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::En => &EN,
            Locale::De => &DE,
        }
    }

    pub fn announcement(&self, current: usize, total: usize) -> String {
        self.announce
            .replace("{current}", &current.to_string())
            .replace("{total}", &total.to_string())
    }
}

static EN: Messages = Messages {
    no_images: "No images found for the carousel.",
    no_content: "No images available yet.",
    image_failed: "Image failed to load",
    noscript: "Please enable JavaScript to view the carousel.",
    announce: "Slide {current} of {total}",
};

static DE: Messages = Messages {
    no_images: "Keine Bilder für das Karussell gefunden.",
    no_content: "Noch keine Bilder vorhanden.",
    image_failed: "Bild konnte nicht geladen werden",
    noscript: "Bitte aktivieren Sie JavaScript, um das Karussell anzuzeigen.",
    announce: "Bild {current} von {total}",
};
