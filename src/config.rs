//! Carousel configuration module.
//!
//! Handles loading, validating, and merging `carousel.toml`. Stock defaults
//! are serialized to a TOML table and user values are merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! locale = "en"                         # "en" or "de"
//!
//! [discovery]
//! mode = "manifest"                     # "manifest" or "probe"
//! manifest_url = "assets/carousel.json"
//!
//! [discovery.probe]
//! base_url = "assets/carousel/"
//! extensions = ["webp", "jpg", "jpeg", "png"]
//! max_index = 20
//! timeout_ms = 5000
//!
//! [gesture]
//! swipe_threshold = 30.0
//! scroll_lock_threshold = 10.0
//! move_interval_ms = 16
//!
//! [navigation]
//! announce_ms = 1000
//!
//! [slideshow]
//! autoplay = true
//! interval_ms = 10000
//!
//! [header]
//! collapse_below = 1024
//! reset_above = 750
//!
//! [reviews]
//! url = "assets/reviews.json"
//!
//! [forms]
//! endpoint = "https://api.staticforms.xyz/submit"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::messages::Locale;
use crate::naming::is_image_extension;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILENAME: &str = "carousel.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `carousel.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Language of user-visible messages.
    pub locale: Locale,
    /// How the slide images are found.
    pub discovery: DiscoveryConfig,
    /// Swipe recognition settings.
    pub gesture: GestureConfig,
    /// Navigation side effects.
    pub navigation: NavigationConfig,
    /// Auto-advancing hero/review slideshows.
    pub slideshow: SlideshowConfig,
    /// Collapsible header breakpoints.
    pub header: HeaderConfig,
    /// Customer reviews shown on the page.
    pub reviews: ReviewsConfig,
    /// Contact form submission.
    pub forms: FormsConfig,
}

impl CarouselConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probe = &self.discovery.probe;
        match self.discovery.mode {
            DiscoveryMode::Manifest if self.discovery.manifest_url.trim().is_empty() => {
                return Err(ConfigError::Validation(
                    "discovery.manifest_url must not be empty in manifest mode".into(),
                ));
            }
            DiscoveryMode::Probe if probe.extensions.is_empty() => {
                return Err(ConfigError::Validation(
                    "discovery.probe.extensions must not be empty".into(),
                ));
            }
            _ => {}
        }
        if let Some(ext) = probe.extensions.iter().find(|e| !is_image_extension(e)) {
            return Err(ConfigError::Validation(format!(
                "discovery.probe.extensions: unsupported image format {ext:?}"
            )));
        }
        if probe.max_index == 0 {
            return Err(ConfigError::Validation(
                "discovery.probe.max_index must be at least 1".into(),
            ));
        }
        if probe.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "discovery.probe.timeout_ms must be non-zero".into(),
            ));
        }
        if !(self.gesture.swipe_threshold > 0.0) || !(self.gesture.scroll_lock_threshold > 0.0) {
            return Err(ConfigError::Validation(
                "gesture thresholds must be positive".into(),
            ));
        }
        if self.slideshow.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "slideshow.interval_ms must be non-zero".into(),
            ));
        }
        if self.forms.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "forms.endpoint must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Image discovery strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Read a declarative JSON list of slides.
    #[default]
    Manifest,
    /// Probe `<base><index>.<ext>` candidates.
    Probe,
}

/// Image discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub mode: DiscoveryMode,
    /// Manifest location, relative to the site root or absolute.
    pub manifest_url: String,
    pub probe: ProbeConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            mode: DiscoveryMode::default(),
            manifest_url: "assets/carousel.json".to_string(),
            probe: ProbeConfig::default(),
        }
    }
}

/// Probe mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// URL prefix the candidate index is appended to.
    pub base_url: String,
    /// Extensions tried per index, in order; the first hit wins.
    pub extensions: Vec<String>,
    /// Highest candidate index probed (range is `1..=max_index`).
    pub max_index: u32,
    /// Overall deadline for the whole probe phase.
    pub timeout_ms: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "assets/carousel/".to_string(),
            extensions: ["webp", "jpg", "jpeg", "png"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_index: 20,
            timeout_ms: 5000,
        }
    }
}

/// Swipe recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Net horizontal displacement a release must exceed to navigate.
    pub swipe_threshold: f64,
    /// Horizontal displacement after which touch moves stop page scrolling.
    pub scroll_lock_threshold: f64,
    /// Minimum interval between handled move events.
    pub move_interval_ms: u64,
}

impl GestureConfig {
    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 30.0,
            scroll_lock_threshold: 10.0,
            move_interval_ms: 16,
        }
    }
}

/// Navigation side effect settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// How long a position announcement stays in the live region.
    pub announce_ms: u64,
}

impl NavigationConfig {
    pub fn announce_for(&self) -> Duration {
        Duration::from_millis(self.announce_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { announce_ms: 1000 }
    }
}

/// Auto-advancing slideshow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowConfig {
    pub autoplay: bool,
    pub interval_ms: u64,
}

impl SlideshowConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: 10_000,
        }
    }
}

/// Collapsible header breakpoints, in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Viewports narrower than this start with the menu collapsed.
    pub collapse_below: u32,
    /// Viewports wider than this drop the inline menu width on resize.
    pub reset_above: u32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            collapse_below: 1024,
            reset_above: 750,
        }
    }
}

/// Customer review source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewsConfig {
    /// JSON array of `{ rating?, text?, author? }`, relative to the site root.
    pub url: String,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            url: "assets/reviews.json".to_string(),
        }
    }
}

/// Contact form submission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
    pub endpoint: String,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.staticforms.xyz/submit".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CarouselConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `carousel.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CarouselConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CarouselConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `carousel.toml` in the given directory, on top of the
/// stock defaults.
pub fn load_config(dir: &Path) -> Result<CarouselConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `carousel.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Slide Carousel Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Language of user-visible messages ("en" or "de").
locale = "en"

# ---------------------------------------------------------------------------
# Image discovery
# ---------------------------------------------------------------------------
[discovery]
# "manifest": read a JSON array of { url, altText?, width?, height? }.
# "probe":    try <base_url><index>.<extension> for every index and extension.
mode = "manifest"

# Manifest location, relative to the site root or an absolute URL.
manifest_url = "assets/carousel.json"

[discovery.probe]
# Prefix the candidate index is appended to.
base_url = "assets/carousel/"

# Extensions tried for each index, in order. The first one found wins.
extensions = ["webp", "jpg", "jpeg", "png"]

# Candidates 1..=max_index are probed concurrently.
max_index = 20

# Overall deadline. Images found before it are kept; late ones are ignored.
timeout_ms = 5000

# ---------------------------------------------------------------------------
# Gestures
# ---------------------------------------------------------------------------
[gesture]
# A drag must move further than this (px) horizontally to change slides.
swipe_threshold = 30.0

# Touch drags stop page scrolling once they move this far horizontally
# and more horizontally than vertically.
scroll_lock_threshold = 10.0

# Move events closer together than this are dropped.
move_interval_ms = 16

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Lifetime of the "Slide i of N" screen reader announcement.
announce_ms = 1000

# ---------------------------------------------------------------------------
# Hero and review slideshows
# ---------------------------------------------------------------------------
[slideshow]
autoplay = true
interval_ms = 10000

# ---------------------------------------------------------------------------
# Header
# ---------------------------------------------------------------------------
[header]
# Viewports narrower than this start with the menu collapsed.
collapse_below = 1024

# Resizing wider than this clears the inline menu width.
reset_above = 750

# ---------------------------------------------------------------------------
# Reviews
# ---------------------------------------------------------------------------
[reviews]
# JSON array of { rating?, text?, author? }. A missing file means no reviews.
url = "assets/reviews.json"

# ---------------------------------------------------------------------------
# Forms
# ---------------------------------------------------------------------------
[forms]
endpoint = "https://api.staticforms.xyz/submit"
"##
}
