//! Static page generation.
//!
//! Renders the discovered slides into a page that works without any
//! script: indicators are `<label for>` elements toggling the selection
//! radios, and the generated stylesheet translates the track.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                # header, carousel, reviews, booking form
//! └── carousel.3f9a1c2b.css     # base styles + per-count rules, content-hashed
//! ```
//!
//! The stylesheet name carries the first 8 hex digits of its SHA-256, so a
//! different slide count (different rules) yields a different file and
//! caches never serve stale layout.
//!
//! Discovery outcomes go through the same [`CarouselController::mount`] the
//! interactive page uses, so fallback rules (empty state vs. inline error)
//! are identical in both.

use crate::availability::AvailabilityCache;
use crate::config::CarouselConfig;
use crate::controller::{CarouselController, Cursor, Phase, Surface};
use crate::render::{CarouselMarkup, render_error};
use crate::resolve::DiscoveryError;
use crate::throttle::SystemClock;
use crate::types::SlideDescriptor;
use crate::widgets::booking::{self, render_booking_form};
use crate::widgets::header::HeaderMenu;
use crate::widgets::reviews::{Review, render_reviews_section};
use maud::{DOCTYPE, Markup, html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const CSS_STATIC: &str = include_str!("../static/carousel.css");

/// Viewport assumed for the initial header state of a static page.
const STATIC_VIEWPORT_WIDTH: u32 = 1280;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a build wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSite {
    pub index: PathBuf,
    pub stylesheet: PathBuf,
    pub slide_count: usize,
    pub review_count: usize,
    pub phase: Phase,
}

/// Captures what the controller mounts, as static content.
#[derive(Debug, Default)]
struct PageSurface {
    carousel: Option<Markup>,
    css: String,
}

impl Surface for PageSurface {
    fn mount(&mut self, carousel: &CarouselMarkup) {
        self.carousel = Some(carousel.render());
        self.css = carousel.css.clone();
    }

    fn show_error(&mut self, message: &str) {
        self.carousel = Some(render_error(message));
        self.css.clear();
    }

    // Initial selection is already encoded in the markup.
    fn check_selection(&mut self, _index: usize) {}
    fn set_indicator_selected(&mut self, _index: usize, _selected: bool) {}
    fn announce(&mut self, _id: u64, _message: &str) {}
    fn retract_announcement(&mut self, _id: u64) {}
    fn prefetch(&mut self, _url: &str) {}
    fn set_cursor(&mut self, _cursor: Cursor) {}
    fn replace_image(&mut self, _index: usize, _src: &str, _alt: &str) {}
}

/// Full stylesheet: base styles followed by the per-count rules.
pub fn stylesheet(generated_css: &str) -> String {
    format!("{}\n\n{}", CSS_STATIC, generated_css)
}

/// `carousel.<hash>.css`, hash = first 8 hex digits of SHA-256.
pub fn fingerprinted_name(css: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(css.as_bytes()));
    format!("carousel.{}.css", &digest[..8])
}

/// Render the page for a discovery outcome and write it to `output_dir`.
pub fn generate(
    discovered: Result<Vec<SlideDescriptor>, DiscoveryError>,
    reviews: &[Review],
    config: &CarouselConfig,
    output_dir: &Path,
) -> Result<GeneratedSite, GenerateError> {
    let mut controller = CarouselController::new(
        PageSurface::default(),
        SystemClock::new(),
        config,
        AvailabilityCache::new(),
    );
    controller.mount(discovered);
    let phase = controller.phase();
    let slide_count = controller.slide_count();
    let surface = controller.into_surface();

    let css = stylesheet(&surface.css);
    let css_name = fingerprinted_name(&css);
    let header = HeaderMenu::new(&config.header, STATIC_VIEWPORT_WIDTH);
    let carousel = surface.carousel.unwrap_or_else(|| html! {});
    let sections = html! {
        (render_reviews_section(reviews))
        (render_booking_form(&config.forms.endpoint, booking::today()))
    };
    let page = render_page(&header, carousel, sections, &css_name);

    fs::create_dir_all(output_dir)?;
    let stylesheet_path = output_dir.join(&css_name);
    fs::write(&stylesheet_path, css)?;
    let index_path = output_dir.join("index.html");
    fs::write(&index_path, page.into_string())?;
    info!(
        output = %output_dir.display(),
        slides = slide_count,
        reviews = reviews.len(),
        "site generated"
    );

    Ok(GeneratedSite {
        index: index_path,
        stylesheet: stylesheet_path,
        slide_count,
        review_count: reviews.len(),
        phase,
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css_href: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(css_href);
            }
            body {
                (content)
            }
        }
    }
}

fn render_page(header: &HeaderMenu, carousel: Markup, sections: Markup, css_href: &str) -> Markup {
    let nav = html! {
        a href="#carousel-section" { "Gallery" }
        a href="#reviews" { "Reviews" }
        a href="#booking" { "Booking" }
    };
    let content = html! {
        (header.render(nav))
        main {
            section id="carousel-section" aria-label="Gallery" {
                (carousel)
            }
            (sections)
        }
    };
    base_document("Gallery", css_href, content)
}
