//! Carousel markup and layout CSS.
//!
//! The carousel is driven by CSS alone: one radio input per slide, all
//! siblings of the slide track and the indicator strip. The checked radio
//! selects a `translateX` on the track through a `:checked ~` rule, and
//! indicators are `<label for>` elements, so clicking one checks its radio
//! without any script. The controller only adds gestures, keyboard, ARIA
//! bookkeeping and prefetch on top.
//!
//! ```text
//! div.carousel
//! ├── input#slide1 (checked)   ← one per slide
//! ├── input#slide2
//! ├── button.left-arrow / button.right-arrow
//! ├── div.slidescar            ← track, N × 100% wide
//! │   ├── div.slide            ← 100/N % of the track each
//! │   └── div.slide
//! └── div.navigation
//!     ├── label[for=slide1]
//!     └── label[for=slide2]
//! ```
//!
//! Rendering is a pure function of the slide list: building again yields
//! the same markup and CSS, so a host can replace previous content
//! wholesale.

use crate::messages::Messages;
use crate::types::SlideDescriptor;
use maud::{Markup, html};

/// Inline SVG shown in place of an image that failed to load.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;charset=utf-8,%3Csvg xmlns='http://www.w3.org/2000/svg' width='100%25' height='100%25' viewBox='0 0 160 90'%3E%3Crect fill='%23eeeeee' width='160' height='90'/%3E%3Cpath d='M60 60l15-18 10 12 8-9 17 15z' fill='%23bbbbbb'/%3E%3C/svg%3E";

/// Percent widths and offsets for `slide_count` slides.
///
/// An empty carousel lays out like a single slide (the placeholder).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub slide_count: usize,
    /// Track width, percent of the viewport.
    pub track_width: f64,
    /// Slide width, percent of the track.
    pub slide_width: f64,
}

impl Layout {
    pub fn for_count(slide_count: usize) -> Self {
        let n = slide_count.max(1) as f64;
        Self {
            slide_count,
            track_width: n * 100.0,
            slide_width: 100.0 / n,
        }
    }

    /// Slide width in percent of the viewport. Always 100 by construction.
    pub fn slide_viewport_width(&self) -> f64 {
        self.track_width * self.slide_width / 100.0
    }

    /// Track translation (percent of the track) that brings `index` into view.
    pub fn offset(&self, index: usize) -> f64 {
        let offset = -(index as f64 * self.slide_width);
        if offset == 0.0 { 0.0 } else { offset }
    }
}

/// Everything a host needs to (re)build the carousel.
#[derive(Debug, Clone)]
pub struct CarouselMarkup {
    /// Radio inputs, one per slide.
    pub controls: Markup,
    /// The `.slidescar` track with its slides.
    pub slides: Markup,
    /// The `.navigation` strip.
    pub indicators: Markup,
    /// Per-count layout rules.
    pub css: String,
    pub slide_count: usize,
    /// Rendered as the "no content" placeholder.
    pub is_empty: bool,
}

impl CarouselMarkup {
    /// Assemble the full `div.carousel` in sibling order.
    pub fn render(&self) -> Markup {
        html! {
            div.carousel aria-roledescription="carousel" {
                (self.controls)
                button.left-arrow type="button" aria-label="Previous slide" disabled[self.is_empty] { "‹" }
                button.right-arrow type="button" aria-label="Next slide" disabled[self.is_empty] { "›" }
                (self.slides)
                (self.indicators)
            }
        }
    }
}

/// Build the carousel for `slides`; the empty slice yields the placeholder.
pub fn build_carousel(slides: &[SlideDescriptor], messages: &Messages) -> CarouselMarkup {
    if slides.is_empty() {
        return build_empty(messages);
    }

    let total = slides.len();
    let controls = html! {
        @for i in 1..=total {
            input type="radio" name="carousel" id={ "slide" (i) } aria-label={ "Slide " (i) } checked[i == 1];
        }
    };

    let slides_markup = html! {
        div.slidescar {
            @for (idx, slide) in slides.iter().enumerate() {
                div.slide role="group" aria-roledescription="slide" aria-label={ (idx + 1) " of " (total) } {
                    img src=(slide.image_url)
                        alt=(slide.alt_text)
                        width=[slide.display_width]
                        height=[slide.display_height]
                        loading=(if idx == 0 { "eager" } else { "lazy" })
                        data-index=(idx);
                    noscript {
                        p.fallback-message { (messages.noscript) }
                    }
                }
            }
        }
    };

    let indicators = html! {
        div.navigation role="tablist" {
            @for i in 1..=total {
                label for={ "slide" (i) } tabindex="0" role="tab" aria-label={ "Go to slide " (i) } aria-selected=(if i == 1 { "true" } else { "false" }) {}
            }
        }
    };

    CarouselMarkup {
        controls,
        slides: slides_markup,
        indicators,
        css: carousel_css(total),
        slide_count: total,
        is_empty: false,
    }
}

fn build_empty(messages: &Messages) -> CarouselMarkup {
    CarouselMarkup {
        controls: html! {},
        slides: html! {
            div.slidescar {
                div.slide.slide-placeholder role="group" aria-roledescription="slide" aria-label="1 of 1" {
                    p.placeholder-message { (messages.no_content) }
                }
            }
        },
        indicators: html! {
            div.navigation role="tablist" {
                label.disabled role="tab" tabindex="-1" aria-disabled="true" aria-selected="true" aria-label="Slide 1" {}
            }
        },
        css: carousel_css(0),
        slide_count: 0,
        is_empty: true,
    }
}

/// Inline error replacing the whole carousel.
pub fn render_error(message: &str) -> Markup {
    html! {
        div.carousel {
            div.carousel-error role="alert" { (message) }
        }
    }
}

/// Layout rules for `count` slides.
///
/// Track and slide widths, one `translateX` per checked radio, the active
/// indicator, and a `prefers-contrast: more` variant of the active
/// indicator. `count == 0` emits only the single-slide widths.
pub fn carousel_css(count: usize) -> String {
    let layout = Layout::for_count(count);
    let mut css = format!(
        ".slidescar {{\n    width: {}%;\n}}\n\n.slide {{\n    width: {}%;\n}}\n",
        percent(layout.track_width),
        percent(layout.slide_width),
    );

    for i in 1..=count {
        css.push_str(&format!(
            "\n#slide{i}:checked ~ .slidescar {{\n    transform: translateX({}%);\n}}\n",
            percent(layout.offset(i - 1)),
        ));
    }

    for i in 1..=count {
        css.push_str(&format!(
            "\n#slide{i}:checked ~ .navigation label:nth-child({i}) {{\n    background-color: white;\n    transform: scale(1.5);\n}}\n",
        ));
    }

    if count > 0 {
        css.push_str("\n@media (prefers-contrast: more) {\n");
        for i in 1..=count {
            css.push_str(&format!(
                "    #slide{i}:checked ~ .navigation label:nth-child({i}) {{\n        background-color: white;\n        border: 2px solid black;\n    }}\n",
            ));
        }
        css.push_str("}\n");
    }

    css
}

/// Percent value with at most four decimals and no trailing zeros.
fn percent(value: f64) -> String {
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
