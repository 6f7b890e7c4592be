//! # Slide Carousel
//!
//! Image carousel, slideshow and form widgets for small marketing sites.
//! The carousel finds its images on its own, either from a JSON manifest or
//! by probing a numbered naming scheme, and renders as plain HTML and CSS
//! that works without script. A headless controller adds gestures,
//! keyboard navigation, ARIA bookkeeping and neighbor prefetch on top.
//!
//! # Architecture
//!
//! ```text
//! Image Resolver  ──▶  DOM Builder  ──▶  Navigation Controller  ──▶  Surface
//!  (once, async)        (once)            (per input event)          (page)
//!                                              ▲
//!                                     Gesture Tracker
//! ```
//!
//! Data flows one way. The resolver runs once, the builder turns its slides
//! into markup and layout CSS, and the controller owns the current index
//! from then on. The gesture tracker only produces "next" or "previous"
//! signals for the controller.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolve`] | Slide discovery: manifest and probe strategies behind one trait |
//! | [`fetch`] | Resource access over HTTP or from a site root on disk |
//! | [`availability`] | Image existence probing and the per-URL availability memo |
//! | [`render`] | Carousel markup and per-count layout CSS using Maud |
//! | [`gesture`] | Press/drag/release swipe recognition |
//! | [`navigation`] | Pure index arithmetic and navigation plans |
//! | [`controller`] | Applies navigation to an injected presentation surface |
//! | [`throttle`] | Clock abstraction and the min-interval gate |
//! | [`widgets`] | Header menu, slideshow, reviews, booking and form submission |
//! | [`generate`] | Static page output with a fingerprinted stylesheet |
//! | [`inventory`] | `carousel.json` generation from a directory of images |
//! | [`config`] | `carousel.toml` loading, merging and validation |
//! | [`messages`] | Localized user-visible strings |
//! | [`naming`] | Probe URL template and the `NNN-name` filename convention |
//! | [`types`] | Slide and manifest entry types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Compute, Then Apply
//!
//! Every controller handler first derives a plan from the current state
//! ([`navigation::plan_navigation`]) and only then pushes it to the
//! [`controller::Surface`]. The plan is recomputed in full each time, so
//! repeating a navigation is harmless and the index math is testable
//! without a document.
//!
//! ## Injected Time
//!
//! Move throttling, announcement expiry and slideshow intervals read a
//! [`throttle::Clock`] instead of the system clock. Tests drive a
//! [`throttle::ManualClock`]; probe timeouts use tokio's paused test clock.
//!
//! ## Partial Results Beat No Results
//!
//! Probe mode races all candidates against one deadline. Whatever resolved
//! by then is the carousel, sorted by candidate index. Only an empty result
//! is an error, and only that error replaces the carousel with a message;
//! manifest problems degrade to an empty placeholder carousel instead.

pub mod availability;
pub mod config;
pub mod controller;
pub mod fetch;
pub mod generate;
pub mod gesture;
pub mod inventory;
pub mod messages;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod render;
pub mod resolve;
pub mod throttle;
pub mod types;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_helpers;
