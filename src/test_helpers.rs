//! Shared test utilities for the slide-carousel test suite.
//!
//! - [`FakeFetcher`]: in-memory [`Fetcher`] with per-URL responses, latency
//!   and request counting. Unknown URLs answer 404.
//! - [`RecordingSurface`]: a [`Surface`] that logs every presentation call.
//! - Slide and image builders.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fetcher = FakeFetcher::new()
//!     .with("img/1.png", FetchResponse::ok(png_bytes(4, 3)))
//!     .with_delay("img/2.png", FetchResponse::ok(png_bytes(4, 3)), Duration::from_secs(9));
//!
//! let mut controller = ready_controller(slides(3));
//! controller.handle_next();
//! assert!(controller.surface().calls.contains(&SurfaceCall::CheckSelection(1)));
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor as IoCursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::availability::AvailabilityCache;
use crate::config::CarouselConfig;
use crate::controller::{CarouselController, Cursor, Surface};
use crate::fetch::{FetchError, FetchResponse, Fetcher};
use crate::render::CarouselMarkup;
use crate::throttle::ManualClock;
use crate::types::SlideDescriptor;

// =========================================================================
// Fetcher
// =========================================================================

#[derive(Debug, Clone)]
enum Route {
    Respond(FetchResponse),
    Fail,
}

#[derive(Debug, Default)]
struct FakeState {
    routes: HashMap<String, (Route, Duration)>,
    requests: HashMap<String, usize>,
}

/// In-memory fetcher. Clones share routes and request counters.
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    state: Arc<Mutex<FakeState>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: &str, response: FetchResponse) -> Self {
        self.with_delay(url, response, Duration::ZERO)
    }

    /// Respond after `delay` (tokio time, so paused-clock tests are instant).
    pub fn with_delay(self, url: &str, response: FetchResponse, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(url.to_string(), (Route::Respond(response), delay));
        self
    }

    /// Fail with a transport error.
    pub fn failing(self, url: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(url.to_string(), (Route::Fail, Duration::ZERO));
        self
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        self.state.lock().unwrap().requests.values().sum()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let (route, delay) = {
            let mut state = self.state.lock().unwrap();
            *state.requests.entry(url.to_string()).or_default() += 1;
            state
                .routes
                .get(url)
                .cloned()
                .unwrap_or((Route::Respond(FetchResponse::not_found()), Duration::ZERO))
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match route {
            Route::Respond(response) => Ok(response),
            Route::Fail => Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

/// Encode a blank `width`×`height` PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut buf = IoCursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

// =========================================================================
// Surface
// =========================================================================

/// One presentation call, in the order the controller made it.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Mount { slide_count: usize, is_empty: bool },
    ShowError(String),
    CheckSelection(usize),
    IndicatorSelected(usize, bool),
    Announce(u64, String),
    Retract(u64),
    Prefetch(String),
    SetCursor(Cursor),
    ReplaceImage { index: usize, alt: String },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub mounted: Option<CarouselMarkup>,
}

impl RecordingSurface {
    pub fn prefetched(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Prefetch(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn announcements(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Announce(_, text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn mount(&mut self, carousel: &CarouselMarkup) {
        self.calls.push(SurfaceCall::Mount {
            slide_count: carousel.slide_count,
            is_empty: carousel.is_empty,
        });
        self.mounted = Some(carousel.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(SurfaceCall::ShowError(message.to_string()));
    }

    fn check_selection(&mut self, index: usize) {
        self.calls.push(SurfaceCall::CheckSelection(index));
    }

    fn set_indicator_selected(&mut self, index: usize, selected: bool) {
        self.calls.push(SurfaceCall::IndicatorSelected(index, selected));
    }

    fn announce(&mut self, id: u64, message: &str) {
        self.calls.push(SurfaceCall::Announce(id, message.to_string()));
    }

    fn retract_announcement(&mut self, id: u64) {
        self.calls.push(SurfaceCall::Retract(id));
    }

    fn prefetch(&mut self, url: &str) {
        self.calls.push(SurfaceCall::Prefetch(url.to_string()));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.calls.push(SurfaceCall::SetCursor(cursor));
    }

    fn replace_image(&mut self, index: usize, _src: &str, alt: &str) {
        self.calls.push(SurfaceCall::ReplaceImage {
            index,
            alt: alt.to_string(),
        });
    }
}

// =========================================================================
// Builders
// =========================================================================

/// `n` slides `img/1.jpg`..`img/n.jpg`.
pub fn slides(n: u32) -> Vec<SlideDescriptor> {
    (1..=n)
        .map(|i| SlideDescriptor {
            image_url: format!("img/{i}.jpg"),
            alt_text: SlideDescriptor::default_alt_text(i),
            display_width: None,
            display_height: None,
            sequence_number: i,
        })
        .collect()
}

pub type TestController = CarouselController<RecordingSurface, ManualClock>;

/// Controller with default config, mounted on `slides`, recorded calls
/// cleared. Returns the clock and cache handles alongside.
pub fn mounted_controller(
    slides: Vec<SlideDescriptor>,
) -> (TestController, ManualClock, AvailabilityCache) {
    let clock = ManualClock::new();
    let cache = AvailabilityCache::new();
    let mut controller = CarouselController::new(
        RecordingSurface::default(),
        clock.clone(),
        &CarouselConfig::default(),
        cache.clone(),
    );
    controller.mount(Ok(slides));
    controller.surface_mut().clear();
    (controller, clock, cache)
}

/// Shorthand for [`mounted_controller`] when only the controller matters.
pub fn ready_controller(slides: Vec<SlideDescriptor>) -> TestController {
    mounted_controller(slides).0
}
