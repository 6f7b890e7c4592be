//! Carousel navigation controller.
//!
//! Owns the slide list, the current index and the gesture tracker, and
//! drives an injected [`Surface`] (the page, or a recording fake in tests).
//! Every handler follows the same pattern: compute a pure plan from the
//! current state, then apply it. Derived state (indicator selection,
//! announcement) is recomputed in full on each navigation, so calling a
//! handler again with the same input is harmless.
//!
//! ## Lifecycle
//!
//! | Mount input | Phase | Presentation |
//! |---|---|---|
//! | `Ok(slides)`, non-empty | `Ready` | full carousel, index 0 selected |
//! | `Ok([])`, or a recoverable [`DiscoveryError`] | `Empty` | placeholder slide, one disabled indicator |
//! | `Err(NothingFound)` | `Failed` | localized inline error |
//!
//! Only `Ready` reacts to input.

use crate::availability::AvailabilityCache;
use crate::config::CarouselConfig;
use crate::gesture::{GestureTracker, PointerEvent, SwipeDirection};
use crate::messages::Messages;
use crate::navigation::{CarouselState, NavigationPlan, plan_navigation};
use crate::render::{CarouselMarkup, PLACEHOLDER_IMAGE, build_carousel};
use crate::resolve::DiscoveryError;
use crate::throttle::Clock;
use crate::types::SlideDescriptor;
use std::time::Duration;
use tracing::{debug, warn};

pub use crate::gesture::Cursor;

/// Presentation side effects the controller needs from its host.
pub trait Surface {
    /// Replace the carousel content with freshly built markup.
    fn mount(&mut self, carousel: &CarouselMarkup);
    /// Replace the carousel with an inline error message.
    fn show_error(&mut self, message: &str);
    /// Check the selection radio of slide `index`.
    fn check_selection(&mut self, index: usize);
    fn set_indicator_selected(&mut self, index: usize, selected: bool);
    /// Post a polite live-region announcement.
    fn announce(&mut self, id: u64, message: &str);
    fn retract_announcement(&mut self, id: u64);
    /// Start loading `url` in the background.
    fn prefetch(&mut self, url: &str);
    fn set_cursor(&mut self, cursor: Cursor);
    /// Swap the `<img>` of slide `index` for `src` with a new accessible label.
    fn replace_image(&mut self, index: usize, src: &str, alt: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Other,
}

/// What had keyboard focus when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// `<input>` or `<textarea>`; arrows belong to the field.
    TextInput,
    Indicator(usize),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Ready,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy)]
struct PendingAnnouncement {
    id: u64,
    expires_at: Duration,
}

pub struct CarouselController<S, C> {
    surface: S,
    clock: C,
    cache: AvailabilityCache,
    messages: &'static Messages,
    announce_for: Duration,
    state: CarouselState,
    tracker: GestureTracker,
    phase: Phase,
    /// Latest announcement still on screen. Posting a new one retracts it.
    announcement: Option<PendingAnnouncement>,
    next_announcement: u64,
}

impl<S: Surface, C: Clock> CarouselController<S, C> {
    pub fn new(surface: S, clock: C, config: &CarouselConfig, cache: AvailabilityCache) -> Self {
        Self {
            surface,
            clock,
            cache,
            messages: Messages::for_locale(config.locale),
            announce_for: config.navigation.announce_for(),
            state: CarouselState::default(),
            tracker: GestureTracker::new(&config.gesture),
            phase: Phase::Unmounted,
            announcement: None,
            next_announcement: 0,
        }
    }

    /// Build and mount the carousel from a discovery outcome.
    pub fn mount(&mut self, discovered: Result<Vec<SlideDescriptor>, DiscoveryError>) {
        let slides = match discovered {
            Ok(slides) => slides,
            Err(e) if e.falls_back_to_empty() => {
                warn!(error = %e, "slide discovery failed, showing empty carousel");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "no carousel images");
                self.state = CarouselState::default();
                self.phase = Phase::Failed;
                self.surface.show_error(self.messages.no_images);
                return;
            }
        };

        let markup = build_carousel(&slides, self.messages);
        self.surface.mount(&markup);
        self.state = CarouselState::new(slides);

        if self.state.is_empty() {
            self.phase = Phase::Empty;
            return;
        }
        self.phase = Phase::Ready;
        for i in 0..self.state.len() {
            self.surface.set_indicator_selected(i, i == 0);
        }
        debug!(slides = self.state.len(), "carousel mounted");
    }

    /// Navigate to `target`, wrapping into range. No-op unless ready.
    pub fn go_to_slide(&mut self, target: isize) {
        if self.phase != Phase::Ready {
            return;
        }
        let Some(plan) = plan_navigation(target, self.state.len(), self.messages) else {
            return;
        };
        self.surface.check_selection(plan.index);
        self.apply(&plan);
        self.prefetch_neighbors(&plan);
    }

    pub fn handle_next(&mut self) {
        self.go_to_slide(self.state.current_index as isize + 1);
    }

    pub fn handle_prev(&mut self) {
        self.go_to_slide(self.state.current_index as isize - 1);
    }

    /// Returns `true` when the key was consumed (default should be prevented).
    pub fn handle_key(&mut self, key: Key, focus: FocusTarget) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        match (key, focus) {
            (_, FocusTarget::TextInput) => false,
            (Key::ArrowLeft, _) => {
                self.handle_prev();
                true
            }
            (Key::ArrowRight, _) => {
                self.handle_next();
                true
            }
            (Key::Enter | Key::Space, FocusTarget::Indicator(index)) => {
                self.go_to_slide(index as isize);
                true
            }
            _ => false,
        }
    }

    pub fn handle_indicator_click(&mut self, index: usize) {
        self.go_to_slide(index as isize);
    }

    /// The user checked radio `index` directly (label click handled by the
    /// browser). The radio is already checked, so only derived state is
    /// refreshed.
    pub fn handle_selection_change(&mut self, index: usize) {
        if self.phase != Phase::Ready || index >= self.state.len() {
            return;
        }
        if let Some(plan) = plan_navigation(index as isize, self.state.len(), self.messages) {
            self.apply(&plan);
        }
    }

    /// Feed a pointer event. Returns whether the default action should be
    /// prevented.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        let response = self.tracker.handle(event, self.clock.now());
        if let Some(cursor) = response.cursor() {
            self.surface.set_cursor(cursor);
        }
        match response.swipe() {
            Some(SwipeDirection::Next) => self.handle_next(),
            Some(SwipeDirection::Prev) => self.handle_prev(),
            None => {}
        }
        response.prevent_default()
    }

    /// Image of slide `index` failed to load.
    pub fn handle_image_error(&mut self, index: usize) {
        let Some(slide) = self.state.slides.get(index) else {
            return;
        };
        warn!(url = %slide.image_url, index, "carousel image failed to load");
        self.cache.record(&slide.image_url, false);
        self.surface
            .replace_image(index, PLACEHOLDER_IMAGE, self.messages.image_failed);
    }

    /// Retract the announcement once its display time has elapsed.
    ///
    /// Hosts call this from their timer. Without ticks the last
    /// announcement simply stays until the next navigation replaces it.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        if let Some(pending) = self.announcement.take_if(|a| a.expires_at <= now) {
            self.surface.retract_announcement(pending.id);
        }
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.state.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn apply(&mut self, plan: &NavigationPlan) {
        self.state.current_index = plan.index;
        for (i, &selected) in plan.indicator_selected.iter().enumerate() {
            self.surface.set_indicator_selected(i, selected);
        }

        if let Some(previous) = self.announcement.take() {
            self.surface.retract_announcement(previous.id);
        }
        let id = self.next_announcement;
        self.next_announcement += 1;
        self.surface.announce(id, &plan.announcement);
        self.announcement = Some(PendingAnnouncement {
            id,
            expires_at: self.clock.now() + self.announce_for,
        });
        debug!(index = plan.index, "navigated");
    }

    fn prefetch_neighbors(&mut self, plan: &NavigationPlan) {
        for &i in &plan.prefetch {
            let url = &self.state.slides[i].image_url;
            if self.cache.contains(url) {
                continue;
            }
            // Optimistic; a later load error overwrites it.
            self.cache.record(url, true);
            self.surface.prefetch(url);
        }
    }
}
