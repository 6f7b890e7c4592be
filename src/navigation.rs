//! Pure navigation arithmetic.
//!
//! Everything here is a function of (target, slide count). The controller
//! computes a [`NavigationPlan`] and then applies it to its surface, so
//! the index math is testable without any presentation layer.

use crate::messages::Messages;
use crate::types::SlideDescriptor;

/// Wrap `target` into `[0, count)`. `None` when there are no slides.
pub fn wrap_index(target: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(target.rem_euclid(count as isize) as usize)
}

/// Previous and next indices around `index`, with wraparound, deduplicated
/// and excluding `index` itself. Two slides have one neighbor; one slide
/// has none.
pub fn neighbors(index: usize, count: usize) -> Vec<usize> {
    if count < 2 {
        return Vec::new();
    }
    let prev = (index + count - 1) % count;
    let next = (index + 1) % count;
    if prev == next {
        vec![prev]
    } else {
        vec![prev, next]
    }
}

/// Everything a navigation changes, derived from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPlan {
    pub index: usize,
    /// `aria-selected` for every indicator, in order.
    pub indicator_selected: Vec<bool>,
    pub announcement: String,
    /// Neighbor slide indices to prefetch.
    pub prefetch: Vec<usize>,
}

pub fn plan_navigation(target: isize, count: usize, messages: &Messages) -> Option<NavigationPlan> {
    let index = wrap_index(target, count)?;
    Some(NavigationPlan {
        index,
        indicator_selected: (0..count).map(|i| i == index).collect(),
        announcement: messages.announcement(index + 1, count),
        prefetch: neighbors(index, count),
    })
}

/// Slides plus the active index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselState {
    pub slides: Vec<SlideDescriptor>,
    pub current_index: usize,
}

impl CarouselState {
    pub fn new(slides: Vec<SlideDescriptor>) -> Self {
        Self {
            slides,
            current_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> Option<&SlideDescriptor> {
        self.slides.get(self.current_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;

    #[test]
    fn wraps_both_directions_for_every_count() {
        for n in 1..=12usize {
            assert_eq!(wrap_index(-1, n), Some(n - 1));
            assert_eq!(wrap_index(n as isize, n), Some(0));
            assert_eq!(wrap_index(-(n as isize) - 1, n), Some(n - 1));
            assert_eq!(wrap_index(2 * n as isize + 1, n), Some(1 % n));
        }
    }

    #[test]
    fn wrap_of_empty_is_none() {
        assert_eq!(wrap_index(0, 0), None);
        assert_eq!(wrap_index(-1, 0), None);
    }

    #[test]
    fn neighbors_wrap_and_dedupe() {
        assert_eq!(neighbors(0, 5), [4, 1]);
        assert_eq!(neighbors(4, 5), [3, 0]);
        assert_eq!(neighbors(0, 2), [1]);
        assert!(neighbors(0, 1).is_empty());
        assert!(neighbors(0, 0).is_empty());
    }

    #[test]
    fn plan_selects_exactly_one_indicator() {
        let plan = plan_navigation(7, 4, Messages::for_locale(Locale::En)).unwrap();
        assert_eq!(plan.index, 3);
        assert_eq!(plan.indicator_selected, [false, false, false, true]);
        assert_eq!(plan.announcement, "Slide 4 of 4");
        assert_eq!(plan.prefetch, [2, 0]);
    }

    #[test]
    fn plan_for_empty_is_none() {
        assert!(plan_navigation(0, 0, Messages::for_locale(Locale::En)).is_none());
    }
}
