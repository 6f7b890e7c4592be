//! Page widgets that live next to the carousel.
//!
//! | Module | Widget |
//! |--------|--------|
//! | [`header`] | Collapsible navigation menu |
//! | [`slideshow`] | Auto-advancing hero and review slideshows |
//! | [`reviews`] | Review data, star rating and the follow-up prompt |
//! | [`booking`] | Booking form time slots and date bounds |
//! | [`forms`] | Form submission to the forms endpoint |
//!
//! Like the controller, each widget is plain state plus methods that say
//! what the page should show; none touch a document directly.

pub mod booking;
pub mod forms;
pub mod header;
pub mod reviews;
pub mod slideshow;
