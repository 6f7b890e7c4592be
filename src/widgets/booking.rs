//! Booking form helpers: bookable time slots and the earliest date.

use chrono::{Local, NaiveDate};
use maud::{Markup, html};

const FIRST_HOUR: u32 = 7;
const LAST_HOUR: u32 = 19;

/// `HH:MM` slots every 30 minutes from 07:00 to 19:30.
pub fn time_slots() -> Vec<String> {
    (FIRST_HOUR..=LAST_HOUR)
        .flat_map(|h| [format!("{h:02}:00"), format!("{h:02}:30")])
        .collect()
}

/// `min` attribute value for the date input: `today` as `YYYY-MM-DD`.
pub fn min_date(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `<option>` elements for the time select.
pub fn render_time_options() -> Markup {
    html! {
        @for slot in time_slots() {
            option value=(slot) { (slot) }
        }
    }
}

/// Date and time inputs of the booking form.
pub fn render_booking_fields(today: NaiveDate) -> Markup {
    html! {
        label for="date" { "Date" }
        input id="date" type="date" name="date" min=(min_date(today)) required;
        label for="timings" { "Time" }
        select id="timings" name="time" required {
            (render_time_options())
        }
    }
}

/// Booking form posting to the forms endpoint.
pub fn render_booking_form(endpoint: &str, today: NaiveDate) -> Markup {
    html! {
        section id="booking" aria-label="Book an appointment" {
            h2 { "Book an appointment" }
            form.booking-form action=(endpoint) method="post" enctype="multipart/form-data" {
                label for="name" { "Name" }
                input id="name" type="text" name="name" autocomplete="name" required;
                label for="email" { "Email" }
                input id="email" type="email" name="email" autocomplete="email" required;
                (render_booking_fields(today))
                button type="submit" { "Book" }
                p.form-message role="status" aria-live="polite" {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_cover_opening_hours_in_half_hours() {
        let slots = time_slots();
        assert_eq!(slots.len(), 26);
        assert_eq!(slots.first().map(String::as_str), Some("07:00"));
        assert_eq!(slots[1], "07:30");
        assert_eq!(slots[6], "10:00");
        assert_eq!(slots.last().map(String::as_str), Some("19:30"));
    }

    #[test]
    fn min_date_is_iso() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(min_date(day), "2024-03-07");
    }

    #[test]
    fn fields_render_options_and_min() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let html = render_booking_fields(day).into_string();
        assert!(html.contains(r#"min="2025-12-31""#));
        assert_eq!(html.matches("<option").count(), 26);
        assert!(html.contains(r#"<option value="19:30">19:30</option>"#));
    }

    #[test]
    fn booking_form_posts_multipart_to_endpoint() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let html = render_booking_form("https://forms.test/submit", today).into_string();
        assert!(html.contains(r#"action="https://forms.test/submit""#));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"min="2026-03-09""#));
        assert_eq!(html.matches("<option").count(), 26);
    }
}
