//! Customer reviews: data, star picker, follow-up prompt and slide markup.
//!
//! Review documents are JSON arrays of `{ rating?, text?, author? }`.
//! Ratings are clamped to `0..=5` and floored; a missing or non-numeric
//! rating counts as 0.

use crate::fetch::{FetchError, Fetcher};
use maud::{Markup, html};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const MAX_RATING: u8 = 5;

/// Ratings below this ask for private feedback instead of a public review.
pub const PUBLIC_REVIEW_MIN: u8 = 4;

const MAPS_URL: &str = "https://maps.app.goo.gl/";

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("invalid JSON in reviews: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reviews document is not a JSON array")]
    NotAnArray,
    #[error("could not fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub rating: u8,
    pub text: String,
    pub author: String,
}

pub fn parse_reviews(bytes: &[u8]) -> Result<Vec<Review>, ReviewError> {
    let document: Value = serde_json::from_slice(bytes)?;
    let Value::Array(items) = document else {
        return Err(ReviewError::NotAnArray);
    };
    Ok(items
        .iter()
        .map(|item| Review {
            rating: item.get("rating").map(clamp_rating).unwrap_or(0),
            text: string_field(item, "text"),
            author: string_field(item, "author"),
        })
        .collect())
}

/// Fetch and parse the reviews document. A 404 means the site has no
/// reviews and yields an empty list.
pub async fn load_reviews<F>(fetcher: &F, url: &str) -> Result<Vec<Review>, ReviewError>
where
    F: Fetcher + ?Sized,
{
    let response = fetcher.get(url).await.map_err(|source| ReviewError::Fetch {
        url: url.to_string(),
        source,
    })?;
    match response.status {
        404 => {
            debug!(url, "no reviews document");
            Ok(Vec::new())
        }
        _ if response.is_success() => parse_reviews(&response.body),
        status => Err(ReviewError::Status {
            url: url.to_string(),
            status,
        }),
    }
}

fn string_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Clamp to `0..=5` and floor. Non-numbers are 0.
pub fn clamp_rating(value: &Value) -> u8 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_nan() {
        return 0;
    }
    n.clamp(0.0, MAX_RATING as f64).floor() as u8
}

/// Hover state of the five-star picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarPicker {
    hovered: Option<u8>,
}

impl StarPicker {
    pub fn hover(&mut self, value: u8) {
        self.hovered = Some(value.min(MAX_RATING));
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Whether star `value` (1-based) is highlighted.
    pub fn is_active(&self, value: u8) -> bool {
        self.hovered.is_some_and(|h| value <= h)
    }

    pub fn render(&self) -> Markup {
        html! {
            div.stars role="radiogroup" aria-label="Rate us" {
                @for value in 1..=MAX_RATING {
                    span.star.active[self.is_active(value)] data-value=(value) role="radio" tabindex="0"
                        aria-label={ (value) " of " (MAX_RATING) " stars" } { "★" }
                }
            }
        }
    }
}

/// What the review modal shows after a star was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPrompt {
    pub title: &'static str,
    pub body: &'static str,
    /// Show the free-text feedback field.
    pub show_input: bool,
    pub button: &'static str,
    /// Where the button leads, if it is a link.
    pub link: Option<&'static str>,
}

impl ReviewPrompt {
    pub fn for_rating(rating: u8) -> Self {
        if rating < PUBLIC_REVIEW_MIN {
            Self {
                title: "We are sorry, you are disappointed",
                body: "Please let us know what we can improve.",
                show_input: true,
                button: "Submit",
                link: None,
            }
        } else {
            Self {
                title: "Thank you!",
                body: "We are pleased to hear you like us. Could you please rate us on Google maps?",
                show_input: false,
                button: "Open maps",
                link: Some(MAPS_URL),
            }
        }
    }

    pub fn render(&self) -> Markup {
        html! {
            div id="modal" class="modal" role="dialog" aria-modal="true" aria-labelledby="modal-title" {
                h2 id="modal-title" { (self.title) }
                p.modal-body { (self.body) }
                @if self.show_input {
                    textarea.modal-input name="feedback" rows="4" {}
                }
                @if let Some(href) = self.link {
                    a.modal-button href=(href) target="_blank" rel="noopener" { (self.button) }
                } @else {
                    button.modal-button type="submit" { (self.button) }
                }
            }
        }
    }
}

/// Review cards for the review slideshow.
pub fn render_review_slides(reviews: &[Review]) -> Markup {
    html! {
        div.review-container {
            @for (idx, review) in reviews.iter().enumerate() {
                div.review-slide role="group" aria-roledescription="slide"
                    aria-label={ (idx + 1) " of " (reviews.len()) } hidden[idx != 0] {
                    p.review-stars aria-label={ (review.rating) " of " (MAX_RATING) " stars" } {
                        (stars(review.rating))
                    }
                    @if !review.text.is_empty() {
                        blockquote.review-text { (review.text) }
                    }
                    @if !review.author.is_empty() {
                        p.review-author { (review.author) }
                    }
                }
            }
        }
    }
}

/// Review slideshow, the "rate us" picker, and both follow-up prompts as
/// `<template>`s for the host to show once a star is picked.
pub fn render_reviews_section(reviews: &[Review]) -> Markup {
    html! {
        section id="reviews" aria-label="Reviews" {
            h2 { "What our customers say" }
            @if !reviews.is_empty() {
                (render_review_slides(reviews))
            }
            (StarPicker::default().render())
            template id="review-prompt-feedback" {
                (ReviewPrompt::for_rating(0).render())
            }
            template id="review-prompt-public" {
                (ReviewPrompt::for_rating(MAX_RATING).render())
            }
        }
    }
}

fn stars(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(MAX_RATING as usize - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchResponse;
    use crate::test_helpers::FakeFetcher;
    use serde_json::json;

    #[test]
    fn ratings_are_clamped_and_floored() {
        assert_eq!(clamp_rating(&json!(4.9)), 4);
        assert_eq!(clamp_rating(&json!(7)), 5);
        assert_eq!(clamp_rating(&json!(-2)), 0);
        assert_eq!(clamp_rating(&json!("3.5")), 3);
        assert_eq!(clamp_rating(&json!(null)), 0);
        assert_eq!(clamp_rating(&json!([5])), 0);
    }

    #[test]
    fn parses_lenient_entries() {
        let reviews = parse_reviews(
            br#"[{"rating": 5, "text": " Great! ", "author": "Ana"}, {"text": "ok"}, {}]"#,
        )
        .unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(
            reviews[0],
            Review {
                rating: 5,
                text: "Great!".into(),
                author: "Ana".into()
            }
        );
        assert_eq!(reviews[1].rating, 0);
        assert_eq!(reviews[2].text, "");
    }

    #[test]
    fn non_array_document_is_rejected() {
        assert!(matches!(parse_reviews(br#"{"rating": 5}"#), Err(ReviewError::NotAnArray)));
        assert!(matches!(parse_reviews(b"nope"), Err(ReviewError::Json(_))));
    }

    #[test]
    fn hover_highlights_up_to_value() {
        let mut picker = StarPicker::default();
        assert!(!picker.is_active(1));
        picker.hover(3);
        assert!(picker.is_active(1));
        assert!(picker.is_active(3));
        assert!(!picker.is_active(4));
        picker.leave();
        assert!(!picker.is_active(1));
    }

    #[test]
    fn picker_renders_active_class() {
        let mut picker = StarPicker::default();
        picker.hover(2);
        let html = picker.render().into_string();
        assert_eq!(html.matches(r#"class="star active""#).count(), 2);
        assert_eq!(html.matches(r#"class="star""#).count(), 3);
    }

    #[test]
    fn low_ratings_ask_for_private_feedback() {
        for rating in 0..4 {
            let prompt = ReviewPrompt::for_rating(rating);
            assert!(prompt.show_input, "rating {rating}");
            assert_eq!(prompt.button, "Submit");
            assert_eq!(prompt.link, None);
        }
    }

    #[test]
    fn high_ratings_link_to_maps() {
        for rating in 4..=5 {
            let prompt = ReviewPrompt::for_rating(rating);
            assert!(!prompt.show_input);
            assert_eq!(prompt.link, Some(MAPS_URL));
        }
        let html = ReviewPrompt::for_rating(5).render().into_string();
        assert!(html.contains(r#"href="https://maps.app.goo.gl/""#));
        assert!(!html.contains("textarea"));
    }

    #[test]
    fn review_slides_show_stars_and_skip_empty_fields() {
        let reviews = vec![
            Review {
                rating: 3,
                text: "Nice".into(),
                author: String::new(),
            },
            Review {
                rating: 5,
                text: String::new(),
                author: "Bo".into(),
            },
        ];
        let html = render_review_slides(&reviews).into_string();
        assert!(html.contains("★★★☆☆"));
        assert!(html.contains("★★★★★"));
        assert_eq!(html.matches("review-author").count(), 1);
        assert_eq!(html.matches("review-text").count(), 1);
        assert_eq!(html.matches("hidden").count(), 1);
    }

    #[test]
    fn section_holds_both_prompts_and_skips_empty_slides() {
        let html = render_reviews_section(&[]).into_string();
        assert!(!html.contains("review-container"));
        assert!(html.contains(r#"id="review-prompt-feedback""#));
        assert!(html.contains(r#"id="review-prompt-public""#));
        assert!(html.contains("textarea"));
        assert!(html.contains("maps.app.goo.gl"));
        assert_eq!(html.matches(r#"class="star""#).count(), 5);
    }

    #[tokio::test]
    async fn load_reviews_parses_document() {
        let fetcher = FakeFetcher::new().with(
            "assets/reviews.json",
            FetchResponse::ok(r#"[{"rating": 4.5, "author": "Ana"}]"#),
        );
        let reviews = load_reviews(&fetcher, "assets/reviews.json").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 4);
    }

    #[tokio::test]
    async fn missing_reviews_document_is_empty() {
        let fetcher = FakeFetcher::new();
        let reviews = load_reviews(&fetcher, "assets/reviews.json").await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn server_errors_and_transport_failures_are_errors() {
        let fetcher = FakeFetcher::new()
            .with(
                "a.json",
                FetchResponse {
                    status: 500,
                    body: Vec::new(),
                },
            )
            .failing("b.json");
        assert!(matches!(
            load_reviews(&fetcher, "a.json").await,
            Err(ReviewError::Status { status: 500, .. })
        ));
        assert!(matches!(
            load_reviews(&fetcher, "b.json").await,
            Err(ReviewError::Fetch { .. })
        ));
    }
}
