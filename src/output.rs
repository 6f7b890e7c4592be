//! CLI output formatting for every command.
//!
//! Output is information-first: each slide leads with its position and
//! alt text, with the URL and size as indented context lines. Slides whose
//! alt text is only the synthesized default are shown by file name instead,
//! since the name is then their only identity.
//!
//! # Output Format
//!
//! ## Discover
//!
//! ```text
//! Slides (3, probe)
//! 001 (1.webp)
//!     Source: assets/carousel/1.webp
//!     Size: 1600×900
//! 002 Harbour at Dawn
//!     Source: assets/carousel/2.jpg
//! ```
//!
//! ## Build
//!
//! ```text
//! Carousel (3 slides) → index.html
//!     Stylesheet: carousel.3f9a1c2b.css
//!     Reviews: 4
//! ```
//!
//! ## Manifest
//!
//! ```text
//! 001 Harbour at Dawn (800×600)
//! 002 (002.webp) (640×480)
//! Wrote 2 entries to carousel.json
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::DiscoveryMode;
use crate::controller::Phase;
use crate::generate::GeneratedSite;
use crate::resolve::DiscoveryError;
use crate::types::{ManifestEntry, SlideDescriptor};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Last path segment of a URL, without query or fragment.
fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// Slide header line: alt text, or the file name in parens when the alt
/// text is the synthesized default.
///
/// ```text
/// 001 Harbour at Dawn
/// 002 (2.webp)
/// ```
fn slide_line(index: usize, slide: &SlideDescriptor) -> String {
    if slide.alt_text == SlideDescriptor::default_alt_text(slide.sequence_number) {
        format!("{} ({})", format_index(index), file_name(&slide.image_url))
    } else {
        format!("{} {}", format_index(index), slide.alt_text)
    }
}

fn size(width: Option<u32>, height: Option<u32>) -> Option<String> {
    match (width, height) {
        (Some(w), Some(h)) => Some(format!("{}×{}", w, h)),
        (Some(w), None) => Some(format!("{}×?", w)),
        (None, Some(h)) => Some(format!("?×{}", h)),
        (None, None) => None,
    }
}

fn mode_name(mode: DiscoveryMode) -> &'static str {
    match mode {
        DiscoveryMode::Manifest => "manifest",
        DiscoveryMode::Probe => "probe",
    }
}

// ============================================================================
// Discover
// ============================================================================

pub fn format_discovery(
    mode: DiscoveryMode,
    result: &Result<Vec<SlideDescriptor>, DiscoveryError>,
) -> Vec<String> {
    let slides = match result {
        Ok(slides) => slides,
        Err(e) => {
            let fallback = if e.falls_back_to_empty() {
                "empty carousel"
            } else {
                "error message"
            };
            return vec![
                format!("No slides ({}): {}", mode_name(mode), e),
                format!("{}Page shows: {}", indent(1), fallback),
            ];
        }
    };

    let mut lines = vec![format!("Slides ({}, {})", slides.len(), mode_name(mode))];
    for (i, slide) in slides.iter().enumerate() {
        lines.push(slide_line(i + 1, slide));
        lines.push(format!("{}Source: {}", indent(1), slide.image_url));
        if let Some(size) = size(slide.display_width, slide.display_height) {
            lines.push(format!("{}Size: {}", indent(1), size));
        }
    }
    lines
}

pub fn print_discovery(mode: DiscoveryMode, result: &Result<Vec<SlideDescriptor>, DiscoveryError>) {
    for line in format_discovery(mode, result) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate(site: &GeneratedSite, output_dir: &Path) -> Vec<String> {
    let relative = |p: &Path| {
        p.strip_prefix(output_dir)
            .unwrap_or(p)
            .display()
            .to_string()
    };
    let header = match site.phase {
        Phase::Ready => format!("Carousel ({} slides)", site.slide_count),
        Phase::Empty => "Empty carousel".to_string(),
        Phase::Failed | Phase::Unmounted => "Carousel error".to_string(),
    };
    let mut lines = vec![
        format!("{} → {}", header, relative(&site.index)),
        format!("{}Stylesheet: {}", indent(1), relative(&site.stylesheet)),
    ];
    if site.review_count > 0 {
        lines.push(format!("{}Reviews: {}", indent(1), site.review_count));
    }
    lines
}

pub fn print_generate(site: &GeneratedSite, output_dir: &Path) {
    for line in format_generate(site, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Manifest
// ============================================================================

pub fn format_manifest(entries: &[ManifestEntry], output: &Path) -> Vec<String> {
    let mut lines: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let title = match &entry.alt_text {
                Some(alt) => alt.clone(),
                None => format!("({})", file_name(&entry.url)),
            };
            match size(entry.width, entry.height) {
                Some(size) => format!("{} {} ({})", format_index(i + 1), title, size),
                None => format!("{} {}", format_index(i + 1), title),
            }
        })
        .collect();
    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    lines.push(format!("Wrote {} {} to {}", entries.len(), noun, output.display()));
    lines
}

pub fn print_manifest(entries: &[ManifestEntry], output: &Path) {
    for line in format_manifest(entries, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Submit
// ============================================================================

pub fn format_submit(endpoint: &str, message: Option<&str>) -> Vec<String> {
    let mut lines = vec![format!("Submitted → {}", endpoint)];
    if let Some(message) = message {
        lines.push(format!("{}Message: {}", indent(1), message));
    }
    lines
}

pub fn print_submit(endpoint: &str, message: Option<&str>) {
    for line in format_submit(endpoint, message) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
