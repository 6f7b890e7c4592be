//! File naming conventions for carousel images.
//!
//! Two conventions meet here:
//!
//! - **Probe URLs**: `<base><index>.<ext>`, e.g. `assets/carousel/3.webp`.
//!   Probe mode builds these from a candidate index range and an ordered
//!   extension list.
//! - **`NNN-name` files**: the `manifest` command orders a directory of
//!   images by numeric prefix and derives alt text from the name part:
//!   - `003-Sunset-Beach.jpg` → number 3, alt text "Sunset Beach"
//!   - `007.jpg` → number 7, no alt text
//!   - `harbour.jpg` → unnumbered (sorted last), alt text "harbour"

/// Extensions accepted as carousel images, lowercase, without the dot.
///
/// Only formats the enabled `image` decoders can read a header from; a file
/// that can't be measured can't be listed or probed.
pub const IMAGE_EXTENSIONS: &[&str] = &["webp", "jpg", "jpeg", "png", "tif", "tiff"];

/// Result of parsing a numbered entry name like `020-Sunset-Beach`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Sunset-Beach`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an image file stem following the `NNN-name` convention.
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some(dash_pos) = name.find('-') {
        let prefix = &name[..dash_pos];
        if let Ok(num) = prefix.parse::<u32>() {
            let raw = &name[dash_pos + 1..];
            return ParsedName {
                number: Some(num),
                name: raw.to_string(),
                display_title: raw.replace('-', " "),
            };
        }
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

/// Build the probe URL for one candidate: `<base><index>.<extension>`.
///
/// The extension is used as given apart from a leading dot, which is
/// dropped so both `"jpg"` and `".jpg"` are accepted in config.
pub fn probe_url(base: &str, index: u32, extension: &str) -> String {
    format!("{}{}.{}", base, index, extension.trim_start_matches('.'))
}

/// Whether a file extension names a carousel image (case-insensitive,
/// leading dot ignored).
pub fn is_image_extension(extension: &str) -> bool {
    let lower = extension.trim_start_matches('.').to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&lower.as_str())
}
