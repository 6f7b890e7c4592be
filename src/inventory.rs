//! Build a `carousel.json` manifest from a directory of images.
//!
//! ```text
//! assets/carousel/
//! ├── 001-Harbour-at-Dawn.jpg   → { url: "assets/carousel/001-Harbour-at-Dawn.jpg", altText: "Harbour at Dawn", width, height }
//! ├── 002.webp                  → { url: "assets/carousel/002.webp", width, height }
//! ├── lighthouse.png            → sorted after all numbered images
//! ├── .DS_Store                 → skipped (hidden)
//! └── notes.txt                 → skipped (not an image)
//! ```
//!
//! Numbered files sort by number, unnumbered ones follow in name order.
//! Two files with the same number are an error: the order would be
//! ambiguous. Width and height are read from the image header only.

use crate::naming::{is_image_extension, parse_entry_name};
use crate::types::ManifestEntry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("duplicate image number {0}: {1} and {2}")]
    DuplicateNumber(u32, String, String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One image file found in the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub file_name: String,
    pub number: Option<u32>,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Image files directly inside `dir`, in carousel order.
pub fn scan_images(dir: &Path) -> Result<Vec<InventoryItem>, InventoryError> {
    let mut items = Vec::new();
    let mut numbers: HashMap<u32, String> = HashMap::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        if file_name.starts_with('.') || !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(extension) = path.extension().map(|e| e.to_string_lossy()) else {
            continue;
        };
        if !is_image_extension(&extension) {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed = parse_entry_name(&stem);
        if let Some(n) = parsed.number {
            if let Some(previous) = numbers.insert(n, file_name.clone()) {
                return Err(InventoryError::DuplicateNumber(n, previous, file_name));
            }
        }

        let (width, height) =
            image::image_dimensions(path).map_err(|source| InventoryError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(file = %file_name, width, height, "inventoried image");

        items.push(InventoryItem {
            file_name,
            number: parsed.number,
            title: parsed.display_title.trim().to_string(),
            width,
            height,
        });
    }

    items.sort_by(|a, b| {
        (a.number.is_none(), a.number, &a.file_name).cmp(&(b.number.is_none(), b.number, &b.file_name))
    });
    Ok(items)
}

/// Manifest entries for `items`, URLs prefixed with `url_prefix`.
pub fn manifest_entries(items: &[InventoryItem], url_prefix: &str) -> Vec<ManifestEntry> {
    let prefix = match url_prefix {
        "" => String::new(),
        p if p.ends_with('/') => p.to_string(),
        p => format!("{p}/"),
    };
    items
        .iter()
        .map(|item| ManifestEntry {
            url: format!("{prefix}{}", item.file_name),
            alt_text: (!item.title.is_empty()).then(|| item.title.clone()),
            width: Some(item.width),
            height: Some(item.height),
        })
        .collect()
}

/// Scan `dir` and write the manifest to `output`. Returns the entries.
pub fn write_manifest(
    dir: &Path,
    url_prefix: &str,
    output: &Path,
) -> Result<Vec<ManifestEntry>, InventoryError> {
    let entries = manifest_entries(&scan_images(dir)?, url_prefix);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_string_pretty(&entries)?)?;
    Ok(entries)
}
