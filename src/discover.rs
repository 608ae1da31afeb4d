//! Screenshot discovery.
//!
//! Step 1 of the slideshow pipeline. Lists the image files directly inside
//! the source folder (no recursion) whose extension is one of
//! [`SUPPORTED_EXTENSIONS`], compared case-insensitively, sorted by path.
//!
//! A missing source folder and a folder without any screenshots are distinct
//! errors: the binary reports them with exit codes 2 and 3.

use crate::imaging::SUPPORTED_EXTENSIONS;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source folder '{}' not found.", .0.display())]
    SourceMissing(PathBuf),
    #[error("No screenshot images found in '{}'.", .0.display())]
    NoImages(PathBuf),
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Find every supported image file in `src`, in lexicographic path order.
pub fn find_images(src: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    if !src.is_dir() {
        return Err(DiscoverError::SourceMissing(src.to_path_buf()));
    }

    let mut images: Vec<PathBuf> = fs::read_dir(src)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_supported_extension(p))
        .collect();

    if images.is_empty() {
        return Err(DiscoverError::NoImages(src.to_path_buf()));
    }

    images.sort();
    Ok(images)
}
