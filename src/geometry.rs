//! Target geometry.
//!
//! Step 2 of the slideshow pipeline. Decides, once per run, which region of
//! every screenshot survives:
//!
//! - **Center mode** (default): every image is center-cropped to the smallest
//!   width and smallest height across the set. Only image headers are read.
//! - **Trim mode** (`--trim`): each image is decoded and its content box
//!   detected against the border background. The boxes are unioned, padded,
//!   and clamped to the smallest image, so the same region fits every input.
//!
//! An explicit `--width`/`--height` overrides its own axis; with both given,
//! center mode reads nothing at all. In trim mode the override becomes a
//! second center-crop applied to the trimmed region.

use crate::config::SlideshowConfig;
use crate::imaging::{
    BackendError, BoundingBox, ImageBackend, TrimParams, calculate_min_dimensions,
    detect_content_box, pad_and_clamp, union_bounding_boxes,
};
use std::path::PathBuf;

/// Region applied uniformly to every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Center-crop every image to this size.
    Center { width: u32, height: u32 },
    /// Crop every image to `region`, then optionally center-crop to `recrop`.
    Trim {
        region: BoundingBox,
        recrop: Option<(u32, u32)>,
    },
}

impl Geometry {
    /// Frame size after cropping, before any resize.
    pub fn frame_size(&self) -> (u32, u32) {
        match *self {
            Geometry::Center { width, height } => (width, height),
            Geometry::Trim {
                recrop: Some(size), ..
            } => size,
            Geometry::Trim { region, .. } => (region.width(), region.height()),
        }
    }
}

/// Compute the run's geometry from the discovered images.
///
/// `images` must be non-empty (discovery guarantees it).
pub fn compute_geometry(
    backend: &impl ImageBackend,
    images: &[PathBuf],
    config: &SlideshowConfig,
) -> Result<Geometry, BackendError> {
    if config.trim {
        trim_geometry(backend, images, config)
    } else {
        center_geometry(backend, images, config)
    }
}

fn smallest(dims: &[(u32, u32)]) -> Result<(u32, u32), BackendError> {
    calculate_min_dimensions(dims)
        .ok_or_else(|| BackendError::ProcessingFailed("No images to measure".into()))
}

fn center_geometry(
    backend: &impl ImageBackend,
    images: &[PathBuf],
    config: &SlideshowConfig,
) -> Result<Geometry, BackendError> {
    if let (Some(width), Some(height)) = (config.width, config.height) {
        return Ok(Geometry::Center { width, height });
    }

    let dims = images
        .iter()
        .map(|path| backend.identify(path).map(|d| (d.width, d.height)))
        .collect::<Result<Vec<_>, _>>()?;
    let (min_w, min_h) = smallest(&dims)?;

    Ok(Geometry::Center {
        width: config.width.unwrap_or(min_w),
        height: config.height.unwrap_or(min_h),
    })
}

fn trim_geometry(
    backend: &impl ImageBackend,
    images: &[PathBuf],
    config: &SlideshowConfig,
) -> Result<Geometry, BackendError> {
    let params = TrimParams::default();
    let mut dims = Vec::with_capacity(images.len());
    let mut boxes = Vec::with_capacity(images.len());

    // One decoded image alive at a time
    for path in images {
        let image = backend.load(path)?;
        dims.push((image.width(), image.height()));
        boxes.push(detect_content_box(&image, &params));
    }

    let limit = smallest(&dims)?;
    let union = union_bounding_boxes(&boxes).unwrap_or(BoundingBox::full(limit.0, limit.1));
    let region = pad_and_clamp(union, config.trim_padding, limit);

    let recrop = (config.width.is_some() || config.height.is_some()).then(|| {
        (
            config.width.unwrap_or(region.width()),
            config.height.unwrap_or(region.height()),
        )
    });

    Ok(Geometry::Trim { region, recrop })
}
