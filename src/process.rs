//! Per-image transform and theme analysis.
//!
//! Step 3 (and the optional step 4) of the slideshow pipeline. For every
//! discovered screenshot, in discovery order:
//!
//! 1. Decode it.
//! 2. Crop it according to the run's [`Geometry`].
//! 3. Optionally resize it to a fixed width, preserving aspect ratio.
//! 4. Save it under the output folder with its original file name,
//!    overwriting any existing file.
//! 5. Optionally compute its average hue for theme ordering.
//!
//! The decoded source is dropped before the next file is opened. A failure
//! on one image stops the run; stills already written stay on disk.

use crate::geometry::Geometry;
use crate::imaging::{
    BackendError, ImageBackend, average_hue, center_crop, crop_to_box, resize_to_width,
};
use crate::slideshow::SlideshowEvent;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// A finished slideshow frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// File name shared by the source screenshot and the saved still.
    pub name: String,
    pub image: DynamicImage,
    /// Average hue in degrees, present when theme analysis ran.
    pub hue: Option<f32>,
}

/// Options for [`process_images`] that do not affect geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    pub resize_width: Option<u32>,
    pub analyze_themes: bool,
}

/// Apply the run's crop (and optional resize) to a decoded image.
pub fn transform_image(
    image: DynamicImage,
    geometry: &Geometry,
    resize_width: Option<u32>,
) -> DynamicImage {
    let cropped = match *geometry {
        Geometry::Center { width, height } => center_crop(image, width, height),
        Geometry::Trim { region, recrop } => {
            let trimmed = crop_to_box(image, region);
            match recrop {
                Some((width, height)) => center_crop(trimmed, width, height),
                None => trimmed,
            }
        }
    };

    match resize_width {
        Some(width) => resize_to_width(cropped, width),
        None => cropped,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Transform every image, save the stills into `out_dir`, and return the frames.
///
/// `out_dir` must already exist.
pub fn process_images(
    backend: &impl ImageBackend,
    images: &[PathBuf],
    geometry: &Geometry,
    options: ProcessOptions,
    out_dir: &Path,
    progress: Option<&Sender<SlideshowEvent>>,
) -> Result<Vec<Frame>, BackendError> {
    let mut frames = Vec::with_capacity(images.len());

    for source in images {
        let name = file_name(source);
        let image = transform_image(backend.load(source)?, geometry, options.resize_width);

        let output = out_dir.join(&name);
        backend.save(&image, &output)?;

        let hue = options.analyze_themes.then(|| average_hue(&image));

        if let Some(tx) = progress {
            tx.send(SlideshowEvent::FrameSaved {
                output,
                width: image.width(),
                height: image.height(),
                hue,
            })
            .ok();
        }

        frames.push(Frame { name, image, hue });
    }

    Ok(frames)
}
