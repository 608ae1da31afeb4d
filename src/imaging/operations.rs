//! High-level image operations.
//!
//! These functions combine calculations with pixel work on decoded images.
//! They never touch the filesystem; loading and saving go through the
//! [`ImageBackend`](super::ImageBackend).

use super::calculations::{
    calculate_resize_height, center_crop_origin, rgb_to_hue, upper_median,
};
use super::params::{BoundingBox, TrimParams};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

/// Longest edge of the down-sampled copy used for hue estimation.
const THEME_SAMPLE_SIZE: u32 = 100;

/// Crop a centered `width` x `height` rectangle.
///
/// An image that already has the target size is returned unchanged. When the
/// target exceeds the source on an axis, the result still has exactly the
/// target size: the source pixels are placed at the origin of a zero-filled
/// canvas of the same colour type.
pub fn center_crop(image: DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (src_w, src_h) = image.dimensions();
    if (src_w, src_h) == (width, height) {
        return image;
    }

    let (left, top) = center_crop_origin((src_w, src_h), (width, height));
    if left + width <= src_w && top + height <= src_h {
        return image.crop_imm(left, top, width, height);
    }

    let available = image.crop_imm(
        left,
        top,
        width.min(src_w - left),
        height.min(src_h - top),
    );
    let mut canvas = DynamicImage::new(width, height, image.color());
    imageops::replace(&mut canvas, &available, 0, 0);
    canvas
}

/// Crop to a bounding box, clamped to the image's own bounds.
pub fn crop_to_box(image: DynamicImage, bbox: BoundingBox) -> DynamicImage {
    let (w, h) = image.dimensions();
    let region = bbox.clamp_to(w, h);
    if region == BoundingBox::full(w, h) {
        return image;
    }
    image.crop_imm(region.left, region.top, region.width(), region.height())
}

/// Resize to `width`, preserving the aspect ratio (Lanczos3).
///
/// Images already at the requested width are returned unchanged.
pub fn resize_to_width(image: DynamicImage, width: u32) -> DynamicImage {
    if image.width() == width {
        return image;
    }
    let height = calculate_resize_height(image.dimensions(), width);
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Bounding box of everything that differs from the background.
///
/// The background colour is the per-channel median of the border strips.
/// A pixel counts as content when any channel differs from the background
/// by more than `params.threshold`. Images with no content pixels yield the
/// full image box.
pub fn detect_content_box(image: &DynamicImage, params: &TrimParams) -> BoundingBox {
    let rgb = image.to_rgb8();
    let (w, h) = rgb.dimensions();
    if w == 0 || h == 0 {
        return BoundingBox::full(w, h);
    }

    let background = estimate_background(&rgb, params.border);

    let (mut left, mut top, mut right, mut bottom) = (w, h, 0, 0);
    for (x, y, pixel) in rgb.enumerate_pixels() {
        if channel_difference(pixel, &background) > params.threshold {
            left = left.min(x);
            top = top.min(y);
            right = right.max(x + 1);
            bottom = bottom.max(y + 1);
        }
    }

    if right == 0 {
        BoundingBox::full(w, h)
    } else {
        BoundingBox::new(left, top, right, bottom)
    }
}

/// Median colour of the `border`-pixel strips along all four edges.
fn estimate_background(rgb: &RgbImage, border: u32) -> Rgb<u8> {
    let (w, h) = rgb.dimensions();
    let strip = border.clamp(1, w.min(h));

    let mut reds = Vec::new();
    let mut greens = Vec::new();
    let mut blues = Vec::new();
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let on_border = x < strip || y < strip || x >= w - strip || y >= h - strip;
        if on_border {
            reds.push(pixel[0]);
            greens.push(pixel[1]);
            blues.push(pixel[2]);
        }
    }

    Rgb([
        upper_median(&mut reds),
        upper_median(&mut greens),
        upper_median(&mut blues),
    ])
}

fn channel_difference(a: &Rgb<u8>, b: &Rgb<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

/// Rough dominant hue of an image, in degrees `[0, 360)`.
///
/// Averages per-pixel HSV hue over a down-sampled copy. Grey pixels count as
/// hue 0, so this is only meaningful as a sort key.
pub fn average_hue(image: &DynamicImage) -> f32 {
    let sample = image
        .thumbnail(THEME_SAMPLE_SIZE, THEME_SAMPLE_SIZE)
        .to_rgb8();
    let count = sample.width() as usize * sample.height() as usize;
    if count == 0 {
        return 0.0;
    }

    let total: f64 = sample
        .pixels()
        .map(|p| rgb_to_hue(p[0], p[1], p[2]) as f64)
        .sum();
    (total / count as f64) as f32
}
