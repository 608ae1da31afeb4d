//! Pure calculation functions for crop geometry and colour math.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::BoundingBox;

/// Top-left corner of a centered crop.
///
/// Each axis is `max(0, (source - target) / 2)`, so a target larger than the
/// source anchors at the source origin instead of going negative.
///
/// # Arguments
/// * `source` - Current image dimensions (width, height)
/// * `target` - Crop dimensions (width, height)
///
/// # Returns
/// * `(left, top)` - Crop origin in source pixel coordinates
pub fn center_crop_origin(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;
    (src_w.saturating_sub(tgt_w) / 2, src_h.saturating_sub(tgt_h) / 2)
}

/// Height that preserves the aspect ratio when scaling to `target_width`.
///
/// `round(height * target_width / width)`, never below 1.
///
/// ```text
/// (800, 600) → width 400 → 300
/// (90, 80)   → width 45  → 40
/// ```
pub fn calculate_resize_height(source: (u32, u32), target_width: u32) -> u32 {
    let (src_w, src_h) = source;
    if src_w == 0 {
        return src_h.max(1);
    }
    let h = (src_h as f64 * target_width as f64 / src_w as f64).round() as u32;
    h.max(1)
}

/// Smallest width and smallest height across a set of images.
///
/// The two minimums are taken independently and may come from different
/// images. Returns `None` for an empty set.
pub fn calculate_min_dimensions(dims: &[(u32, u32)]) -> Option<(u32, u32)> {
    let min_w = dims.iter().map(|&(w, _)| w).min()?;
    let min_h = dims.iter().map(|&(_, h)| h).min()?;
    Some((min_w, min_h))
}

/// Smallest box containing every input box.
pub fn union_bounding_boxes(boxes: &[BoundingBox]) -> Option<BoundingBox> {
    let first = boxes.first()?;
    Some(boxes.iter().skip(1).fold(*first, |acc, b| BoundingBox {
        left: acc.left.min(b.left),
        top: acc.top.min(b.top),
        right: acc.right.max(b.right),
        bottom: acc.bottom.max(b.bottom),
    }))
}

/// Grow a box by `padding` on every side, then clamp it to `limit`.
///
/// Left and top saturate at zero; right and bottom never exceed the limit
/// width and height. A box that ends up empty after clamping (content lying
/// entirely outside the limit) falls back to the full limit area.
pub fn pad_and_clamp(bbox: BoundingBox, padding: u32, limit: (u32, u32)) -> BoundingBox {
    let (max_w, max_h) = limit;
    let right = bbox.right.saturating_add(padding).min(max_w);
    let bottom = bbox.bottom.saturating_add(padding).min(max_h);
    let padded = BoundingBox {
        left: bbox.left.saturating_sub(padding).min(right),
        top: bbox.top.saturating_sub(padding).min(bottom),
        right,
        bottom,
    };

    if padded.is_empty() {
        BoundingBox::full(max_w, max_h)
    } else {
        padded
    }
}

/// Upper median of a set of channel samples. Sorts in place.
///
/// Returns 0 for an empty slice.
pub fn upper_median(values: &mut [u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    values[values.len() / 2]
}

/// HSV hue of an RGB colour, in degrees `[0, 360)`.
///
/// Achromatic colours (greys, black, white) have hue 0.
pub fn rgb_to_hue(r: u8, g: u8, b: u8) -> f32 {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return 0.0;
    }

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    sector * 60.0
}

/// GIF frame delay in centiseconds for a duration in milliseconds.
///
/// The GIF delay field is a u16 of hundredths of a second; durations that do
/// not fit return `None`.
pub fn gif_delay_centiseconds(duration_ms: u32) -> Option<u16> {
    u16::try_from(duration_ms / 10).ok()
}
