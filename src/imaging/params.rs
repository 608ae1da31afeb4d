//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline modules (which decide what region to keep
//! and how to animate it) and the [`backend`](super::backend) (which does the
//! file work). The mock backend in the tests records them verbatim.
//!
//! ## Types
//!
//! - [`BoundingBox`]: Pixel rectangle, exclusive on the right and bottom edges.
//! - [`TrimParams`]: Border sampling and threshold used by content detection.
//! - [`GifParams`]: Output path, per-frame duration and playback order for the slideshow.

use std::path::PathBuf;

/// A pixel rectangle `(left, top)`–`(right, bottom)`.
///
/// `right` and `bottom` are exclusive, so a box covering a whole 100x80
/// image is `(0, 0, 100, 80)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box covering an entire `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Restrict the box to the bounds of a `width` x `height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let right = self.right.min(width);
        let bottom = self.bottom.min(height);
        Self {
            left: self.left.min(right),
            top: self.top.min(bottom),
            right,
            bottom,
        }
    }
}

/// Content detection settings.
///
/// - `border`: thickness in pixels of the edge strips sampled for the background colour
/// - `threshold`: largest per-channel difference still treated as background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimParams {
    pub border: u32,
    pub threshold: u8,
}

impl Default for TrimParams {
    fn default() -> Self {
        Self {
            border: 4,
            threshold: 16,
        }
    }
}

/// Parameters for writing the animated slideshow.
#[derive(Debug, Clone, PartialEq)]
pub struct GifParams {
    pub output: PathBuf,
    /// Display time of every frame, in milliseconds.
    pub frame_duration_ms: u32,
    /// Indices into the frame list, in the order they are played.
    /// An index may appear more than once (repeated sequences).
    pub playback: Vec<usize>,
}
