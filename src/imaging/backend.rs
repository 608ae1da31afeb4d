//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers every operation that touches the
//! filesystem: identify, load, save, and encode the animated GIF. Pixel work
//! on decoded images lives in [`operations`](super::operations) and needs no
//! backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use a mock that
//! serves synthetic images and records what was written.

use super::params::GifParams;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image I/O backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode an image into memory.
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Write an image, inferring the format from the path's extension.
    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError>;

    /// Encode `frames` as a looping animated GIF, played in `params.playback` order.
    fn encode_gif(
        &self,
        frames: &[&DynamicImage],
        params: &GifParams,
    ) -> Result<(), BackendError>;
}
