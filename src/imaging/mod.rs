//! Image processing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Center crop** | `DynamicImage::crop_imm`, zero-filled canvas when oversized |
//! | **Trim detection** | border-median background + per-pixel threshold |
//! | **Resize** | Lanczos3 `resize_exact` |
//! | **Theme hue** | `thumbnail` + per-pixel HSV hue |
//! | **Animate** | `gif` encoder, per-frame adaptive palette |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for geometry and colour math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for all file I/O
//! - **Operations**: Pixel transforms on decoded images

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    calculate_min_dimensions, calculate_resize_height, center_crop_origin, pad_and_clamp,
    union_bounding_boxes,
};
pub use operations::{
    average_hue, center_crop, crop_to_box, detect_content_box, resize_to_width,
};
pub use params::{BoundingBox, GifParams, TrimParams};
pub use rust_backend::{RustBackend, SUPPORTED_EXTENSIONS};
