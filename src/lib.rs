//! # Screenshot Slideshow
//!
//! Turns a folder of screenshots into a uniform set of cropped stills and one
//! looping animated GIF, ready to embed in a README.
//!
//! # Architecture: Five-Step Pipeline
//!
//! Each run is a single forward pass. Data never flows backwards and the only
//! accumulating state is the list of finished frames:
//!
//! ```text
//! 1. Discover   src/        →  sorted screenshot paths
//! 2. Geometry   paths       →  one crop region for every image
//! 3. Transform  each image  →  cropped (and resized) still in out/
//! 4. Themes     frames      →  optional hue ordering
//! 5. Animate    frames      →  looping GIF
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discover`] | Step 1: lists supported images in the source folder |
//! | [`geometry`] | Step 2: minimum-size or trimmed-union crop region |
//! | [`process`] | Steps 3-4: crop, resize, save, and hue analysis per image |
//! | [`sequence`] | Step 4: hue ordering and repeated playback order |
//! | [`imaging`] | Pure-Rust image operations and the I/O backend (incl. GIF encoding) |
//! | [`slideshow`] | Runs the steps in order; run errors and exit codes |
//! | [`config`] | Run settings, defaults, and validation |
//! | [`output`] | CLI output formatting of progress events |
//!
//! # Design Decisions
//!
//! ## One Region For Every Frame
//!
//! GIF frames share one logical screen, so every still is cropped to the same
//! size. By default that is the smallest width and smallest height in the set,
//! center-cropped. With trimming, the content boxes of all screenshots are
//! unioned and clamped to the smallest image, so the region fits every input.
//!
//! ## Per-Frame Palettes
//!
//! Screenshots of different themes share few colours. Each frame gets its own
//! adaptive 256-colour palette rather than a global one, and is quantised once
//! even when the sequence is repeated.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, cropping, resizing and GIF encoding all use the `image` and `gif`
//! crates. No ImageMagick, no gifsicle: the binary runs anywhere.

pub mod config;
pub mod discover;
pub mod geometry;
pub mod imaging;
pub mod output;
pub mod process;
pub mod sequence;
pub mod slideshow;
