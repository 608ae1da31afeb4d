//! Run configuration.
//!
//! There is no configuration file: every setting comes from the command line
//! (see `main.rs`) and lands in a [`SlideshowConfig`]. Defaults are chosen so
//! that running the tool with no flags from a project root turns the
//! screenshots captured under `.playwright-mcp/` into README assets:
//!
//! ```text
//! .playwright-mcp/*.png            → assets/readme-screenshots/*.png
//!                                  → assets/readme-slideshow.gif
//! ```
//!
//! ## Options
//!
//! | Field | Default | Meaning |
//! |---|---|---|
//! | `src` | `.playwright-mcp` | Folder scanned for screenshots |
//! | `out` | `assets/readme-screenshots` | Folder receiving cropped stills |
//! | `gif` | `assets/readme-slideshow.gif` | Animated slideshow path |
//! | `width` / `height` | computed | Crop size override, per axis |
//! | `resize_width` | none | Final frame width, aspect preserved |
//! | `duration_ms` | 800 | Display time per GIF frame |
//! | `trim` | off | Crop to the union of detected content |
//! | `trim_padding` | 12 | Pixels added around the trimmed region |
//! | `cycle_themes` | off | Order frames by dominant hue |
//! | `repeat` | 1 | Times the sequence is played per GIF loop |

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SRC: &str = ".playwright-mcp";
pub const DEFAULT_OUT: &str = "assets/readme-screenshots";
pub const DEFAULT_GIF: &str = "assets/readme-slideshow.gif";
pub const DEFAULT_DURATION_MS: u32 = 800;
pub const DEFAULT_TRIM_PADDING: u32 = 12;

/// Longest frame duration the GIF delay field can hold (65535 centiseconds).
pub const MAX_DURATION_MS: u32 = 655_350;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for one slideshow run.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowConfig {
    pub src: PathBuf,
    pub out: PathBuf,
    pub gif: PathBuf,
    /// Explicit crop width; overrides the computed width only.
    pub width: Option<u32>,
    /// Explicit crop height; overrides the computed height only.
    pub height: Option<u32>,
    pub resize_width: Option<u32>,
    pub duration_ms: u32,
    pub trim: bool,
    pub trim_padding: u32,
    pub cycle_themes: bool,
    /// Values below 1 play the sequence once.
    pub repeat: usize,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            src: PathBuf::from(DEFAULT_SRC),
            out: PathBuf::from(DEFAULT_OUT),
            gif: PathBuf::from(DEFAULT_GIF),
            width: None,
            height: None,
            resize_width: None,
            duration_ms: DEFAULT_DURATION_MS,
            trim: false,
            trim_padding: DEFAULT_TRIM_PADDING,
            cycle_themes: false,
            repeat: 1,
        }
    }
}

impl SlideshowConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("resize-width", self.resize_width),
        ] {
            if value == Some(0) {
                return Err(ConfigError::Validation(format!("{name} must be non-zero")));
            }
        }
        if self.duration_ms > MAX_DURATION_MS {
            return Err(ConfigError::Validation(format!(
                "duration must be at most {MAX_DURATION_MS}ms"
            )));
        }
        Ok(())
    }

    /// Number of times the frame sequence is played, at least once.
    pub fn effective_repeat(&self) -> usize {
        self.repeat.max(1)
    }
}
