//! The slideshow run.
//!
//! Wires the pipeline steps together in a single forward pass:
//!
//! ```text
//! 1. Discover   src/           →  sorted image paths     (discover)
//! 2. Geometry   image paths    →  one crop region        (geometry)
//! 3. Transform  each image     →  out/<name> + frame     (process)
//! 4. Themes     frames         →  hue order (optional)   (sequence)
//! 5. Animate    frames         →  looping GIF            (imaging backend)
//! ```
//!
//! Nothing is written before discovery succeeds, so the two expected
//! failures (missing source, no screenshots) leave the filesystem untouched.
//! Every other failure aborts the run where it happens with no rollback.

use crate::config::{ConfigError, SlideshowConfig};
use crate::discover::{self, DiscoverError};
use crate::geometry::{self, Geometry};
use crate::imaging::{BackendError, GifParams, ImageBackend, RustBackend};
use crate::process::{self, ProcessOptions};
use crate::sequence;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideshowError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SlideshowError {
    /// Process exit status for this failure.
    ///
    /// 2 = source folder missing, 3 = no screenshots found, 1 = anything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            SlideshowError::Discover(DiscoverError::SourceMissing(_)) => 2,
            SlideshowError::Discover(DiscoverError::NoImages(_)) => 3,
            _ => 1,
        }
    }

    /// Whether this is one of the expected, user-facing conditions.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            SlideshowError::Discover(DiscoverError::SourceMissing(_) | DiscoverError::NoImages(_))
        )
    }
}

/// Progress reported while a run is underway.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideshowEvent {
    Discovered {
        source: PathBuf,
        count: usize,
    },
    GeometryChosen(Geometry),
    FrameSaved {
        output: PathBuf,
        width: u32,
        height: u32,
        hue: Option<f32>,
    },
    Reordered {
        names: Vec<String>,
    },
    GifWritten {
        path: PathBuf,
        frames: usize,
    },
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub geometry: Geometry,
    /// Frame names in playback order (one pass of the sequence).
    pub frame_names: Vec<String>,
    /// Total frames in the GIF, repetitions included.
    pub gif_frames: usize,
    pub gif_path: PathBuf,
}

/// Run the full pipeline with the pure-Rust backend.
pub fn run(
    config: &SlideshowConfig,
    progress: Option<Sender<SlideshowEvent>>,
) -> Result<RunSummary, SlideshowError> {
    run_with_backend(&RustBackend::new(), config, progress)
}

fn report(progress: &Option<Sender<SlideshowEvent>>, event: SlideshowEvent) {
    if let Some(tx) = progress {
        tx.send(event).ok();
    }
}

fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Run the full pipeline against any backend.
pub fn run_with_backend(
    backend: &impl ImageBackend,
    config: &SlideshowConfig,
    progress: Option<Sender<SlideshowEvent>>,
) -> Result<RunSummary, SlideshowError> {
    config.validate()?;

    let images = discover::find_images(&config.src)?;
    report(
        &progress,
        SlideshowEvent::Discovered {
            source: config.src.clone(),
            count: images.len(),
        },
    );

    let geometry = geometry::compute_geometry(backend, &images, config)?;
    report(&progress, SlideshowEvent::GeometryChosen(geometry));

    fs::create_dir_all(&config.out)?;
    let options = ProcessOptions {
        resize_width: config.resize_width,
        analyze_themes: config.cycle_themes,
    };
    let mut frames = process::process_images(
        backend,
        &images,
        &geometry,
        options,
        &config.out,
        progress.as_ref(),
    )?;

    if config.cycle_themes {
        sequence::order_by_hue(&mut frames);
        report(
            &progress,
            SlideshowEvent::Reordered {
                names: frames.iter().map(|f| f.name.clone()).collect(),
            },
        );
    }

    let params = GifParams {
        output: config.gif.clone(),
        frame_duration_ms: config.duration_ms,
        playback: sequence::playback_order(frames.len(), config.effective_repeat()),
    };
    create_parent_dir(&config.gif)?;
    let stills: Vec<_> = frames.iter().map(|f| &f.image).collect();
    backend.encode_gif(&stills, &params)?;
    report(
        &progress,
        SlideshowEvent::GifWritten {
            path: config.gif.clone(),
            frames: params.playback.len(),
        },
    );

    Ok(RunSummary {
        geometry,
        frame_names: frames.into_iter().map(|f| f.name).collect(),
        gif_frames: params.playback.len(),
        gif_path: params.output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use image::{DynamicImage, Rgb, RgbImage};
    use tempfile::TempDir;

    fn solid(w: u32, h: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(color)))
    }

    /// Create empty placeholder files for discovery and a mock serving their pixels.
    fn setup(tmp: &TempDir, images: Vec<(&str, DynamicImage)>) -> (MockBackend, SlideshowConfig) {
        let src = tmp.path().join("shots");
        fs::create_dir_all(&src).unwrap();
        let mut served = Vec::new();
        for (name, image) in images {
            let path = src.join(name);
            fs::write(&path, b"").unwrap();
            served.push((path, image));
        }
        let config = SlideshowConfig {
            src,
            out: tmp.path().join("out"),
            gif: tmp.path().join("assets/show.gif"),
            ..SlideshowConfig::default()
        };
        (MockBackend::with_images(served), config)
    }

    fn gif_op(backend: &MockBackend) -> RecordedOp {
        backend
            .get_operations()
            .into_iter()
            .find(|op| matches!(op, RecordedOp::EncodeGif { .. }))
            .expect("no GIF encoded")
    }

    #[test]
    fn exit_codes() {
        let missing = SlideshowError::from(DiscoverError::SourceMissing("x".into()));
        let empty = SlideshowError::from(DiscoverError::NoImages("x".into()));
        let config = SlideshowError::from(ConfigError::Validation("bad".into()));
        let imaging = SlideshowError::from(BackendError::ProcessingFailed("bad".into()));
        assert_eq!(missing.exit_code(), 2);
        assert_eq!(empty.exit_code(), 3);
        assert_eq!(config.exit_code(), 1);
        assert_eq!(imaging.exit_code(), 1);
        assert!(missing.is_expected());
        assert!(empty.is_expected());
        assert!(!imaging.is_expected());
    }

    #[test]
    fn run_encodes_frames_in_discovery_order() {
        let tmp = TempDir::new().unwrap();
        let (backend, config) = setup(
            &tmp,
            vec![
                ("b.png", solid(120, 80, [0, 0, 255])),
                ("a.png", solid(100, 100, [255, 0, 0])),
                ("c.png", solid(90, 90, [0, 255, 0])),
            ],
        );

        let summary = run_with_backend(&backend, &config, None).unwrap();
        assert_eq!(summary.frame_names, vec!["a.png", "b.png", "c.png"]);
        assert_eq!(
            summary.geometry,
            Geometry::Center {
                width: 90,
                height: 80
            }
        );
        assert_eq!(summary.gif_frames, 3);
        assert!(matches!(
            gif_op(&backend),
            RecordedOp::EncodeGif {
                frame_count: 3,
                frame_duration_ms: 800,
                playback,
                ..
            } if playback == vec![0, 1, 2]
        ));
        assert!(config.out.is_dir());
        assert!(tmp.path().join("assets").is_dir());
    }

    #[test]
    fn run_cycles_themes_and_repeats() {
        let tmp = TempDir::new().unwrap();
        let (backend, mut config) = setup(
            &tmp,
            vec![
                ("1-blue.png", solid(20, 20, [0, 0, 255])),
                ("2-red.png", solid(20, 20, [255, 0, 0])),
                ("3-green.png", solid(20, 20, [0, 255, 0])),
            ],
        );
        config.cycle_themes = true;
        config.repeat = 2;

        let summary = run_with_backend(&backend, &config, None).unwrap();
        assert_eq!(
            summary.frame_names,
            vec!["2-red.png", "3-green.png", "1-blue.png"]
        );
        assert_eq!(summary.gif_frames, 6);
        assert!(matches!(
            gif_op(&backend),
            RecordedOp::EncodeGif { playback, .. } if playback == vec![0, 1, 2, 0, 1, 2]
        ));
    }

    #[test]
    fn run_reports_progress() {
        let tmp = TempDir::new().unwrap();
        let (backend, config) = setup(&tmp, vec![("a.png", solid(10, 10, [0, 0, 0]))]);
        let (tx, rx) = std::sync::mpsc::channel();

        run_with_backend(&backend, &config, Some(tx)).unwrap();

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], SlideshowEvent::Discovered { count: 1, .. }));
        assert!(matches!(&events[1], SlideshowEvent::GeometryChosen(_)));
        assert!(matches!(&events[2], SlideshowEvent::FrameSaved { .. }));
        assert!(matches!(&events[3], SlideshowEvent::GifWritten { frames: 1, .. }));
    }

    #[test]
    fn missing_source_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = SlideshowConfig {
            src: tmp.path().join("absent"),
            out: tmp.path().join("out"),
            gif: tmp.path().join("show.gif"),
            ..SlideshowConfig::default()
        };
        let backend = MockBackend::new();

        let err = run_with_backend(&backend, &config, None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!config.out.exists());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn invalid_config_rejected_before_discovery() {
        let tmp = TempDir::new().unwrap();
        let (backend, mut config) = setup(&tmp, vec![("a.png", solid(10, 10, [0, 0, 0]))]);
        config.width = Some(0);

        let err = run_with_backend(&backend, &config, None).unwrap_err();
        assert!(matches!(err, SlideshowError::Config(_)));
        assert!(backend.get_operations().is_empty());
    }
}
