//! Pure Rust image backend with no system library dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (PNG, JPEG, WebP) | `image::ImageReader` |
//! | Encode stills | `DynamicImage::save`, format from the file extension |
//! | Quantise frames | `gif::Frame::from_rgba_speed` (NeuQuant, per-frame palette) |
//! | Shrink palettes | local palette cut to the entries a frame references |
//! | Encode animation | `gif::Encoder`, infinite loop, restore-to-background disposal |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::gif_delay_centiseconds;
use super::params::GifParams;
use image::{DynamicImage, ImageReader};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// NeuQuant sampling speed: 1 is slowest/best, 30 fastest.
const QUANTIZE_SPEED: i32 = 10;

/// Input extensions the compiled-in decoders handle.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Backend built on the `image` and `gif` crates.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn gif_error(e: gif::EncodingError) -> BackendError {
    BackendError::ProcessingFailed(format!("GIF encode failed: {e}"))
}

fn to_gif_dimension(value: u32) -> Result<u16, BackendError> {
    u16::try_from(value).map_err(|_| {
        BackendError::ProcessingFailed(format!("Frame dimension {value} exceeds GIF limit"))
    })
}

/// Quantise one frame to its own adaptive palette.
fn quantize_frame(image: &DynamicImage, delay: u16) -> Result<gif::Frame<'static>, BackendError> {
    let width = to_gif_dimension(image.width())?;
    let height = to_gif_dimension(image.height())?;
    let mut rgba = image.to_rgba8().into_raw();

    let mut frame = gif::Frame::from_rgba_speed(width, height, &mut rgba, QUANTIZE_SPEED);
    frame.delay = delay;
    frame.dispose = gif::DisposalMethod::Background;
    compact_palette(&mut frame);
    Ok(frame)
}

/// Drop palette entries no pixel references and renumber the rest in order
/// of first use.
///
/// Lossless: every pixel keeps its colour.
fn compact_palette(frame: &mut gif::Frame<'_>) {
    let Some(palette) = frame.palette.as_deref() else {
        return;
    };

    let mut remap: [Option<u8>; 256] = [None; 256];
    let mut compact = Vec::with_capacity(palette.len());
    let mut buffer = frame.buffer.to_vec();
    for index in buffer.iter_mut() {
        let slot = &mut remap[usize::from(*index)];
        *index = match *slot {
            Some(new) => new,
            None => {
                let new = (compact.len() / 3) as u8;
                let start = usize::from(*index) * 3;
                let rgb = palette.get(start..start + 3).unwrap_or(&[0, 0, 0]);
                compact.extend_from_slice(rgb);
                *slot = Some(new);
                new
            }
        };
    }

    frame.transparent = frame.transparent.and_then(|t| remap[usize::from(t)]);
    frame.palette = Some(compact);
    frame.buffer = Cow::Owned(buffer);
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
            })
    }

    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError> {
        image.save(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Frames carry their own local palettes, compacted losslessly; the
    /// encoder writes no global table. Every frame restores to background
    /// and the animation loops forever.
    fn encode_gif(
        &self,
        frames: &[&DynamicImage],
        params: &GifParams,
    ) -> Result<(), BackendError> {
        let delay = gif_delay_centiseconds(params.frame_duration_ms).ok_or_else(|| {
            BackendError::ProcessingFailed(format!(
                "Frame duration {}ms exceeds GIF limit",
                params.frame_duration_ms
            ))
        })?;

        if let Some(&index) = params.playback.iter().find(|&&i| i >= frames.len()) {
            return Err(BackendError::ProcessingFailed(format!(
                "Playback index {index} out of range ({} frames)",
                frames.len()
            )));
        }

        // Logical screen fits the largest frame
        let (screen_w, screen_h) = frames.iter().fold((1, 1), |(w, h), f| {
            (w.max(f.width()), h.max(f.height()))
        });

        // Each distinct frame is quantised once, however often it is played
        let quantized = frames
            .iter()
            .map(|f| quantize_frame(f, delay))
            .collect::<Result<Vec<_>, _>>()?;

        let file = File::create(&params.output).map_err(BackendError::Io)?;
        let mut encoder = gif::Encoder::new(
            BufWriter::new(file),
            to_gif_dimension(screen_w)?,
            to_gif_dimension(screen_h)?,
            &[],
        )
        .map_err(gif_error)?;
        encoder.set_repeat(gif::Repeat::Infinite).map_err(gif_error)?;

        for &index in &params.playback {
            encoder.write_frame(&quantized[index]).map_err(gif_error)?;
        }

        let mut writer = encoder.into_inner().map_err(gif_error)?;
        writer.flush().map_err(BackendError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgb, RgbImage};
    use std::io::BufReader;
    use tempfile::TempDir;

    fn solid(w: u32, h: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(color)))
    }

    fn decode_frames(path: &Path) -> Vec<image::Frame> {
        let reader = BufReader::new(File::open(path).unwrap());
        GifDecoder::new(reader)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
    }

    #[test]
    fn identify_reads_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shot.png");
        solid(64, 48, [1, 2, 3]).save(&path).unwrap();

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 64, height: 48 });
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = RustBackend::new().load(Path::new("/nonexistent/shot.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn load_corrupt_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let result = RustBackend::new().load(&path);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn save_then_load_keeps_size() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");
        let backend = RustBackend::new();

        backend.save(&solid(30, 20, [200, 10, 10]), &path).unwrap();
        let loaded = backend.load(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (30, 20));
    }

    #[test]
    fn gif_follows_playback_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("show.gif");
        let red = solid(20, 10, [255, 0, 0]);
        let blue = solid(20, 10, [0, 0, 255]);

        RustBackend::new()
            .encode_gif(
                &[&red, &blue],
                &GifParams {
                    output: path.clone(),
                    frame_duration_ms: 800,
                    playback: vec![0, 1, 0, 1, 0, 1],
                },
            )
            .unwrap();

        let frames = decode_frames(&path);
        assert_eq!(frames.len(), 6);
        for (i, frame) in frames.iter().enumerate() {
            let (numer, denom) = frame.delay().numer_denom_ms();
            assert_eq!(numer / denom, 800);
            let pixel = frame.buffer().get_pixel(5, 5);
            if i % 2 == 0 {
                assert!(pixel[0] > 200 && pixel[2] < 50, "frame {i} should be red");
            } else {
                assert!(pixel[2] > 200 && pixel[0] < 50, "frame {i} should be blue");
            }
        }
    }

    #[test]
    fn gif_loops_forever_and_clears_each_frame() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("show.gif");
        let red = solid(20, 10, [255, 0, 0]);
        let blue = solid(20, 10, [0, 0, 255]);

        RustBackend::new()
            .encode_gif(
                &[&red, &blue],
                &GifParams {
                    output: path.clone(),
                    frame_duration_ms: 800,
                    playback: vec![0, 1],
                },
            )
            .unwrap();

        let mut decoder = gif::DecodeOptions::new()
            .read_info(BufReader::new(File::open(&path).unwrap()))
            .unwrap();
        let mut count = 0;
        while let Some(frame) = decoder.read_next_frame().unwrap() {
            assert_eq!(frame.dispose, gif::DisposalMethod::Background, "frame {count}");
            assert_eq!(frame.delay, 80, "frame {count}");
            count += 1;
        }
        assert_eq!(count, 2);
        assert_eq!(decoder.repeat(), gif::Repeat::Infinite);
    }

    #[test]
    fn solid_frame_palette_is_compacted() {
        let frame = quantize_frame(&solid(16, 16, [30, 144, 255]), 10).unwrap();
        let palette = frame.palette.as_deref().unwrap();
        assert_eq!(palette.len(), 3);
        assert!(frame.buffer.iter().all(|&i| i == 0));
    }

    #[test]
    fn compaction_keeps_every_pixel_colour() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("show.gif");
        let source = RgbImage::from_fn(24, 12, |x, _| match x / 8 {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        });
        let image = DynamicImage::ImageRgb8(source.clone());

        let frame = quantize_frame(&image, 10).unwrap();
        assert!(frame.palette.as_deref().unwrap().len() <= 3 * 3);

        RustBackend::new()
            .encode_gif(
                &[&image],
                &GifParams {
                    output: path.clone(),
                    frame_duration_ms: 100,
                    playback: vec![0],
                },
            )
            .unwrap();

        let frames = decode_frames(&path);
        let decoded = frames[0].buffer();
        for (x, y, pixel) in source.enumerate_pixels() {
            let out = decoded.get_pixel(x, y);
            assert_eq!([out[0], out[1], out[2]], pixel.0, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn compaction_remaps_transparent_index() {
        let mut frame = gif::Frame::default();
        frame.width = 3;
        frame.height = 1;
        frame.palette = Some(vec![0, 0, 0, 10, 10, 10, 20, 20, 20, 30, 30, 30]);
        frame.buffer = Cow::Owned(vec![3, 1, 3]);
        frame.transparent = Some(1);

        compact_palette(&mut frame);
        assert_eq!(frame.palette.as_deref(), Some(&[30, 30, 30, 10, 10, 10][..]));
        assert_eq!(&*frame.buffer, &[0, 1, 0]);
        assert_eq!(frame.transparent, Some(1));
    }

    #[test]
    fn compaction_drops_unused_transparent_index() {
        let mut frame = gif::Frame::default();
        frame.width = 2;
        frame.height = 1;
        frame.palette = Some(vec![0, 0, 0, 10, 10, 10]);
        frame.buffer = Cow::Owned(vec![1, 1]);
        frame.transparent = Some(0);

        compact_palette(&mut frame);
        assert_eq!(frame.palette.as_deref(), Some(&[10, 10, 10][..]));
        assert_eq!(frame.transparent, None);
    }

    #[test]
    fn gif_rejects_out_of_range_playback() {
        let tmp = TempDir::new().unwrap();
        let frame = solid(4, 4, [0, 0, 0]);
        let result = RustBackend::new().encode_gif(
            &[&frame],
            &GifParams {
                output: tmp.path().join("show.gif"),
                frame_duration_ms: 100,
                playback: vec![0, 1],
            },
        );
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert!(!tmp.path().join("show.gif").exists());
    }

    #[test]
    fn gif_rejects_overlong_duration() {
        let tmp = TempDir::new().unwrap();
        let frame = solid(4, 4, [0, 0, 0]);
        let result = RustBackend::new().encode_gif(
            &[&frame],
            &GifParams {
                output: tmp.path().join("show.gif"),
                frame_duration_ms: 1_000_000,
                playback: vec![0],
            },
        );
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }
}
