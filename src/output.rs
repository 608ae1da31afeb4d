//! CLI output formatting for slideshow runs.
//!
//! # Output Format
//!
//! ```text
//! Found 5 images in .playwright-mcp
//! Target size: 1200x800
//! Saved cropped: assets/readme-screenshots/demo-emerald.png (1200x800)
//! Saved cropped: assets/readme-screenshots/demo-frost.png (1200x800)
//! ...
//! Wrote GIF: assets/readme-slideshow.gif (5 frames)
//! Done.
//! ```
//!
//! In trim mode the size line shows the shared region instead:
//!
//! ```text
//! Trim region: 28,18 → 152,102 (124x84)
//! Re-crop: 100x80
//! ```
//!
//! With `--cycle-themes`, each saved line carries the frame's hue and the
//! final order is listed before the GIF is written.
//!
//! # Architecture
//!
//! [`format_event`] is pure (returns `Vec<String>`) for testability;
//! [`print_event`] writes its lines to stdout.

use crate::geometry::Geometry;
use crate::slideshow::SlideshowEvent;

/// Format the chosen geometry.
fn geometry_lines(geometry: &Geometry) -> Vec<String> {
    match *geometry {
        Geometry::Center { width, height } => vec![format!("Target size: {}x{}", width, height)],
        Geometry::Trim { region, recrop } => {
            let mut lines = vec![format!(
                "Trim region: {},{} → {},{} ({}x{})",
                region.left,
                region.top,
                region.right,
                region.bottom,
                region.width(),
                region.height()
            )];
            if let Some((w, h)) = recrop {
                lines.push(format!("Re-crop: {}x{}", w, h));
            }
            lines
        }
    }
}

/// Format one progress event as output lines.
pub fn format_event(event: &SlideshowEvent) -> Vec<String> {
    match event {
        SlideshowEvent::Discovered { source, count } => {
            let noun = if *count == 1 { "image" } else { "images" };
            vec![format!("Found {} {} in {}", count, noun, source.display())]
        }
        SlideshowEvent::GeometryChosen(geometry) => geometry_lines(geometry),
        SlideshowEvent::FrameSaved {
            output,
            width,
            height,
            hue,
        } => {
            let line = match hue {
                Some(h) => format!(
                    "Saved cropped: {} ({}x{}, hue={:.1})",
                    output.display(),
                    width,
                    height,
                    h
                ),
                None => format!("Saved cropped: {} ({}x{})", output.display(), width, height),
            };
            vec![line]
        }
        SlideshowEvent::Reordered { names } => {
            vec![format!("Theme order: {}", names.join(", "))]
        }
        SlideshowEvent::GifWritten { path, frames } => {
            vec![format!("Wrote GIF: {} ({} frames)", path.display(), frames)]
        }
    }
}

pub fn print_event(event: &SlideshowEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}
