use clap::Parser;
use screenshot_slideshow::config::{
    DEFAULT_DURATION_MS, DEFAULT_GIF, DEFAULT_OUT, DEFAULT_SRC, DEFAULT_TRIM_PADDING,
    SlideshowConfig,
};
use screenshot_slideshow::{output, slideshow};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "screenshot-slideshow")]
#[command(about = "Create a uniform crop + animated GIF from screenshots")]
#[command(long_about = "\
Create a uniform crop + animated GIF from screenshots

Scans --src for PNG/JPEG/WebP screenshots, crops every one to a common size,
writes the cropped stills to --out and a looping animated GIF to --gif.

Crop size (first match wins, per axis):
  --width / --height    explicit size
  --trim                union of detected content + padding, clamped to the
                        smallest screenshot (explicit size then re-crops it)
  default               smallest width x smallest height across all inputs

Exit codes:
  0  success
  2  source folder missing or not a directory
  3  no screenshot images found")]
#[command(version)]
struct Cli {
    /// Source folder with screenshots
    #[arg(long, default_value = DEFAULT_SRC)]
    src: PathBuf,

    /// Output folder for cropped images
    #[arg(long, default_value = DEFAULT_OUT)]
    out: PathBuf,

    /// Target crop width
    #[arg(long)]
    width: Option<u32>,

    /// Target crop height
    #[arg(long)]
    height: Option<u32>,

    /// Output animated GIF path
    #[arg(long, default_value = DEFAULT_GIF)]
    gif: PathBuf,

    /// Resize final frames to this width while preserving aspect
    #[arg(long)]
    resize_width: Option<u32>,

    /// Frame duration in ms for the GIF
    #[arg(long, default_value_t = DEFAULT_DURATION_MS)]
    duration: u32,

    /// Crop to the detected content area of all screenshots
    #[arg(long)]
    trim: bool,

    /// Padding in pixels around the trimmed content area
    #[arg(long, default_value_t = DEFAULT_TRIM_PADDING)]
    trim_padding: u32,

    /// Order frames by dominant hue before encoding
    #[arg(long)]
    cycle_themes: bool,

    /// Play the frame sequence this many times per GIF loop
    #[arg(long, default_value_t = 1)]
    repeat: usize,
}

impl From<Cli> for SlideshowConfig {
    fn from(cli: Cli) -> Self {
        Self {
            src: cli.src,
            out: cli.out,
            gif: cli.gif,
            width: cli.width,
            height: cli.height,
            resize_width: cli.resize_width,
            duration_ms: cli.duration,
            trim: cli.trim,
            trim_padding: cli.trim_padding,
            cycle_themes: cli.cycle_themes,
            repeat: cli.repeat,
        }
    }
}

fn main() -> ExitCode {
    let config = SlideshowConfig::from(Cli::parse());

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event);
        }
    });

    let result = slideshow::run(&config, Some(tx));
    // The sender was consumed by the run, so the printer drains and exits
    printer.join().unwrap();

    match result {
        Ok(_) => {
            println!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_expected() => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
