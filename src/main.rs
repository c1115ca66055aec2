mod compositing;
mod display;
mod segmentation;

use anyhow::{Context, Result};
use clap::Parser;
use display::{DirectorySink, DisplaySink, WindowDisplay};
use image::RgbImage;
use segmentation::{MaskLabel, SeedRect, Segmenter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image to segment
    #[arg(short, long, default_value = "images/adrian.jpg")]
    image: PathBuf,

    /// Number of GrabCut iterations (larger value => slower runtime)
    #[arg(short = 'c', long = "iter", default_value_t = 10,
          value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// Seed rectangle as x,y,width,height; everything outside it starts as
    /// definite background
    #[arg(short, long, default_value = "151,43,236,368")]
    rect: SeedRect,

    /// Save displayed frames as PNG files to this directory instead of
    /// opening windows (headless mode, no key-press pauses)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("Boxcut starting");
    tracing::info!("Image: {}", args.image.display());
    tracing::info!(
        "Seed rectangle: ({}, {}) {}x{}",
        args.rect.x,
        args.rect.y,
        args.rect.width,
        args.rect.height
    );
    tracing::info!("Iterations: {}", args.iterations);

    let image = image::open(&args.image)
        .with_context(|| format!("Failed to open image {}", args.image.display()))?
        .into_rgb8();
    tracing::info!("Loaded {}x{} image", image.width(), image.height());

    let mut segmenter = segmentation::create_default_segmenter(args.iterations)
        .context("Failed to create segmentation backend")?;

    let mut sink: Box<dyn DisplaySink> = match &args.save_dir {
        Some(dir) => {
            tracing::info!("Headless mode, saving frames to {}", dir.display());
            Box::new(DirectorySink::new(dir)?)
        }
        None => Box::new(WindowDisplay::new()),
    };

    run_pipeline(&image, args.rect, segmenter.as_mut(), sink.as_mut())
}

/// Segment, visualize each label mask, then composite and show the result
fn run_pipeline<S, D>(image: &RgbImage, seed: SeedRect, segmenter: &mut S, sink: &mut D) -> Result<()>
where
    S: Segmenter + ?Sized,
    D: DisplaySink + ?Sized,
{
    let segment_start = Instant::now();
    let mask = segmenter
        .segment(image, seed)
        .context("Failed to segment image")?;
    tracing::info!(
        "Applying GrabCut took {:.2} seconds",
        segment_start.elapsed().as_secs_f64()
    );

    // Show each of the four label categories as a binary mask
    for label in MaskLabel::DISPLAY_ORDER {
        tracing::info!("Showing mask for '{}'", label.name());
        let view = compositing::label_view(&mask, label);
        sink.show(label.name(), &compositing::mask_to_rgb(&view))?;
        sink.wait_for_key()?;
    }

    // Collapse to a keep-mask and bitwise-AND it over the input
    let output_mask = compositing::collapse_labels(&mask);
    let output = compositing::apply_mask(image, &output_mask)?;

    sink.show("Input", image)?;
    sink.show("GrabCut Mask", &compositing::mask_to_rgb(&output_mask))?;
    sink.show("GrabCut Output", &output)?;
    sink.wait_for_key()?;

    Ok(())
}
