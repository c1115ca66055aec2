mod file;
mod window;

pub use file::DirectorySink;
pub use window::WindowDisplay;

use anyhow::Result;
use image::RgbImage;

/// Trait for display destinations
pub trait DisplaySink {
    /// Show a frame under the given window title
    fn show(&mut self, window: &str, frame: &RgbImage) -> Result<()>;

    /// Block until the user advances (no-op for non-interactive sinks)
    fn wait_for_key(&mut self) -> Result<()>;
}
