use super::DisplaySink;
use anyhow::{Context, Result};
use image::RgbImage;
use opencv::{highgui, prelude::*};

/// Interactive window display backed by the vision library's GUI
///
/// Each distinct window title gets its own window; `wait_for_key` blocks
/// indefinitely until the user presses a key in any of them.
pub struct WindowDisplay;

impl WindowDisplay {
    pub const fn new() -> Self {
        Self
    }

    /// Convert an RGB frame into the BGR `Mat` layout `imshow` expects
    fn frame_to_mat(frame: &RgbImage) -> Result<Mat> {
        let (width, height) = frame.dimensions();

        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in frame.pixels() {
            data.push(pixel[2]);
            data.push(pixel[1]);
            data.push(pixel[0]);
        }

        let flat = Mat::from_slice(&data)?;
        Ok(flat.reshape(3, height as i32)?.try_clone()?)
    }
}

impl DisplaySink for WindowDisplay {
    fn show(&mut self, window: &str, frame: &RgbImage) -> Result<()> {
        let mat = Self::frame_to_mat(frame)
            .with_context(|| format!("Failed to convert frame for window '{window}'"))?;
        highgui::imshow(window, &mat)
            .with_context(|| format!("Failed to display window '{window}'"))?;
        Ok(())
    }

    fn wait_for_key(&mut self) -> Result<()> {
        highgui::wait_key(0).context("Failed to wait for key press")?;
        Ok(())
    }
}

impl Drop for WindowDisplay {
    fn drop(&mut self) {
        // Window teardown failures are not worth surfacing during drop
        if let Err(e) = highgui::destroy_all_windows() {
            tracing::debug!("Failed to destroy display windows: {e}");
        }
    }
}
