use super::types::{LabelMask, SeedRect, Segmenter};
use anyhow::{Context, Result};
use image::{GrayImage, RgbImage};
use opencv::{core, imgproc, prelude::*};

/// GrabCut segmentation backend
///
/// Wraps the vision library's iterative GMM + min-cut routine. The backend
/// owns nothing between calls: the label mask and the two 1x65 model buffers
/// the algorithm refines internally are allocated fresh per invocation and
/// never inspected here.
pub struct GrabCut {
    iterations: u32,
}

impl GrabCut {
    /// Create a GrabCut backend with a fixed iteration budget
    ///
    /// Larger budgets refine the segmentation further at the cost of runtime.
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Convert an RGB image into the BGR `Mat` layout the library expects
    fn rgb_to_bgr_mat(frame: &RgbImage) -> Result<Mat> {
        let (width, height) = frame.dimensions();

        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in frame.pixels() {
            data.push(pixel[2]);
            data.push(pixel[1]);
            data.push(pixel[0]);
        }

        // from_slice yields a single row; reshape to height rows of 3-channel
        // pixels, then clone so the Mat owns its data
        let flat = Mat::from_slice(&data)?;
        let bgr = flat.reshape(3, height as i32)?.try_clone()?;
        Ok(bgr)
    }
}

impl Segmenter for GrabCut {
    fn segment(&mut self, frame: &RgbImage, seed: SeedRect) -> Result<LabelMask> {
        let (width, height) = frame.dimensions();
        seed.validate_within(width, height)?;

        let bgr = Self::rgb_to_bgr_mat(frame).context("Failed to convert frame for GrabCut")?;

        // Zero mask, same spatial dimensions as the frame; fully overwritten
        // by the call since we initialize from the rectangle
        let mut mask = Mat::zeros(height as i32, width as i32, core::CV_8UC1)?.to_mat()?;

        // Gaussian-mixture model buffers, opaque to us
        let mut background_model = Mat::zeros(1, 65, core::CV_64FC1)?.to_mat()?;
        let mut foreground_model = Mat::zeros(1, 65, core::CV_64FC1)?.to_mat()?;

        let rect = core::Rect::new(
            seed.x as i32,
            seed.y as i32,
            seed.width as i32,
            seed.height as i32,
        );

        tracing::debug!(
            "Running GrabCut: {}x{} frame, seed ({}, {}) {}x{}, {} iterations",
            width,
            height,
            seed.x,
            seed.y,
            seed.width,
            seed.height,
            self.iterations
        );

        imgproc::grab_cut(
            &bgr,
            &mut mask,
            rect,
            &mut background_model,
            &mut foreground_model,
            self.iterations as i32,
            imgproc::GC_INIT_WITH_RECT,
        )
        .context("GrabCut segmentation failed")?;

        let labels = mask
            .data_bytes()
            .context("Failed to read GrabCut mask data")?
            .to_vec();

        GrayImage::from_raw(width, height, labels)
            .context("GrabCut mask dimensions do not match the input frame")
    }
}
