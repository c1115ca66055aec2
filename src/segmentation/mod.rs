mod grabcut;
pub mod types;

pub use grabcut::GrabCut;
pub use types::{LabelMask, MaskLabel, SeedRect, SeedRectError, Segmenter};

use anyhow::Result;

/// Create the default segmentation backend (GrabCut)
pub fn create_default_segmenter(iterations: u32) -> Result<Box<dyn Segmenter>> {
    Ok(Box::new(GrabCut::new(iterations)))
}
