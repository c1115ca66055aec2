use std::str::FromStr;

use anyhow::Result;
use image::{GrayImage, RgbImage};
use thiserror::Error;

/// Per-pixel label mask produced by segmentation
/// Dimensions match the input image; each pixel holds a `MaskLabel` value
pub type LabelMask = GrayImage;

/// The four per-pixel labels GrabCut assigns
///
/// The discriminants match the vision library's mask constants, so raw mask
/// bytes can be compared against `label as u8` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MaskLabel {
    DefiniteBackground = 0,
    DefiniteForeground = 1,
    ProbableBackground = 2,
    ProbableForeground = 3,
}

impl MaskLabel {
    /// Fixed order used when visualizing the individual label masks
    pub const DISPLAY_ORDER: [Self; 4] = [
        Self::DefiniteBackground,
        Self::ProbableBackground,
        Self::DefiniteForeground,
        Self::ProbableForeground,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::DefiniteBackground => "Definite Background",
            Self::ProbableBackground => "Probable Background",
            Self::DefiniteForeground => "Definite Foreground",
            Self::ProbableForeground => "Probable Foreground",
        }
    }

    /// Whether pixels with this label are kept when compositing
    pub const fn is_foreground(self) -> bool {
        matches!(self, Self::DefiniteForeground | Self::ProbableForeground)
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::DefiniteBackground),
            1 => Some(Self::DefiniteForeground),
            2 => Some(Self::ProbableBackground),
            3 => Some(Self::ProbableForeground),
            _ => None,
        }
    }
}

/// Errors for seed rectangle parsing and validation
#[derive(Debug, Error)]
pub enum SeedRectError {
    #[error("expected 'x,y,width,height', got '{0}'")]
    Parse(String),

    #[error("seed rectangle has zero area")]
    EmptyRect,

    #[error("seed rectangle {rect:?} extends outside the {width}x{height} image")]
    OutOfBounds {
        rect: SeedRect,
        width: u32,
        height: u32,
    },
}

/// Bounding box that seeds the segmentation: everything outside it starts as
/// definite background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SeedRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that the rectangle is non-empty and lies fully inside an
    /// `image_width` x `image_height` image
    pub fn validate_within(
        &self,
        image_width: u32,
        image_height: u32,
    ) -> Result<(), SeedRectError> {
        if self.width == 0 || self.height == 0 {
            return Err(SeedRectError::EmptyRect);
        }

        let fits_horizontally = self
            .x
            .checked_add(self.width)
            .is_some_and(|right| right <= image_width);
        let fits_vertically = self
            .y
            .checked_add(self.height)
            .is_some_and(|bottom| bottom <= image_height);

        if !fits_horizontally || !fits_vertically {
            return Err(SeedRectError::OutOfBounds {
                rect: *self,
                width: image_width,
                height: image_height,
            });
        }

        Ok(())
    }
}

impl FromStr for SeedRect {
    type Err = SeedRectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| SeedRectError::Parse(s.to_string()))?;

        match parts[..] {
            [x, y, width, height] => Ok(Self::new(x, y, width, height)),
            _ => Err(SeedRectError::Parse(s.to_string())),
        }
    }
}

/// Trait for segmentation backends
///
/// The only production implementation is the GrabCut backend; the seam keeps
/// the pipeline testable without the vision library.
pub trait Segmenter {
    /// Segment a frame into the four mask labels, seeded by `seed`
    ///
    /// The returned mask has the same spatial dimensions as `frame`.
    fn segment(&mut self, frame: &RgbImage, seed: SeedRect) -> Result<LabelMask>;
}
