use crate::segmentation::{LabelMask, MaskLabel};
use anyhow::{ensure, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Binary view of a single label: 255 where the mask holds `label`, 0 elsewhere
pub fn label_view(mask: &LabelMask, label: MaskLabel) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get_pixel(x, y)[0] == label as u8 {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Collapse the four labels into a keep-mask: background-like pixels
/// (definite or probable background) become 0, everything else 255
pub fn collapse_labels(mask: &LabelMask) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        match MaskLabel::from_byte(mask.get_pixel(x, y)[0]) {
            Some(label) if !label.is_foreground() => Luma([0]),
            // Foreground-like labels and out-of-range bytes are kept
            _ => Luma([255]),
        }
    })
}

/// Apply a 0/255 keep-mask to an image
///
/// Pixels are kept unchanged where the mask is 255 and zeroed on every
/// channel where it is 0, the same result as a per-channel bitwise AND.
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    ensure!(
        image.dimensions() == mask.dimensions(),
        "Mask dimensions {:?} do not match image dimensions {:?}",
        mask.dimensions(),
        image.dimensions()
    );

    Ok(RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let keep = mask.get_pixel(x, y)[0];
        let pixel = image.get_pixel(x, y);
        Rgb([pixel[0] & keep, pixel[1] & keep, pixel[2] & keep])
    }))
}

/// Convert a grayscale mask to an RGB image for display
pub fn mask_to_rgb(mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        let value = mask.get_pixel(x, y)[0];
        Rgb([value, value, value])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_labels(width: u32, height: u32, labels: &[MaskLabel]) -> LabelMask {
        let data = labels.iter().map(|&label| label as u8).collect();
        GrayImage::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn label_view_marks_only_matching_pixels() {
        let mask = mask_from_labels(
            2,
            2,
            &[
                MaskLabel::DefiniteBackground,
                MaskLabel::ProbableForeground,
                MaskLabel::ProbableForeground,
                MaskLabel::DefiniteForeground,
            ],
        );

        let view = label_view(&mask, MaskLabel::ProbableForeground);
        assert_eq!(view.get_pixel(0, 0)[0], 0);
        assert_eq!(view.get_pixel(1, 0)[0], 255);
        assert_eq!(view.get_pixel(0, 1)[0], 255);
        assert_eq!(view.get_pixel(1, 1)[0], 0);
    }

    #[test]
    fn collapse_zeroes_background_like_labels_only() {
        let mask = mask_from_labels(
            4,
            1,
            &[
                MaskLabel::DefiniteBackground,
                MaskLabel::ProbableBackground,
                MaskLabel::DefiniteForeground,
                MaskLabel::ProbableForeground,
            ],
        );

        let keep = collapse_labels(&mask);
        assert_eq!(keep.get_pixel(0, 0)[0], 0);
        assert_eq!(keep.get_pixel(1, 0)[0], 0);
        assert_eq!(keep.get_pixel(2, 0)[0], 255);
        assert_eq!(keep.get_pixel(3, 0)[0], 255);
    }

    #[test]
    fn collapse_preserves_dimensions() {
        let mask = GrayImage::new(7, 5);
        let keep = collapse_labels(&mask);
        assert_eq!(keep.dimensions(), (7, 5));
    }

    #[test]
    fn apply_mask_keeps_and_zeroes_per_channel() {
        let image = RgbImage::from_pixel(2, 1, Rgb([10, 20, 30]));
        let mut keep = GrayImage::from_pixel(2, 1, Luma([255]));
        keep.put_pixel(1, 0, Luma([0]));

        let output = apply_mask(&image, &keep).unwrap();
        assert_eq!(*output.get_pixel(0, 0), Rgb([10, 20, 30]));
        assert_eq!(*output.get_pixel(1, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn apply_mask_rejects_mismatched_dimensions() {
        let image = RgbImage::new(4, 4);
        let keep = GrayImage::new(3, 4);
        assert!(apply_mask(&image, &keep).is_err());
    }

    // 4x4 mask with two foreground-like and two explicitly background-like
    // pixels against a solid color: exactly the background-like positions
    // (and the default-background remainder) must be zeroed on all channels.
    #[test]
    fn synthetic_mask_composites_against_solid_color() {
        let mut labels = vec![MaskLabel::DefiniteBackground; 16];
        labels[0] = MaskLabel::ProbableForeground;
        labels[15] = MaskLabel::DefiniteForeground;
        labels[5] = MaskLabel::ProbableBackground;
        labels[10] = MaskLabel::DefiniteBackground;
        let mask = mask_from_labels(4, 4, &labels);

        let color = Rgb([200, 150, 100]);
        let image = RgbImage::from_pixel(4, 4, color);

        let keep = collapse_labels(&mask);
        let output = apply_mask(&image, &keep).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                let foreground = (x, y) == (0, 0) || (x, y) == (3, 3);
                let expected = if foreground { color } else { Rgb([0, 0, 0]) };
                assert_eq!(*output.get_pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn mask_to_rgb_replicates_gray_value() {
        let mut mask = GrayImage::from_pixel(2, 1, Luma([255]));
        mask.put_pixel(1, 0, Luma([0]));

        let rgb = mask_to_rgb(&mask);
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*rgb.get_pixel(1, 0), Rgb([0, 0, 0]));
    }
}
