//! Image inputs: borrowed pixel views, grayscale conversion and file I/O.
//!
//! The pipeline itself works on owned `image::GrayImage` buffers so that the
//! `imageproc` operators can run on them directly; callers holding raw
//! decoded frames go through [`ImageU8`].
pub mod io;
pub mod u8;

pub use self::u8::ImageU8;

use crate::types::BoundingBox;
use image::GrayImage;

/// Copy the region `roi` out of `gray`, clamped to the image.
///
/// Returns `None` when the box lies entirely outside the image.
pub fn crop_gray(gray: &GrayImage, roi: BoundingBox) -> Option<GrayImage> {
    let roi = roi.clamp_to(gray.width(), gray.height())?;
    Some(image::imageops::crop_imm(gray, roi.x, roi.y, roi.width, roi.height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn crop_copies_region() {
        let mut gray = GrayImage::new(8, 6);
        gray.put_pixel(5, 4, Luma([200]));
        let roi = crop_gray(&gray, BoundingBox::new(4, 3, 10, 10)).expect("overlaps image");
        assert_eq!(roi.dimensions(), (4, 3));
        assert_eq!(roi.get_pixel(1, 1).0[0], 200);
    }

    #[test]
    fn crop_outside_is_none() {
        let gray = GrayImage::new(8, 6);
        assert!(crop_gray(&gray, BoundingBox::new(8, 0, 2, 2)).is_none());
    }
}
