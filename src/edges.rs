//! Edge preprocessing shared by the sheet localizer, the seam extractor and
//! the bend detector: optional Gaussian smoothing followed by Canny.
//!
//! - Smoothing uses `imageproc::filter::gaussian_blur_f32`. The default
//!   σ = 1.1 matches a 5×5 kernel with automatically derived σ.
//! - Canny runs with hysteresis thresholds expressed in Sobel magnitude units
//!   (a full 0→255 step yields ~1020), so 50/150 keeps every clean boundary.
//! - Output is a binary map: 255 on edge pixels, 0 elsewhere.
use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use serde::Deserialize;

/// Parameters for the smoothing + Canny stage.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    /// Gaussian σ applied before Canny; `0` disables the extra smoothing.
    pub blur_sigma: f32,
    /// Lower hysteresis threshold.
    pub canny_low: f32,
    /// Upper hysteresis threshold.
    pub canny_high: f32,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 50.0,
            canny_high: 150.0,
        }
    }
}

impl EdgeOptions {
    /// Settings for already-binary inputs such as rasterised masks.
    pub fn unsmoothed() -> Self {
        Self {
            blur_sigma: 0.0,
            ..Self::default()
        }
    }
}

/// Compute a binary edge map of `gray`.
pub fn edge_map(gray: &GrayImage, options: &EdgeOptions) -> GrayImage {
    if gray.width() == 0 || gray.height() == 0 {
        return GrayImage::new(gray.width(), gray.height());
    }
    if options.blur_sigma > 0.0 {
        let blurred = gaussian_blur_f32(gray, options.blur_sigma);
        canny(&blurred, options.canny_low, options.canny_high)
    } else {
        canny(gray, options.canny_low, options.canny_high)
    }
}

/// Number of edge pixels in a binary map.
pub fn edge_pixel_count(edges: &GrayImage) -> usize {
    edges.pixels().filter(|p| p.0[0] > 0).count()
}
