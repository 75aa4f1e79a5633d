use crate::error::{Error, Result};
use image::{GrayImage, Luma};

/// Borrowed 8-bit image with interleaved channels (1 = gray, 3 = RGB,
/// 4 = RGBA) and an explicit row stride in bytes.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub channels: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed single-channel view.
    pub fn gray(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            channels: 1,
            data,
        }
    }

    /// Tightly packed RGB view.
    pub fn rgb(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * 3,
            channels: 3,
            data,
        }
    }

    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }

    /// Check the layout before any pixel is touched.
    pub fn validate(&self) -> Result<()> {
        if self.w == 0 || self.h == 0 {
            return Err(Error::InvalidImage(format!(
                "image has zero area ({}x{})",
                self.w, self.h
            )));
        }
        if !matches!(self.channels, 1 | 3 | 4) {
            return Err(Error::InvalidImage(format!(
                "unsupported channel count {}",
                self.channels
            )));
        }
        let row_bytes = self.w * self.channels;
        if self.stride < row_bytes {
            return Err(Error::InvalidImage(format!(
                "stride {} shorter than row ({} bytes)",
                self.stride, row_bytes
            )));
        }
        let needed = self.stride * (self.h - 1) + row_bytes;
        if self.data.len() < needed {
            return Err(Error::InvalidImage(format!(
                "buffer holds {} bytes, layout needs {}",
                self.data.len(),
                needed
            )));
        }
        Ok(())
    }

    /// Convert to an owned grayscale buffer using ITU-R BT.601 luma weights.
    pub fn to_gray(&self) -> Result<GrayImage> {
        self.validate()?;
        let mut out = GrayImage::new(self.w as u32, self.h as u32);
        for y in 0..self.h {
            let src = self.row(y);
            for x in 0..self.w {
                let px = &src[x * self.channels..(x + 1) * self.channels];
                let v = match self.channels {
                    1 => px[0],
                    _ => {
                        let l = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                        l.round().clamp(0.0, 255.0) as u8
                    }
                };
                out.put_pixel(x as u32, y as u32, Luma([v]));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_converts_with_luma_weights() {
        let data = [255u8, 0, 0, 0, 255, 0];
        let img = ImageU8::rgb(2, 1, &data);
        let gray = img.to_gray().unwrap();
        assert_eq!(gray.get_pixel(0, 0).0[0], 76);
        assert_eq!(gray.get_pixel(1, 0).0[0], 150);
    }

    #[test]
    fn strided_gray_skips_padding() {
        let data = [1u8, 2, 99, 3, 4, 99];
        let img = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            channels: 1,
            data: &data,
        };
        let gray = img.to_gray().unwrap();
        assert_eq!(gray.into_raw(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let data = [0u8; 5];
        let img = ImageU8::gray(3, 2, &data);
        assert!(matches!(img.validate(), Err(Error::InvalidImage(_))));
    }
}
