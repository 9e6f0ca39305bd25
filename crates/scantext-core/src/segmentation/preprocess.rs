//! Page binarization: adaptive thresholding plus morphological closing.
//!
//! Pure Rust implementations of two classic `OpenCV` operations:
//! - Gaussian-weighted adaptive threshold with inverse binary polarity
//!   (`cv2.adaptiveThreshold(..., ADAPTIVE_THRESH_GAUSSIAN_C, THRESH_BINARY_INV)`)
//! - Rectangular dilation and erosion (`cv2.dilate`/`cv2.erode` with a
//!   `MORPH_RECT` structuring element)
//!
//! The closing step (dilate then erode with the same kernel) fuses adjacent
//! character strokes into solid block shapes while discarding thin noise.
//! Both morphology passes are separable, so the kernel cost is linear per
//! axis instead of quadratic.

// Pixel coordinates and kernel weights use mixed numeric types.
// Conversions are safe for practical image sizes (< 10000 pixels).
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use image::{imageops, GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};

/// Tunables for the binarization stage. Defaults are tuned for 300 dpi
/// scans (neighborhood 11, bias 2, 50x41 closing kernel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Side length of the square thresholding neighborhood. Must be odd.
    pub block_size: u32,
    /// Bias constant subtracted from the local weighted mean.
    pub bias: f32,
    /// Structuring element width for the closing step.
    pub kernel_width: u32,
    /// Structuring element height for the closing step.
    pub kernel_height: u32,
}

impl Default for PreprocessConfig {
    #[inline]
    fn default() -> Self {
        Self {
            block_size: 11,
            bias: 2.0,
            kernel_width: 50,
            kernel_height: 41,
        }
    }
}

/// Binarize a page raster into a text-ink mask.
///
/// Output dimensions equal the input dimensions; foreground (probable ink)
/// is 255, background is 0.
#[must_use = "returns the binary mask; the input page is not modified"]
pub fn binarize(page: &RgbImage, config: &PreprocessConfig) -> GrayImage {
    let gray = imageops::grayscale(page);
    let mask = adaptive_threshold_inv(&gray, config.block_size, config.bias);
    let dilated = dilate_rect(&mask, config.kernel_width, config.kernel_height);
    erode_rect(&dilated, config.kernel_width, config.kernel_height)
}

/// Gaussian-weighted adaptive threshold with inverse polarity.
///
/// A pixel becomes foreground (255) when its value does not exceed the
/// Gaussian-weighted mean of its `block_size` neighborhood minus `bias`.
/// Borders are replicated, matching `OpenCV`'s default border mode.
#[must_use = "returns a new thresholded image"]
pub fn adaptive_threshold_inv(gray: &GrayImage, block_size: u32, bias: f32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut result = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return result;
    }

    let kernel = gaussian_kernel(block_size);
    let means = local_gaussian_mean(gray, &kernel);

    for y in 0..height {
        for x in 0..width {
            let value = f32::from(gray.get_pixel(x, y).0[0]);
            let threshold = means[(y * width + x) as usize] - bias;
            let out = if value > threshold { 0 } else { 255 };
            result.put_pixel(x, y, Luma([out]));
        }
    }
    result
}

/// Normalized 1-D Gaussian weights for a neighborhood of `size` pixels.
///
/// Sigma follows `OpenCV`'s convention when derived from the kernel size:
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8` (2.0 for the default size of 11).
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let sigma = 0.3f32.mul_add((size as f32 - 1.0).mul_add(0.5, -1.0), 0.8);
    let center = i64::from(size / 2);

    let mut weights: Vec<f32> = (0..i64::from(size))
        .map(|i| {
            let d = (i - center) as f32;
            (-d * d / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Separable Gaussian-weighted local mean with replicated borders.
///
/// Returns a row-major `width * height` buffer of mean values.
fn local_gaussian_mean(gray: &GrayImage, kernel: &[f32]) -> Vec<f32> {
    let (width, height) = gray.dimensions();
    let (w, h) = (width as usize, height as usize);
    let center = (kernel.len() / 2) as i64;

    // Horizontal pass.
    let mut horizontal = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let xi = (x as i64 + k as i64 - center).clamp(0, w as i64 - 1) as u32;
                acc += weight * f32::from(gray.get_pixel(xi, y as u32).0[0]);
            }
            horizontal[y * w + x] = acc;
        }
    }

    // Vertical pass.
    let mut means = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let yi = (y as i64 + k as i64 - center).clamp(0, h as i64 - 1) as usize;
                acc += weight * horizontal[yi * w + x];
            }
            means[y * w + x] = acc;
        }
    }
    means
}

/// Rectangular dilation with a `kernel_width` x `kernel_height` structuring
/// element anchored at its center (`OpenCV` anchor convention: for an even
/// side the window reaches one pixel further to the left/top).
#[must_use = "returns a new dilated image"]
pub fn dilate_rect(mask: &GrayImage, kernel_width: u32, kernel_height: u32) -> GrayImage {
    let horizontal = directional_extremum(mask, kernel_width, Axis::Horizontal, true);
    directional_extremum(&horizontal, kernel_height, Axis::Vertical, true)
}

/// Rectangular erosion, the dual of [`dilate_rect`]. Pixels outside the
/// image do not constrain the minimum, matching `OpenCV`'s default border
/// value for erosion.
#[must_use = "returns a new eroded image"]
pub fn erode_rect(mask: &GrayImage, kernel_width: u32, kernel_height: u32) -> GrayImage {
    let horizontal = directional_extremum(mask, kernel_width, Axis::Horizontal, false);
    directional_extremum(&horizontal, kernel_height, Axis::Vertical, false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One separable morphology pass: running max (dilation) or min (erosion)
/// over a 1-D window of `kernel` pixels along `axis`.
fn directional_extremum(src: &GrayImage, kernel: u32, axis: Axis, maximize: bool) -> GrayImage {
    let (width, height) = src.dimensions();
    let mut result = GrayImage::new(width, height);
    if width == 0 || height == 0 || kernel == 0 {
        return result;
    }

    // Window [pos - reach_back, pos + reach_forward], clamped to the image.
    let reach_back = kernel / 2;
    let reach_forward = kernel - 1 - reach_back;

    let extent = match axis {
        Axis::Horizontal => width,
        Axis::Vertical => height,
    };
    let lanes = match axis {
        Axis::Horizontal => height,
        Axis::Vertical => width,
    };

    for lane in 0..lanes {
        for pos in 0..extent {
            let lo = pos.saturating_sub(reach_back);
            let hi = (pos + reach_forward).min(extent - 1);

            let mut acc = if maximize { 0u8 } else { u8::MAX };
            for i in lo..=hi {
                let value = match axis {
                    Axis::Horizontal => src.get_pixel(i, lane).0[0],
                    Axis::Vertical => src.get_pixel(lane, i).0[0],
                };
                acc = if maximize {
                    acc.max(value)
                } else {
                    acc.min(value)
                };
            }

            match axis {
                Axis::Horizontal => result.put_pixel(pos, lane, Luma([acc])),
                Axis::Vertical => result.put_pixel(lane, pos, Luma([acc])),
            }
        }
    }
    result
}
