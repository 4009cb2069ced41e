/// Image preprocessing for OCR
///
/// Decodes the uploaded screenshot, converts it to grayscale and applies a
/// single fixed inverted threshold. Scoreboard captures are assumed to be
/// clean and axis-aligned, so there is no denoising, deskewing or adaptive
/// thresholding.
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use rayon::prelude::*;

use crate::error::PipelineError;

/// Default binarization threshold on the 0-255 intensity scale
pub const DEFAULT_THRESHOLD: u8 = 150;

/// Value written for pixels darker than the threshold
pub const FOREGROUND: u8 = 255;
/// Value written for pixels at or above the threshold
pub const BACKGROUND: u8 = 0;

/// Decode encoded image bytes (PNG or JPEG).
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, PipelineError> {
    image::load_from_memory(bytes).map_err(PipelineError::Decode)
}

/// Image preprocessor for OCR
///
/// Holds the threshold handed in from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ImagePreprocessor {
    threshold: u8,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ImagePreprocessor {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Decode bytes and binarize them in one step.
    pub fn preprocess_bytes(&self, bytes: &[u8]) -> Result<GrayImage, PipelineError> {
        let raw = decode_image(bytes)?;
        tracing::debug!("Decoded image {}x{}", raw.width(), raw.height());
        Ok(self.preprocess(&raw))
    }

    /// Convert a decoded image to a binary image ready for OCR
    ///
    /// Steps:
    /// 1. Drop alpha and convert to grayscale
    /// 2. Inverted threshold: darker than the threshold becomes foreground
    pub fn preprocess(&self, image: &DynamicImage) -> GrayImage {
        let gray = rgb_to_grayscale(&image.to_rgb8());
        self.binarize(&gray)
    }

    /// Apply the inverted fixed threshold to a grayscale image.
    pub fn binarize(&self, gray: &GrayImage) -> GrayImage {
        let (width, height) = gray.dimensions();
        let mut binary = GrayImage::new(width, height);
        if width == 0 || height == 0 {
            return binary;
        }

        let threshold = self.threshold;
        let row_size = width as usize;
        binary
            .as_flat_samples_mut()
            .samples
            .par_chunks_mut(row_size)
            .zip(gray.as_raw().par_chunks(row_size))
            .for_each(|(out_row, in_row)| {
                for (out, &value) in out_row.iter_mut().zip(in_row) {
                    *out = if value < threshold {
                        FOREGROUND
                    } else {
                        BACKGROUND
                    };
                }
            });

        binary
    }
}

/// Convert RGB to grayscale using BT.601 weights
///
/// Fixed-point: (4899*R + 9617*G + 1868*B + 2^13) >> 14, which rounds
/// 0.299*R + 0.587*G + 0.114*B to the nearest integer.
pub fn rgb_to_grayscale(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;
        let value = (4899 * r + 9617 * g + 1868 * b + (1 << 13)) >> 14;
        gray.put_pixel(x, y, Luma([value as u8]));
    }

    gray
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn test_default_threshold() {
        assert_eq!(ImagePreprocessor::default().threshold(), 150);
    }

    #[test]
    fn test_rgb_to_grayscale() {
        let mut img = RgbImage::new(5, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0])); // Red
        img.put_pixel(1, 0, Rgb([0, 255, 0])); // Green
        img.put_pixel(2, 0, Rgb([0, 0, 255])); // Blue
        img.put_pixel(3, 0, Rgb([255, 255, 255])); // White
        img.put_pixel(4, 0, Rgb([0, 0, 0])); // Black

        let gray = rgb_to_grayscale(&img);

        assert_eq!(gray.get_pixel(0, 0)[0], 76);
        assert_eq!(gray.get_pixel(1, 0)[0], 150);
        assert_eq!(gray.get_pixel(2, 0)[0], 29);
        assert_eq!(gray.get_pixel(3, 0)[0], 255);
        assert_eq!(gray.get_pixel(4, 0)[0], 0);
    }

    #[test]
    fn test_inverted_threshold_boundary() {
        let preprocessor = ImagePreprocessor::new(150);

        let mut gray = GrayImage::new(4, 1);
        gray.put_pixel(0, 0, Luma([0]));
        gray.put_pixel(1, 0, Luma([149]));
        gray.put_pixel(2, 0, Luma([150]));
        gray.put_pixel(3, 0, Luma([255]));

        let binary = preprocessor.binarize(&gray);
        assert_eq!(binary.get_pixel(0, 0)[0], FOREGROUND);
        assert_eq!(binary.get_pixel(1, 0)[0], FOREGROUND);
        assert_eq!(binary.get_pixel(2, 0)[0], BACKGROUND);
        assert_eq!(binary.get_pixel(3, 0)[0], BACKGROUND);
    }

    #[test]
    fn test_output_is_two_valued() {
        let preprocessor = ImagePreprocessor::default();
        let mut img = RgbaImage::new(16, 16);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 16) as u8, (y * 16) as u8, 128, 255]);
        }

        let binary = preprocessor.preprocess(&DynamicImage::ImageRgba8(img));
        assert_eq!(binary.dimensions(), (16, 16));
        assert!(binary
            .pixels()
            .all(|p| p[0] == FOREGROUND || p[0] == BACKGROUND));
    }

    #[test]
    fn test_preprocess_png_bytes() {
        let img = RgbImage::from_pixel(8, 4, Rgb([20, 20, 20]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let binary = ImagePreprocessor::default().preprocess_bytes(&bytes).unwrap();
        assert_eq!(binary.dimensions(), (8, 4));
        assert!(binary.pixels().all(|p| p[0] == FOREGROUND));
    }

    #[test]
    fn test_malformed_bytes_fail_to_decode() {
        let result = ImagePreprocessor::default().preprocess_bytes(b"definitely not a png");
        assert!(matches!(result, Err(PipelineError::Decode(_))));
    }

    #[test]
    fn test_empty_image() {
        let binary = ImagePreprocessor::default().binarize(&GrayImage::new(0, 0));
        assert_eq!(binary.dimensions(), (0, 0));
    }
}
