//! Image preparation before OCR: upscale, grayscale, contrast, binarize.
//!
//! Small screen grabs recognize poorly as-is; a fixed enhancement pass raises
//! accuracy considerably for dialog-box sized Japanese text.

use image::{imageops, GrayImage, RgbaImage};

use crate::settings::PreprocessSettings;

/// Run the full enhancement pass with the configured parameters.
pub fn prepare_for_ocr(captured: &RgbaImage, settings: &PreprocessSettings) -> GrayImage {
    let upscaled = upscale(captured, settings.scale_factor);
    let gray = to_grayscale(&upscaled);
    let contrasted = adjust_contrast(&gray, settings.contrast_factor);
    binarize(&contrasted, settings.binarize_threshold)
}

/// Luma conversion with alpha composited over white, so transparent captures
/// don't binarize to solid black.
fn to_grayscale(image: &RgbaImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut luma = GrayImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let r = r as f32 * alpha + 255.0 * (1.0 - alpha);
        let g = g as f32 * alpha + 255.0 * (1.0 - alpha);
        let b = b as f32 * alpha + 255.0 * (1.0 - alpha);
        let value = (0.299 * r + 0.587 * g + 0.114 * b).round() as u8;
        luma.put_pixel(x, y, image::Luma([value]));
    }
    luma
}

fn upscale(image: &RgbaImage, factor: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let new_w = ((width as f32 * factor).round() as u32).max(1);
    let new_h = ((height as f32 * factor).round() as u32).max(1);
    if (new_w, new_h) == (width, height) {
        return image.clone();
    }
    imageops::resize(image, new_w, new_h, imageops::FilterType::Lanczos3)
}

/// Scale pixel distance from the image mean by `factor`.
fn adjust_contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let mean = mean_luma(image);
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        let value = mean + (pixel[0] as f32 - mean) * factor;
        pixel[0] = value.round().clamp(0.0, 255.0) as u8;
    }
    output
}

fn mean_luma(image: &GrayImage) -> f32 {
    let (width, height) = image.dimensions();
    let count = (width as u64) * (height as u64);
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image.pixels().map(|p| p[0] as u64).sum();
    sum as f32 / count as f32
}

/// Pixels below the threshold go black, everything else white.
fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        pixel[0] = if pixel[0] < threshold { 0 } else { 255 };
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{adjust_contrast, binarize, prepare_for_ocr, to_grayscale, upscale};
    use crate::settings::PreprocessSettings;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    fn gray(w: u32, h: u32, v: u8) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([v]))
    }

    fn rgba(w: u32, h: u32, v: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255]))
    }

    #[test]
    fn binarize_threshold_is_exclusive_below() {
        // threshold 150: 149 -> black, 150 -> white
        let below = binarize(&gray(2, 2, 149), 150);
        assert!(below.pixels().all(|p| p[0] == 0));

        let at = binarize(&gray(2, 2, 150), 150);
        assert!(at.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn upscale_doubles_dimensions() {
        let out = upscale(&rgba(30, 20, 100), 2.0);
        assert_eq!(out.dimensions(), (60, 40));
    }

    #[test]
    fn upscale_factor_one_is_identity() {
        let out = upscale(&rgba(30, 20, 100), 1.0);
        assert_eq!(out.dimensions(), (30, 20));
    }

    #[test]
    fn contrast_pushes_values_away_from_mean() {
        let mut image = gray(2, 1, 0);
        image.put_pixel(0, 0, Luma([100]));
        image.put_pixel(1, 0, Luma([200]));
        // mean 150; factor 2 -> 50 and 250
        let out = adjust_contrast(&image, 2.0);
        assert_eq!(out.get_pixel(0, 0)[0], 50);
        assert_eq!(out.get_pixel(1, 0)[0], 250);
    }

    #[test]
    fn contrast_clamps_to_byte_range() {
        let mut image = gray(2, 1, 0);
        image.put_pixel(1, 0, Luma([255]));
        let out = adjust_contrast(&image, 4.0);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn grayscale_composites_alpha_over_white() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let out = to_grayscale(&image);
        assert_eq!(out.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn full_pass_yields_pure_black_and_white_at_doubled_size() {
        let mut image = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        for x in 3..7 {
            for y in 3..7 {
                image.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
        let out = prepare_for_ocr(&image, &PreprocessSettings::default());
        assert_eq!(out.dimensions(), (20, 20));
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
