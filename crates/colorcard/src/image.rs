//! Conversions between `image` crate buffers and planar [`RgbImage`]s.

use colorcard_core::{ImageError, RgbImage};

/// Convert an 8-bit `image::RgbImage` into planar `f64` form.
pub fn rgb_image_from_rgb8(img: &::image::RgbImage) -> Result<RgbImage, ImageError> {
    RgbImage::from_interleaved_u8(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Convert any decoded image (any channel layout and depth) into planar RGB.
///
/// Non-RGB8 inputs go through `image`'s own `to_rgb8` conversion first.
pub fn rgb_image_from_dynamic(img: &::image::DynamicImage) -> Result<RgbImage, ImageError> {
    match img {
        ::image::DynamicImage::ImageRgb8(rgb) => rgb_image_from_rgb8(rgb),
        other => rgb_image_from_rgb8(&other.to_rgb8()),
    }
}

/// Quantize a planar image back to 8 bits, rounding and clamping to `0..=255`.
pub fn to_rgb8(img: &RgbImage) -> Result<::image::RgbImage, ImageError> {
    let (width, height) = (img.width(), img.height());
    let invalid = ImageError::InvalidDimensions { width, height };
    let w = u32::try_from(width).map_err(|_| invalid.clone())?;
    let h = u32::try_from(height).map_err(|_| invalid.clone())?;

    let [r, g, b] = img.planes();
    let raw: Vec<u8> = r
        .iter()
        .zip(g)
        .zip(b)
        .flat_map(|((&r, &g), &b)| [quantize(r), quantize(g), quantize(b)])
        .collect();
    ::image::RgbImage::from_raw(w, h, raw).ok_or(invalid)
}

#[inline]
fn quantize(v: f64) -> u8 {
    // NaN saturates to 0
    v.round().clamp(0.0, 255.0) as u8
}
