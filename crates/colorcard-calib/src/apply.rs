use crate::CalibrationError;
use colorcard_core::{CalibrationMatrix, RgbImage, RgbImageView};
use log::debug;
use nalgebra::Matrix3xX;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Apply `matrix` to every pixel of `image`.
///
/// The planes are stacked into a 3×(width·height) matrix, one column per
/// pixel in row-major order, left-multiplied by the calibration matrix and
/// split back into planes in the same pixel order. Values are not clamped.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(image, matrix),
        fields(width = image.width, height = image.height)
    )
)]
pub fn apply_matrix(
    image: &RgbImageView<'_>,
    matrix: &CalibrationMatrix,
) -> Result<RgbImage, CalibrationError> {
    image.validate()?;
    let n = image.len();
    let pixels = Matrix3xX::from_fn(n, |c, i| image.planes[c][i]);
    let corrected = matrix.m * pixels;
    debug!("corrected {n} pixels");

    let plane = |c: usize| -> Vec<f64> { corrected.row(c).iter().copied().collect() };
    Ok(RgbImage::from_planes(
        image.width,
        image.height,
        [plane(0), plane(1), plane(2)],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit_calibration_matrix;
    use colorcard_core::{Color, ImageError};

    /// Non-square image whose pixels are all distinguishable.
    fn ramp_image(width: usize, height: usize) -> RgbImage {
        let n = width * height;
        let red = (0..n).map(|i| (i % width) as f64 * 10.0).collect();
        let green = (0..n).map(|i| (i / width) as f64 * 20.0).collect();
        let blue = (0..n).map(|i| i as f64).collect();
        RgbImage::from_planes(width, height, [red, green, blue]).expect("image")
    }

    #[test]
    fn identity_fit_round_trips_image() {
        let img = ramp_image(7, 3);
        let table = [
            Color::new(41.0, 32.0, 32.0),
            Color::new(200.0, 38.0, 46.0),
            Color::new(60.0, 150.0, 70.0),
            Color::new(50.0, 60.0, 170.0),
            Color::new(240.0, 240.0, 240.0),
        ];
        let ccm = fit_calibration_matrix(&table, &table).expect("fit");

        let out = apply_matrix(&img.view(), &ccm).expect("apply");
        assert_eq!(out.width(), 7);
        assert_eq!(out.height(), 3);
        for c in 0..3 {
            for (a, b) in out.plane(c).iter().zip(img.plane(c)) {
                assert!((a - b).abs() < 1e-9, "channel {c}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn pixel_order_survives_flatten_and_reshape() {
        let img = ramp_image(5, 2);
        // rotate channels: out = (g, b, r)
        let rotate =
            CalibrationMatrix::from_array([[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        let out = apply_matrix(&img.view(), &rotate).expect("apply");
        for y in 0..2 {
            for x in 0..5 {
                let src = img.pixel(x, y).expect("src pixel");
                let dst = out.pixel(x, y).expect("dst pixel");
                assert_eq!(dst, Color::new(src.g, src.b, src.r), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn matches_per_pixel_application() {
        let img = ramp_image(4, 4);
        let ccm = CalibrationMatrix::from_array([
            [1.1, 0.05, -0.02],
            [0.03, 0.9, 0.04],
            [0.0, 0.1, 1.2],
        ]);
        let out = apply_matrix(&img.view(), &ccm).expect("apply");
        for y in 0..4 {
            for x in 0..4 {
                let expected = ccm.apply(img.pixel(x, y).expect("pixel"));
                let got = out.pixel(x, y).expect("pixel");
                assert!(got.max_abs_diff(&expected) < 1e-9);
            }
        }
    }

    #[test]
    fn short_plane_is_rejected() {
        let full = [0.0; 16];
        let short = [0.0; 10];
        let view = RgbImageView {
            width: 4,
            height: 4,
            planes: [&full, &short, &full],
        };
        assert_eq!(
            apply_matrix(&view, &CalibrationMatrix::identity()),
            Err(CalibrationError::Image(ImageError::ShapeMismatch {
                channel: 1,
                expected: 16,
                got: 10
            }))
        );
    }

    #[test]
    fn empty_image_stays_empty() {
        let img = RgbImage::from_planes(0, 3, [vec![], vec![], vec![]]).expect("image");
        let out = apply_matrix(&img.view(), &CalibrationMatrix::identity()).expect("apply");
        assert_eq!(out.height(), 3);
        assert!(out.plane(0).is_empty());
    }
}
