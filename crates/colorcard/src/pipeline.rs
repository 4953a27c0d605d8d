use colorcard_calib::{
    average_colors, fit_calibration_matrix_with, residuals, CalibrationError, FitParams,
    FitResiduals, SampleError,
};
use colorcard_core::{CalibrationMatrix, Color, ImageError, Region, RgbImageView};
use colorcard_grid::{build_regions, locate_grid, CardCorners, CardLayout, GridError, PatchGrid};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the end-to-end helpers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColorCardError {
    #[error("reference table has {got} colors, card layout has {expected} patches")]
    ReferenceLength { expected: usize, got: usize },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Located patches of one card and their measured colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardMeasurement {
    pub grid: PatchGrid,
    /// Sampling rectangle of every patch, raster order.
    pub regions: Vec<Region>,
    /// Mean color inside every region, raster order.
    pub colors: Vec<Color>,
}

/// Result of calibrating against a card with known reference colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardCalibration {
    pub measurement: CardMeasurement,
    /// Maps measured colors onto the reference: `reference ≈ matrix · measured`.
    pub matrix: CalibrationMatrix,
    /// Fit residuals over the card's own patches.
    pub residuals: FitResiduals,
}

/// Locate the card's patches from its corners and average their colors.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(image, corners, layout),
        fields(width = image.width, height = image.height)
    )
)]
pub fn measure_card(
    image: &RgbImageView<'_>,
    corners: &CardCorners,
    layout: &CardLayout,
) -> Result<CardMeasurement, ColorCardError> {
    let grid = locate_grid(corners, layout)?;
    let regions = build_regions(&grid, layout.roi_tolerance);
    let colors = average_colors(image, &regions)?;
    debug!("measured {} patches", colors.len());

    Ok(CardMeasurement {
        grid,
        regions,
        colors,
    })
}

/// [`calibrate_from_card_with`] using default [`FitParams`].
pub fn calibrate_from_card(
    image: &RgbImageView<'_>,
    corners: &CardCorners,
    reference: &[Color],
    layout: &CardLayout,
) -> Result<CardCalibration, ColorCardError> {
    calibrate_from_card_with(image, corners, reference, layout, &FitParams::default())
}

/// Measure the card and fit the matrix mapping its colors onto `reference`.
///
/// `reference` lists the card's known patch colors in raster order and must
/// have exactly `layout.rows * layout.cols` entries.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(image, corners, reference, layout, params),
        fields(width = image.width, height = image.height)
    )
)]
pub fn calibrate_from_card_with(
    image: &RgbImageView<'_>,
    corners: &CardCorners,
    reference: &[Color],
    layout: &CardLayout,
    params: &FitParams,
) -> Result<CardCalibration, ColorCardError> {
    let expected = layout.patch_count();
    if reference.len() != expected {
        return Err(ColorCardError::ReferenceLength {
            expected,
            got: reference.len(),
        });
    }

    let measurement = measure_card(image, corners, layout)?;
    let matrix = fit_calibration_matrix_with(&measurement.colors, reference, params)?;
    let residuals = residuals(&matrix, &measurement.colors, reference)?;
    info!(
        "card calibrated: rms = [{:.2}, {:.2}, {:.2}], max = {:.2}",
        residuals.rms[0], residuals.rms[1], residuals.rms[2], residuals.max_abs
    );

    Ok(CardCalibration {
        measurement,
        matrix,
        residuals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorcard_core::{Point, RgbImage};

    fn rectangle_corners() -> CardCorners {
        CardCorners {
            a: Point::new(10.0, 10.0),
            b: Point::new(610.0, 10.0),
            c: Point::new(610.0, 410.0),
            d: Point::new(10.0, 410.0),
        }
    }

    #[test]
    fn uniform_image_measures_uniform_colors() {
        let gray = Color::new(90.0, 100.0, 110.0);
        let img = RgbImage::filled(640, 440, gray);
        let m = measure_card(&img.view(), &rectangle_corners(), &CardLayout::default())
            .expect("measure");
        assert_eq!(m.grid.len(), 24);
        assert_eq!(m.regions.len(), 24);
        assert!(m.colors.iter().all(|&c| c == gray));
    }

    #[test]
    fn card_outside_image_is_a_sample_error() {
        let img = RgbImage::filled(200, 200, Color::default());
        let err = measure_card(&img.view(), &rectangle_corners(), &CardLayout::default())
            .expect_err("card does not fit");
        assert!(matches!(
            err,
            ColorCardError::Sample(SampleError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn reference_length_is_checked_before_measuring() {
        let img = RgbImage::filled(10, 10, Color::default());
        let reference = vec![Color::default(); 23];
        let err = calibrate_from_card(
            &img.view(),
            &rectangle_corners(),
            &reference,
            &CardLayout::default(),
        )
        .expect_err("short reference");
        assert_eq!(
            err,
            ColorCardError::ReferenceLength {
                expected: 24,
                got: 23
            }
        );
    }

    #[test]
    fn grid_errors_pass_through() {
        let img = RgbImage::filled(10, 10, Color::default());
        let corners = CardCorners {
            a: Point::new(5.0, 5.0),
            b: Point::new(5.0, 5.0),
            c: Point::new(8.0, 8.0),
            d: Point::new(5.0, 8.0),
        };
        let err = measure_card(&img.view(), &corners, &CardLayout::default())
            .expect_err("degenerate corners");
        assert!(matches!(err, ColorCardError::Grid(_)));
    }

    #[test]
    fn uniform_card_cannot_be_calibrated() {
        let img = RgbImage::filled(640, 440, Color::new(50.0, 60.0, 70.0));
        let reference = vec![Color::new(50.0, 60.0, 70.0); 24];
        let err = calibrate_from_card(
            &img.view(),
            &rectangle_corners(),
            &reference,
            &CardLayout::default(),
        )
        .expect_err("rank one");
        assert!(matches!(
            err,
            ColorCardError::Calibration(CalibrationError::SingularFit { .. })
        ));
    }
}
