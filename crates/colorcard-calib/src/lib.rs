//! Color sampling and linear color calibration.
//!
//! ## Quickstart
//!
//! ```
//! use colorcard_calib::{apply_matrix, fit_calibration_matrix};
//! use colorcard_core::{Color, RgbImage};
//!
//! let measured = [
//!     Color::new(40.0, 30.0, 31.0),
//!     Color::new(190.0, 40.0, 50.0),
//!     Color::new(60.0, 150.0, 70.0),
//!     Color::new(50.0, 60.0, 170.0),
//! ];
//! let reference = [
//!     Color::new(41.0, 32.0, 32.0),
//!     Color::new(200.0, 38.0, 46.0),
//!     Color::new(62.0, 160.0, 66.0),
//!     Color::new(48.0, 58.0, 180.0),
//! ];
//! let ccm = fit_calibration_matrix(&measured, &reference).unwrap();
//!
//! let img = RgbImage::filled(4, 3, measured[1]);
//! let corrected = apply_matrix(&img.view(), &ccm).unwrap();
//! assert_eq!(corrected.width(), 4);
//! ```
//!
//! - [`average_color`] / [`average_colors`]: mean color inside sampling regions.
//! - [`fit_calibration_matrix`]: least-squares 3×3 fit, measured → reference.
//! - [`apply_matrix`]: correct every pixel of a planar image.

mod apply;
mod error;
mod sample;
mod solve;

pub use apply::apply_matrix;
pub use error::{CalibrationError, SampleError};
pub use sample::{average_color, average_colors};
pub use solve::{
    fit_calibration_matrix, fit_calibration_matrix_with, residuals, FitParams, FitResiduals,
};
