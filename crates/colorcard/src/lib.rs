//! Color calibration from a photographed reference color card.
//!
//! This crate provides:
//! - re-exports of the `colorcard-*` crates
//! - end-to-end helpers that go from four picked card corners to patch
//!   colors ([`measure_card`]) and to a fitted correction matrix
//!   ([`calibrate_from_card`])
//! - (feature `image`) adapters between `image::RgbImage` and the planar
//!   [`RgbImage`] used by the pipeline
//!
//! ## Quickstart
//!
//! ```no_run
//! use colorcard::{calibrate_from_card, CardCorners, CardLayout, Color, Point};
//! use colorcard::calib::apply_matrix;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let photo = image::open("card.jpg")?;
//! let img = colorcard::image::rgb_image_from_dynamic(&photo)?;
//!
//! let corners = CardCorners {
//!     a: Point::new(426.0, 2083.0),
//!     b: Point::new(2479.0, 2098.0),
//!     c: Point::new(2485.0, 692.0),
//!     d: Point::new(438.0, 773.0),
//! };
//! let reference: Vec<Color> = vec![Color::new(115.0, 82.0, 68.0); 24];
//!
//! let calib = calibrate_from_card(&img.view(), &corners, &reference, &CardLayout::default())?;
//! let corrected = apply_matrix(&img.view(), &calib.matrix)?;
//! colorcard::image::to_rgb8(&corrected)?.save("corrected.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `colorcard::core`: colors, quads, regions, planar images, the calibration matrix.
//! - `colorcard::grid`: card layout and patch-grid reconstruction.
//! - `colorcard::calib`: color sampling, least-squares fit, image correction.
//! - `colorcard::image` (feature `image`): conversions to and from the `image` crate.

pub use colorcard_calib as calib;
pub use colorcard_core as core;
pub use colorcard_grid as grid;

pub use colorcard_calib::{FitParams, FitResiduals};
pub use colorcard_core::{CalibrationMatrix, Color, Point, Region, RgbImage, RgbImageView};
pub use colorcard_grid::{CardCorners, CardLayout, PatchGrid};

mod pipeline;

pub use pipeline::{
    calibrate_from_card, calibrate_from_card_with, measure_card, CardCalibration,
    CardMeasurement, ColorCardError,
};

#[cfg(feature = "image")]
pub mod image;
