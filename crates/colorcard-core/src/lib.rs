//! Core types and utilities for reference color card calibration.
//!
//! This crate is intentionally small. It holds the value types shared by the
//! grid locator and the calibration solver (points, patch quads, sampling
//! regions, colors, planar RGB images and the 3×3 calibration matrix) and
//! does *not* depend on any image decoder.

mod color;
mod geometry;
mod image;
mod logger;
mod matrix;

pub use color::Color;
pub use geometry::{Quad, Region};
pub use image::{ImageError, RgbImage, RgbImageView};
pub use matrix::CalibrationMatrix;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

/// Image-space point (x to the right, y down), in pixels.
pub type Point = nalgebra::Point2<f64>;
