use colorcard_core::ImageError;

/// Errors returned by the color sampler.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("degenerate sampling region ({width}x{height} px)")]
    DegenerateRegion { width: f64, height: f64 },

    #[error(
        "sampling region x={x_min}..{x_max}, y={y_min}..{y_max} outside {width}x{height} image"
    )]
    RegionOutOfBounds {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        width: usize,
        height: usize,
    },

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Errors returned by the calibration solver and the image calibrator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("color table length mismatch (measured={measured}, reference={reference})")]
    ShapeMismatch { measured: usize, reference: usize },

    #[error("cannot calibrate: measured colors are degenerate (reciprocal condition {rcond:.3e})")]
    SingularFit { rcond: f64 },

    #[error(transparent)]
    Image(#[from] ImageError),
}
