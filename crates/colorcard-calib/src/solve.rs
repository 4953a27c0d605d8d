use crate::CalibrationError;
use colorcard_core::{CalibrationMatrix, Color};
use log::{debug, warn};
use nalgebra::{Matrix3, MatrixXx3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Solver settings.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FitParams {
    /// Smallest accepted ratio between the smallest and the largest singular
    /// value of `MᵀM`; below it the fit is rejected as singular.
    pub min_rcond: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self { min_rcond: 1e-10 }
    }
}

/// How well a calibration matrix maps measured colors onto the reference.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResiduals {
    /// Root-mean-square error per channel.
    pub rms: [f64; 3],
    /// Largest absolute error over all patches and channels.
    pub max_abs: f64,
}

fn color_table(colors: &[Color]) -> MatrixXx3<f64> {
    MatrixXx3::from_fn(colors.len(), |i, c| colors[i].channel(c))
}

fn check_lengths(measured: &[Color], reference: &[Color]) -> Result<(), CalibrationError> {
    if measured.len() != reference.len() {
        return Err(CalibrationError::ShapeMismatch {
            measured: measured.len(),
            reference: reference.len(),
        });
    }
    Ok(())
}

/// Reciprocal condition number of a symmetric positive semi-definite matrix.
fn rcond(m: &Matrix3<f64>) -> f64 {
    let sv = m.singular_values();
    let (lo, hi) = (sv.min(), sv.max());
    if hi > 0.0 && hi.is_finite() {
        lo / hi
    } else {
        0.0
    }
}

/// Least-squares color correction with default [`FitParams`].
pub fn fit_calibration_matrix(
    measured: &[Color],
    reference: &[Color],
) -> Result<CalibrationMatrix, CalibrationError> {
    fit_calibration_matrix_with(measured, reference, &FitParams::default())
}

/// Least-squares 3×3 matrix `C` with `C · measured[i] ≈ reference[i]`.
///
/// With `M`, `R` the N×3 tables (one color per row), solves the normal
/// equations `C = (Rᵀ M)(Mᵀ M)⁻¹`. `measured[i]` and `reference[i]` must
/// describe the same patch. Needs at least three linearly independent
/// measured colors, otherwise [`CalibrationError::SingularFit`].
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(measured, reference, params),
        fields(samples = measured.len())
    )
)]
pub fn fit_calibration_matrix_with(
    measured: &[Color],
    reference: &[Color],
    params: &FitParams,
) -> Result<CalibrationMatrix, CalibrationError> {
    check_lengths(measured, reference)?;

    let m = color_table(measured);
    let r = color_table(reference);
    let mtm: Matrix3<f64> = m.transpose() * &m;
    let rtm: Matrix3<f64> = r.transpose() * &m;

    let rc = rcond(&mtm);
    debug!("fit over {} patches, rcond(MᵀM) = {rc:.3e}", measured.len());
    let singular = CalibrationError::SingularFit { rcond: rc };
    if !(rc >= params.min_rcond) {
        warn!("rejecting calibration fit: {singular}");
        return Err(singular);
    }

    let inv = mtm.try_inverse().ok_or_else(|| singular.clone())?;
    let ccm = CalibrationMatrix::new(rtm * inv);
    if !ccm.is_finite() {
        return Err(singular);
    }
    Ok(ccm)
}

/// Per-channel residuals of `matrix` over a measured/reference table.
pub fn residuals(
    matrix: &CalibrationMatrix,
    measured: &[Color],
    reference: &[Color],
) -> Result<FitResiduals, CalibrationError> {
    check_lengths(measured, reference)?;
    if measured.is_empty() {
        return Ok(FitResiduals {
            rms: [0.0; 3],
            max_abs: 0.0,
        });
    }

    let mut sq = [0.0f64; 3];
    let mut max_abs = 0.0f64;
    for (m, r) in measured.iter().zip(reference) {
        let e = matrix.apply(*m).to_vector() - r.to_vector();
        for (c, acc) in sq.iter_mut().enumerate() {
            *acc += e[c] * e[c];
        }
        max_abs = max_abs.max(e.amax());
    }

    let n = measured.len() as f64;
    Ok(FitResiduals {
        rms: sq.map(|s| (s / n).sqrt()),
        max_abs,
    })
}
