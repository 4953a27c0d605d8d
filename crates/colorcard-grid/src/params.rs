use crate::GridError;
use colorcard_core::Point;
use serde::{Deserialize, Serialize};

/// The four picked outer corners of the card.
///
/// `a` is the outer corner of the darkest (black) patch; `b`, `c`, `d` follow
/// around the card so that `a`–`b` runs along the first patch row and
/// `a`–`d` along the first patch column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardCorners {
    pub a: Point,
    pub b: Point,
    pub c: Point,
    pub d: Point,
}

/// Physical layout of the reference card.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CardLayout {
    /// Patch rows (along `a`→`d`).
    pub rows: usize,

    /// Patch columns (along `a`→`b`).
    pub cols: usize,

    /// Gap between two patch rows, as a fraction of the patch height.
    pub gap_ratio_v: f64,

    /// Gap between two patch columns, as a fraction of the patch width.
    pub gap_ratio_h: f64,

    /// Fraction of the sampling rectangle's extent removed from each side.
    /// Must lie in `[0, 0.5)`.
    pub roi_tolerance: f64,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 6,
            gap_ratio_v: 0.18,
            gap_ratio_h: 0.18,
            roi_tolerance: 0.4,
        }
    }
}

impl CardLayout {
    pub fn patch_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn validate(&self) -> Result<(), GridError> {
        let fail = |reason: String| -> Result<(), GridError> {
            Err(GridError::InvalidLayout { reason })
        };
        if self.rows < 2 || self.cols < 2 {
            return fail(format!(
                "need at least 2x2 patches, got {}x{}",
                self.rows, self.cols
            ));
        }
        for (name, v) in [
            ("gap_ratio_v", self.gap_ratio_v),
            ("gap_ratio_h", self.gap_ratio_h),
        ] {
            if !v.is_finite() || v < 0.0 {
                return fail(format!("{name} must be finite and >= 0, got {v}"));
            }
        }
        if !(0.0..0.5).contains(&self.roi_tolerance) {
            return fail(format!(
                "roi_tolerance must be in [0, 0.5), got {}",
                self.roi_tolerance
            ));
        }
        Ok(())
    }
}
