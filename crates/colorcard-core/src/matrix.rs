use crate::Color;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Linear 3×3 color correction (CCM).
///
/// Acts on column color vectors: `corrected = m * measured`. For an N×3
/// table of row colors this is `measured * mᵀ`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationMatrix {
    pub m: Matrix3<f64>,
}

impl CalibrationMatrix {
    pub fn new(m: Matrix3<f64>) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity())
    }

    pub fn from_array(rows: [[f64; 3]; 3]) -> Self {
        Self::new(Matrix3::from_row_slice(&[
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ]))
    }

    pub fn to_array(&self) -> [[f64; 3]; 3] {
        [
            [self.m[(0, 0)], self.m[(0, 1)], self.m[(0, 2)]],
            [self.m[(1, 0)], self.m[(1, 1)], self.m[(1, 2)]],
            [self.m[(2, 0)], self.m[(2, 1)], self.m[(2, 2)]],
        ]
    }

    #[inline]
    pub fn apply(&self, c: Color) -> Color {
        Color::from_vector(self.m * c.to_vector())
    }

    pub fn trace(&self) -> f64 {
        self.m.trace()
    }

    /// Sum of all nine entries.
    pub fn sum(&self) -> f64 {
        self.m.sum()
    }

    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(Self::new)
    }

    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }
}

impl Default for CalibrationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}
