use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// An RGB triple, nominally in `0..=255`.
///
/// Serialized as a plain `[r, g, b]` array so reference tables can be kept
/// as JSON lists of triples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel value by index (0 = red, 1 = green, 2 = blue).
    ///
    /// # Panics
    /// If `c > 2`.
    #[inline]
    pub fn channel(&self, c: usize) -> f64 {
        match c {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => panic!("color channel index {c} out of range 0..3"),
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.r, self.g, self.b)
    }

    pub fn from_vector(v: Vector3<f64>) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Round every channel to the nearest integer (half away from zero).
    pub fn round(self) -> Self {
        Self::new(self.r.round(), self.g.round(), self.b.round())
    }

    /// Largest absolute per-channel difference.
    pub fn max_abs_diff(&self, other: &Color) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Color> for [f64; 3] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl From<[u8; 3]> for Color {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0] as f64, v[1] as f64, v[2] as f64)
    }
}
