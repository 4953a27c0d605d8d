use crate::Point;
use serde::{Deserialize, Serialize};

/// Corners of one patch cell as located on the card.
///
/// Not necessarily a rectangle: the corners follow the sheared card edges.
/// "Top" is the edge closest to the row of anchor corners A/B, which is not
/// necessarily the smaller image y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Quad {
    /// Corners in TL, TR, BR, BL order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn center(&self) -> Point {
        let sx = self.corners().iter().map(|p| p.x).sum::<f64>();
        let sy = self.corners().iter().map(|p| p.y).sum::<f64>();
        Point::new(sx / 4.0, sy / 4.0)
    }
}

/// Axis-aligned sampling rectangle inside a patch, on integer pixel
/// coordinates.
///
/// Stored as four corners with the same naming as the [`Quad`] it was shrunk
/// from; use the `x_min`/`y_min`/... accessors for the pixel range, which is
/// inclusive at the minimum and exclusive at the maximum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Region {
    /// Build a region from its x and y bounds, in TL/TR/BR/BL order with
    /// `top` taken as the row of `y_top`.
    pub fn from_bounds(x_left: f64, x_right: f64, y_top: f64, y_bottom: f64) -> Self {
        Self {
            top_left: Point::new(x_left, y_top),
            top_right: Point::new(x_right, y_top),
            bottom_right: Point::new(x_right, y_bottom),
            bottom_left: Point::new(x_left, y_bottom),
        }
    }

    pub fn x_min(&self) -> f64 {
        self.top_left.x.min(self.top_right.x)
    }

    pub fn x_max(&self) -> f64 {
        self.top_left.x.max(self.top_right.x)
    }

    pub fn y_min(&self) -> f64 {
        self.top_left.y.min(self.bottom_right.y)
    }

    pub fn y_max(&self) -> f64 {
        self.top_left.y.max(self.bottom_right.y)
    }

    pub fn width(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    pub fn height(&self) -> f64 {
        self.y_max() - self.y_min()
    }

    /// True when the pixel range covers no pixel at all.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() >= 1.0 && self.height() >= 1.0)
    }
}
