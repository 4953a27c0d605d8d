use colorcard_core::Point;

/// Errors returned by the grid locator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("invalid card layout: {reason}")]
    InvalidLayout { reason: String },

    #[error(
        "degenerate anchor geometry: cannot step from ({:.2}, {:.2}) toward ({:.2}, {:.2})",
        .from.x, .from.y, .to.x, .to.y
    )]
    DegenerateGeometry { from: Point, to: Point },
}
