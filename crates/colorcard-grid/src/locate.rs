use crate::{CardCorners, CardLayout, GridError};
use colorcard_core::{Point, Quad};
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Located patch cells of a card, stored row-major.
///
/// Row 0 is the row along `a`–`b`, column 0 the column along `a`–`d`; patch
/// index `i` sits at `(i / cols, i % cols)`, the same raster order as the
/// reference table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchGrid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Quad>,
    /// Row start nodes on the `a`→`d` edge.
    pub left_edge: Vec<Point>,
    /// Row end nodes on the `b`→`c` edge.
    pub right_edge: Vec<Point>,
    /// Distance between the left and right node of every row.
    pub row_widths: Vec<f64>,
    /// Patch height of every column.
    pub patch_heights: Vec<f64>,
}

impl PatchGrid {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Quad] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quad> {
        self.cells.iter()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Quad> {
        self.cells.get(self.index_of(row, col)?)
    }

    pub fn cell(&self, index: usize) -> Option<&Quad> {
        self.cells.get(index)
    }

    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.len()).then_some((index / self.cols, index % self.cols))
    }
}

impl<'a> IntoIterator for &'a PatchGrid {
    type Item = &'a Quad;
    type IntoIter = std::slice::Iter<'a, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Size of one patch along an edge of length `total` that holds `count`
/// patches separated by `count - 1` gaps of `gap_ratio` patch sizes.
pub fn patch_size(total: f64, count: usize, gap_ratio: f64) -> f64 {
    total / (count as f64 + count.saturating_sub(1) as f64 * gap_ratio)
}

/// Unit step from `from` toward `to` along the line through both points.
///
/// Follows the slope `dy/dx`: `(1, slope) / sqrt(1 + slope²)`, signed so the
/// walk heads toward `to`. A vertical edge has no finite slope and steps
/// along `±y`.
fn step_direction(from: Point, to: Point) -> Result<Vector2<f64>, GridError> {
    let d = to - from;
    if !(d.x.is_finite() && d.y.is_finite()) || (d.x == 0.0 && d.y == 0.0) {
        return Err(GridError::DegenerateGeometry { from, to });
    }

    let slope = d.y / d.x;
    let denom = (1.0 + slope * slope).sqrt();
    if d.x == 0.0 || !denom.is_finite() {
        return Ok(Vector2::new(0.0, d.y.signum()));
    }
    Ok(Vector2::new(1.0, slope) * (d.x.signum() / denom))
}

/// Nodes where each of the `count` patches along `from`→`to` starts.
///
/// The first node is `from`; the rest follow at a constant jump of one patch
/// plus one gap. The walk ends one patch size short of `to`.
pub fn edge_points(
    from: Point,
    to: Point,
    count: usize,
    gap_ratio: f64,
) -> Result<Vec<Point>, GridError> {
    let dir = step_direction(from, to)?;
    let jump = patch_size(nalgebra::distance(&from, &to), count, gap_ratio) * (1.0 + gap_ratio);
    debug!(
        "edge ({:.1}, {:.1}) -> ({:.1}, {:.1}): jump {jump:.2}",
        from.x, from.y, to.x, to.y
    );
    Ok((0..count).map(|i| from + dir * (jump * i as f64)).collect())
}

/// Euclidean distance between matching left and right row nodes.
pub fn row_widths(left: &[Point], right: &[Point]) -> Vec<f64> {
    left.iter()
        .zip(right)
        .map(|(l, r)| nalgebra::distance(l, r))
        .collect()
}

/// Per-column patch height, assuming it is constant down each column.
///
/// `first` and `last` are the top-left nodes of the first and the last row;
/// they are `rows - 1` patch-plus-gap pitches apart.
pub fn column_patch_heights(
    first: &[Point],
    last: &[Point],
    rows: usize,
    gap_ratio: f64,
) -> Vec<f64> {
    let pitches = rows.saturating_sub(1) as f64 * (1.0 + gap_ratio);
    first
        .iter()
        .zip(last)
        .map(|(f, l)| nalgebra::distance(f, l) / pitches)
        .collect()
}

/// Reconstruct every patch cell of the card from its four outer corners.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(corners, layout),
        fields(rows = layout.rows, cols = layout.cols)
    )
)]
pub fn locate_grid(corners: &CardCorners, layout: &CardLayout) -> Result<PatchGrid, GridError> {
    layout.validate()?;
    let CardCorners { a, b, c, d } = *corners;
    let (rows, cols) = (layout.rows, layout.cols);

    let left_edge = edge_points(a, d, rows, layout.gap_ratio_v)?;
    let right_edge = edge_points(b, c, rows, layout.gap_ratio_v)?;
    let row_widths = row_widths(&left_edge, &right_edge);
    debug!("row widths {row_widths:.1?}");

    let top_left = left_edge
        .iter()
        .zip(&right_edge)
        .map(|(&l, &r)| edge_points(l, r, cols, layout.gap_ratio_h))
        .collect::<Result<Vec<_>, _>>()?;

    // Patch widths are offset along +x or -x, following the row direction.
    let row_offsets: Vec<f64> = left_edge
        .iter()
        .zip(&right_edge)
        .zip(&row_widths)
        .map(|((l, r), &w)| patch_size(w, cols, layout.gap_ratio_h) * (r.x - l.x).signum())
        .collect();

    let patch_heights =
        column_patch_heights(&top_left[0], &top_left[rows - 1], rows, layout.gap_ratio_v);
    debug!("patch heights {patch_heights:.1?}");
    let down = (d.y - a.y).signum();

    let cells = top_left
        .iter()
        .zip(&row_offsets)
        .flat_map(|(row, &dx)| {
            row.iter().zip(&patch_heights).map(move |(&tl, &h)| {
                let tr = tl + Vector2::new(dx, 0.0);
                let dy = Vector2::new(0.0, h * down);
                Quad {
                    top_left: tl,
                    top_right: tr,
                    bottom_right: tr + dy,
                    bottom_left: tl + dy,
                }
            })
        })
        .collect();

    Ok(PatchGrid {
        rows,
        cols,
        cells,
        left_edge,
        right_edge,
        row_widths,
        patch_heights,
    })
}
