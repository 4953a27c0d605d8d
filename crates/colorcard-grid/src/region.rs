use crate::PatchGrid;
use colorcard_core::{Quad, Region};

/// Shrink a patch cell to an axis-aligned sampling rectangle.
///
/// The rectangle starts from the inner x bounds of the cell (`max` of the
/// left corners, `min` of the right corners) and the `min` y of the top and
/// of the bottom corner pair. Each side then moves inward by `tolerance`
/// times the rectangle's extent, keeping clear of the inter-patch gaps and
/// rounded patch corners. Coordinates are rounded to whole pixels.
///
/// The result may be degenerate (see [`Region::is_degenerate`]) for tiny
/// patches, and for cells so sheared that the inner x bounds cross over
/// against the row direction; the color sampler rejects those.
pub fn shrink_to_region(quad: &Quad, tolerance: f64) -> Region {
    let x_left = quad.top_left.x.max(quad.bottom_left.x);
    let mut x_right = quad.top_right.x.min(quad.bottom_right.x);
    let row_dir = (quad.top_right.x - quad.top_left.x).signum();
    if (x_right - x_left) * row_dir < 0.0 {
        x_right = x_left;
    }
    let y_top = quad.top_left.y.min(quad.top_right.y);
    let y_bottom = quad.bottom_left.y.min(quad.bottom_right.y);

    // Move every bound toward its opposite, whichever way the cell is oriented.
    let dx = tolerance * (x_right - x_left);
    let dy = tolerance * (y_bottom - y_top);
    Region::from_bounds(
        (x_left + dx).round(),
        (x_right - dx).round(),
        (y_top + dy).round(),
        (y_bottom - dy).round(),
    )
}

/// Sampling regions for every cell of `grid`, in raster order.
pub fn build_regions(grid: &PatchGrid, tolerance: f64) -> Vec<Region> {
    grid.iter()
        .map(|quad| shrink_to_region(quad, tolerance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{locate_grid, CardCorners, CardLayout};
    use colorcard_core::Point;

    fn quad(tl: (f64, f64), tr: (f64, f64), br: (f64, f64), bl: (f64, f64)) -> Quad {
        Quad {
            top_left: Point::new(tl.0, tl.1),
            top_right: Point::new(tr.0, tr.1),
            bottom_right: Point::new(br.0, br.1),
            bottom_left: Point::new(bl.0, bl.1),
        }
    }

    #[test]
    fn shrinks_upright_cell_toward_center() {
        // row 0 at the bottom of the image: "bottom" corners have the smaller y
        let q = quad((100.0, 300.0), (200.0, 300.0), (200.0, 200.0), (100.0, 200.0));
        let r = shrink_to_region(&q, 0.4);
        assert_eq!(r.top_left, Point::new(140.0, 260.0));
        assert_eq!(r.top_right, Point::new(160.0, 260.0));
        assert_eq!(r.bottom_right, Point::new(160.0, 240.0));
        assert_eq!(r.bottom_left, Point::new(140.0, 240.0));
    }

    #[test]
    fn shrinks_y_down_cell_toward_center() {
        let q = quad((0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (0.0, 50.0));
        let r = shrink_to_region(&q, 0.2);
        assert_eq!((r.x_min(), r.x_max()), (10.0, 40.0));
        assert_eq!((r.y_min(), r.y_max()), (10.0, 40.0));
    }

    #[test]
    fn sheared_cell_uses_inner_x_bounds() {
        let q = quad((10.0, 100.0), (60.0, 102.0), (58.0, 52.0), (8.0, 50.0));
        let r = shrink_to_region(&q, 0.0);
        assert_eq!(r.x_min(), 10.0);
        assert_eq!(r.x_max(), 58.0);
        // min y of the top pair and of the bottom pair
        assert_eq!(r.y_max(), 100.0);
        assert_eq!(r.y_min(), 50.0);
    }

    #[test]
    fn crossed_inner_bounds_collapse() {
        // bottom edge sheared so far left that max(left x) > min(right x)
        let q = quad((10.0, 100.0), (40.0, 100.0), (5.0, 50.0), (-25.0, 50.0));
        for tolerance in [0.0, 0.4] {
            let r = shrink_to_region(&q, tolerance);
            assert!(r.is_degenerate(), "tolerance {tolerance}: {r:?}");
        }
    }

    #[test]
    fn mirrored_row_keeps_its_extent() {
        // row running toward -x: top_right left of top_left
        let q = quad((200.0, 0.0), (100.0, 0.0), (100.0, 100.0), (200.0, 100.0));
        let r = shrink_to_region(&q, 0.25);
        assert!(!r.is_degenerate());
        assert_eq!((r.x_min(), r.x_max()), (125.0, 175.0));
        assert_eq!((r.y_min(), r.y_max()), (25.0, 75.0));
    }

    #[test]
    fn coordinates_are_whole_pixels() {
        let q = quad((0.3, 10.7), (33.3, 10.7), (33.3, 0.2), (0.3, 0.2));
        let r = shrink_to_region(&q, 0.25);
        for p in [r.top_left, r.top_right, r.bottom_right, r.bottom_left] {
            assert_eq!(p.x, p.x.round());
            assert_eq!(p.y, p.y.round());
        }
    }

    #[test]
    fn tiny_cell_collapses_to_degenerate_region() {
        let q = quad((0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0));
        assert!(shrink_to_region(&q, 0.4).is_degenerate());
    }

    #[test]
    fn one_region_per_patch() {
        let corners = CardCorners {
            a: Point::new(426.0, 2083.0),
            b: Point::new(2479.0, 2098.0),
            c: Point::new(2485.0, 692.0),
            d: Point::new(438.0, 773.0),
        };
        let layout = CardLayout::default();
        let grid = locate_grid(&corners, &layout).expect("grid");
        let regions = build_regions(&grid, layout.roi_tolerance);
        assert_eq!(regions.len(), 24);
        for (region, cell) in regions.iter().zip(grid.iter()) {
            assert!(!region.is_degenerate());
            let c = cell.center();
            assert!(region.x_min() <= c.x && c.x <= region.x_max());
            assert!(region.y_min() <= c.y && c.y <= region.y_max());
        }
    }
}
