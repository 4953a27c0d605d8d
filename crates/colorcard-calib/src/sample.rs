use crate::SampleError;
use colorcard_core::{Color, Region, RgbImageView};
use log::warn;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mean color over the pixels of `region`, rounded to whole values.
///
/// Covers columns `x_min..x_max` and rows `y_min..y_max` (inclusive start,
/// exclusive end). Empty or out-of-image regions are rejected.
pub fn average_color(image: &RgbImageView<'_>, region: &Region) -> Result<Color, SampleError> {
    image.validate()?;
    if region.is_degenerate() {
        warn!("rejecting degenerate region {region:?}");
        return Err(SampleError::DegenerateRegion {
            width: region.width(),
            height: region.height(),
        });
    }

    let (x_min, x_max) = (region.x_min(), region.x_max());
    let (y_min, y_max) = (region.y_min(), region.y_max());
    if x_min < 0.0 || y_min < 0.0 || x_max > image.width as f64 || y_max > image.height as f64 {
        return Err(SampleError::RegionOutOfBounds {
            x_min,
            x_max,
            y_min,
            y_max,
            width: image.width,
            height: image.height,
        });
    }

    let (x0, x1) = (x_min as usize, x_max as usize);
    let (y0, y1) = (y_min as usize, y_max as usize);
    let count = ((x1 - x0) * (y1 - y0)) as f64;

    let mut sums = [0.0f64; 3];
    for (c, sum) in sums.iter_mut().enumerate() {
        for y in y0..y1 {
            *sum += image.row(c, y)[x0..x1].iter().sum::<f64>();
        }
    }

    Ok(Color::new(sums[0] / count, sums[1] / count, sums[2] / count).round())
}

/// [`average_color`] for every region, preserving region order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image, regions), fields(regions = regions.len()))
)]
pub fn average_colors(
    image: &RgbImageView<'_>,
    regions: &[Region],
) -> Result<Vec<Color>, SampleError> {
    regions
        .iter()
        .map(|region| average_color(image, region))
        .collect()
}
