/// Errors raised when assembling a planar image.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("channel {channel} has {got} samples, expected {expected}")]
    ShapeMismatch {
        channel: usize,
        expected: usize,
        got: usize,
    },
}

/// Borrowed planar RGB image: three row-major planes, origin at top-left.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub planes: [&'a [f64]; 3], // each len = w*h
}

/// Owned planar RGB image with `f64` intensities.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    planes: [Vec<f64>; 3],
}

fn pixel_count(width: usize, height: usize) -> Result<usize, ImageError> {
    width
        .checked_mul(height)
        .ok_or(ImageError::InvalidDimensions { width, height })
}

fn check_planes(width: usize, height: usize, lens: [usize; 3]) -> Result<(), ImageError> {
    let expected = pixel_count(width, height)?;
    for (channel, got) in lens.into_iter().enumerate() {
        if got != expected {
            return Err(ImageError::ShapeMismatch {
                channel,
                expected,
                got,
            });
        }
    }
    Ok(())
}

impl<'a> RgbImageView<'a> {
    pub fn new(width: usize, height: usize, planes: [&'a [f64]; 3]) -> Result<Self, ImageError> {
        let view = Self {
            width,
            height,
            planes,
        };
        view.validate()?;
        Ok(view)
    }

    /// Check that every plane holds exactly `width * height` samples.
    ///
    /// Views built with a struct literal skip [`RgbImageView::new`]; consumers
    /// call this before indexing.
    pub fn validate(&self) -> Result<(), ImageError> {
        check_planes(self.width, self.height, self.planes.map(<[f64]>::len))
    }

    /// Row `y` of channel `c`.
    #[inline]
    pub fn row(&self, c: usize, y: usize) -> &'a [f64] {
        let start = y * self.width;
        &self.planes[c][start..start + self.width]
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_owned_image(&self) -> RgbImage {
        RgbImage {
            width: self.width,
            height: self.height,
            planes: self.planes.map(<[f64]>::to_vec),
        }
    }
}

impl RgbImage {
    /// Build an image from three row-major planes of `width * height` samples.
    pub fn from_planes(
        width: usize,
        height: usize,
        planes: [Vec<f64>; 3],
    ) -> Result<Self, ImageError> {
        check_planes(width, height, [planes[0].len(), planes[1].len(), planes[2].len()])?;
        Ok(Self {
            width,
            height,
            planes,
        })
    }

    /// Split an interleaved `RGBRGB...` 8-bit buffer into planes.
    pub fn from_interleaved_u8(width: usize, height: usize, rgb: &[u8]) -> Result<Self, ImageError> {
        let n = pixel_count(width, height)?;
        let expected = n
            .checked_mul(3)
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        if rgb.len() != expected {
            return Err(ImageError::ShapeMismatch {
                channel: 0,
                expected,
                got: rgb.len(),
            });
        }
        let plane = |c: usize| -> Vec<f64> { rgb.chunks_exact(3).map(|px| px[c] as f64).collect() };
        Ok(Self {
            width,
            height,
            planes: [plane(0), plane(1), plane(2)],
        })
    }

    /// Constant-color image.
    pub fn filled(width: usize, height: usize, color: crate::Color) -> Self {
        let n = width * height;
        Self {
            width,
            height,
            planes: [vec![color.r; n], vec![color.g; n], vec![color.b; n]],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plane(&self, c: usize) -> &[f64] {
        &self.planes[c]
    }

    pub fn planes(&self) -> &[Vec<f64>; 3] {
        &self.planes
    }

    pub fn into_planes(self) -> [Vec<f64>; 3] {
        self.planes
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            planes: [&self.planes[0], &self.planes[1], &self.planes[2]],
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<crate::Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y * self.width + x;
        Some(crate::Color::new(
            self.planes[0][i],
            self.planes[1][i],
            self.planes[2][i],
        ))
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: crate::Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = y * self.width + x;
        self.planes[0][i] = color.r;
        self.planes[1][i] = color.g;
        self.planes[2][i] = color.b;
    }
}
