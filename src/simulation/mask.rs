//! Binary opacity masks and pixel-exact overlap testing.
//!
//! Every sprite the simulation collides with is reduced to a mask of opaque
//! pixels. Two masks collide when at least one pixel is opaque in both after
//! placing the second mask at an offset relative to the first.

use ndarray::{Array2, s};

/// Alpha values above this count as opaque.
pub const ALPHA_THRESHOLD: u8 = 127;

/// A binary opacity mask indexed as `[[row, column]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Array2<bool>,
}

impl Mask {
    /// Creates a mask where every pixel is opaque.
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            bits: Array2::from_elem((height, width), true),
        }
    }

    /// Creates a mask where every pixel is transparent.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            bits: Array2::from_elem((height, width), false),
        }
    }

    /// Creates a mask from a predicate over `(x, y)` pixel coordinates.
    pub fn from_fn(width: usize, height: usize, opaque: impl Fn(usize, usize) -> bool) -> Self {
        Self {
            bits: Array2::from_shape_fn((height, width), |(y, x)| opaque(x, y)),
        }
    }

    /// Builds a mask from a row-major RGBA8 pixel buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `rgba` - Pixel data, four bytes per pixel
    ///
    /// # Returns
    ///
    /// A mask that is opaque wherever alpha exceeds [`ALPHA_THRESHOLD`].
    /// Pixels missing from a short buffer are transparent.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
        Self::from_fn(width, height, |x, y| {
            rgba.get((y * width + x) * 4 + 3)
                .is_some_and(|&alpha| alpha > ALPHA_THRESHOLD)
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.bits.ncols()
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.bits.nrows()
    }

    /// Whether the pixel at `(x, y)` is opaque. Out-of-range pixels are not.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits.get((y, x)).copied().unwrap_or(false)
    }

    /// Sets the pixel at `(x, y)`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, opaque: bool) {
        if let Some(bit) = self.bits.get_mut((y, x)) {
            *bit = opaque;
        }
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Returns the mask mirrored top to bottom.
    pub fn flipped_vertically(&self) -> Self {
        Self {
            bits: self.bits.slice(s![..;-1, ..]).to_owned(),
        }
    }

    /// Returns the mask scaled by two with nearest-neighbour sampling.
    pub fn scaled2x(&self) -> Self {
        Self::from_fn(self.width() * 2, self.height() * 2, |x, y| {
            self.bits[[y / 2, x / 2]]
        })
    }

    /// Finds the first pixel opaque in both masks.
    ///
    /// `other` is placed with its top-left corner at `offset` in this mask's
    /// coordinate system.
    ///
    /// # Arguments
    ///
    /// * `other` - The mask to test against
    /// * `offset` - Position of `other` relative to `self`
    ///
    /// # Returns
    ///
    /// The colliding pixel in `self` coordinates, or `None`.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(usize, usize)> {
        let (dx, dy) = offset;

        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width() as i32).min(dx.saturating_add(other.width() as i32));
        let y_end = (self.height() as i32).min(dy.saturating_add(other.height() as i32));

        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                let mine = self.bits[[y as usize, x as usize]];
                if mine && other.bits[[(y - dy) as usize, (x - dx) as usize]] {
                    return Some((x as usize, y as usize));
                }
            }
        }

        None
    }

    /// Whether the two masks share an opaque pixel at the given offset.
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        self.overlap(other, offset).is_some()
    }
}
