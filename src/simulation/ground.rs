//! Scrolling ground made of two wrapping tiles.

use super::params::Params;

/// The floor. Its top edge is the lower death boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    /// Top edge.
    pub y: f32,
    /// Left edge of the first tile.
    pub x1: f32,
    /// Left edge of the second tile.
    pub x2: f32,
    /// Width of one tile.
    pub tile_width: f32,
}

impl Ground {
    /// Creates a ground whose tiles sit side by side starting at `x = 0`.
    pub fn new(y: f32, tile_width: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: tile_width,
            tile_width,
        }
    }

    /// Scrolls both tiles; a tile that leaves the screen jumps behind the other.
    pub fn step(&mut self, params: &Params) {
        self.x1 -= params.ground_velocity;
        self.x2 -= params.ground_velocity;

        if self.x1 + self.tile_width < 0.0 {
            self.x1 = self.x2 + self.tile_width;
        }
        if self.x2 + self.tile_width < 0.0 {
            self.x2 = self.x1 + self.tile_width;
        }
    }
}
