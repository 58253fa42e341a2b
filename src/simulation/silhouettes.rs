//! Collision silhouettes of every sprite the simulation knows about.
//!
//! The simulation never touches textures. It only needs opacity masks and the
//! sprite dimensions derived from them, bundled here and built once at startup
//! either from the loaded images or procedurally for headless runs.

use super::mask::Mask;

/// Number of wing-flap frames of the agent sprite.
pub const AGENT_FRAMES: usize = 3;

/// Unscaled agent sprite size.
const AGENT_SIZE: (usize, usize) = (34, 24);
/// Unscaled barrier sprite size.
const BARRIER_SIZE: (usize, usize) = (52, 320);
/// Unscaled barrier cap height.
const BARRIER_CAP: usize = 24;
/// Unscaled ground tile width.
const GROUND_WIDTH: usize = 336;

/// Masks and sprite geometry shared by both game loops.
#[derive(Debug, Clone)]
pub struct Silhouettes {
    /// One mask per wing-flap frame.
    pub agent: [Mask; AGENT_FRAMES],
    /// Barrier hanging from the top of the screen (cap facing down).
    pub barrier_top: Mask,
    /// Barrier standing on the ground (cap facing up).
    pub barrier_bottom: Mask,
    /// Width of one ground tile.
    pub ground_width: f32,
}

impl Silhouettes {
    /// Bundles masks taken from the sprite images.
    ///
    /// `barrier` is the upright (bottom) barrier; the top one is its mirror image.
    pub fn new(agent: [Mask; AGENT_FRAMES], barrier: Mask, ground_width: f32) -> Self {
        Self {
            agent,
            barrier_top: barrier.flipped_vertically(),
            barrier_bottom: barrier,
            ground_width,
        }
    }

    /// Builds sprite-sized silhouettes without any image files.
    ///
    /// The shapes are drawn at sprite resolution and scaled by two like the
    /// loaded images: an elliptic body with a wing in three positions and a
    /// barrier with a cap wider than its shaft.
    pub fn procedural() -> Self {
        let (w, h) = AGENT_SIZE;
        let agent = [-4_i32, 0, 4].map(|wing_shift| {
            Mask::from_fn(w, h, |x, y| {
                let nx = (x as f32 + 0.5 - w as f32 / 2.0) / (w as f32 / 2.0 - 1.0);
                let ny = (y as f32 + 0.5 - h as f32 / 2.0) / (h as f32 / 2.0 - 1.0);
                let body = nx * nx + ny * ny <= 1.0;

                let wing_y = h as i32 / 2 + wing_shift;
                let wing = (2..10).contains(&x) && (y as i32 - wing_y).abs() <= 2;

                body || wing
            })
            .scaled2x()
        });

        let (bw, bh) = BARRIER_SIZE;
        let barrier = Mask::from_fn(bw, bh, |x, y| y < BARRIER_CAP || (2..bw - 2).contains(&x))
            .scaled2x();

        Self::new(agent, barrier, (GROUND_WIDTH * 2) as f32)
    }

    /// Height of the agent sprite.
    pub fn agent_height(&self) -> f32 {
        self.agent[0].height() as f32
    }

    /// Width of a barrier.
    pub fn barrier_width(&self) -> f32 {
        self.barrier_top.width() as f32
    }

    /// Height of a barrier.
    pub fn barrier_height(&self) -> f32 {
        self.barrier_top.height() as f32
    }
}
