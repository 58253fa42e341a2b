//! Physics state of one controllable agent.
//!
//! An agent only moves vertically. Each impulse restarts a parabolic arc
//! `d = v·t + a·t²` measured from the tick of the impulse; the displacement is
//! capped at a terminal value while falling.

use super::mask::Mask;
use super::params::Params;
use super::silhouettes::{AGENT_FRAMES, Silhouettes};

/// Tilt at or below which the wings stop flapping.
const GLIDE_TILT: f32 = -80.0;
/// Frame shown while gliding.
const GLIDE_FRAME: usize = 1;

/// A simulated agent (the bird).
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Horizontal position, fixed for the whole session.
    pub x: f32,
    /// Vertical position of the sprite's top edge.
    pub y: f32,
    /// Velocity set by the last impulse.
    pub vel: f32,
    /// Ticks since the last impulse.
    pub tick_count: u32,
    /// Height at the last impulse, reference for the tilt.
    pub height: f32,
    /// Visual orientation in degrees, positive is nose-up.
    pub tilt: f32,
    /// Wing-flap animation counter.
    pub anim_count: u32,
    /// Current wing-flap frame.
    pub frame: usize,
}

impl Agent {
    /// Creates an agent at rest.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vel: 0.0,
            tick_count: 0,
            height: y,
            tilt: 0.0,
            anim_count: 0,
            frame: 0,
        }
    }

    /// Creates an agent at the configured start position.
    pub fn spawn(params: &Params) -> Self {
        Self::new(params.agent_start_x, params.agent_start_y)
    }

    /// Starts a new upward arc from the current height.
    pub fn impulse(&mut self, params: &Params) {
        self.vel = params.impulse_velocity;
        self.tick_count = 0;
        self.height = self.y;
    }

    /// Raw displacement `v·t + a·t²` for the current tick count, before the
    /// terminal cap and the rise bias.
    pub fn kinematic_displacement(&self, params: &Params) -> f32 {
        let t = self.tick_count as f32;
        self.vel * t + params.gravity * t * t
    }

    /// Advances the agent by one tick.
    ///
    /// # Returns
    ///
    /// The displacement applied to `y`.
    pub fn step(&mut self, params: &Params) -> f32 {
        self.tick_count += 1;

        let mut d = self
            .kinematic_displacement(params)
            .min(params.terminal_displacement);
        if d < 0.0 {
            d -= params.rise_bias;
        }

        self.y += d;

        if d < 0.0 || self.y < self.height + params.tilt_hold_band {
            if self.tilt < params.max_rotation {
                self.tilt = params.max_rotation;
            }
        } else {
            self.tilt = (self.tilt - params.rotation_velocity).max(params.min_rotation);
        }

        self.advance_animation(params);

        d
    }

    /// Cycles the wing frames `0, 1, 2, 1, 0`, holding each for
    /// `animation_time` ticks. A nose-down agent glides with the wings level.
    fn advance_animation(&mut self, params: &Params) {
        let period = params.animation_time.max(1);
        self.anim_count += 1;

        let count = self.anim_count;
        if count < period {
            self.frame = 0;
        } else if count < period * 2 {
            self.frame = 1;
        } else if count < period * 3 {
            self.frame = 2;
        } else if count < period * 4 {
            self.frame = 1;
        } else if count > period * 4 {
            self.frame = 0;
            self.anim_count = 0;
        }

        if self.tilt <= GLIDE_TILT {
            self.frame = GLIDE_FRAME;
            self.anim_count = period * 2;
        }
    }

    /// Collision mask of the current frame.
    pub fn silhouette<'a>(&self, silhouettes: &'a Silhouettes) -> &'a Mask {
        &silhouettes.agent[self.frame.min(AGENT_FRAMES - 1)]
    }

    /// Lower edge of the sprite.
    pub fn bottom_edge(&self, silhouettes: &Silhouettes) -> f32 {
        self.y + self.silhouette(silhouettes).height() as f32
    }

    /// Whether the agent touches the ground or has left the top of the screen.
    pub fn is_out_of_bounds(&self, ground_y: f32, silhouettes: &Silhouettes) -> bool {
        self.bottom_edge(silhouettes) > ground_y || self.y < 0.0
    }
}
