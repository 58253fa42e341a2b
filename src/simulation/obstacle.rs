//! Paired top and bottom barriers with a passable gap.

use rand::Rng;

use super::agent::Agent;
use super::params::Params;
use super::silhouettes::Silhouettes;

/// An obstacle (the pipe pair).
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge of both barriers.
    pub x: f32,
    /// Gap height drawn at spawn. The opening spans `gap_center..bottom`.
    pub gap_center: f32,
    /// Top edge of the upper barrier sprite.
    pub top: f32,
    /// Top edge of the lower barrier sprite.
    pub bottom: f32,
    /// Set once the first agent has flown past.
    pub passed: bool,
}

impl Obstacle {
    /// Creates an obstacle with a random gap centre in
    /// `[gap_center_min, gap_center_max)`.
    ///
    /// # Arguments
    ///
    /// * `x` - Horizontal spawn position
    /// * `rng` - Source of the gap draw
    /// * `params` - Game parameters
    /// * `barrier_height` - Height of the barrier sprite
    pub fn new<R: Rng + ?Sized>(x: f32, rng: &mut R, params: &Params, barrier_height: f32) -> Self {
        let gap_center = rng.random_range(params.gap_center_min..params.gap_center_max);
        Self::with_gap(x, gap_center as f32, params, barrier_height)
    }

    /// Creates an obstacle with a known gap centre.
    pub fn with_gap(x: f32, gap_center: f32, params: &Params, barrier_height: f32) -> Self {
        Self {
            x,
            gap_center,
            top: gap_center - barrier_height,
            bottom: gap_center + params.gap,
            passed: false,
        }
    }

    /// Moves the obstacle one tick to the left.
    pub fn step(&mut self, params: &Params) {
        self.x -= params.obstacle_velocity;
    }

    /// Offset of a barrier's mask relative to the agent's mask.
    fn offset(&self, barrier_y: f32, agent: &Agent) -> (i32, i32) {
        (
            (self.x.round() - agent.x.round()) as i32,
            (barrier_y.round() - agent.y.round()) as i32,
        )
    }

    /// Pixel-exact collision test against both barriers.
    pub fn collides_with(&self, agent: &Agent, silhouettes: &Silhouettes) -> bool {
        let agent_mask = agent.silhouette(silhouettes);

        agent_mask.overlaps(&silhouettes.barrier_bottom, self.offset(self.bottom, agent))
            || agent_mask.overlaps(&silhouettes.barrier_top, self.offset(self.top, agent))
    }

    /// Flags the obstacle as passed once it is behind `agent_x`.
    ///
    /// # Returns
    ///
    /// `true` only on the tick the flag flips.
    pub fn mark_passed(&mut self, agent_x: f32) -> bool {
        if !self.passed && self.x < agent_x {
            self.passed = true;
            return true;
        }
        false
    }

    /// Whether the right edge has scrolled past the left screen border.
    pub fn is_off_screen(&self, barrier_width: f32) -> bool {
        self.x + barrier_width < 0.0
    }
}
