//! Read-only view of a game for renderers.

use super::agent::Agent;
use super::ground::Ground;
use super::obstacle::Obstacle;

/// Everything a renderer needs to draw one frame.
///
/// Both game loops expose their agents as a slice; human play is a slice of one.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Live agents.
    pub agents: &'a [Agent],
    /// Live obstacles, oldest first.
    pub obstacles: &'a [Obstacle],
    /// The ground.
    pub ground: &'a Ground,
    /// Obstacles passed so far.
    pub score: u32,
}
