//! Spawning, scrolling and recycling of obstacles.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::obstacle::Obstacle;
use super::params::Params;

/// Ordered sequence of live obstacles, oldest first.
///
/// Obstacles are only appended at the spawn offset and all move at the same
/// speed, so the sequence stays sorted by `x`.
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    rng: StdRng,
    barrier_height: f32,
}

impl ObstacleStream {
    /// Creates a stream holding one obstacle at the spawn offset.
    ///
    /// # Arguments
    ///
    /// * `params` - Game parameters
    /// * `barrier_height` - Height of the barrier sprite
    /// * `seed` - Seed of the gap draws; `None` seeds from the OS
    pub fn new(params: &Params, barrier_height: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut stream = Self {
            obstacles: Vec::new(),
            rng,
            barrier_height,
        };
        stream.spawn(params);
        stream
    }

    /// Creates a stream from explicit obstacles. New obstacles still come from `seed`.
    pub fn from_obstacles(obstacles: Vec<Obstacle>, barrier_height: f32, seed: u64) -> Self {
        Self {
            obstacles,
            rng: StdRng::seed_from_u64(seed),
            barrier_height,
        }
    }

    /// Live obstacles, oldest first.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Mutable access, used to flip `passed` flags during the collision check.
    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    /// Number of live obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether the stream is empty.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Index of the obstacle the lead agent is heading for.
    ///
    /// Switches to the second obstacle once the lead agent is past the right
    /// edge of the first one.
    pub fn target_index(&self, lead_x: f32, barrier_width: f32) -> usize {
        match self.obstacles.first() {
            Some(first) if self.obstacles.len() > 1 && lead_x > first.x + barrier_width => 1,
            _ => 0,
        }
    }

    /// The obstacle at [`Self::target_index`].
    pub fn target(&self, lead_x: f32, barrier_width: f32) -> Option<&Obstacle> {
        self.obstacles.get(self.target_index(lead_x, barrier_width))
    }

    /// Moves every obstacle one tick to the left.
    pub fn advance(&mut self, params: &Params) {
        for obstacle in &mut self.obstacles {
            obstacle.step(params);
        }
    }

    /// Drops obstacles that are fully off screen.
    ///
    /// # Returns
    ///
    /// How many obstacles were removed.
    pub fn recycle(&mut self, barrier_width: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles
            .retain(|obstacle| !obstacle.is_off_screen(barrier_width));
        before - self.obstacles.len()
    }

    /// Appends a new obstacle at the spawn offset.
    pub fn spawn(&mut self, params: &Params) {
        let obstacle = Obstacle::new(params.spawn_x, &mut self.rng, params, self.barrier_height);
        self.obstacles.push(obstacle);
    }
}
