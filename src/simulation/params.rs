use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use super::evaluation::FEATURE_COUNT;

/// Game and training parameters.
///
/// Everything the simulation needs is a constant of the game; this struct
/// groups them so a JSON file can override individual values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Directory holding the sprite images.
    pub asset_dir: PathBuf,
    /// Fixed simulation rate of both game loops.
    pub ticks_per_second: u32,

    /// Horizontal position of every agent (fixed for a session).
    pub agent_start_x: f32,
    /// Initial vertical position of every agent.
    pub agent_start_y: f32,
    /// Vertical velocity set by an impulse (negative is upward).
    pub impulse_velocity: f32,
    /// Quadratic coefficient of the displacement formula.
    pub gravity: f32,
    /// Largest downward displacement per tick.
    pub terminal_displacement: f32,
    /// Extra upward displacement applied while rising.
    pub rise_bias: f32,
    /// Nose-up tilt in degrees while rising.
    pub max_rotation: f32,
    /// Nose-down rotation per tick in degrees while falling.
    pub rotation_velocity: f32,
    /// Most nose-down tilt in degrees.
    pub min_rotation: f32,
    /// Agents keep their nose up until they sink this far below their last impulse.
    pub tilt_hold_band: f32,
    /// Ticks each wing-flap frame is shown.
    pub animation_time: u32,

    /// Vertical size of the passable opening.
    pub gap: f32,
    /// Horizontal obstacle speed per tick.
    pub obstacle_velocity: f32,
    /// Inclusive lower bound of the gap-centre draw.
    pub gap_center_min: i32,
    /// Exclusive upper bound of the gap-centre draw.
    pub gap_center_max: i32,
    /// Horizontal position new obstacles appear at.
    pub spawn_x: f32,

    /// Top edge of the ground; the lower death boundary.
    pub ground_y: f32,
    /// Horizontal ground speed per tick.
    pub ground_velocity: f32,

    /// Fitness granted to every live agent each tick.
    pub survival_reward: f32,
    /// Fitness removed from an agent that hits a barrier.
    pub collision_penalty: f32,
    /// Fitness granted to every live agent when an obstacle is passed.
    pub pass_bonus: f32,
    /// Decision outputs above this value trigger an impulse.
    pub decision_threshold: f32,
    /// Feed `|y - bottom|` as the third feature instead of repeating the gap distance.
    pub distinct_features: bool,
    /// Ends a generation after this many ticks even if agents survive.
    pub tick_limit: Option<u64>,

    /// Number of agents per generation.
    pub population_size: usize,
    /// Iteration cap of the optimizer.
    pub generations: usize,
    /// Training stops early once the best fitness reaches this value.
    pub fitness_threshold: f32,
    /// Neural network layer dimensions (input, hidden..., output).
    pub layer_sizes: Vec<usize>,
    /// Range of the initial random weights.
    pub weight_scale: f32,
    /// Range of the uniform noise added on mutation.
    pub mutation_scale: f32,
    /// Fraction of the population carried over unchanged.
    pub elite_fraction: f32,
    /// Fraction of the population parents are drawn from.
    pub parent_fraction: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            window_width: 500,
            window_height: 800,
            asset_dir: PathBuf::from("imgs"),
            ticks_per_second: 30,

            agent_start_x: 230.0,
            agent_start_y: 350.0,
            impulse_velocity: -10.5,
            gravity: 1.5,
            terminal_displacement: 16.0,
            rise_bias: 2.0,
            max_rotation: 25.0,
            rotation_velocity: 20.0,
            min_rotation: -90.0,
            tilt_hold_band: 50.0,
            animation_time: 5,

            gap: 200.0,
            obstacle_velocity: 5.0,
            gap_center_min: 50,
            gap_center_max: 450,
            spawn_x: 600.0,

            ground_y: 730.0,
            ground_velocity: 5.0,

            survival_reward: 0.1,
            collision_penalty: 1.0,
            pass_bonus: 5.0,
            decision_threshold: 0.5,
            distinct_features: false,
            tick_limit: None,

            population_size: 50,
            generations: 50,
            fitness_threshold: 100.0,
            layer_sizes: vec![3, 6, 1],
            weight_scale: 1.0,
            mutation_scale: 0.3,
            elite_fraction: 0.1,
            parent_fraction: 0.2,
        }
    }
}

impl Params {
    /// Rejects combinations the simulation cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.ticks_per_second > 0, "ticks_per_second must be positive");
        ensure!(
            self.gap_center_min < self.gap_center_max,
            "gap_center_min ({}) must be below gap_center_max ({})",
            self.gap_center_min,
            self.gap_center_max
        );
        ensure!(
            self.layer_sizes.len() >= 2,
            "layer_sizes needs an input and an output layer, got {:?}",
            self.layer_sizes
        );
        ensure!(
            self.layer_sizes.first() == Some(&FEATURE_COUNT),
            "layer_sizes must start with {FEATURE_COUNT} inputs, got {:?}",
            self.layer_sizes
        );
        ensure!(
            self.layer_sizes.iter().all(|&size| size > 0),
            "layer_sizes must not contain empty layers, got {:?}",
            self.layer_sizes
        );
        Ok(())
    }

    /// Loads parameters from a JSON file. Missing fields keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let params: Self = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        params
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(params)
    }

    /// Saves parameters as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }
}
