//! # Flappy Evo - Evolving Flappy Bird Agents
//!
//! A side-scrolling obstacle-avoidance game with two drivers: a human-played
//! single-agent game and a training loop that evaluates a whole population of
//! neural-network controlled agents per generation and evolves their brains.
//!
//! ## Features
//!
//! - Deterministic agent physics with terminal velocity and tilt
//! - Procedural obstacle stream with seeded gap placement
//! - Pixel-exact collision between sprite masks
//! - Lock-step population evaluation with fitness bookkeeping
//! - Generational optimizer (crossover and mutation of MLP brains)
//! - Rendering and input via macroquad, or headless training
//!
//! ## Core Modules
//!
//! - [`simulation::agent`] - Agent physics
//! - [`simulation::obstacle`] - Barrier pairs and their collision test
//! - [`simulation::stream`] - Obstacle spawning and recycling
//! - [`simulation::evaluation`] - Training game for one generation
//! - [`simulation::session`] - Human-play game
//! - [`simulation::evolution`] - Optimizer breeding the next generation

/// Core simulation logic and data structures.
pub mod simulation {
    /// Physics of one controllable agent.
    pub mod agent;
    /// Decision functions and the MLP brain.
    pub mod brain;
    /// Fixed-rate tick scheduling.
    pub mod clock;
    /// Population evaluation loop for one generation.
    pub mod evaluation;
    /// Events reported by the game loops.
    pub mod events;
    /// Generational optimizer.
    pub mod evolution;
    /// Scrolling ground.
    pub mod ground;
    /// Binary opacity masks for pixel-exact collision.
    pub mod mask;
    /// Barrier pairs with a passable gap.
    pub mod obstacle;
    /// Game and training parameters.
    pub mod params;
    /// Index-aligned population record.
    pub mod population;
    /// Read-only view for renderers.
    pub mod scene;
    /// Single-agent human-play game.
    pub mod session;
    /// Collision masks and sprite geometry.
    pub mod silhouettes;
    /// Obstacle spawning, scrolling and recycling.
    pub mod stream;
    /// Generation loop driving evaluation and evolution.
    pub mod training;
}
