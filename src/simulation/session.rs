//! Single-agent game driven by player input.

use tracing::{debug, info};

use super::agent::Agent;
use super::events::{TickEvent, TickReport};
use super::ground::Ground;
use super::params::Params;
use super::scene::Scene;
use super::silhouettes::Silhouettes;
use super::stream::ObstacleStream;

/// ID reported in events for the player's agent.
pub const PLAYER_ID: usize = 0;

/// Lifecycle of a human-play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The agent is alive.
    Playing,
    /// The agent hit a barrier or left the playfield.
    Over,
}

/// A human-play game: the same rules as training with a population of one.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    params: &'a Params,
    silhouettes: &'a Silhouettes,
    seed: Option<u64>,
    agents: Vec<Agent>,
    stream: ObstacleStream,
    ground: Ground,
    score: u32,
    ticks: u64,
    state: SessionState,
}

impl<'a> Session<'a> {
    /// Starts a new game.
    pub fn new(params: &'a Params, silhouettes: &'a Silhouettes, seed: Option<u64>) -> Self {
        Self {
            params,
            silhouettes,
            seed,
            agents: vec![Agent::spawn(params)],
            stream: ObstacleStream::new(params, silhouettes.barrier_height(), seed),
            ground: Ground::new(params.ground_y, silhouettes.ground_width),
            score: 0,
            ticks: 0,
            state: SessionState::Playing,
        }
    }

    /// Replaces the obstacle stream, e.g. with hand-placed obstacles.
    pub fn with_stream(mut self, stream: ObstacleStream) -> Self {
        self.stream = stream;
        self
    }

    /// Starts over with the same configuration.
    pub fn restart(&mut self) {
        *self = Self::new(self.params, self.silhouettes, self.seed);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.state == SessionState::Over
    }

    /// Obstacles passed so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The player's agent.
    pub fn agent(&self) -> &Agent {
        &self.agents[0]
    }

    /// The obstacle stream.
    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    /// Read-only view for rendering.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            agents: &self.agents,
            obstacles: self.stream.obstacles(),
            ground: &self.ground,
            score: self.score,
        }
    }

    /// Advances the game by one tick.
    ///
    /// # Arguments
    ///
    /// * `impulse` - Whether the player flapped since the previous tick
    pub fn tick(&mut self, impulse: bool) -> TickReport {
        let mut report = TickReport::new();
        if self.is_over() {
            return report;
        }

        let params = self.params;
        let silhouettes = self.silhouettes;
        let barrier_width = silhouettes.barrier_width();
        let agent = &mut self.agents[0];

        if impulse {
            agent.impulse(params);
        }
        agent.step(params);

        let mut crashed = false;
        let mut pending_score = false;
        for obstacle in self.stream.obstacles_mut() {
            if obstacle.collides_with(agent, silhouettes) {
                crashed = true;
            } else if obstacle.mark_passed(agent.x) {
                pending_score = true;
            }
        }

        self.stream.advance(params);
        self.stream.recycle(barrier_width);

        if crashed {
            report.push(TickEvent::Collided { id: PLAYER_ID });
        } else {
            if pending_score {
                self.score += 1;
                self.stream.spawn(params);
                report.push(TickEvent::Scored { score: self.score });
                debug!(score = self.score, "obstacle passed");
            }

            if agent.is_out_of_bounds(params.ground_y, silhouettes) {
                crashed = true;
                report.push(TickEvent::OutOfBounds { id: PLAYER_ID });
            }
        }

        self.ground.step(params);
        self.ticks += 1;

        if crashed {
            self.state = SessionState::Over;
            info!(score = self.score, ticks = self.ticks, "game over");
        }

        report
    }
}
