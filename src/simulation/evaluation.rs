//! Lock-step evaluation of a whole population for one generation.
//!
//! Every tick advances all live agents, asks each agent's decision function
//! whether to impulse, removes agents that hit a barrier or leave the screen,
//! and books fitness: a small reward per tick survived, a penalty for hitting
//! a barrier and a bonus for every obstacle passed.

use tracing::debug;

use super::agent::Agent;
use super::brain::{Brain, Decide};
use super::events::{TickEvent, TickReport};
use super::evolution::Genome;
use super::ground::Ground;
use super::obstacle::Obstacle;
use super::params::Params;
use super::population::{Accumulator, Population};
use super::scene::Scene;
use super::silhouettes::Silhouettes;
use super::stream::ObstacleStream;

/// Lifecycle of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationState {
    /// At least one agent is alive.
    Running,
    /// Every agent was eliminated, the tick limit was hit or the run was stopped.
    Terminated,
}

/// Number of observation features.
pub const FEATURE_COUNT: usize = 3;

/// Observation features fed to a decision function.
///
/// The gap distance is passed twice unless `distinct_features` is set, in
/// which case the third feature is the distance to the lower barrier.
pub fn features(agent: &Agent, obstacle: &Obstacle, params: &Params) -> [f32; FEATURE_COUNT] {
    let gap_distance = (agent.y - obstacle.gap_center).abs();
    let third = if params.distinct_features {
        (agent.y - obstacle.bottom).abs()
    } else {
        gap_distance
    };
    [agent.y, gap_distance, third]
}

/// One generation of the training game.
pub struct Evaluation<'g, D> {
    params: &'g Params,
    silhouettes: &'g Silhouettes,
    population: Population<'g, D>,
    stream: ObstacleStream,
    ground: Ground,
    score: u32,
    ticks: u64,
    state: EvaluationState,
}

impl<'g, D: Decide> Evaluation<'g, D> {
    /// Starts a generation.
    ///
    /// Every entry gets a fresh agent at the start position and its fitness
    /// reset to zero.
    ///
    /// # Arguments
    ///
    /// * `entries` - `(genome id, decision function, fitness)` per agent
    /// * `params` - Game parameters
    /// * `silhouettes` - Collision masks
    /// * `seed` - Seed of the obstacle stream; `None` seeds from the OS
    pub fn new<I>(
        entries: I,
        params: &'g Params,
        silhouettes: &'g Silhouettes,
        seed: Option<u64>,
    ) -> Self
    where
        I: IntoIterator<Item = (usize, &'g D, &'g mut f32)>,
    {
        let mut population = Population::new();
        for (id, decider, fitness) in entries {
            *fitness = 0.0;
            population.push(Agent::spawn(params), decider, Accumulator { id, fitness });
        }

        debug!(agents = population.len(), "generation started");

        Self {
            params,
            silhouettes,
            population,
            stream: ObstacleStream::new(params, silhouettes.barrier_height(), seed),
            ground: Ground::new(params.ground_y, silhouettes.ground_width),
            score: 0,
            ticks: 0,
            state: EvaluationState::Running,
        }
    }

    /// Replaces the obstacle stream, e.g. with hand-placed obstacles.
    pub fn with_stream(mut self, stream: ObstacleStream) -> Self {
        self.stream = stream;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EvaluationState {
        self.state
    }

    /// Whether the generation is still running.
    pub fn is_running(&self) -> bool {
        self.state == EvaluationState::Running
    }

    /// Obstacles passed so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of live agents.
    pub fn alive(&self) -> usize {
        self.population.len()
    }

    /// The population record.
    pub fn population(&self) -> &Population<'g, D> {
        &self.population
    }

    /// The obstacle stream.
    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    /// Read-only view for rendering.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            agents: self.population.agents(),
            obstacles: self.stream.obstacles(),
            ground: &self.ground,
            score: self.score,
        }
    }

    /// Ends the generation regardless of survivors.
    pub fn stop(&mut self) {
        self.state = EvaluationState::Terminated;
    }

    /// Runs ticks until the generation terminates.
    ///
    /// # Returns
    ///
    /// The number of ticks processed.
    pub fn run_to_end(&mut self) -> u64 {
        while self.is_running() {
            self.tick();
        }
        self.ticks
    }

    /// Advances the generation by one tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::new();

        if self.state == EvaluationState::Terminated {
            return report;
        }
        if self.population.is_empty()
            || self.params.tick_limit.is_some_and(|limit| self.ticks >= limit)
        {
            self.state = EvaluationState::Terminated;
            debug!(ticks = self.ticks, score = self.score, "generation terminated");
            return report;
        }

        let params = self.params;
        let silhouettes = self.silhouettes;
        let barrier_width = silhouettes.barrier_width();

        let lead_x = self.population.agents()[0].x;
        let target = self.stream.target(lead_x, barrier_width).cloned();

        let (agents, deciders, accumulators) = self.population.parts_mut();
        for ((agent, &decider), accumulator) in
            agents.iter_mut().zip(deciders).zip(accumulators.iter_mut())
        {
            agent.step(params);
            accumulator.add(params.survival_reward);

            if let Some(obstacle) = &target {
                let output = decider.decide(&features(agent, obstacle, params));
                if output
                    .get(0)
                    .is_some_and(|&strength| strength > params.decision_threshold)
                {
                    agent.impulse(params);
                }
            }
        }

        let mut doomed = vec![false; agents.len()];
        let mut pending_score = false;
        for obstacle in self.stream.obstacles_mut() {
            for (i, agent) in agents.iter().enumerate() {
                if doomed[i] {
                    continue;
                }
                if obstacle.collides_with(agent, silhouettes) {
                    accumulators[i].add(-params.collision_penalty);
                    doomed[i] = true;
                    report.push(TickEvent::Collided {
                        id: accumulators[i].id,
                    });
                    debug!(id = accumulators[i].id, tick = self.ticks, "agent hit a barrier");
                } else if obstacle.mark_passed(agent.x) {
                    pending_score = true;
                }
            }
        }
        self.population.compact(&doomed);

        self.stream.advance(params);
        self.stream.recycle(barrier_width);

        if pending_score {
            self.score += 1;
            for accumulator in self.population.accumulators_mut() {
                accumulator.add(params.pass_bonus);
            }
            self.stream.spawn(params);
            report.push(TickEvent::Scored { score: self.score });
            debug!(score = self.score, alive = self.population.len(), "obstacle passed");
        }

        let out_of_bounds: Vec<bool> = self
            .population
            .agents()
            .iter()
            .map(|agent| agent.is_out_of_bounds(params.ground_y, silhouettes))
            .collect();
        for id in self.population.compact(&out_of_bounds) {
            report.push(TickEvent::OutOfBounds { id });
            debug!(id, tick = self.ticks, "agent left the playfield");
        }

        self.ground.step(params);
        self.ticks += 1;

        report
    }
}

impl<'g> Evaluation<'g, Brain> {
    /// Starts a generation for the optimizer's genomes.
    pub fn from_genomes(
        genomes: &'g mut [Genome],
        params: &'g Params,
        silhouettes: &'g Silhouettes,
        seed: Option<u64>,
    ) -> Self {
        Self::new(genomes.iter_mut().map(genome_entry), params, silhouettes, seed)
    }
}

fn genome_entry(genome: &mut Genome) -> (usize, &Brain, &mut f32) {
    let Genome { id, brain, fitness } = genome;
    let brain: &Brain = brain;
    (*id, brain, fitness)
}
