//! Generation loop tying the evaluation game to the optimizer.

use tracing::info;

use super::evaluation::Evaluation;
use super::evolution::{self, EvolutionEngine, GenerationStats, Genome};
use super::params::Params;
use super::silhouettes::Silhouettes;

/// Runs generations until the iteration cap or the fitness threshold is reached.
#[derive(Debug, Clone)]
pub struct Trainer {
    engine: EvolutionEngine,
    genomes: Vec<Genome>,
    history: Vec<GenerationStats>,
    champion: Option<Genome>,
}

impl Trainer {
    /// Creates a trainer with a random first population.
    pub fn new(params: &Params) -> Self {
        let mut engine = EvolutionEngine::new();
        let genomes = engine.initial_population(params);

        Self {
            engine,
            genomes,
            history: Vec::new(),
            champion: None,
        }
    }

    /// Zero-based number of the generation about to be evaluated.
    pub fn generation(&self) -> usize {
        self.engine.generation()
    }

    /// The population of the current generation.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Mutable population, handed to [`Evaluation::from_genomes`].
    pub fn genomes_mut(&mut self) -> &mut [Genome] {
        &mut self.genomes
    }

    /// Stats of every finished generation.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Fittest genome seen so far.
    pub fn champion(&self) -> Option<&Genome> {
        self.champion.as_ref()
    }

    /// Whether the iteration cap or the fitness threshold has been reached.
    pub fn is_done(&self, params: &Params) -> bool {
        self.history.len() >= params.generations
            || self
                .champion
                .as_ref()
                .is_some_and(|champion| champion.fitness >= params.fitness_threshold)
    }

    /// Obstacle seed for the current generation.
    pub fn generation_seed(&self, seed: Option<u64>) -> Option<u64> {
        seed.map(|seed| seed.wrapping_add(self.generation() as u64))
    }

    /// Records the fitness written by the evaluation and breeds the next population.
    ///
    /// # Arguments
    ///
    /// * `score` - Obstacles passed during the generation
    /// * `ticks` - Ticks the generation lasted
    /// * `params` - Breeding parameters
    pub fn finish_generation(&mut self, score: u32, ticks: u64, params: &Params) -> GenerationStats {
        let stats = evolution::summarize(&self.genomes, self.generation(), score, ticks);
        self.history.push(stats);

        let best = self
            .genomes
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness));
        if let Some(best) = best {
            let improved = self
                .champion
                .as_ref()
                .is_none_or(|champion| best.fitness > champion.fitness);
            if improved {
                self.champion = Some(best.clone());
            }
        }

        if !self.is_done(params) {
            self.genomes = self.engine.next_generation(&self.genomes, params);
        }

        stats
    }

    /// Trains without rendering.
    ///
    /// # Arguments
    ///
    /// * `params` - Game and training parameters
    /// * `silhouettes` - Collision masks
    /// * `seed` - Base seed of the obstacle streams; generation `n` uses `seed + n`
    ///
    /// # Returns
    ///
    /// The fittest genome found.
    pub fn run_headless(
        &mut self,
        params: &Params,
        silhouettes: &Silhouettes,
        seed: Option<u64>,
    ) -> Option<&Genome> {
        while !self.is_done(params) {
            let generation_seed = self.generation_seed(seed);
            let mut evaluation =
                Evaluation::from_genomes(&mut self.genomes, params, silhouettes, generation_seed);
            let ticks = evaluation.run_to_end();
            let score = evaluation.score();

            self.finish_generation(score, ticks, params);
        }

        if let Some(champion) = &self.champion {
            info!(
                id = champion.id,
                fitness = champion.fitness,
                generations = self.history.len(),
                "training finished"
            );
        }

        self.champion.as_ref()
    }
}
