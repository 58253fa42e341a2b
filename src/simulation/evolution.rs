//! Generational optimizer for the agents' brains.
//!
//! Each generation is ranked by fitness. The fittest genomes are carried over
//! unchanged, the rest of the next population is bred from the top fraction
//! by weighted crossover followed by mutation.

use rand::Rng;
use rayon::prelude::*;
use tracing::info;

use super::brain::Brain;
use super::params::Params;

/// One member of the optimizer's population.
#[derive(Debug, Clone)]
pub struct Genome {
    /// Unique identifier.
    pub id: usize,
    /// Decision function of the agent evaluated for this genome.
    pub brain: Brain,
    /// Fitness written by the evaluation loop.
    pub fitness: f32,
}

impl Genome {
    /// Creates a genome with zero fitness.
    pub fn new(id: usize, brain: Brain) -> Self {
        Self {
            id,
            brain,
            fitness: 0.0,
        }
    }
}

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation number.
    pub generation: usize,
    /// Highest fitness.
    pub best: f32,
    /// Mean fitness.
    pub mean: f32,
    /// Genome ID with the highest fitness.
    pub best_id: usize,
    /// Obstacles passed during the generation.
    pub score: u32,
    /// Ticks the generation lasted.
    pub ticks: u64,
}

/// Breeds populations of genomes.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    generation: usize,
    next_id: usize,
}

impl Default for EvolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EvolutionEngine {
    /// Creates an engine at generation 0.
    pub fn new() -> Self {
        Self {
            generation: 0,
            next_id: 0,
        }
    }

    /// Number of populations bred so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Creates a population of random brains.
    pub fn initial_population(&mut self, params: &Params) -> Vec<Genome> {
        (0..params.population_size)
            .map(|_| {
                let id = self.take_id();
                Genome::new(id, Brain::new(&params.layer_sizes, params.weight_scale))
            })
            .collect()
    }

    /// Produces the next population from an evaluated one.
    ///
    /// # Arguments
    ///
    /// * `evaluated` - Genomes with their fitness filled in
    /// * `params` - Population size and breeding fractions
    ///
    /// # Returns
    ///
    /// `population_size` genomes with zero fitness. Elites keep their IDs.
    pub fn next_generation(&mut self, evaluated: &[Genome], params: &Params) -> Vec<Genome> {
        self.generation += 1;

        if evaluated.is_empty() {
            return self.initial_population(params);
        }

        let mut ranked: Vec<&Genome> = evaluated.iter().collect();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let size = params.population_size;
        let elite_count = fraction_of(size, params.elite_fraction, 1).min(ranked.len());
        let parent_count = fraction_of(ranked.len(), params.parent_fraction, 2).min(ranked.len());
        let parents = &ranked[..parent_count];

        let mut next: Vec<Genome> = ranked[..elite_count.min(size)]
            .iter()
            .map(|elite| Genome::new(elite.id, elite.brain.clone()))
            .collect();

        let child_count = size.saturating_sub(next.len());
        let first_id = self.next_id;
        self.next_id += child_count;

        let children: Vec<Genome> = (0..child_count)
            .into_par_iter()
            .map(|i| {
                let mut rng = rand::rng();
                let parent_1 = parents[rng.random_range(0..parents.len())];
                let parent_2 = parents[rng.random_range(0..parents.len())];

                let mut brain = Brain::crossover(&parent_1.brain, &parent_2.brain, rng.random());
                brain.mutate(params.mutation_scale);

                Genome::new(first_id + i, brain)
            })
            .collect();

        next.extend(children);
        next
    }

    fn take_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Summarises the fitness of an evaluated population.
pub fn summarize(genomes: &[Genome], generation: usize, score: u32, ticks: u64) -> GenerationStats {
    let best = genomes.iter().max_by(|a, b| a.fitness.total_cmp(&b.fitness));
    let mean = if genomes.is_empty() {
        0.0
    } else {
        genomes.iter().map(|g| g.fitness).sum::<f32>() / genomes.len() as f32
    };

    let stats = GenerationStats {
        generation,
        best: best.map_or(0.0, |g| g.fitness),
        mean,
        best_id: best.map_or(0, |g| g.id),
        score,
        ticks,
    };

    info!(
        generation = stats.generation,
        best = stats.best,
        mean = stats.mean,
        best_id = stats.best_id,
        score = stats.score,
        ticks = stats.ticks,
        "generation evaluated"
    );

    stats
}

fn fraction_of(total: usize, fraction: f32, min: usize) -> usize {
    ((total as f32 * fraction).ceil() as usize).max(min)
}
