//! Index-aligned population record of a training generation.

use super::agent::Agent;

/// Fitness slot of one genome, written through while the generation runs.
#[derive(Debug)]
pub struct Accumulator<'g> {
    /// Genome ID the fitness belongs to.
    pub id: usize,
    /// The optimizer's fitness value.
    pub fitness: &'g mut f32,
}

impl Accumulator<'_> {
    /// Adds `delta` to the fitness.
    pub fn add(&mut self, delta: f32) {
        *self.fitness += delta;
    }

    /// Current fitness.
    pub fn get(&self) -> f32 {
        *self.fitness
    }
}

/// Live agents with their decision functions and fitness accumulators.
///
/// Entry `i` of each collection belongs to the same genome. Entries are only
/// ever removed through [`Population::compact`], which keeps the three
/// collections aligned.
#[derive(Debug)]
pub struct Population<'g, D> {
    agents: Vec<Agent>,
    deciders: Vec<&'g D>,
    accumulators: Vec<Accumulator<'g>>,
}

impl<'g, D> Population<'g, D> {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            deciders: Vec::new(),
            accumulators: Vec::new(),
        }
    }

    /// Appends one genome's entry to all three collections.
    pub fn push(&mut self, agent: Agent, decider: &'g D, accumulator: Accumulator<'g>) {
        self.agents.push(agent);
        self.deciders.push(decider);
        self.accumulators.push(accumulator);
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether every agent has been eliminated.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Live agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Decision functions, aligned with [`Self::agents`].
    pub fn deciders(&self) -> &[&'g D] {
        &self.deciders
    }

    /// Fitness accumulators, aligned with [`Self::agents`].
    pub fn accumulators(&self) -> &[Accumulator<'g>] {
        &self.accumulators
    }

    /// Mutable fitness accumulators.
    pub fn accumulators_mut(&mut self) -> &mut [Accumulator<'g>] {
        &mut self.accumulators
    }

    /// Splits the population into its three aligned collections.
    pub fn parts_mut(&mut self) -> (&mut [Agent], &[&'g D], &mut [Accumulator<'g>]) {
        (&mut self.agents, &self.deciders, &mut self.accumulators)
    }

    /// Removes every entry whose flag in `doomed` is set, from all three
    /// collections in one pass. Relative order of survivors is kept.
    ///
    /// # Returns
    ///
    /// The IDs of the removed entries.
    pub fn compact(&mut self, doomed: &[bool]) -> Vec<usize> {
        debug_assert_eq!(doomed.len(), self.len());

        let removed = self
            .accumulators
            .iter()
            .zip(doomed)
            .filter(|(_, doomed)| **doomed)
            .map(|(accumulator, _)| accumulator.id)
            .collect();

        retain_unflagged(&mut self.agents, doomed);
        retain_unflagged(&mut self.deciders, doomed);
        retain_unflagged(&mut self.accumulators, doomed);

        removed
    }
}

impl<D> Default for Population<'_, D> {
    fn default() -> Self {
        Self::new()
    }
}

fn retain_unflagged<T>(items: &mut Vec<T>, doomed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !doomed.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}
