//! Decision functions that steer agents during training.
//!
//! The evaluation loop treats a decision function as a black box: three
//! observation features go in, a vector comes out, and only index 0 is read.

use ndarray::{Array1, ArrayView1};

pub mod mlp;

pub use mlp::Mlp;

/// Maps observation features to an action signal.
///
/// Index 0 of the output is the impulse strength.
pub trait Decide {
    /// Evaluates the decision function for one agent and one tick.
    fn decide(&self, features: &[f32]) -> Array1<f32>;
}

impl<F> Decide for F
where
    F: Fn(&[f32]) -> f32,
{
    fn decide(&self, features: &[f32]) -> Array1<f32> {
        Array1::from_elem(1, self(features))
    }
}

/// A multi-layer perceptron controlling one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
}

impl Brain {
    /// Creates a new brain with random weights in `[-scale, scale)`.
    pub fn new(layer_sizes: &[usize], scale: f32) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Mlp::random(pair[0], pair[1], scale))
            .collect();

        Self { layers }
    }

    /// Runs a forward pass through all layers.
    #[inline]
    pub fn think(&self, inputs: ArrayView1<'_, f32>) -> Array1<f32> {
        let mut output = inputs.to_owned();
        for layer in &self.layers {
            output = layer.forward(output.view());
        }
        output
    }

    /// Creates a child brain as the weighted average of two parents with the
    /// same layer sizes. `weight1` is the share of `parent1`.
    pub fn crossover(parent1: &Brain, parent2: &Brain, weight1: f32) -> Self {
        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Mlp::blend(layer1, layer2, weight1))
            .collect();

        Self { layers }
    }

    /// Mutates all layers in the brain.
    pub fn mutate(&mut self, mutation_scale: f32) {
        for layer in &mut self.layers {
            layer.mutate(mutation_scale);
        }
    }
}

impl Decide for Brain {
    fn decide(&self, features: &[f32]) -> Array1<f32> {
        self.think(ArrayView1::from(features))
    }
}
