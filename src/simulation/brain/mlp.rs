//! Dense tanh layer of the agents' brains.

use ndarray::{Array, Array1, Array2, ArrayView1, Dimension, ShapeBuilder};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;

/// Uniform noise in `[-scale, scale)`. A zero scale yields zeros.
fn noise<Sh, D>(shape: Sh, scale: f32) -> Array<f32, D>
where
    Sh: ShapeBuilder<Dim = D>,
    D: Dimension,
{
    if scale > 0.0 {
        Array::random(shape, Uniform::new(-scale, scale))
    } else {
        Array::zeros(shape)
    }
}

/// One fully connected layer, `tanh(W·x + b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    /// Weight matrix (`outputs` × `inputs`).
    pub weights: Array2<f32>,
    /// Bias vector (`outputs`).
    pub biases: Array1<f32>,
}

impl Mlp {
    /// Creates a layer mapping `inputs` values to `outputs` values, with
    /// weights and biases drawn from `[-scale, scale)`.
    pub fn random(inputs: usize, outputs: usize, scale: f32) -> Self {
        Self {
            weights: noise((outputs, inputs), scale),
            biases: noise(outputs, scale),
        }
    }

    /// Number of values the layer consumes.
    pub fn inputs(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of values the layer produces.
    pub fn outputs(&self) -> usize {
        self.weights.nrows()
    }

    /// Activations for one input vector.
    #[inline]
    pub fn forward(&self, inputs: ArrayView1<'_, f32>) -> Array1<f32> {
        (self.weights.dot(&inputs) + &self.biases).mapv_into(f32::tanh)
    }

    /// Adds uniform noise in `[-scale, scale)` to every parameter.
    pub fn mutate(&mut self, scale: f32) {
        self.weights += &noise(self.weights.raw_dim(), scale);
        self.biases += &noise(self.biases.raw_dim(), scale);
    }

    /// Interpolates two layers of equal shape: `weight · a + (1 - weight) · b`.
    pub fn blend(a: &Mlp, b: &Mlp, weight: f32) -> Self {
        let mix = |x: &mut f32, &y: &f32| *x = *x * weight + y * (1.0 - weight);

        let mut weights = a.weights.clone();
        weights.zip_mut_with(&b.weights, mix);
        let mut biases = a.biases.clone();
        biases.zip_mut_with(&b.biases, mix);

        Self { weights, biases }
    }
}
