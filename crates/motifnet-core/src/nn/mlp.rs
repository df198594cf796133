use ndarray::{Array1, Array2};
use rand::Rng;
use rand::distributions::Uniform;
use thiserror::Error;

/// Width of both hidden layers; the transform is deliberately fixed-shape.
pub const HIDDEN_WIDTH: usize = 64;

/// A feature-width mismatch between a matrix and the transform consuming it.
///
/// This is fatal: it indicates a configuration mismatch between the feature
/// initializer and the transform, not a data problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{context} has width {actual}, but the transform expects width {expected}")]
pub struct DimensionError {
    pub expected: usize,
    pub actual: usize,
    pub context: &'static str,
}

/// A feed-forward network with two 64-unit ReLU hidden layers.
///
/// Input and output widths are fixed at construction; rows are batch
/// entries (one per factor instance). Weights are drawn from a
/// caller-supplied [`Rng`], so seeding the generator makes construction
/// reproducible bit for bit.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    weights1: Array2<f32>,
    bias1: Array1<f32>,
    weights2: Array2<f32>,
    bias2: Array1<f32>,
    weights3: Array2<f32>,
    bias3: Array1<f32>,
}

impl Mlp {
    pub fn new(in_features: usize, out_features: usize, rng: &mut impl Rng) -> Self {
        Self {
            weights1: glorot_uniform(in_features, HIDDEN_WIDTH, rng),
            bias1: Array1::zeros(HIDDEN_WIDTH),
            weights2: glorot_uniform(HIDDEN_WIDTH, HIDDEN_WIDTH, rng),
            bias2: Array1::zeros(HIDDEN_WIDTH),
            weights3: glorot_uniform(HIDDEN_WIDTH, out_features, rng),
            bias3: Array1::zeros(out_features),
        }
    }

    pub fn in_features(&self) -> usize {
        self.weights1.nrows()
    }

    pub fn out_features(&self) -> usize {
        self.weights3.ncols()
    }

    /// Applies the network to a batch of row vectors.
    ///
    /// # Errors
    ///
    /// Fails with [`DimensionError`] if the input width does not match the
    /// configured input width.
    pub fn forward(&self, input: &Array2<f32>) -> Result<Array2<f32>, DimensionError> {
        if input.ncols() != self.in_features() {
            return Err(DimensionError {
                expected: self.in_features(),
                actual: input.ncols(),
                context: "transform input",
            });
        }

        let hidden1 = relu(input.dot(&self.weights1) + &self.bias1);
        let hidden2 = relu(hidden1.dot(&self.weights2) + &self.bias2);
        Ok(hidden2.dot(&self.weights3) + &self.bias3)
    }
}

fn relu(x: Array2<f32>) -> Array2<f32> {
    x.mapv_into(|v| v.max(0.0))
}

fn glorot_uniform(rows: usize, cols: usize, rng: &mut impl Rng) -> Array2<f32> {
    let limit = (6.0 / (rows + cols) as f32).sqrt();
    let distribution = Uniform::new_inclusive(-limit, limit);
    Array2::from_shape_fn((rows, cols), |_| rng.sample(distribution))
}
