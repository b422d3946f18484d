use rand::Rng;

use crate::{activation::sigmoid::{sigmoid, sigmoid_prime_from_output}, math::matrix::Matrix};

/// A fully-connected sigmoid layer. Weights are `(input_size, size)`,
/// biases a `1 × size` row.
#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Layer {
    /// He-initialized weights drawn from `rng`; biases start at zero.
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        Layer {
            size,
            weights: Matrix::he(input_size, size, rng),
            biases: Matrix::zeros(1, size),
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// `σ(input · W + b)` for a `1 × input_size` row.
    pub fn feed_from(&self, input: &Matrix) -> Matrix {
        let z = &(input * &self.weights) + &self.biases;
        z.map(sigmoid)
    }

    /// δ = error ⊙ σ'(a), with the derivative taken from this layer's
    /// post-activation output `a`.
    pub fn delta(&self, error: &Matrix, output: &Matrix) -> Matrix {
        error.hadamard(&output.map(sigmoid_prime_from_output))
    }

    /// Pushes a delta back through the weights: `δ · Wᵗ`.
    pub fn back_propagate(&self, delta: &Matrix) -> Matrix {
        delta * &self.weights.transpose()
    }

    /// Adds pre-computed adjustments scaled by `lr`.
    ///
    /// The adjustments point toward the target (they are built from
    /// `target − output`), so they are added rather than subtracted.
    pub fn apply_gradients(&mut self, weights_adj: &Matrix, biases_adj: &Matrix, lr: f64) {
        self.weights = &self.weights + &weights_adj.scale(lr);
        self.biases = &self.biases + &biases_adj.scale(lr);
    }
}
