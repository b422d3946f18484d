use crate::{math::matrix::Matrix, layers::dense::Layer};

/// Plain per-example gradient step with a fixed learning rate.
#[derive(Debug, Clone)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies `W += lr · inputᵗ · δ` and `b += lr · δ` to `layer`.
    pub fn step(&self, layer: &mut Layer, input: &Matrix, delta: &Matrix) {
        let weights_adj = &input.transpose() * delta;
        layer.apply_gradients(&weights_adj, delta, self.learning_rate);
    }
}
