use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    config::NetworkConfig,
    error::{NeuroError, Result},
    layers::dense::Layer,
    loss::mae::MaeLoss,
    math::matrix::Matrix,
    network::prediction::{Activations, Prediction},
    optim::sgd::Sgd,
};

/// Two-layer sigmoid classifier: `input → hidden → output`.
///
/// Outputs are independent sigmoids, one confidence per class; they do not
/// sum to one. Parameters change only through [`Network::train`].
#[derive(Debug, Clone)]
pub struct Network {
    hidden: Layer,
    output: Layer,
    optimizer: Sgd,
    empty_input_threshold: f64,
}

impl Network {
    /// Builds the network with He-initialized weights seeded from
    /// `config.seed`; the same config always produces the same parameters.
    pub fn new(config: &NetworkConfig) -> Network {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let hidden = Layer::new(config.hidden_size, config.input_size, &mut rng);
        let output = Layer::new(config.output_size, config.hidden_size, &mut rng);
        Network {
            hidden,
            output,
            optimizer: Sgd::new(config.learning_rate),
            empty_input_threshold: config.empty_input_threshold,
        }
    }

    pub fn input_size(&self) -> usize {
        self.hidden.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden.size
    }

    pub fn output_size(&self) -> usize {
        self.output.size
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    /// Input→hidden weights, `(input_size, hidden_size)`.
    pub fn input_weights(&self) -> &Matrix {
        &self.hidden.weights
    }

    /// Hidden→output weights, `(hidden_size, output_size)`.
    pub fn output_weights(&self) -> &Matrix {
        &self.output.weights
    }

    pub fn hidden_biases(&self) -> &[f64] {
        self.hidden.biases.as_row()
    }

    pub fn output_biases(&self) -> &[f64] {
        self.output.biases.as_row()
    }

    /// True when every element is below the blank-canvas threshold.
    pub fn is_near_empty(&self, image: &[f64]) -> bool {
        image.iter().all(|&px| px < self.empty_input_threshold)
    }

    /// Per-class confidences for a flattened image.
    ///
    /// A near-empty input returns all zeros regardless of the weights, so a
    /// blank canvas never shows a class preference.
    pub fn forward(&self, image: &[f64]) -> Result<Vec<f64>> {
        Ok(self
            .activations(image)?
            .map(|acts| acts.output)
            .unwrap_or_else(|| vec![0.0; self.output_size()]))
    }

    /// Hidden and output activations for the visualizer. `None` when the
    /// near-empty short-circuit applies.
    pub fn activations(&self, image: &[f64]) -> Result<Option<Activations>> {
        self.check_input(image)?;
        if self.is_near_empty(image) {
            return Ok(None);
        }
        let (hidden, output) = self.feed(&Matrix::row(image));
        Ok(Some(Activations {
            hidden: hidden.into_row(),
            output: output.into_row(),
        }))
    }

    /// Most confident class, or `None` for a blank input.
    pub fn predict(&self, image: &[f64]) -> Result<Option<Prediction>> {
        Ok(self
            .activations(image)?
            .and_then(|acts| Prediction::from_outputs(&acts.output)))
    }

    /// One gradient step toward the one-hot target for `label`.
    ///
    /// The forward pass is recomputed here instead of reusing anything from
    /// [`Network::forward`], and the blank-input short-circuit does not apply:
    /// an all-dark example still moves the weights.
    ///
    /// Returns the mean absolute output error before the update.
    pub fn train(&mut self, image: &[f64], label: usize) -> Result<f64> {
        self.check_input(image)?;
        let target = Matrix::row(&self.one_hot(label)?);

        let input = Matrix::row(image);
        let (hidden, output) = self.feed(&input);

        let output_error = &target - &output;
        let output_delta = self.output.delta(&output_error, &output);

        // Uses the output weights as they were before this step.
        let hidden_error = self.output.back_propagate(&output_delta);
        let hidden_delta = self.hidden.delta(&hidden_error, &hidden);

        self.optimizer.step(&mut self.output, &hidden, &output_delta);
        self.optimizer.step(&mut self.hidden, &input, &hidden_delta);

        Ok(MaeLoss::from_error(output_error.as_row()))
    }

    /// Target vector with a single 1.0 at `label`.
    pub fn one_hot(&self, label: usize) -> Result<Vec<f64>> {
        if label >= self.output_size() {
            return Err(NeuroError::InvalidLabel(label));
        }
        let mut target = vec![0.0; self.output_size()];
        target[label] = 1.0;
        Ok(target)
    }

    fn feed(&self, input: &Matrix) -> (Matrix, Matrix) {
        let hidden = self.hidden.feed_from(input);
        let output = self.output.feed_from(&hidden);
        (hidden, output)
    }

    fn check_input(&self, image: &[f64]) -> Result<()> {
        if image.len() != self.input_size() {
            return Err(NeuroError::DimensionMismatch {
                expected: self.input_size(),
                actual: image.len(),
            });
        }
        Ok(())
    }
}
