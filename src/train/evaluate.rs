use serde::{Deserialize, Serialize};

use crate::error::{NeuroError, Result};
use crate::loss::mae::MaeLoss;
use crate::network::network::Network;

/// Accuracy and error over a labelled set, as the metrics panel shows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub samples: usize,
    pub correct: usize,
    /// Fraction in `[0, 1]`.
    pub accuracy: f64,
    pub mean_error: f64,
}

/// Scores `network` without touching its weights. Blank inputs produce no
/// prediction and count as misses.
pub fn evaluate(network: &Network, images: &[Vec<f64>], labels: &[u8]) -> Result<Evaluation> {
    if images.len() != labels.len() {
        return Err(NeuroError::DimensionMismatch {
            expected: images.len(),
            actual: labels.len(),
        });
    }
    let n = images.len();
    if n == 0 {
        return Ok(Evaluation { samples: 0, correct: 0, accuracy: 0.0, mean_error: 0.0 });
    }

    let mut correct = 0usize;
    let mut total_error = 0.0;
    for (image, &label) in images.iter().zip(labels) {
        let output = network.forward(image)?;
        total_error += MaeLoss::loss(&output, &network.one_hot(label as usize)?);
        if network
            .predict(image)?
            .map_or(false, |p| p.digit == label as usize)
        {
            correct += 1;
        }
    }

    Ok(Evaluation {
        samples: n,
        correct,
        accuracy: correct as f64 / n as f64,
        mean_error: total_error / n as f64,
    })
}
