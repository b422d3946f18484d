use serde::{Deserialize, Serialize};

/// Emitted after every completed batch.
///
/// `completed` counts batches across all epochs; `total` is
/// `epochs × ceil(samples / batch_size)`, the value a progress bar runs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// 1-based batch number within the epoch.
    pub batch: usize,
    pub completed: usize,
    pub total: usize,
    /// Mean absolute error over the examples seen so far this epoch.
    pub running_error: f64,
}

impl BatchProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Outcome of a training run, whether it finished or was cancelled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainReport {
    pub completed_batches: usize,
    pub total_batches: usize,
    pub examples_seen: usize,
    /// Mean absolute error of each fully completed epoch.
    pub epoch_errors: Vec<f64>,
    pub cancelled: bool,
}

impl TrainReport {
    pub fn final_error(&self) -> Option<f64> {
        self.epoch_errors.last().copied()
    }
}
