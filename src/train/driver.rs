use tracing::{debug, info};

use crate::config::TrainingConfig;
use crate::dataset::loader::Split;
use crate::error::{NeuroError, Result};
use crate::network::network::Network;
use crate::train::progress::{BatchProgress, TrainReport};

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Walks a labelled training set in epochs of contiguous batches, calling
/// [`Network::train`] once per example.
///
/// Weights are updated example by example, never batch-averaged; batches
/// only mark where progress is reported and cancellation is checked.
#[derive(Debug, Clone, Copy)]
pub struct TrainingDriver<'a> {
    images: &'a [Vec<f64>],
    labels: &'a [u8],
}

impl<'a> TrainingDriver<'a> {
    pub fn new(images: &'a [Vec<f64>], labels: &'a [u8]) -> Result<TrainingDriver<'a>> {
        if images.len() != labels.len() {
            return Err(NeuroError::DimensionMismatch {
                expected: images.len(),
                actual: labels.len(),
            });
        }
        Ok(TrainingDriver { images, labels })
    }

    pub fn from_split(split: &'a Split) -> TrainingDriver<'a> {
        TrainingDriver {
            images: &split.images,
            labels: &split.labels,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Starts a resumable run that executes one batch per [`TrainingSession::step`],
    /// for callers that need to hand control back to an event loop between
    /// batches.
    pub fn session(&self, config: &TrainingConfig) -> Result<TrainingSession<'a>> {
        if config.batch_size == 0 {
            return Err(NeuroError::Config("batch_size must be at least 1".into()));
        }
        let per_epoch = self.len().div_ceil(config.batch_size);
        Ok(TrainingSession {
            images: self.images,
            labels: self.labels,
            epochs: config.epochs,
            batch_size: config.batch_size,
            per_epoch,
            epoch: 0,
            batch: 0,
            epoch_error: 0.0,
            epoch_examples: 0,
            report: TrainReport {
                total_batches: config.epochs * per_epoch,
                ..TrainReport::default()
            },
        })
    }

    /// Runs to completion or until `should_cancel` returns true. The check
    /// happens before every batch, never in the middle of one; a cancelled
    /// run leaves the network as trained so far.
    pub fn run<P, C>(
        &self,
        network: &mut Network,
        config: &TrainingConfig,
        mut on_progress: P,
        mut should_cancel: C,
    ) -> Result<TrainReport>
    where
        P: FnMut(&BatchProgress),
        C: FnMut() -> bool,
    {
        let mut session = self.session(config)?;
        info!(
            samples = self.len(),
            epochs = config.epochs,
            batch_size = config.batch_size,
            total = session.total_units(),
            "training started"
        );

        while !session.is_finished() {
            if should_cancel() {
                info!(completed = session.completed_units(), "training cancelled");
                return Ok(session.into_report(true));
            }
            if let Some(progress) = session.step(network)? {
                on_progress(&progress);
            }
        }

        let report = session.into_report(false);
        info!(final_error = ?report.final_error(), "training finished");
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Position inside a training run. Owns no network; each `step` borrows
/// one, so the caller may run inference between batches.
#[derive(Debug, Clone)]
pub struct TrainingSession<'a> {
    images: &'a [Vec<f64>],
    labels: &'a [u8],
    epochs: usize,
    batch_size: usize,
    per_epoch: usize,
    epoch: usize,
    batch: usize,
    epoch_error: f64,
    epoch_examples: usize,
    report: TrainReport,
}

impl<'a> TrainingSession<'a> {
    /// `epochs × ceil(samples / batch_size)`.
    pub fn total_units(&self) -> usize {
        self.report.total_batches
    }

    pub fn completed_units(&self) -> usize {
        self.report.completed_batches
    }

    pub fn is_finished(&self) -> bool {
        self.epoch >= self.epochs || self.per_epoch == 0
    }

    /// Trains on the next batch. Returns `None` once every epoch is done.
    pub fn step(&mut self, network: &mut Network) -> Result<Option<BatchProgress>> {
        if self.is_finished() {
            return Ok(None);
        }

        let n = self.labels.len();
        let start = self.batch * self.batch_size;
        let end = (start + self.batch_size).min(n);

        for (image, &label) in self.images[start..end].iter().zip(&self.labels[start..end]) {
            self.epoch_error += network.train(image, label as usize)?;
        }
        self.epoch_examples += end - start;
        self.report.examples_seen += end - start;
        self.report.completed_batches += 1;
        self.batch += 1;

        let progress = BatchProgress {
            epoch: self.epoch + 1,
            total_epochs: self.epochs,
            batch: self.batch,
            completed: self.report.completed_batches,
            total: self.report.total_batches,
            running_error: self.epoch_error / self.epoch_examples as f64,
        };
        debug!(
            epoch = progress.epoch,
            batch = progress.batch,
            error = progress.running_error,
            "batch done"
        );

        if self.batch == self.per_epoch {
            let mean = self.epoch_error / self.epoch_examples as f64;
            info!(epoch = self.epoch + 1, epochs = self.epochs, error = mean, "epoch done");
            self.report.epoch_errors.push(mean);
            self.epoch += 1;
            self.batch = 0;
            self.epoch_error = 0.0;
            self.epoch_examples = 0;
        }

        Ok(Some(progress))
    }

    pub fn into_report(self, cancelled: bool) -> TrainReport {
        TrainReport { cancelled, ..self.report }
    }
}
