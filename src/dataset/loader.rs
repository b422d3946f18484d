use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{imageops, imageops::FilterType, GrayImage, Luma};
use tracing::{info, warn};

use crate::dataset::idx::{parse_images, parse_labels};
use crate::error::{NeuroError, Result};

pub const NUM_CLASSES: usize = 10;

pub const TESTING_DIR: &str = "testing";
pub const TRAINING_DIR: &str = "training";
pub const TEST_IMAGES: &str = "t10k-images.idx3-ubyte";
pub const TEST_LABELS: &str = "t10k-labels.idx1-ubyte";
pub const TRAIN_IMAGES: &str = "train-images.idx3-ubyte";
pub const TRAIN_LABELS: &str = "train-labels.idx1-ubyte";

/// Parallel images and labels of one split. Cloning shares the data.
#[derive(Debug, Clone)]
pub struct Split {
    pub images: Arc<Vec<Vec<f64>>>,
    pub labels: Arc<Vec<u8>>,
    pub rows: usize,
    pub cols: usize,
}

impl Split {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// True when both splits point at the very same buffers.
    pub fn shares_data_with(&self, other: &Split) -> bool {
        Arc::ptr_eq(&self.images, &other.images) && Arc::ptr_eq(&self.labels, &other.labels)
    }
}

/// Recorded when the training split could not be used and the test split
/// stands in for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingFallback {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub train: Split,
    pub test: Split,
    /// Index into `train` of the first image carrying each label.
    pub examples: [usize; NUM_CLASSES],
    pub fallback: Option<TrainingFallback>,
}

impl Dataset {
    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// The canonical exemplar for `digit`.
    pub fn example(&self, digit: usize) -> Option<&[f64]> {
        let idx = *self.examples.get(digit)?;
        self.train.images.get(idx).map(Vec::as_slice)
    }

    /// Renders the exemplar for `digit` as a `size × size` grayscale preview.
    pub fn example_image(&self, digit: usize, size: u32) -> Option<GrayImage> {
        let pixels = self.example(digit)?;
        let (w, h) = (self.train.cols as u32, self.train.rows as u32);
        let native = GrayImage::from_fn(w, h, |x, y| {
            let v = pixels[(y * w + x) as usize];
            Luma([(v * 255.0).round().clamp(0.0, 255.0) as u8])
        });
        Some(imageops::resize(&native, size, size, FilterType::Triangle))
    }
}

/// Reads the testing and training splits from a data directory laid out as
/// `<dir>/testing/*` (required) and `<dir>/training/*` (optional).
pub struct Loader;

impl Loader {
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Dataset> {
        let data_dir = data_dir.as_ref();
        let testing = data_dir.join(TESTING_DIR);
        let test = read_split(&testing.join(TEST_IMAGES), &testing.join(TEST_LABELS), "testing")?;
        info!(samples = test.len(), rows = test.rows, cols = test.cols, "loaded testing split");

        let training = data_dir.join(TRAINING_DIR);
        let (train, fallback) =
            match read_split(&training.join(TRAIN_IMAGES), &training.join(TRAIN_LABELS), "training") {
                Ok(train) => {
                    info!(samples = train.len(), "loaded training split");
                    (train, None)
                }
                Err(err) => {
                    warn!(error = %err, "training split unavailable, training on the testing split");
                    let fallback = TrainingFallback {
                        path: training,
                        reason: err.to_string(),
                    };
                    (test.clone(), Some(fallback))
                }
            };

        let examples = first_example_per_label(&train.labels)?;
        Ok(Dataset { train, test, examples, fallback })
    }
}

/// Scans labels top to bottom and keeps the first index of each class.
pub fn first_example_per_label(labels: &[u8]) -> Result<[usize; NUM_CLASSES]> {
    let mut found: [Option<usize>; NUM_CLASSES] = [None; NUM_CLASSES];
    for (idx, &label) in labels.iter().enumerate() {
        let slot = &mut found[label as usize];
        if slot.is_none() {
            *slot = Some(idx);
        }
    }

    let mut examples = [0; NUM_CLASSES];
    for (digit, slot) in found.iter().enumerate() {
        examples[digit] = slot.ok_or(NeuroError::MissingLabel(digit as u8))?;
    }
    Ok(examples)
}

fn read_split(images_path: &Path, labels_path: &Path, split: &'static str) -> Result<Split> {
    let image_bytes = read_file(images_path, split)?;
    let label_bytes = read_file(labels_path, split)?;

    let images = parse_images(&image_bytes, &images_path.display().to_string())?;
    let labels = parse_labels(&label_bytes, &labels_path.display().to_string(), NUM_CLASSES)?;

    if images.images.len() != labels.len() {
        return Err(NeuroError::malformed(
            labels_path.display().to_string(),
            format!(
                "{} labels for {} images",
                labels.len(),
                images.images.len()
            ),
        ));
    }

    Ok(Split {
        images: Arc::new(images.images),
        labels: Arc::new(labels),
        rows: images.rows,
        cols: images.cols,
    })
}

fn read_file(path: &Path, split: &'static str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            NeuroError::MissingSplit { split, path: path.to_path_buf() }
        } else {
            NeuroError::Io { path: path.to_path_buf(), source }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let labels = [3, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0];
        let examples = first_example_per_label(&labels).unwrap();
        assert_eq!(examples[0], 1);
        assert_eq!(examples[3], 0);
        assert_eq!(examples[9], 10);
    }

    #[test]
    fn missing_digit_is_fatal() {
        let labels = [0, 1, 2, 3, 4, 5, 6, 8, 9];
        assert!(matches!(
            first_example_per_label(&labels),
            Err(NeuroError::MissingLabel(7))
        ));
    }

    #[test]
    fn absent_directory_reports_missing_testing_split() {
        let dir = tempfile::tempdir().unwrap();
        let err = Loader::load(dir.path()).unwrap_err();
        assert!(matches!(err, NeuroError::MissingSplit { split: "testing", .. }), "{}", err);
        assert!(err.is_fatal_load());
    }
}
