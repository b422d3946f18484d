pub mod error;
pub mod config;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod network;
pub mod dataset;
pub mod drawing;
pub mod train;
pub mod viz;

// Convenience re-exports
pub use error::{NeuroError, Result};
pub use config::{CanvasConfig, Config, NetworkConfig, TrainingConfig, VisualizationConfig};
pub use math::matrix::Matrix;
pub use network::{Activations, Network, Prediction};
pub use dataset::{Dataset, Loader, Split, TrainingFallback};
pub use drawing::{normalize, Canvas, CanvasEvent, History, ImageTensor, Normalizer, Point, Stroke};
pub use train::{evaluate, BatchProgress, Evaluation, TrainReport, TrainingDriver, TrainingSession};
pub use viz::{ConfidenceBand, Insight, PredictionHistory};
