pub mod settings;

pub use settings::{CanvasConfig, Config, NetworkConfig, TrainingConfig, VisualizationConfig};
