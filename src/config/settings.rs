use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NeuroError, Result};

/// Shape and update rule of the digit classifier.
///
/// Fields:
/// - `input_size`            — flattened image length (grid_size²)
/// - `hidden_size`           — neurons in the single hidden layer
/// - `output_size`           — one output per digit class
/// - `learning_rate`         — fixed scalar applied to every update
/// - `seed`                  — seeds He initialization so runs are reproducible
/// - `empty_input_threshold` — `forward` returns zeros when every pixel is below it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
    pub seed: u64,
    pub empty_input_threshold: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_size: 784,
            hidden_size: 28,
            output_size: 10,
            learning_rate: 0.1,
            seed: 42,
            empty_input_threshold: 0.1,
        }
    }
}

/// Epoch and batch counts for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub batch_size: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig { epochs: 5, batch_size: 32 }
    }
}

/// Tunables for turning canvas strokes into a network input.
///
/// `brush_width` is measured in grid cells, not canvas pixels. Three cells
/// approximates the pen thickness of the handwritten source images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub canvas_size: f64,
    pub grid_size: u32,
    pub brush_width: f64,
    pub blur_sigma: f32,
    pub noise_threshold: f64,
    pub min_total_intensity: f64,
    /// Pointer jumps longer than this (canvas pixels) are filled in.
    pub interpolation_step: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            canvas_size: 280.0,
            grid_size: 28,
            brush_width: 3.0,
            blur_sigma: 0.5,
            noise_threshold: 0.15,
            min_total_intensity: 1.0,
            interpolation_step: 5.0,
        }
    }
}

impl CanvasConfig {
    pub fn scale(&self) -> f64 {
        self.grid_size as f64 / self.canvas_size
    }

    pub fn cells(&self) -> usize {
        (self.grid_size * self.grid_size) as usize
    }
}

/// Thresholds used when picking what the visualizer highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub top_hidden: usize,
    pub active_input_threshold: f64,
    pub significant_output: f64,
    pub max_history_size: usize,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        VisualizationConfig {
            top_hidden: 5,
            active_input_threshold: 0.5,
            significant_output: 0.1,
            max_history_size: 1000,
        }
    }
}

/// Every tunable of the core in one place. Components receive the section
/// they need; nothing reads global constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub network: NetworkConfig,
    pub training: TrainingConfig,
    pub canvas: CanvasConfig,
    pub visualization: VisualizationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            network: NetworkConfig::default(),
            training: TrainingConfig::default(),
            canvas: CanvasConfig::default(),
            visualization: VisualizationConfig::default(),
        }
    }
}

impl Config {
    /// Checks the cross-section invariants the core relies on.
    pub fn validate(&self) -> Result<()> {
        let net = &self.network;
        if net.input_size == 0 || net.hidden_size == 0 || net.output_size == 0 {
            return Err(NeuroError::Config("layer sizes must be non-zero".into()));
        }
        if self.training.batch_size == 0 {
            return Err(NeuroError::Config("batch_size must be at least 1".into()));
        }
        if !(self.canvas.canvas_size > 0.0) {
            return Err(NeuroError::Config(format!(
                "canvas_size must be positive, got {}",
                self.canvas.canvas_size
            )));
        }
        if self.canvas.cells() != net.input_size {
            return Err(NeuroError::Config(format!(
                "grid_size {}² does not match network input_size {}",
                self.canvas.grid_size, net.input_size
            )));
        }
        Ok(())
    }

    /// Serializes the configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|source| NeuroError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a configuration written by `save_json`. Missing sections and
    /// fields take their defaults.
    pub fn load_json(path: &Path) -> Result<Config> {
        let file = std::fs::File::open(path).map_err(|source| NeuroError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
