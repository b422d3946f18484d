pub mod driver;
pub mod evaluate;
pub mod progress;

pub use driver::{TrainingDriver, TrainingSession};
pub use evaluate::{evaluate, Evaluation};
pub use progress::{BatchProgress, TrainReport};
