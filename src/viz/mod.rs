pub mod history;
pub mod insight;

pub use history::PredictionHistory;
pub use insight::{ConfidenceBand, Connection, Insight};
