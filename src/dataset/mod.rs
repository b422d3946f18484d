pub mod idx;
pub mod loader;

pub use loader::{Dataset, Loader, Split, TrainingFallback};
