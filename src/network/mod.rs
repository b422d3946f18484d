pub mod network;
pub mod prediction;

pub use network::Network;
pub use prediction::{Activations, Prediction};
