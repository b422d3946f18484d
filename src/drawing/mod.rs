pub mod canvas;
pub mod history;
pub mod normalizer;
pub mod stroke;

pub use canvas::{Canvas, CanvasEvent};
pub use history::History;
pub use normalizer::{normalize, ImageTensor, Normalizer};
pub use stroke::{DrawEvent, DrawingState, Point, Stroke};
