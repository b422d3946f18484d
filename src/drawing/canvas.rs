use crate::config::CanvasConfig;
use crate::drawing::history::History;
use crate::drawing::normalizer::{ImageTensor, Normalizer};
use crate::drawing::stroke::{DrawEvent, DrawingState, Point};

/// Input coming from the UI's pointer and toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Clear,
    Undo,
    Redo,
}

/// Thin adapter between a serialized UI event stream and the pure drawing
/// core: it feeds the reducer, records history on stroke completion, and
/// hands back a fresh tensor whenever the drawing visibly changed.
#[derive(Debug, Clone)]
pub struct Canvas {
    state: DrawingState,
    history: History,
    normalizer: Normalizer,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Canvas {
        Canvas {
            state: DrawingState::new(),
            history: History::new(),
            normalizer: Normalizer::new(config),
        }
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn normalized(&self) -> ImageTensor {
        self.normalizer.normalize(self.state.strokes(), self.state.in_progress())
    }

    /// Applies one event. Returns the new tensor when the drawing changed
    /// in a way the classifier should see, `None` otherwise.
    pub fn handle(&mut self, event: CanvasEvent) -> Option<ImageTensor> {
        match event {
            CanvasEvent::PointerDown(p) => {
                self.reduce(DrawEvent::PointerDown(p));
                None
            }
            CanvasEvent::PointerMove(p) => {
                if !self.state.is_drawing() {
                    return None;
                }
                self.reduce(DrawEvent::PointerMove(p));
                Some(self.normalized())
            }
            CanvasEvent::PointerUp => {
                let before = self.state.strokes().len();
                self.reduce(DrawEvent::PointerUp);
                if self.state.strokes().len() == before {
                    return None;
                }
                self.history.add_state(self.state.strokes());
                Some(self.normalized())
            }
            CanvasEvent::Clear => {
                self.reduce(DrawEvent::Clear);
                self.history = History::new();
                Some(ImageTensor::zeros(self.normalizer.config().grid_size as usize))
            }
            CanvasEvent::Undo => {
                let strokes = self.history.undo()?.to_vec();
                self.reduce(DrawEvent::Restore(strokes));
                Some(self.normalized())
            }
            CanvasEvent::Redo => {
                let strokes = self.history.redo()?.to_vec();
                self.reduce(DrawEvent::Restore(strokes));
                Some(self.normalized())
            }
        }
    }

    fn reduce(&mut self, event: DrawEvent) {
        let step = self.normalizer.config().interpolation_step;
        self.state = std::mem::take(&mut self.state).apply(event, step);
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(CanvasConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_line(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) -> Option<ImageTensor> {
        canvas.handle(CanvasEvent::PointerDown(Point::new(from.0, from.1)));
        canvas.handle(CanvasEvent::PointerMove(Point::new(to.0, to.1)));
        canvas.handle(CanvasEvent::PointerUp)
    }

    #[test]
    fn completed_stroke_is_recorded_and_emitted() {
        let mut canvas = Canvas::default();
        let tensor = draw_line(&mut canvas, (140.0, 40.0), (140.0, 240.0)).unwrap();
        assert!(!tensor.is_blank());
        assert_eq!(canvas.history().len(), 1);
        assert!(canvas.can_undo());
    }

    #[test]
    fn pointer_down_alone_emits_nothing() {
        let mut canvas = Canvas::default();
        assert!(canvas.handle(CanvasEvent::PointerDown(Point::new(5.0, 5.0))).is_none());
    }

    #[test]
    fn stray_moves_and_releases_are_ignored() {
        let mut canvas = Canvas::default();
        assert!(canvas.handle(CanvasEvent::PointerMove(Point::new(5.0, 5.0))).is_none());
        assert!(canvas.handle(CanvasEvent::PointerUp).is_none());
        assert!(canvas.history().is_empty());
    }

    #[test]
    fn undo_and_redo_restore_drawings() {
        let mut canvas = Canvas::default();
        let first = draw_line(&mut canvas, (140.0, 40.0), (140.0, 240.0)).unwrap();
        draw_line(&mut canvas, (40.0, 140.0), (240.0, 140.0));

        let undone = canvas.handle(CanvasEvent::Undo).unwrap();
        assert_eq!(undone, first);
        assert_eq!(canvas.state().strokes().len(), 1);

        let blank = canvas.handle(CanvasEvent::Undo).unwrap();
        assert!(blank.is_blank());
        assert!(canvas.handle(CanvasEvent::Undo).is_none());

        canvas.handle(CanvasEvent::Redo);
        assert_eq!(canvas.state().strokes().len(), 1);
    }

    #[test]
    fn clear_resets_history() {
        let mut canvas = Canvas::default();
        draw_line(&mut canvas, (140.0, 40.0), (140.0, 240.0));
        let tensor = canvas.handle(CanvasEvent::Clear).unwrap();
        assert!(tensor.is_blank());
        assert!(!canvas.can_undo());
        assert!(canvas.state().is_blank());
    }
}
