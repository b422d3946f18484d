use std::sync::Arc;

/// A pointer position in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One completed pointer-down-to-pointer-up drag.
///
/// Immutable once built; clones share the same point buffer, so snapshots
/// of a drawing cost one reference count per stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke(Arc<[Point]>);

impl Stroke {
    pub fn new(points: Vec<Point>) -> Stroke {
        Stroke(points.into())
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shares_points_with(&self, other: &Stroke) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Stroke::new(points)
    }
}

/// Input to the drawing reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Clear,
    /// Replaces the completed strokes, e.g. with an undo/redo snapshot.
    Restore(Vec<Stroke>),
}

/// Completed strokes plus the stroke currently being dragged, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingState {
    strokes: Vec<Stroke>,
    in_progress: Option<Vec<Point>>,
    last_pointer: Option<Point>,
}

impl DrawingState {
    pub fn new() -> DrawingState {
        DrawingState::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn in_progress(&self) -> Option<&[Point]> {
        self.in_progress.as_deref()
    }

    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty() && self.in_progress.as_ref().map_or(true, Vec::is_empty)
    }

    /// Applies one event and returns the next state.
    ///
    /// A pointer move that jumps further than `interpolation_step` canvas
    /// pixels is filled with `distance / step` evenly spaced points, each
    /// truncated to whole pixels, so fast drags stay connected.
    pub fn apply(mut self, event: DrawEvent, interpolation_step: f64) -> DrawingState {
        match event {
            DrawEvent::PointerDown(p) => {
                self.in_progress = Some(vec![p]);
                self.last_pointer = Some(p);
            }
            DrawEvent::PointerMove(p) => {
                if let (Some(points), Some(last)) = (self.in_progress.as_mut(), self.last_pointer) {
                    let distance = last.distance(&p);
                    if interpolation_step > 0.0 && distance > interpolation_step {
                        let steps = (distance / interpolation_step) as usize;
                        let (dx, dy) = (p.x - last.x, p.y - last.y);
                        for i in 1..=steps {
                            let t = i as f64 / steps as f64;
                            points.push(Point::new(
                                (last.x + dx * t).trunc(),
                                (last.y + dy * t).trunc(),
                            ));
                        }
                    } else {
                        points.push(p);
                    }
                    self.last_pointer = Some(p);
                }
            }
            DrawEvent::PointerUp => {
                if let Some(points) = self.in_progress.take() {
                    if !points.is_empty() {
                        self.strokes.push(Stroke::new(points));
                    }
                }
                self.last_pointer = None;
            }
            DrawEvent::Clear => return DrawingState::default(),
            DrawEvent::Restore(strokes) => {
                self.strokes = strokes;
            }
        }
        self
    }
}
