use std::collections::VecDeque;

/// Per-class confidence trace, bounded so a long session does not grow
/// without limit. Oldest samples are dropped first.
#[derive(Debug, Clone)]
pub struct PredictionHistory {
    classes: Vec<VecDeque<f64>>,
    capacity: usize,
}

impl PredictionHistory {
    pub fn new(n_classes: usize, capacity: usize) -> PredictionHistory {
        PredictionHistory {
            classes: vec![VecDeque::with_capacity(capacity.min(1024)); n_classes],
            capacity,
        }
    }

    /// Appends one frame of outputs; extra values beyond the class count
    /// are ignored.
    pub fn record(&mut self, outputs: &[f64]) {
        for (trace, &p) in self.classes.iter_mut().zip(outputs) {
            trace.push_back(p);
            while trace.len() > self.capacity {
                trace.pop_front();
            }
        }
    }

    pub fn trace(&self, class: usize) -> Option<&VecDeque<f64>> {
        self.classes.get(class)
    }

    pub fn len(&self) -> usize {
        self.classes.first().map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.classes.iter_mut().for_each(VecDeque::clear);
    }
}
