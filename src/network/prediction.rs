use serde::Serialize;

/// Both layers' activations for one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activations {
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}

/// The winning class and how confident the network is about it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub digit: usize,
    pub confidence: f64,
}

impl Prediction {
    /// Argmax over the output confidences; first index wins ties.
    pub fn from_outputs(outputs: &[f64]) -> Option<Prediction> {
        let (digit, &confidence) = outputs
            .iter()
            .enumerate()
            .fold(None::<(usize, &f64)>, |best, (i, p)| match best {
                Some((_, b)) if b >= p => best,
                _ => Some((i, p)),
            })?;
        Some(Prediction { digit, confidence })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_highest_confidence() {
        let p = Prediction::from_outputs(&[0.1, 0.7, 0.3]).unwrap();
        assert_eq!(p.digit, 1);
        assert_eq!(p.confidence, 0.7);
    }

    #[test]
    fn ties_keep_first() {
        assert_eq!(Prediction::from_outputs(&[0.4, 0.4]).unwrap().digit, 0);
    }

    #[test]
    fn empty_outputs_have_no_prediction() {
        assert!(Prediction::from_outputs(&[]).is_none());
    }
}
