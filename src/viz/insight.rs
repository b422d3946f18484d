use serde::Serialize;

use crate::config::VisualizationConfig;
use crate::error::Result;
use crate::network::network::Network;

/// Colour band the visualizer uses for an output confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    MediumHigh,
    MediumLow,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> ConfidenceBand {
        if confidence > 0.8 {
            ConfidenceBand::High
        } else if confidence > 0.5 {
            ConfidenceBand::MediumHigh
        } else if confidence > 0.3 {
            ConfidenceBand::MediumLow
        } else {
            ConfidenceBand::Low
        }
    }
}

/// One drawn edge: `from` in the source layer, `to` in the next, with the
/// signed weight that sets its colour and thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Everything the network panel needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub outputs: Vec<f64>,
    pub bands: Vec<ConfidenceBand>,
    pub hidden: Vec<f64>,
    /// Most active hidden neurons, strongest first.
    pub top_hidden: Vec<usize>,
    pub input_links: Vec<Connection>,
    pub output_links: Vec<Connection>,
}

impl Insight {
    /// Captures activations and the salient connections for `image`.
    ///
    /// Input links join every input above `active_input_threshold` to each
    /// top hidden neuron; output links join each top hidden neuron to every
    /// output above `significant_output`. A blank input yields zero outputs
    /// and no links.
    pub fn capture(network: &Network, image: &[f64], config: &VisualizationConfig) -> Result<Insight> {
        let Some(acts) = network.activations(image)? else {
            let outputs = vec![0.0; network.output_size()];
            return Ok(Insight {
                bands: outputs.iter().map(|&p| ConfidenceBand::of(p)).collect(),
                outputs,
                hidden: vec![0.0; network.hidden_size()],
                top_hidden: Vec::new(),
                input_links: Vec::new(),
                output_links: Vec::new(),
            });
        };

        let top_hidden = top_indices(&acts.hidden, config.top_hidden);

        let w1 = network.input_weights();
        let input_links = image
            .iter()
            .enumerate()
            .filter(|&(_, &px)| px > config.active_input_threshold)
            .flat_map(|(i, _)| {
                top_hidden.iter().map(move |&h| Connection { from: i, to: h, weight: w1.get(i, h) })
            })
            .collect();

        let w2 = network.output_weights();
        let output_links = top_hidden
            .iter()
            .flat_map(|&h| {
                acts.output
                    .iter()
                    .enumerate()
                    .filter(|&(_, &p)| p > config.significant_output)
                    .map(move |(o, _)| Connection { from: h, to: o, weight: w2.get(h, o) })
            })
            .collect();

        Ok(Insight {
            bands: acts.output.iter().map(|&p| ConfidenceBand::of(p)).collect(),
            outputs: acts.output,
            hidden: acts.hidden,
            top_hidden,
            input_links,
            output_links,
        })
    }
}

/// Indices of the `k` largest values, largest first; earlier index wins ties.
pub fn top_indices(values: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    order.truncate(k);
    order
}
