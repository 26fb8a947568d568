//! Neural network weight structures for investor strategies.
//!
//! Three topologies of increasing depth share one tagged representation.
//! Weight maps are keyed by indicator feature name; a name the indicator
//! engine never produced simply contributes zero during evaluation, so
//! networks may hold weights for features that do not exist yet.
//!
//! All maps are `BTreeMap` so that iteration order, and therefore every
//! forward pass and weight update, is deterministic for identical inputs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weights for one investor network, tagged by topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", rename_all = "kebab-case")]
pub enum NetworkWeights {
    /// Linear scoring over named features.
    SingleLayer { weights: BTreeMap<String, f64> },

    /// One tanh hidden layer: named inputs fan out to `hidden_size` units,
    /// whose outputs combine linearly into the score.
    MultiLayer {
        /// Per-feature fan-out weights; each row has `hidden_size` entries.
        input_weights: BTreeMap<String, Vec<f64>>,
        /// Hidden-to-score weights, one per hidden unit.
        output_weights: Vec<f64>,
        hidden_size: usize,
    },

    /// Several tanh hidden layers with a linear scalar output.
    DeepLayer {
        /// Feature names feeding the first layer, in registration order.
        input_names: Vec<String>,
        /// Named first-layer rows; each row spans the first hidden layer.
        input_weights: BTreeMap<String, Vec<f64>>,
        /// Dense matrices between consecutive layers. `hidden_weights[l][i][j]`
        /// connects unit `i` of layer `l+1` to unit `j` of layer `l+2`; the
        /// final matrix reduces to the single output column.
        hidden_weights: Vec<Vec<Vec<f64>>>,
        /// Layer widths from input count through hidden layers to the
        /// single output.
        layer_sizes: Vec<usize>,
    },
}

impl NetworkWeights {
    /// The feature names this network reads.
    pub fn neuron_names(&self) -> Vec<&str> {
        match self {
            NetworkWeights::SingleLayer { weights } => {
                weights.keys().map(String::as_str).collect()
            }
            NetworkWeights::MultiLayer { input_weights, .. } => {
                input_weights.keys().map(String::as_str).collect()
            }
            NetworkWeights::DeepLayer { input_names, .. } => {
                input_names.iter().map(String::as_str).collect()
            }
        }
    }
}

/// Forward-pass evidence recorded alongside a trade.
///
/// The learning pass replays these exact activations when the trade's
/// outcome comes due, rather than recomputing them against drifted prices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivationTrace {
    /// Feature map the network saw at decision time.
    pub inputs: BTreeMap<String, f64>,
    /// Output of each hidden layer, first to last. Empty for single-layer
    /// networks.
    pub hidden: Vec<Vec<f64>>,
    /// Final score.
    pub score: f64,
}

impl ActivationTrace {
    /// Output of the last hidden layer, if the network had one.
    pub fn last_hidden(&self) -> Option<&[f64]> {
        self.hidden.last().map(Vec::as_slice)
    }
}
