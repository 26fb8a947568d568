//! Neural forward pass: feature map in, trade score out.
//!
//! Three topologies share one entry point, [`forward`]. Every call also
//! returns the [`ActivationTrace`] recorded at decision time; the learning
//! pass replays that exact snapshot later, never a recomputation.
//!
//! Features missing from the map contribute zero. Hidden layers use `tanh`;
//! the deep topology's final layer is linear.

use std::collections::BTreeMap;

use types::{ActivationTrace, NetworkWeights};

/// A scored decision plus the activation snapshot that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub trace: ActivationTrace,
}

/// Run one forward pass of `network` over `features`.
///
/// Pure: identical inputs give bit-identical scores.
pub fn forward(network: &NetworkWeights, features: &BTreeMap<String, f64>) -> Evaluation {
    match network {
        NetworkWeights::SingleLayer { weights } => {
            let mut score = 0.0;
            for (neuron, weight) in weights {
                if let Some(value) = features.get(neuron) {
                    score += value * weight;
                }
            }
            Evaluation {
                score,
                trace: ActivationTrace {
                    inputs: features.clone(),
                    hidden: Vec::new(),
                    score,
                },
            }
        }

        NetworkWeights::MultiLayer {
            input_weights,
            output_weights,
            hidden_size,
        } => {
            let mut hidden = vec![0.0; *hidden_size];
            for (i, activation) in hidden.iter_mut().enumerate() {
                let mut sum = 0.0;
                for (neuron, row) in input_weights {
                    let value = features.get(neuron).copied().unwrap_or(0.0);
                    sum += value * row[i];
                }
                *activation = sum.tanh();
            }
            let score = hidden
                .iter()
                .zip(output_weights)
                .map(|(activation, weight)| activation * weight)
                .sum();
            Evaluation {
                score,
                trace: ActivationTrace {
                    inputs: features.clone(),
                    hidden: vec![hidden],
                    score,
                },
            }
        }

        NetworkWeights::DeepLayer {
            input_names,
            input_weights,
            hidden_weights,
            layer_sizes,
        } => {
            let mut layers: Vec<Vec<f64>> = Vec::with_capacity(layer_sizes.len());

            // Input layer: named features into the first hidden layer.
            let first_size = layer_sizes.get(1).copied().unwrap_or(0);
            let mut current = vec![0.0; first_size];
            for (j, activation) in current.iter_mut().enumerate() {
                let mut sum = 0.0;
                for neuron in input_names {
                    if let Some(row) = input_weights.get(neuron) {
                        let value = features.get(neuron).copied().unwrap_or(0.0);
                        sum += value * row[j];
                    }
                }
                *activation = sum.tanh();
            }
            layers.push(current.clone());

            // Dense hidden layers: every matrix but the last, tanh-activated.
            let dense = hidden_weights.len().saturating_sub(1);
            for matrix in &hidden_weights[..dense] {
                let next_size = matrix.first().map(Vec::len).unwrap_or(0);
                let mut next = vec![0.0; next_size];
                for (j, activation) in next.iter_mut().enumerate() {
                    let sum: f64 = current
                        .iter()
                        .zip(matrix)
                        .map(|(value, row)| value * row[j])
                        .sum();
                    *activation = sum.tanh();
                }
                layers.push(next.clone());
                current = next;
            }

            // Output layer: a single linear column.
            let score = match hidden_weights.last() {
                Some(output) => current
                    .iter()
                    .zip(output)
                    .map(|(value, row)| value * row[0])
                    .sum(),
                None => 0.0,
            };

            Evaluation {
                score,
                trace: ActivationTrace {
                    inputs: features.clone(),
                    hidden: layers,
                    score,
                },
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
