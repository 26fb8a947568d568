//! Delayed-outcome learning: score past trades, nudge the weights.
//!
//! Each trade carries the activation snapshot recorded when it was placed
//! and a fixed evaluation day five days out. Once that day's bar exists,
//! the realized return is compared against a flat 1% expectation and the
//! signed error drives one gradient-style step.
//!
//! The update rules are deliberate heuristics, not textbook
//! backpropagation. The multi-layer rule computes its hidden error against
//! the already-updated output weights, and the deep rule touches only the
//! input and output layers with a flat per-neuron share of the error.
//! Both behaviors are part of the model.

use types::{Investor, NetworkWeights, RecentTrade, Stock, Strategy, TradeSide};

/// Return every trade is graded against: a modest 1% move in the trade's
/// favor.
pub const EXPECTED_RETURN: f64 = 0.01;

/// Signed learning error for a trade that realized `actual_return`.
///
/// Positive means the trade aged well: a buy beat the expectation, or the
/// stock dropped after a sell.
#[inline]
pub fn trade_error(side: TradeSide, actual_return: f64) -> f64 {
    match side {
        TradeSide::Buy => actual_return - EXPECTED_RETURN,
        TradeSide::Sell => -EXPECTED_RETURN - actual_return,
    }
}

/// Evaluate and discard every due trade, applying one weight update per
/// trade. Trades not yet due stay queued, in order.
///
/// A trade is due once the latest bar's day has reached its outcome day.
/// Trades on unknown symbols or without an activation snapshot are
/// discarded without an update.
pub fn evaluate_due_trades(investor: &mut Investor, stocks: &[Stock]) {
    let Some(last_day) = stocks.first().and_then(Stock::last_bar_day) else {
        return;
    };

    let pending = std::mem::take(&mut investor.recent_trades);
    let (due, waiting): (Vec<_>, Vec<_>) = pending
        .into_iter()
        .partition(|trade| trade.outcome_day <= last_day);
    investor.recent_trades = waiting;

    if due.is_empty() {
        return;
    }
    let Strategy::NeuralNet {
        network,
        learning_rate,
        ..
    } = &mut investor.strategy
    else {
        return;
    };
    let learning_rate = *learning_rate;

    for trade in &due {
        let Some(stock) = stocks.iter().find(|s| s.symbol == trade.symbol) else {
            continue;
        };
        let Some(current) = stock.last_close() else {
            continue;
        };
        let actual_return = current.to_float() / trade.price.to_float() - 1.0;
        let error = trade_error(trade.side, actual_return);
        apply_update(network, learning_rate, error, trade);
    }
}

/// One heuristic gradient step for a single evaluated trade.
fn apply_update(network: &mut NetworkWeights, learning_rate: f64, error: f64, trade: &RecentTrade) {
    let Some(trace) = &trade.activations else {
        return;
    };

    match network {
        NetworkWeights::SingleLayer { weights } => {
            for (neuron, weight) in weights.iter_mut() {
                let input = trace.inputs.get(neuron).copied().unwrap_or(0.0);
                *weight += learning_rate * error * input;
            }
        }

        NetworkWeights::MultiLayer {
            input_weights,
            output_weights,
            ..
        } => {
            let Some(hidden) = trace.hidden.first() else {
                return;
            };

            // Output weights move first; the hidden error below reads the
            // updated values.
            for (weight, activation) in output_weights.iter_mut().zip(hidden) {
                *weight += learning_rate * error * activation;
            }

            for (i, activation) in hidden.iter().enumerate() {
                let derivative = 1.0 - activation * activation;
                let hidden_error = error * output_weights[i] * derivative;
                for (neuron, row) in input_weights.iter_mut() {
                    let input = trace.inputs.get(neuron).copied().unwrap_or(0.0);
                    row[i] += learning_rate * hidden_error * input;
                }
            }
        }

        NetworkWeights::DeepLayer {
            input_names,
            input_weights,
            hidden_weights,
            ..
        } => {
            let Some(last_hidden) = trace.last_hidden() else {
                return;
            };
            let Some(output) = hidden_weights.last_mut() else {
                return;
            };

            for (row, activation) in output.iter_mut().zip(last_hidden) {
                row[0] += learning_rate * error * activation;
            }

            // The interior layers never move; the input layer takes a flat
            // per-neuron share of the raw error.
            let shared_error = error / last_hidden.len() as f64;
            for neuron in input_names.iter() {
                let input = trace.inputs.get(neuron).copied().unwrap_or(0.0);
                if let Some(row) = input_weights.get_mut(neuron) {
                    for weight in row.iter_mut() {
                        *weight += learning_rate * shared_error * input;
                    }
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
