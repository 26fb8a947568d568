//! Genesis investor population.
//!
//! One human seat plus a fund per name in [`FUND_NAMES`]. Every fund starts
//! on the linear topology with a random slice of the neuron pool; a dozen
//! are then rebuilt around a tanh hidden layer, learning-rate tiers are
//! dealt out, and a single fund is rebuilt once more into the deep stack.
//! Only the relative order of these passes matters; each one draws from the
//! shared stream, so the whole population is a pure function of the seed.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;

use types::{
    Cash, HUMAN_INVESTOR_ID, Investor, NetworkWeights, PortfolioValuePoint, SimDay, Strategy,
};

use crate::universe::{FUND_NAMES, NEURON_POOL};

/// Hidden-layer width shared by the upgraded topologies.
const HIDDEN_LAYER_SIZE: usize = 5;
/// Funds rebuilt onto the one-hidden-layer topology (12 of 49).
const ADVANCED_FUND_COUNT: usize = 12;
/// Extra input neurons wired in during the multi-layer rebuild.
const ADVANCED_EXTRA_NEURONS: usize = 10;
/// Extra input neurons wired in for the deep fund.
const DEEP_EXTRA_NEURONS: usize = 25;
/// Hidden layers in the deep topology.
const DEEP_HIDDEN_LAYERS: usize = 7;

/// Build the full investor roster: the human seat first, then every fund.
pub fn build_investors<R: Rng>(rng: &mut R, initial_cash: Cash, day: SimDay) -> Vec<Investor> {
    let mut investors = Vec::with_capacity(FUND_NAMES.len() + 1);

    investors.push(investor_shell(
        HUMAN_INVESTOR_ID.to_string(),
        "You".to_string(),
        true,
        None,
        Strategy::Simple {
            price_momentum_weight: 0.0,
            volatility_weight: 0.0,
            risk_aversion: 999.0,
        },
        initial_cash,
        day,
    ));
    for (index, name) in FUND_NAMES.iter().enumerate() {
        investors.push(neural_fund(rng, index + 1, name, initial_cash, day));
    }

    // Rebuild a random dozen onto the hidden-layer topology.
    let mut order: Vec<usize> = (1..investors.len()).collect();
    order.shuffle(rng);
    for &idx in order.iter().take(ADVANCED_FUND_COUNT) {
        upgrade_to_multi_layer(&mut investors[idx], rng);
    }

    // Re-deal for learning-rate tiers; the 19th card is the deep fund.
    order.shuffle(rng);
    for (rank, &idx) in order.iter().enumerate() {
        let factor = match rank {
            0..=9 => 1.2,
            10..=14 => 1.4,
            15..=17 => 1.6,
            _ => continue,
        };
        if let Strategy::NeuralNet { learning_rate, .. } = &mut investors[idx].strategy {
            *learning_rate *= factor;
        }
    }
    if let Some(&idx) = order.get(18) {
        upgrade_to_deep_layer(&mut investors[idx], rng);
    }

    investors
}

fn investor_shell(
    id: String,
    name: String,
    human: bool,
    strategy_name: Option<String>,
    strategy: Strategy,
    cash: Cash,
    day: SimDay,
) -> Investor {
    Investor {
        id,
        name,
        human,
        strategy_name,
        strategy,
        cash,
        portfolio: Vec::new(),
        portfolio_history: vec![PortfolioValuePoint { day, value: cash }],
        tax_loss_carryforward: Cash::ZERO,
        total_taxes_paid: Cash::ZERO,
        wa_annual_net_ltcg: Cash::ZERO,
        recent_trades: Vec::new(),
    }
}

/// A fresh fund on the linear topology.
fn neural_fund<R: Rng>(
    rng: &mut R,
    index: usize,
    name: &str,
    initial_cash: Cash,
    day: SimDay,
) -> Investor {
    let min_neurons = 3 + rng.random_range(0..5);
    let max_neurons = min_neurons + 5 + rng.random_range(0..10);
    let count = rng.random_range(min_neurons..=max_neurons);

    let mut pool: Vec<&str> = NEURON_POOL.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);

    let weights: BTreeMap<String, f64> = pool
        .iter()
        .map(|neuron| (neuron.to_string(), rng.random_range(-1.5..1.5)))
        .collect();

    let strategy = Strategy::NeuralNet {
        network: NetworkWeights::SingleLayer {
            weights: weights.clone(),
        },
        risk_aversion: rng.random_range(0.8..2.5),
        // Carried for future pacing control; the settlement loop does not
        // read it yet.
        trade_frequency: rng.random_range(0.1..0.5),
        learning_rate: rng.random_range(0.005..0.02),
    };

    investor_shell(
        format!("investor-{index}"),
        name.to_string(),
        false,
        Some(strategy_label(&weights)),
        strategy,
        initial_cash,
        day,
    )
}

/// Rebuild a linear fund around one tanh hidden layer, widening its inputs.
fn upgrade_to_multi_layer<R: Rng>(investor: &mut Investor, rng: &mut R) {
    let Strategy::NeuralNet { network, .. } = &mut investor.strategy else {
        return;
    };
    let NetworkWeights::SingleLayer { weights } = &*network else {
        return;
    };

    let current: Vec<String> = weights.keys().cloned().collect();
    let mut extras: Vec<&str> = NEURON_POOL
        .iter()
        .copied()
        .filter(|neuron| !weights.contains_key(*neuron))
        .collect();
    extras.shuffle(rng);
    extras.truncate(ADVANCED_EXTRA_NEURONS);

    let mut input_weights = BTreeMap::new();
    for neuron in current.iter().map(String::as_str).chain(extras.iter().copied()) {
        let row: Vec<f64> = (0..HIDDEN_LAYER_SIZE)
            .map(|_| rng.random_range(-0.5..0.5))
            .collect();
        input_weights.insert(neuron.to_string(), row);
    }
    let output_weights: Vec<f64> = (0..HIDDEN_LAYER_SIZE)
        .map(|_| rng.random_range(-1.0..1.0))
        .collect();

    *network = NetworkWeights::MultiLayer {
        input_weights,
        output_weights,
        hidden_size: HIDDEN_LAYER_SIZE,
    };
    investor.strategy_name = investor
        .strategy_name
        .take()
        .map(|label| format!("Advanced {label}"));
}

/// Rebuild one fund into the deep stack: widened inputs, seven tanh layers,
/// linear readout.
fn upgrade_to_deep_layer<R: Rng>(investor: &mut Investor, rng: &mut R) {
    let Strategy::NeuralNet { network, .. } = &mut investor.strategy else {
        return;
    };

    let current: Vec<String> = network
        .neuron_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut extras: Vec<&str> = NEURON_POOL
        .iter()
        .copied()
        .filter(|neuron| !current.iter().any(|c| c == neuron))
        .collect();
    extras.shuffle(rng);
    extras.truncate(DEEP_EXTRA_NEURONS);

    let input_names: Vec<String> = current
        .into_iter()
        .chain(extras.iter().map(|s| s.to_string()))
        .collect();

    let mut layer_sizes = vec![input_names.len()];
    layer_sizes.extend(std::iter::repeat_n(HIDDEN_LAYER_SIZE, DEEP_HIDDEN_LAYERS));
    layer_sizes.push(1);

    let mut input_weights = BTreeMap::new();
    for neuron in &input_names {
        let row: Vec<f64> = (0..layer_sizes[1])
            .map(|_| rng.random_range(-0.5..0.5))
            .collect();
        input_weights.insert(neuron.clone(), row);
    }

    let hidden_weights: Vec<Vec<Vec<f64>>> = (1..layer_sizes.len() - 1)
        .map(|layer| {
            (0..layer_sizes[layer])
                .map(|_| {
                    (0..layer_sizes[layer + 1])
                        .map(|_| rng.random_range(-0.5..0.5))
                        .collect()
                })
                .collect()
        })
        .collect();

    *network = NetworkWeights::DeepLayer {
        input_names,
        input_weights,
        hidden_weights,
        layer_sizes,
    };
    investor.strategy_name = investor
        .strategy_name
        .take()
        .map(|label| format!("Super AI: {label}"));
}

/// Derive a display name from the dominant input weights.
fn strategy_label(weights: &BTreeMap<String, f64>) -> String {
    let mut ranked: Vec<(&str, f64)> = weights
        .iter()
        .map(|(neuron, weight)| (neuron.as_str(), weight.abs()))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let Some(&(primary, _)) = ranked.first() else {
        return "Passive".to_string();
    };
    let primary_name = prefix_label(primary).unwrap_or("Complex");

    let Some(&(secondary, _)) = ranked.get(1) else {
        return format!("{primary_name} Focused");
    };
    let secondary_name = prefix_label(secondary).unwrap_or("Strategy");

    if primary_name == secondary_name {
        format!("{primary_name} Specialist")
    } else {
        format!("{primary_name}-{secondary_name} Hybrid")
    }
}

fn prefix_label(neuron: &str) -> Option<&'static str> {
    match neuron.split('_').next()? {
        "momentum" => Some("Momentum"),
        "trend" => Some("Trend"),
        "oscillator" => Some("Contrarian"),
        "volatility" => Some("Volatility"),
        "volume" => Some("Volume"),
        "macd" => Some("MACD"),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
