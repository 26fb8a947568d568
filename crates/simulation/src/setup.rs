//! Genesis state: seeded price history, the investor roster, and the
//! scheduler counters, all drawn from one seeded stream.
//!
//! Seeding walks each stock through [`INITIAL_HISTORY_LENGTH`] daily bars so
//! that every indicator window is warm before the first live day. The walk
//! runs in float space and clamps at $0.01, the same floor live pricing uses.

use rand::Rng;

use types::{
    CorporateActionWeights, CorporateAi, INITIAL_HISTORY_LENGTH, IndexPoint, OhlcBar, Price,
    SECS_PER_DAY, Sector, SimDay, SimulationState, Stock, Timestamp,
};

use crate::config::SimulationConfig;
use crate::population;
use crate::universe::{CORPORATE_NEURONS, LISTINGS};

/// 2024-01-01T09:30:00Z, the instant seeded history begins.
const GENESIS_START: Timestamp = 1_704_101_400;

/// Wall clock at genesis: seeding start plus the seeded days.
pub const GENESIS_CLOCK: Timestamp =
    GENESIS_START + INITIAL_HISTORY_LENGTH as u64 * SECS_PER_DAY;

/// Build the full day-200 state from one seeded stream.
pub fn build_initial_state<R: Rng>(config: &SimulationConfig, rng: &mut R) -> SimulationState {
    let stocks: Vec<Stock> = LISTINGS
        .iter()
        .map(|&(symbol, name, sector)| seed_stock(rng, symbol, name, sector))
        .collect();

    let day = INITIAL_HISTORY_LENGTH as SimDay;
    let investors = population::build_investors(rng, config.initial_cash, day);

    // Backfill the index from the seeded bars, one point per seeded day.
    let mut market_index_history = Vec::with_capacity(INITIAL_HISTORY_LENGTH);
    for i in 0..INITIAL_HISTORY_LENGTH {
        let mean = stocks
            .iter()
            .map(|stock| stock.history[i].close.to_float())
            .sum::<f64>()
            / stocks.len() as f64;
        market_index_history.push(IndexPoint {
            day: (i + 1) as SimDay,
            price: mean,
        });
    }

    SimulationState {
        day,
        clock: GENESIS_CLOCK,
        stocks,
        investors,
        active_event: None,
        event_history: Vec::new(),
        market_index_history,
        next_corporate_event_day: news::genesis_corporate_event_day(rng, day),
        next_macro_event_day: news::genesis_macro_event_day(rng, day),
    }
}

fn seed_stock<R: Rng>(rng: &mut R, symbol: &str, name: &str, sector: Sector) -> Stock {
    let mut last_close = rng.random_range(5.0..10.0);
    let mut history = Vec::with_capacity(INITIAL_HISTORY_LENGTH);
    for i in 0..INITIAL_HISTORY_LENGTH {
        let open = last_close;
        let volume = rng.random_range(100_000.0_f64..1_000_000.0).round() as u64;
        // Down-bias point sits at 0.49, so seeded walks drift gently upward.
        let pct = (rng.random::<f64>() - 0.49) * 0.05;
        let close = (open * (1.0 + pct)).max(0.01);
        let high = open.max(close) * (1.0 + rng.random::<f64>() * 0.02);
        let low = open.min(close) * (1.0 - rng.random::<f64>() * 0.02);
        history.push(OhlcBar {
            day: (i + 1) as SimDay,
            open: Price::from_float(open),
            high: Price::from_float(high),
            low: Price::from_float(low),
            close: Price::from_float(close),
            volume,
        });
        last_close = close;
    }

    Stock {
        symbol: symbol.to_string(),
        name: name.to_string(),
        sector,
        history,
        delisted: false,
        shares_outstanding: rng.random_range(50_000_000.0_f64..200_000_000.0).round() as u64,
        eps: rng.random_range(1.0..5.0),
        corporate_ai: seed_corporate_ai(rng),
    }
}

fn seed_corporate_ai<R: Rng>(rng: &mut R) -> CorporateAi {
    let next_action_day = INITIAL_HISTORY_LENGTH as SimDay + 100 + rng.random_range(0..50);

    let mut weights = CorporateActionWeights::default();
    for action in [
        &mut weights.split,
        &mut weights.alliance,
        &mut weights.acquisition,
    ] {
        for neuron in CORPORATE_NEURONS {
            // Sparse wiring: each neuron joins roughly 60% of the actions.
            if rng.random::<f64>() > 0.4 {
                action.insert(neuron.to_string(), rng.random_range(-1.0..1.0));
            }
        }
    }

    CorporateAi {
        next_action_day,
        weights,
        learning_rate: rng.random_range(0.01..0.05),
    }
}

// =============================================================================
// Tests
// =============================================================================
