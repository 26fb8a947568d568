//! The stateful facade embedding callers drive.
//!
//! [`Engine`] owns the state, the seeded RNG, and the article enricher, and
//! funnels every mutation through the pure operations in [`crate::runner`]
//! and [`crate::trades`]. Two engines built from the same config replay the
//! same market, tick for tick.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use news::{EventEnricher, TemplateEnricher};
use types::{Quantity, SECS_PER_DAY, SimDay, SimulationState, Timestamp};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::{runner, setup, snapshot, trades};

pub struct Engine {
    state: SimulationState,
    rng: StdRng,
    config: SimulationConfig,
    enricher: Box<dyn EventEnricher>,
}

impl Engine {
    /// Build a fresh market from the config's seed.
    pub fn new(config: SimulationConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let state = setup::build_initial_state(&config, &mut rng);
        Self {
            state,
            rng,
            config,
            enricher: Box::new(TemplateEnricher),
        }
    }

    /// Resume a previously snapshotted market.
    ///
    /// The RNG restarts from the config's seed: the market continues
    /// deterministically, but its noise tape after the snapshot differs
    /// from the uninterrupted run.
    pub fn from_state(state: SimulationState, config: SimulationConfig) -> Self {
        Self {
            state,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            enricher: Box::new(TemplateEnricher),
        }
    }

    /// Load a snapshot written by [`Engine::save`].
    pub fn load(path: impl AsRef<Path>, config: SimulationConfig) -> Result<Self> {
        Ok(Self::from_state(snapshot::load_state(path)?, config))
    }

    /// Swap in a different article enricher.
    pub fn with_enricher(mut self, enricher: Box<dyn EventEnricher>) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn day(&self) -> SimDay {
        self.state.day
    }

    pub fn clock(&self) -> Timestamp {
        self.state.clock
    }

    /// Advance the market by `seconds` of wall-clock time.
    pub fn advance(&mut self, seconds: u64) {
        let from_day = self.state.day;
        self.state = runner::advance_time(
            &self.state,
            seconds,
            &mut self.rng,
            self.enricher.as_ref(),
        );
        if self.config.verbose && self.state.day > from_day {
            self.log_settled_days(from_day);
        }
    }

    /// Advance by whole days.
    pub fn advance_days(&mut self, days: u32) {
        self.advance(days as u64 * SECS_PER_DAY);
    }

    /// Manual buy on behalf of `player_id`. Invalid orders change nothing.
    pub fn player_buy(&mut self, player_id: &str, symbol: &str, shares: Quantity) {
        self.state = trades::player_buy(&self.state, player_id, symbol, shares);
    }

    /// Manual sell on behalf of `player_id`. Invalid orders change nothing.
    pub fn player_sell(&mut self, player_id: &str, symbol: &str, shares: Quantity) {
        self.state = trades::player_sell(&self.state, player_id, symbol, shares);
    }

    /// Snapshot the current state to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        snapshot::save_state(&self.state, path)
    }

    fn log_settled_days(&self, from_day: SimDay) {
        let index = self
            .state
            .market_index_history
            .last()
            .map(|point| point.price)
            .unwrap_or(0.0);
        eprintln!(
            "[day {}] index {:.2} ({} settled)",
            self.state.day,
            index,
            self.state.day - from_day
        );
        if let Some(event) = &self.state.active_event {
            if event.day > from_day {
                eprintln!("[day {}] news: {}", event.day, event.article.headline);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
