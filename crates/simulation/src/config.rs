//! Simulation configuration options.

use types::Cash;

/// Configuration for the simulation engine.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Seed for the engine's random stream. Two engines built with the same
    /// seed replay identical markets.
    pub seed: u64,

    /// Starting cash for every investor, human and fund alike.
    pub initial_cash: Cash,

    /// Enable verbose logging of day boundaries and events.
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_cash: Cash::from_float(100.0),
            verbose: false,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting cash per investor.
    pub fn with_initial_cash(mut self, cash: Cash) -> Self {
        self.initial_cash = cash;
        self
    }

    /// Enable verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
